use component_log::{ErrorInfo, Logger};
use serde_json::json;

fn main() {
    // Defaults come from APP_ENV / LOG_LEVEL / LOG_STRINGIFY.
    let logger = Logger::new("checkout");

    logger.debug("loading cart");
    logger.info(json!({"message": "cart loaded", "items": 3}));

    let req = json!({
        "id": "req-17",
        "method": "POST",
        "url": "/checkout",
        "headers": {"content-type": "application/json"},
        "httpVersion": "1.1"
    });
    logger.warn_with_request("payment provider slow", &req);

    let error = ErrorInfo::new(std::io::Error::new(
        std::io::ErrorKind::TimedOut,
        "payment provider timed out",
    ));
    logger.error_with_request(&error, &req);
    // Same error, same id.
    logger.fatal(&error);
    logger.flush();
}
