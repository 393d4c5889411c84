use serde_json::json;

use log_fanout::level::Level;
use log_fanout::logger::{Logger, LoggerConfig};

#[tokio::main]
async fn main() {
    let logger = Logger::new(LoggerConfig {
        service_name: Some("checkout".to_string()),
        ..LoggerConfig::default()
    });

    logger.info("service started");
    logger.log_with(Level::Warn, "cache miss ratio high", json!({"ratio": 0.42}));
    logger.info(json!({"event": "order_placed", "order_id": 1234}));

    if let Err(e) = logger.log_record(json!({
        "level": "error",
        "message": "payment declined",
        "order_id": 1234,
    })) {
        eprintln!("rejected record: {}", e);
    }

    // Give the spawned deliveries time to reach stdout.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
}
