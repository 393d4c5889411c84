use std::sync::Arc;

use serde_json::json;

use log_fanout::http::{HttpEndpoint, HttpSink};
use log_fanout::level::Level;
use log_fanout::logger::{Logger, LoggerConfig};

#[tokio::main]
async fn main() {
    let endpoint = HttpEndpoint {
        host: "127.0.0.1".to_string(),
        port: 8080,
        path: "ingest/logs".to_string(),
        use_tls: false,
    };
    let sink = Arc::new(HttpSink::from_endpoint(&endpoint).with_min_level(Level::Warn));

    let logger = Logger::new(LoggerConfig {
        sinks: vec![sink],
        service_name: Some("demo".to_string()),
        ..LoggerConfig::default()
    });

    logger.error(("upstream timed out", json!({"upstream": "billing", "elapsed_ms": 5000})));
    logger.info("only the console sees this");

    // Delivery failures (no collector running) land on the error
    // channel, not in this call path.
    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
}
