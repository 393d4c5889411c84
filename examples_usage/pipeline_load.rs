use std::sync::Arc;
use std::time::Instant;
use tokio::time::{sleep, Duration};

use log_fanout::logger::{Logger, LoggerConfig};
use log_fanout::noop_sink::NoopSink;

#[tokio::main]
async fn main() {
    let logger = Logger::new(LoggerConfig {
        sinks: vec![Arc::new(NoopSink)],
        use_default_console_sink: false,
        ..LoggerConfig::default()
    });

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        logger.info(serde_json::json!({"iteration": i, "message": "load test entry"}));
    }

    let elapsed = start.elapsed();
    println!(
        "normalized and dispatched {} records in {:?} (~{:.0} rec/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );

    // Give the spawned deliveries a little time to drain.
    sleep(Duration::from_secs(1)).await;
}
