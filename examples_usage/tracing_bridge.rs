use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

use log_fanout::layer::FanoutLayer;
use log_fanout::logger::Logger;

#[tokio::main]
async fn main() {
    let logger = Logger::with_defaults();
    let subscriber = Registry::default().with(FanoutLayer::new(logger));
    tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");

    info!("bridge example started");
    error!(user_id = 42, reason = "invalid password", "authentication failed");

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
}
