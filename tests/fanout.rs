//! Dispatcher behavior: gating, fan-out, failure isolation, the bridge
//! layer and the service tag seen end to end.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use log_fanout::level::Level;
use log_fanout::logger::{Logger, LoggerConfig};
use log_fanout::memory::MemorySink;

#[tokio::test]
async fn records_below_the_threshold_reach_no_sink() {
    let memory = MemorySink::new();
    let logger = Logger::new(LoggerConfig {
        sinks: vec![Arc::new(memory.clone())],
        use_default_console_sink: false,
        min_level: Some(Level::Info),
        ..LoggerConfig::default()
    });

    logger.debug("filtered out");
    logger.silly("filtered out");
    logger.info("allowed");

    // The allowed record arriving proves the gated ones were never
    // dispatched at all.
    assert!(common::wait_for(|| memory.len() == 1).await);
    assert_eq!(memory.records()[0].message_text(), Some("allowed"));
}

#[tokio::test]
async fn per_sink_minimum_level_is_scoped_to_that_sink() {
    let everything = MemorySink::new();
    let errors_only = MemorySink::new().with_min_level(Level::Error);
    let logger = Logger::new(LoggerConfig {
        sinks: vec![Arc::new(everything.clone()), Arc::new(errors_only.clone())],
        use_default_console_sink: false,
        ..LoggerConfig::default()
    });

    logger.info("routine");
    logger.error("broken");

    assert!(common::wait_for(|| everything.len() == 2).await);
    assert!(common::wait_for(|| errors_only.len() == 1).await);
    assert_eq!(errors_only.records()[0].level, Level::Error);
}

#[tokio::test]
async fn silent_mode_suppresses_all_delivery() {
    let memory = MemorySink::new();
    let (on_error, errors) = common::counting_error_handler();
    let logger = Logger::new(LoggerConfig {
        sinks: vec![Arc::new(memory.clone())],
        use_default_console_sink: false,
        silent: true,
        on_error: Some(on_error),
        ..LoggerConfig::default()
    });

    logger.info("into the void");
    logger.error("also into the void");

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(memory.is_empty());
    assert_eq!(errors.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn sink_failures_are_isolated_and_counted() {
    let failing = common::FailingSink::new();
    let attempts = Arc::clone(&failing.attempts);
    let memory = MemorySink::new();
    let (on_error, errors) = common::counting_error_handler();

    let logger = Logger::new(LoggerConfig {
        sinks: vec![Arc::new(failing), Arc::new(memory.clone())],
        use_default_console_sink: false,
        on_error: Some(on_error),
        ..LoggerConfig::default()
    });

    for i in 0..3 {
        logger.info(json!({"seq": i}));
    }

    // The healthy sink still receives every record, and the error
    // channel fires exactly once per failed delivery.
    assert!(common::wait_for(|| memory.len() == 3).await);
    assert!(common::wait_for(|| errors.load(Ordering::SeqCst) == 3).await);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn configured_service_name_never_overrides_the_caller() {
    let memory = MemorySink::new();
    let logger = Logger::new(LoggerConfig {
        sinks: vec![Arc::new(memory.clone())],
        use_default_console_sink: false,
        service_name: Some("svc".to_string()),
        ..LoggerConfig::default()
    });

    logger.info(json!({"a": 1}));
    logger.info(json!({"a": 2, "service_name": "other"}));

    assert!(common::wait_for(|| memory.len() == 2).await);
    let records = memory.records();
    let tagged = records
        .iter()
        .find(|r| r.field("a") == Some(&json!(1)))
        .unwrap();
    let supplied = records
        .iter()
        .find(|r| r.field("a") == Some(&json!(2)))
        .unwrap();

    assert_eq!(tagged.service_name.as_deref(), Some("svc"));
    assert_eq!(supplied.service_name.as_deref(), Some("other"));
    assert!(!supplied
        .serialized
        .as_deref()
        .unwrap()
        .contains(r#""service_name":"svc""#));
}

#[tokio::test]
async fn sinks_can_be_added_and_removed_at_runtime() {
    let first = MemorySink::new();
    let logger = Logger::new(LoggerConfig {
        sinks: vec![Arc::new(first.clone())],
        use_default_console_sink: false,
        ..LoggerConfig::default()
    });

    logger.info("one");
    assert!(common::wait_for(|| first.len() == 1).await);

    let second = MemorySink::new();
    logger.add_sink(Arc::new(second.clone()));
    logger.info("two");
    assert!(common::wait_for(|| second.len() == 1).await);
    assert!(common::wait_for(|| first.len() == 2).await);

    logger.remove_sink("memory");
    logger.info("three");
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 1);
}

#[tokio::test]
async fn tracing_events_flow_through_the_bridge() {
    use log_fanout::layer::FanoutLayer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    let memory = MemorySink::new();
    let logger = common::capture_logger(&memory);
    let subscriber = Registry::default().with(FanoutLayer::new(logger));

    tracing::subscriber::with_default(subscriber, || {
        tracing::error!(user_id = 42, "authentication failed");
    });

    assert!(common::wait_for(|| memory.len() == 1).await);
    let record = memory.records()[0].clone();
    assert_eq!(record.level, Level::Error);
    assert_eq!(record.message_text(), Some("authentication failed"));
    assert_eq!(record.field("user_id"), Some(&json!(42)));
}
