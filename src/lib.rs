pub mod level;
pub mod record;
pub mod normalize;
pub mod enrich;
pub mod sink;
pub mod dispatch;
pub mod logger;

pub mod console;
pub mod memory;
pub mod noop_sink;

#[cfg(feature = "http")]
pub mod http;

pub mod layer;
