//! 可观测性

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 日志：默认 info，可通过 RUST_LOG 覆盖
pub fn init() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();
}
