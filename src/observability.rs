//! # Observability Module
//!
//! Logging setup for the binary and demos. Library code only ever emits
//! through the `log` facade and `tracing` spans; this module picks the sink.

use crate::config::LogFormat;
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Install the global logger for `format`.
///
/// Returns whether a logger was installed. Calling it again once a logger is
/// in place changes nothing.
pub fn init_logging(format: LogFormat) -> bool {
    match format {
        LogFormat::Plain => env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(DEFAULT_FILTER),
        )
        .try_init()
        .is_ok(),
        LogFormat::Json => {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
            let json_layer = fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_writer(io::stderr);
            // also bridges `log` records into tracing
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
                .is_ok()
        }
    }
}
