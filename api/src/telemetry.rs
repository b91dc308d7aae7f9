//! Tracing subscriber bootstrap.
//!
//! `RUST_LOG` wins over the configured level when it is set.

use dm_shared::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use tracing_subscriber::util::TryInitError;

/// Install the global subscriber for the configured format
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
    }
}
