//! Structured logging
//!
//! One global `tracing` subscriber, installed at startup. `RUST_LOG` wins over
//! the configured level when set.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogConfig, LogFormat};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber; later calls are no-ops
pub fn init(config: &LogConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let layer = match config.format {
            LogFormat::Json => fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(false)
                .boxed(),
            LogFormat::Pretty => fmt::layer().with_target(true).boxed(),
        };

        // Another subscriber (e.g. a test harness) may already be installed.
        if tracing_subscriber::registry()
            .with(layer.with_filter(filter))
            .try_init()
            .is_err()
        {
            tracing::debug!("global tracing subscriber already set; keeping it");
        }

        tracing::debug!(level = %config.level, format = ?config.format, "logging initialized");
    });
}
