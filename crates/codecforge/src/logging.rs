//! Installing a `tracing` subscriber for codecforge's diagnostics.
//!
//! The library crates only emit events: grouped codecs log `debug!` when a
//! component fails and `trace!` on success. Nothing is printed until a
//! subscriber is installed, either by the application itself or through
//! [`init`].

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::CodecforgeError;

/// Subscriber settings for [`init`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directives, e.g. `"info"` or `"codecforge_core=debug"`.
    /// `RUST_LOG` takes precedence when set.
    pub filter: String,

    /// Colored output.
    pub ansi: bool,

    /// Print the event's target (module path).
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    fn env_filter(&self) -> Result<EnvFilter, CodecforgeError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.filter)
                .map_err(|e| CodecforgeError::Logging(format!("bad filter '{}': {e}", self.filter))),
        }
    }
}

/// Installs a global `fmt` subscriber.
///
/// # Errors
/// [`CodecforgeError::Logging`] if the filter does not parse or a global
/// subscriber is already installed.
pub fn init(config: &LogConfig) -> Result<(), CodecforgeError> {
    let filter = config.env_filter()?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(config.with_target)
        .try_init()
        .map_err(|e| CodecforgeError::Logging(e.to_string()))?;
    tracing::debug!(filter = %config.filter, "logging initialized");
    Ok(())
}
