//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// The filter to install: `RUST_LOG` when set and valid, else `level`.
pub fn env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| Error::config(format!("Invalid log level '{level}': {e}")))
}

/// Install the global fmt subscriber. `log` records are forwarded to it.
pub fn init_logging(level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level)?)
        .with_target(true)
        .try_init()
        .map_err(|e| Error::config(format!("Logging already initialised: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_accepts_directives() {
        assert!(env_filter("info").is_ok());
        assert!(env_filter("warn,vinyl_api=debug").is_ok());
    }

    #[test]
    fn test_env_filter_rejects_garbage() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(env_filter("vinyl=loud").is_err());
        }
    }
}
