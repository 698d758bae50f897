//! Tracing subscriber setup.

use meridian_config::{LogFormat, ObservabilityConfig};
use meridian_core::{MeridianError, MeridianResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the log filter. `RUST_LOG` wins over the configured level.
pub fn build_filter(config: &ObservabilityConfig) -> MeridianResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_level).map_err(|e| {
        MeridianError::Configuration(format!(
            "Invalid log level '{}': {e}",
            config.log_level
        ))
    })
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> MeridianResult<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
    };

    result.map_err(|e| MeridianError::Configuration(format!("Failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_directives() {
        let config = ObservabilityConfig {
            log_level: "meridian=debug,tower_http=info,warn".to_string(),
            ..ObservabilityConfig::default()
        };
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = ObservabilityConfig {
            log_level: "meridian=loud".to_string(),
            ..ObservabilityConfig::default()
        };
        assert!(build_filter(&config).is_err());
    }
}
