//! Server startup utilities.

use meridian_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    __  ___          _     ___
   /  |/  /__  _____(_)___/ (_)___ _____
  / /|_/ / _ \/ ___/ / __  / / __ `/ __ \
 / /  / /  __/ /  / / /_/ / / /_/ / / / /
/_/  /_/\___/_/  /_/\__,_/_/\__,_/_/ /_/
    "#);
}

/// Lines describing where the server can be reached.
#[must_use]
pub fn startup_lines(config: &AppConfig) -> Vec<String> {
    let addr = config.server.addr();
    vec![
        format!("Environment: {}", config.app.environment),
        format!("Storage:     {}", config.database.backend),
        format!("REST API:    http://{addr}/api/v1"),
        format!("Health:      http://{addr}/health"),
        format!("API Docs:    http://{addr}/swagger-ui"),
    ]
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    for line in startup_lines(config) {
        info!("{}", line);
    }
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_config::StorageBackend;

    #[test]
    fn test_startup_lines_use_configured_address() {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 3000;
        config.database.backend = StorageBackend::Memory;

        let lines = startup_lines(&config);
        assert!(lines.iter().any(|l| l.ends_with("http://127.0.0.1:3000/api/v1")));
        assert!(lines.iter().any(|l| l.ends_with("memory")));
    }

    #[test]
    fn test_print_banner_does_not_panic() {
        print_banner();
        print_startup_info(&AppConfig::default());
    }
}
