//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    sessions::SessionsConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod sessions;

/// Dealer portal JSON API server configuration
#[derive(Debug, Parser)]
#[command(name = "portal-json", about = "Dealer portal JSON API server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Tracing and request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session expiry settings.
    #[command(flatten)]
    pub sessions: SessionsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // A missing .env file is fine.
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_when_only_database_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "portal-json",
            "--database-url",
            "postgresql://portal_app@localhost/portal",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8740");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.server.max_request_bytes, 1_048_576);
        assert_eq!(
            config.sessions.policy().duration,
            Duration::from_secs(20 * 60)
        );
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);

        Ok(())
    }

    #[test]
    fn session_timings_can_be_overridden() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "portal-json",
            "--database-url",
            "postgresql://portal_app@localhost/portal",
            "--session-duration-seconds",
            "600",
            "--session-warning-lead-seconds",
            "60",
        ])?;

        let policy = config.sessions.policy();

        assert_eq!(policy.duration, Duration::from_secs(600));
        assert_eq!(policy.warning_lead, Duration::from_secs(60));
        assert_eq!(policy.activity_throttle, Duration::from_secs(30));

        Ok(())
    }

    #[test]
    fn database_url_is_required() {
        let result = ServerConfig::try_parse_from(["portal-json"]);

        assert!(result.is_err(), "parsing without a database url must fail");
    }
}
