//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod calendar;
pub mod database;
pub mod logging;
pub mod share;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::calendar::CalendarConfig;
pub use self::database::{DatabaseConfig, StoreBackend};
pub use self::logging::LoggingConfig;
pub use self::share::ShareConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Bearer token verification settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Shared link settings.
    #[serde(default)]
    pub share: ShareConfig,
    /// Calendar export settings.
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with the `config/{env}.toml` overlay and
    /// environment variables prefixed with `EXPLORER_` (nested keys use `__`,
    /// e.g. `EXPLORER_DATABASE__URL`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("EXPLORER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.backend, StoreBackend::Postgres);
        assert_eq!(config.share.public_base_url, "http://localhost:3000");
        assert_eq!(config.calendar.default_duration_minutes, 120);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"share": {"public_base_url": "https://trips.example"}}"#)
                .unwrap();
        assert_eq!(config.share.public_base_url, "https://trips.example");
        assert_eq!(config.share.token_bytes, 32);
    }
}
