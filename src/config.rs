use dioxus_logger::tracing::Level;

use crate::error::config::ConfigError;

/// Runtime configuration loaded from the environment.
pub struct Config {
    /// SQLite connection string, e.g. `sqlite://authentcare.db?mode=rwc`
    pub database_url: String,
    /// Confirmation secret required by bulk version deletion
    pub bulk_delete_secret: String,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &str| {
            lookup(var)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
        };

        let log_level = match lookup("LOG_LEVEL") {
            Some(value) => value
                .parse::<Level>()
                .map_err(|err| ConfigError::InvalidEnvValue {
                    var: "LOG_LEVEL".to_string(),
                    reason: err.to_string(),
                })?,
            None => Level::INFO,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bulk_delete_secret: required("BULK_DELETE_SECRET")?,
            log_level,
        })
    }
}
