//! Environment-driven database settings

use serde::Deserialize;

use crate::pool::DatabaseConfig;

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

/// Database settings loaded from the environment
///
/// Variables are read with the `FINANCE_` prefix, e.g. `FINANCE_DATABASE_URL`
/// and `FINANCE_MAX_CONNECTIONS`. A local `.env` file is honoured when
/// present.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection string
    pub database_url: String,
    /// Maximum pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum pool size
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

impl DatabaseSettings {
    /// Loads settings from the environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .add_source(config::Environment::with_prefix("FINANCE"))
            .build()?
            .try_deserialize()
    }

    /// Converts the settings into a pool configuration
    pub fn pool_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.database_url)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_config_carries_settings() {
        let settings = DatabaseSettings {
            database_url: "postgres://localhost/greenpages_test".to_string(),
            max_connections: 7,
            min_connections: 1,
        };

        let config = settings.pool_config();
        assert_eq!(config.url, "postgres://localhost/greenpages_test");
        assert_eq!(config.max_connections, 7);
        assert_eq!(config.min_connections, 1);
    }
}
