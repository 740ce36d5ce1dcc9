//! Config validation: values the server cannot start with.

use crate::config::AppConfig;
use crate::error::ConfigError;

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.app.port == 0 {
        return Err(ConfigError::Invalid("app.port must be non-zero".into()));
    }
    if config.database.url.is_none() {
        if config.database.host.trim().is_empty() {
            return Err(ConfigError::Invalid("database.host is required".into()));
        }
        if config.database.name.trim().is_empty() {
            return Err(ConfigError::Invalid("database.name is required".into()));
        }
    }
    if config.database.max_connections == 0 {
        return Err(ConfigError::Invalid("database.max_connections must be at least 1".into()));
    }
    if config.database.min_connections > config.database.max_connections {
        return Err(ConfigError::Invalid(format!(
            "database.min_connections ({}) exceeds max_connections ({})",
            config.database.min_connections, config.database.max_connections
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let mut cfg = AppConfig::default();
        cfg.database.min_connections = 10;
        cfg.database.max_connections = 5;
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn database_name_not_required_with_url() {
        let mut cfg = AppConfig::default();
        cfg.database.name.clear();
        assert!(validate(&cfg).is_err());
        cfg.database.url = Some("postgres://localhost/cars".into());
        assert!(validate(&cfg).is_ok());
    }
}
