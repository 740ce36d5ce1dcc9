//! Load config from a JSON file, then apply environment overrides.

use crate::config::{validate, AppConfig, LogFormat};
use crate::error::ConfigError;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Load `CONFIG_PATH` (default `config.json`), overlay env vars, validate.
/// A missing default file is not an error; a missing explicit `CONFIG_PATH` is.
pub fn load() -> Result<AppConfig, ConfigError> {
    let explicit = std::env::var("CONFIG_PATH").ok();
    let path = explicit.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.into());
    let mut config = if explicit.is_some() || Path::new(&path).exists() {
        load_file(&path)?
    } else {
        tracing::debug!(path = %path, "no config file, using defaults");
        AppConfig::default()
    };
    apply_env(&mut config, |key| std::env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

pub fn load_file(path: &str) -> Result<AppConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    parse(&raw)
}

pub fn parse(raw: &str) -> Result<AppConfig, ConfigError> {
    Ok(serde_json::from_str(raw)?)
}

/// Overlay values from `lookup` (normally the process environment) onto `config`.
pub fn apply_env<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("APP_NAME") {
        config.app.name = v;
    }
    if let Some(v) = lookup("APP_PORT") {
        config.app.port = parse_var("APP_PORT", v)?;
    }
    if let Some(v) = lookup("DB_HOST") {
        config.database.host = v;
    }
    if let Some(v) = lookup("DB_PORT") {
        config.database.port = parse_var("DB_PORT", v)?;
    }
    if let Some(v) = lookup("DB_USER") {
        config.database.user = v;
    }
    if let Some(v) = lookup("DB_PASSWORD") {
        config.database.password = v;
    }
    if let Some(v) = lookup("DB_NAME") {
        config.database.name = v;
    }
    if let Some(v) = lookup("DATABASE_URL") {
        config.database.url = Some(v);
    }
    if let Some(v) = lookup("TRACING_HOST") {
        config.tracing.host = v;
    }
    if let Some(v) = lookup("TRACING_PORT") {
        config.tracing.port = parse_var("TRACING_PORT", v)?;
    }
    if let Some(v) = lookup("LOG_FORMAT") {
        config.log.format = match v.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => return Err(ConfigError::Env { key: "LOG_FORMAT", value: v }),
        };
    }
    Ok(())
}

fn parse_var<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { key, value })
}
