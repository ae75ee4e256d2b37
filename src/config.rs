use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8501";
const DEFAULT_DATABASE_URL: &str = "sqlite://hr_system.db?mode=rwc";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub seed_sample_data: bool,
    /// Request body cap for uploads. `None` leaves uploads unbounded.
    pub max_upload_bytes: Option<usize>,
    pub log_json: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            database_url: get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            seed_sample_data: get_env_parse_or("SEED_SAMPLE_DATA", true)?,
            max_upload_bytes: get_env_parse_opt("MAX_UPLOAD_BYTES")?,
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            seed_sample_data: true,
            max_upload_bytes: None,
            log_json: false,
        }
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn get_env_parse_opt<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(None),
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Ok(get_env_parse_opt(name)?.unwrap_or(default))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_upload_limit_is_a_config_error() {
        env::set_var("CT_TEST_BAD_LIMIT", "lots");
        let err = get_env_parse_opt::<usize>("CT_TEST_BAD_LIMIT").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        env::remove_var("CT_TEST_BAD_LIMIT");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        env::set_var("CT_TEST_BLANK_ADDR", "  ");
        assert_eq!(get_env_or("CT_TEST_BLANK_ADDR", "0.0.0.0:1"), "0.0.0.0:1");
        assert_eq!(get_env_parse_or("CT_TEST_UNSET_FLAG", false).unwrap(), false);
        env::remove_var("CT_TEST_BLANK_ADDR");
    }
}
