use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::api::krx::KrxClient;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_STOCK_ISIN: &str = "KR7003230000";
pub const DEFAULT_STOCK_NAME: &str = "삼양식품";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_FONT_PATH: &str = "static/fonts/NanumGothic.ttf";

/// Sub-directory of the static root that receives chart images
pub const IMAGES_SUBDIR: &str = "images";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set in environment or .env file")]
    Missing(&'static str),
    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Process configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub service_key: String,
    pub api_base_url: String,
    pub stock_isin: String,
    pub stock_name: String,
    pub static_dir: PathBuf,
    pub font_path: PathBuf,
    pub debug: bool,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let debug = match get("APP_DEBUG") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid {
                name: "APP_DEBUG",
                value: raw,
            })?,
            None => true,
        };

        let service_key = get("DATA_GO_KR_SERVICE_KEY")
            .ok_or(ConfigError::Missing("DATA_GO_KR_SERVICE_KEY"))?;

        Ok(Self {
            host: "0.0.0.0".to_string(),
            port,
            service_key,
            api_base_url: get("KRX_API_BASE_URL")
                .unwrap_or_else(|| KrxClient::DEFAULT_BASE_URL.to_string()),
            stock_isin: get("STOCK_ISIN").unwrap_or_else(|| DEFAULT_STOCK_ISIN.to_string()),
            stock_name: get("STOCK_NAME").unwrap_or_else(|| DEFAULT_STOCK_NAME.to_string()),
            static_dir: PathBuf::from(
                get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            ),
            font_path: PathBuf::from(
                get("FONT_PATH").unwrap_or_else(|| DEFAULT_FONT_PATH.to_string()),
            ),
            debug,
        })
    }

    /// Directory the chart images are written to
    pub fn images_dir(&self) -> PathBuf {
        self.static_dir.join(IMAGES_SUBDIR)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("DATA_GO_KR_SERVICE_KEY", "key")])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.stock_isin, "KR7003230000");
        assert_eq!(config.stock_name, "삼양식품");
        assert_eq!(config.api_base_url, KrxClient::DEFAULT_BASE_URL);
        assert_eq!(config.images_dir(), PathBuf::from("static/images"));
        assert!(config.debug);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATA_GO_KR_SERVICE_KEY", "key"),
            ("PORT", "9090"),
            ("APP_DEBUG", "false"),
            ("STATIC_DIR", "/srv/public"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9090);
        assert!(!config.debug);
        assert_eq!(config.images_dir(), PathBuf::from("/srv/public/images"));
    }

    #[test]
    fn test_missing_service_key() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATA_GO_KR_SERVICE_KEY")));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[
            ("DATA_GO_KR_SERVICE_KEY", "key"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DATA_GO_KR_SERVICE_KEY", "key"),
            ("PORT", "  "),
        ]))
        .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
