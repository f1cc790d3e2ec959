use crate::adaptive::AdaptiveConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub adaptive: AdaptiveConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            log_level,
            adaptive: AdaptiveConfig::from_env(),
        }
    }

    /// Reads `.env` if present, then the process environment, and validates.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let config = Self::from_env();
        config.adaptive.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            adaptive: AdaptiveConfig::default(),
        }
    }
}
