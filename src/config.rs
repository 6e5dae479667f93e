use std::env;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::application::order_service::PricingConfig;

pub const DEFAULT_TAX_RATE: &str = "0.07";
pub const DEFAULT_SHIPPING_FEE: &str = "21.5";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub pricing: PricingConfig,
}

impl Settings {
    /// Read settings from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));
        let parsed = |name: &'static str, default: &str| -> Result<BigDecimal, ConfigError> {
            let value = lookup(name).unwrap_or_else(|| default.to_string());
            BigDecimal::from_str(&value).map_err(|_| ConfigError::Invalid { name, value })
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => 8080,
        };

        Ok(Settings {
            database_url: required("DATABASE_URL")?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            jwt_secret: required("JWT_SECRET")?,
            pricing: PricingConfig {
                tax_rate: parsed("TAX_RATE", DEFAULT_TAX_RATE)?,
                default_shipping_fee: parsed("SHIPPING_FEE", DEFAULT_SHIPPING_FEE)?,
            },
        })
    }
}
