use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::calculator::{FeeSchedule, DUTY_RATE, FREE_SHIPPING_THRESHOLD, SHIPPING_COST};

pub const DEFAULT_CONFIG_FILE: &str = "landed_cost.toml";
pub const ENV_PREFIX: &str = "LANDED_COST";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";
const DEFAULT_RATE_URL: &str = "https://open.er-api.com/v6/latest/USD";
const DEFAULT_CATALOG_BASE_URL: &str = "https://www.supremecommunity.com";
const DEFAULT_PROXY_PREFIX: &str = "https://r.jina.ai/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub user_agent: String,
    pub request_timeout_seconds: u64,
    pub refresh_interval_seconds: u64,
    pub exchange_rate_api_url: String,
    pub catalog: CatalogConfig,
    pub fees: FeeSchedule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Origin of the droplist site, also used to absolutize image paths.
    pub base_url: String,
    /// Prepended to an absolute URL to route it through the text proxy.
    pub proxy_prefix: String,
    pub use_proxy: bool,
    pub try_json_variants: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            proxy_prefix: DEFAULT_PROXY_PREFIX.to_string(),
            use_proxy: true,
            try_json_variants: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_seconds: 25,
            refresh_interval_seconds: 300,
            exchange_rate_api_url: DEFAULT_RATE_URL.to_string(),
            catalog: CatalogConfig::default(),
            fees: FeeSchedule::default(),
        }
    }
}

impl Config {
    /// Layer defaults, an optional TOML file and `LANDED_COST__*` environment variables.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let file = path.unwrap_or(DEFAULT_CONFIG_FILE);

        let settings = config::Config::builder()
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("request_timeout_seconds", 25_i64)?
            .set_default("refresh_interval_seconds", 300_i64)?
            .set_default("exchange_rate_api_url", DEFAULT_RATE_URL)?
            .set_default("catalog.base_url", DEFAULT_CATALOG_BASE_URL)?
            .set_default("catalog.proxy_prefix", DEFAULT_PROXY_PREFIX)?
            .set_default("catalog.use_proxy", true)?
            .set_default("catalog.try_json_variants", true)?
            .set_default("fees.duty_rate", DUTY_RATE)?
            .set_default("fees.shipping_cost", SHIPPING_COST)?
            .set_default("fees.free_shipping_threshold", FREE_SHIPPING_THRESHOLD)?
            .add_source(config::File::with_name(file).required(path.is_some()))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("Failed to read configuration from {}", file))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_fee_constants() {
        let config = Config::default();
        assert_eq!(config.fees.duty_rate, 0.15);
        assert_eq!(config.fees.shipping_cost, 20.0);
        assert_eq!(config.fees.free_shipping_threshold, 250.0);
        assert!(config.catalog.use_proxy);
    }

    #[test]
    fn file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("landed_cost_test_{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "refresh_interval_seconds = 60\n[catalog]\nuse_proxy = false\n[fees]\nshipping_cost = 25.0"
        )
        .unwrap();

        let config = Config::load(path.to_str()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.refresh_interval_seconds, 60);
        assert!(!config.catalog.use_proxy);
        assert!(config.catalog.try_json_variants);
        assert_eq!(config.fees.shipping_cost, 25.0);
        assert_eq!(config.fees.duty_rate, 0.15);
        assert_eq!(config.exchange_rate_api_url, DEFAULT_RATE_URL);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(Config::load(Some("/nonexistent/landed_cost.toml")).is_err());
    }
}
