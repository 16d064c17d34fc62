use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info};

use crate::error::{Error, Result};

fn is_usable_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

/// Something that can quote the current USD to CAD rate.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn usd_to_cad(&self) -> Result<f64>;
}

/// Live rate from a public exchange-rate endpoint. Every call hits the network.
pub struct ExchangeRateClient {
    client: Client,
    url: String,
}

impl ExchangeRateClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn fetch_cad_rate(&self) -> Result<f64> {
        info!("Fetching USD to CAD exchange rate");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::RateUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RateUnavailable(format!("HTTP error {}", status)));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| Error::RateUnavailable(e.to_string()))?;

        let rate = data
            .get("rates")
            .and_then(|rates| rates.get("CAD"))
            .and_then(Value::as_f64)
            .filter(|rate| is_usable_rate(*rate))
            .ok_or_else(|| Error::RateUnavailable("CAD rate unavailable".to_string()))?;

        info!("Successfully fetched USD to CAD rate: {}", rate);
        Ok(rate)
    }
}

#[async_trait]
impl RateSource for ExchangeRateClient {
    async fn usd_to_cad(&self) -> Result<f64> {
        self.fetch_cad_rate().await.map_err(|e| {
            error!("Failed to fetch exchange rate: {}", e);
            e
        })
    }
}

/// A rate known up front. Held to the same finite, positive rule as a live rate.
#[derive(Debug, Clone, Copy)]
pub struct FixedRate(pub f64);

#[async_trait]
impl RateSource for FixedRate {
    async fn usd_to_cad(&self) -> Result<f64> {
        if is_usable_rate(self.0) {
            Ok(self.0)
        } else {
            Err(Error::RateUnavailable(format!("invalid fixed rate {}", self.0)))
        }
    }
}
