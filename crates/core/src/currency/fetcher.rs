//! Online rate-quote provider client.
//!
//! The provider is an external collaborator: given a base currency it
//! returns a map of target currency -> rate. Every failure mode (network,
//! timeout, non-success status, malformed body) is equivalent to the caller,
//! which substitutes the fallback table.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use vantra_shared::config::RatesConfig;
use vantra_shared::types::CurrencyCode;

/// Errors from the online rate provider.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Request timed out or failed at the transport level.
    #[error("rate provider unreachable: {0}")]
    Transport(String),

    /// Provider answered with a non-success status.
    #[error("rate provider returned status {0}")]
    Status(u16),

    /// Provider body could not be parsed into a rate map.
    #[error("malformed rate provider response: {0}")]
    MalformedResponse(String),
}

impl From<FetchError> for vantra_shared::AppError {
    fn from(err: FetchError) -> Self {
        Self::ExternalService(err.to_string())
    }
}

/// Fetches quotes for a base currency from an external provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateFetcher: Send + Sync {
    /// Fetches target-currency -> rate quotes for `base`.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` when the provider cannot supply quotes; the
    /// caller treats all variants identically.
    async fn fetch(&self, base: &CurrencyCode) -> Result<HashMap<CurrencyCode, Decimal>, FetchError>;
}

/// Wire shape of the provider response.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    rates: HashMap<String, Decimal>,
}

/// Extracts a validated rate map from a provider response body.
///
/// Entries with invalid currency codes or non-positive rates are dropped
/// rather than failing the whole fetch.
fn parse_quotes(body: &str) -> Result<HashMap<CurrencyCode, Decimal>, FetchError> {
    let response: QuoteResponse =
        serde_json::from_str(body).map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    Ok(response
        .rates
        .into_iter()
        .filter_map(|(code, rate)| {
            let code = CurrencyCode::new(&code).ok()?;
            (rate > Decimal::ZERO).then_some((code, rate))
        })
        .collect())
}

/// HTTP implementation of [`RateFetcher`] with a bounded request timeout.
#[derive(Debug, Clone)]
pub struct HttpRateFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRateFetcher {
    /// Creates a fetcher from the rates configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &RatesConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.provider_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RateFetcher for HttpRateFetcher {
    async fn fetch(&self, base: &CurrencyCode) -> Result<HashMap<CurrencyCode, Decimal>, FetchError> {
        let url = format!("{}/{}", self.base_url, base);
        tracing::debug!(base = %base, "fetching rate quotes");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        parse_quotes(&body)
    }
}
