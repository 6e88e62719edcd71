//! Live fleet statistics client.
//!
//! One GET against the dealership backend; the only field the page
//! consumes is `total`. Everything about this path degrades gracefully:
//! a dead backend, a timeout, or a malformed body leaves the static
//! counters untouched.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Fleet stats request errors
#[derive(Error, Debug)]
pub enum FleetStatsError {
    #[error("invalid stats endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("stats request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("stats request timed out")]
    Timeout,
}

pub type FleetStatsResult<T> = Result<T, FleetStatsError>;

/// Aggregate counts reported by the backend. Only `total` is consumed;
/// the breakdown fields are tolerated for completeness and a missing
/// `total` means no update is attempted.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetStats {
    pub total: Option<u64>,
    #[serde(default)]
    pub available: u64,
    #[serde(default)]
    pub rented: u64,
    #[serde(default)]
    pub sold: u64,
}

/// Client for the fleet stats endpoint
pub struct FleetStatsService {
    client: reqwest::Client,
    endpoint: Url,
}

impl FleetStatsService {
    /// Build a service from a base URL and endpoint path.
    pub fn new(base_url: &str, path: &str) -> FleetStatsResult<Self> {
        let endpoint = Url::parse(base_url)?.join(path)?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch current fleet statistics.
    pub async fn fetch(&self) -> FleetStatsResult<FleetStats> {
        let response = tokio::time::timeout(
            Duration::from_secs(10),
            self.client.get(self.endpoint.clone()).send(),
        )
        .await
        .map_err(|_| FleetStatsError::Timeout)??;

        let stats: FleetStats = response.error_for_status()?.json().await?;
        tracing::debug!(
            "fleet stats: total={:?} available={} rented={} sold={}",
            stats.total,
            stats.available,
            stats.rented,
            stats.sold
        );
        Ok(stats)
    }
}
