//! HTTP transport: JSON and raw-byte GETs under the global request budget.
//!
//! Thin wrapper over a shared `reqwest::Client`. Every call takes a budget
//! slot before the request is issued and keeps it until the body has been
//! consumed. Failures come back as [`FetchError`] values scoped to the one
//! resource; there are no automatic retries.

use crate::budget::GlobalRequestBudget;
use crate::error::FetchError;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Async HTTP client shared by every fetcher in a run. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    budget: Arc<GlobalRequestBudget>,
}

impl Transport {
    /// Build a transport with a per-request timeout over the given budget.
    pub fn new(budget: Arc<GlobalRequestBudget>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("oam/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, budget })
    }

    /// The admission gate this transport draws slots from.
    pub fn budget(&self) -> &GlobalRequestBudget {
        &self.budget
    }

    /// GET `url` and decode the body as JSON into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let _slot = self.budget.acquire().await;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.json().await.map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// GET `url` and return the raw body bytes (media downloads).
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let _slot = self.budget.acquire().await;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        Ok(body.to_vec())
    }
}
