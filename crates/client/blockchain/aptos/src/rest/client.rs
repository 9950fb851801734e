//! Fullnode HTTP client.

use std::time::{Duration, Instant};

use client_blockchain_core::TransactionHash;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::error::{AptosError, Result};
use crate::core::types::{TransactionResponse, ViewRequest};

/// Delay between `wait_by_hash` long-polls that come back pending.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Clone)]
pub struct NodeClient {
    base_url: String,
    http: reqwest::Client,
    tx_timeout: Duration,
}

impl NodeClient {
    pub fn new(base_url: impl Into<String>, tx_timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AptosError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url,
            http,
            tx_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a view function and return its (untyped) return values.
    pub async fn view(&self, request: &ViewRequest) -> Result<Vec<Value>> {
        let url = format!("{}/view", self.base_url);
        tracing::debug!(function = %request.function, "View call");

        let response = self.http.post(url).json(request).send().await?;
        Self::decode(response).await
    }

    /// Current state of a transaction; `None` if the node has never seen it.
    pub async fn transaction_by_hash(
        &self,
        hash: &TransactionHash,
    ) -> Result<Option<TransactionResponse>> {
        let url = format!("{}/transactions/by_hash/{}", self.base_url, hash);
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode(response).await.map(Some)
    }

    /// Poll until the transaction is no longer pending.
    ///
    /// Returns the committed transaction whether it succeeded or aborted;
    /// callers inspect [`TransactionResponse::status`].
    pub async fn wait_for_transaction(
        &self,
        hash: &TransactionHash,
    ) -> Result<TransactionResponse> {
        let url = format!("{}/transactions/wait_by_hash/{}", self.base_url, hash);
        let started = Instant::now();

        loop {
            let response = self.http.get(&url).send().await?;
            if response.status() != StatusCode::NOT_FOUND {
                let tx: TransactionResponse = Self::decode(response).await?;
                if !tx.is_pending() {
                    tracing::debug!(%hash, version = tx.version(), "Transaction finalized");
                    return Ok(tx);
                }
            }

            if started.elapsed() >= self.tx_timeout {
                return Err(AptosError::Timeout(hash.clone()));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    pub async fn health_check(&self) -> Result<()> {
        let url = format!("{}/-/healthy", self.base_url);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AptosError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(AptosError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            AptosError::InvalidResponse(format!(
                "{e}. Raw response: {}",
                String::from_utf8_lossy(&bytes)
            ))
        })
    }
}
