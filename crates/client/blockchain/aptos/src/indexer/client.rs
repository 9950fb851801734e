//! Indexer HTTP client.

use anyhow::{Context, Result, anyhow, bail};
use game_core::{AccountAddress, ResourceBalance};
use serde_json::json;

use super::types::{CoinBalanceRow, CoinBalancesData, GraphQlRequest, GraphQlResponse};

/// Non-zero balances of an owner, excluding the native gas coin.
const COIN_BALANCES_QUERY: &str = r#"
query CoinBalances($owner: String!) {
  current_coin_balances(
    where: {
      amount: { _gt: "0" }
      owner_address: { _eq: $owner }
      coin_info: { name: { _nilike: "%Aptos Coin%" } }
    }
  ) {
    amount
    coin_type
    coin_info {
      name
      symbol
    }
  }
}
"#;

#[derive(Clone)]
pub struct IndexerClient {
    url: String,
    http: reqwest::Client,
}

impl IndexerClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build HTTP client for indexer")?;
        Ok(Self {
            url: url.into(),
            http,
        })
    }

    pub async fn coin_balances(&self, owner: &AccountAddress) -> Result<Vec<ResourceBalance>> {
        let request = GraphQlRequest {
            query: COIN_BALANCES_QUERY,
            variables: json!({ "owner": owner.to_string() }),
        };

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .context("indexer request failed")?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("failed to read indexer response body")?;
        if !status.is_success() {
            bail!("indexer responded with {status}: {text}");
        }

        tracing::debug!(%owner, "Indexer balances response: {}", text);

        let body: GraphQlResponse<CoinBalancesData> = serde_json::from_str(&text)
            .with_context(|| format!("invalid indexer balance payload: {text}"))?;

        if let Some(err) = body.errors.first() {
            return Err(anyhow!("indexer query failed: {}", err.message));
        }

        let rows = body
            .data
            .context("indexer response carried neither data nor errors")?
            .current_coin_balances;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let coin_type = row.coin_type.clone();
                let balance = CoinBalanceRow::into_balance(row);
                if balance.is_none() {
                    tracing::warn!(%coin_type, "Skipping balance with unsupported coin type");
                }
                balance
            })
            .collect())
    }
}
