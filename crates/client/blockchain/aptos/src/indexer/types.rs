//! Indexer response types.
//!
//! Rows are decoded leniently: numeric columns may be numbers or strings, and
//! `coin_info` is nullable for coins the indexer has not catalogued yet.

use game_core::ResourceBalance;
use serde::{Deserialize, Serialize};

use crate::utils::conversion::de_u64;

/// Query body: `{"query": ..., "variables": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

/// Standard GraphQL envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,

    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinBalancesData {
    pub current_coin_balances: Vec<CoinBalanceRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinBalanceRow {
    #[serde(deserialize_with = "de_u64")]
    pub amount: u64,

    /// `<address>::<module>::<struct>`
    pub coin_type: String,

    #[serde(default)]
    pub coin_info: Option<CoinInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinInfo {
    pub name: String,
    pub symbol: String,
}

impl CoinBalanceRow {
    /// `None` when `coin_type` is not a plain `<address>::<module>::<struct>`
    /// (generic coin types cannot back units).
    pub fn into_balance(self) -> Option<ResourceBalance> {
        let resource: game_core::ResourceType = self.coin_type.parse().ok()?;
        let (name, symbol) = match self.coin_info {
            Some(info) => (info.name, info.symbol),
            None => (resource.struct_name().to_string(), String::new()),
        };
        Some(ResourceBalance {
            resource,
            name,
            symbol,
            amount: self.amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_balance_rows() {
        let body = r#"{"data":{"current_coin_balances":[
            {"amount":50000000000,"coin_type":"0xcafe::gold::Gold",
             "coin_info":{"name":"Gold","symbol":"GLD"}},
            {"amount":"300000000","coin_type":"0xcafe::coin1::T","coin_info":null},
            {"amount":"1","coin_type":"0x1::pool::LP<0x1::a::A>","coin_info":null}
        ]}}"#;

        let response: GraphQlResponse<CoinBalancesData> = serde_json::from_str(body).unwrap();
        assert!(response.errors.is_empty());

        let balances: Vec<_> = response
            .data
            .unwrap()
            .current_coin_balances
            .into_iter()
            .filter_map(CoinBalanceRow::into_balance)
            .collect();

        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].display(), "500.00 Gold (GLD)");
        assert_eq!(balances[1].name, "T");
        assert_eq!(balances[1].amount, 300_000_000);
    }

    #[test]
    fn surfaces_graphql_errors() {
        let body = r#"{"errors":[{"message":"field not found"}]}"#;
        let response: GraphQlResponse<CoinBalancesData> = serde_json::from_str(body).unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.errors[0].message, "field not found");

        let body = r#"{"data":null,"errors":[{"message":"timeout"}]}"#;
        let response: GraphQlResponse<CoinBalancesData> = serde_json::from_str(body).unwrap();
        assert!(response.data.is_none());
    }
}
