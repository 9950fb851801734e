//! Wire types of the Aptos fullnode REST API.

use client_blockchain_core::{TransactionHash, TransactionStatus};
use serde::{Deserialize, Serialize};

use crate::utils::conversion::parse_u64;

/// Body of `POST /view`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRequest {
    /// `<address>::<module>::<function>`
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<String>,
}

/// Subset of a transaction as returned by `/transactions/by_hash` and
/// `/transactions/wait_by_hash`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResponse {
    /// `pending_transaction`, `user_transaction`, ...
    #[serde(rename = "type")]
    pub kind: String,

    pub hash: String,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub success: Option<bool>,

    #[serde(default)]
    pub vm_status: Option<String>,

    #[serde(default)]
    pub gas_used: Option<String>,
}

impl TransactionResponse {
    pub fn is_pending(&self) -> bool {
        self.kind == "pending_transaction"
    }

    pub fn hash(&self) -> TransactionHash {
        TransactionHash::new(self.hash.clone())
    }

    pub fn version(&self) -> u64 {
        self.version.as_deref().and_then(|v| parse_u64(v).ok()).unwrap_or(0)
    }

    pub fn gas_used(&self) -> u64 {
        self.gas_used.as_deref().and_then(|v| parse_u64(v).ok()).unwrap_or(0)
    }

    pub fn status(&self) -> TransactionStatus {
        if self.is_pending() {
            return TransactionStatus::Pending;
        }
        match self.success {
            Some(true) => TransactionStatus::Committed {
                version: self.version(),
            },
            _ => TransactionStatus::Failed {
                vm_status: self
                    .vm_status
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_and_failed_transactions() {
        let ok: TransactionResponse = serde_json::from_str(
            r#"{"type":"user_transaction","hash":"0xab","version":"42","success":true,
                "vm_status":"Executed successfully","gas_used":"17"}"#,
        )
        .unwrap();
        assert_eq!(ok.status(), TransactionStatus::Committed { version: 42 });
        assert_eq!(ok.gas_used(), 17);

        let aborted: TransactionResponse = serde_json::from_str(
            r#"{"type":"user_transaction","hash":"0xab","version":"43","success":false,
                "vm_status":"Move abort: EINSUFFICIENT_BALANCE"}"#,
        )
        .unwrap();
        assert_eq!(
            aborted.status(),
            TransactionStatus::Failed {
                vm_status: "Move abort: EINSUFFICIENT_BALANCE".into()
            }
        );
    }

    #[test]
    fn pending_transaction_has_no_version() {
        let pending: TransactionResponse =
            serde_json::from_str(r#"{"type":"pending_transaction","hash":"0xab"}"#).unwrap();
        assert!(pending.is_pending());
        assert_eq!(pending.status(), TransactionStatus::Pending);
        assert!(!pending.status().is_final());
    }
}
