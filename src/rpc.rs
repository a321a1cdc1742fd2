// src/rpc.rs
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Lamports per SOL (the ledger's smallest-unit ratio)
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid public key: {0}")]
    InvalidAddress(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("RPC error: HTTP {0}")]
    HttpStatus(StatusCode),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed RPC response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("RPC response carried neither result nor error")]
    MissingResult,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// `getBalance` result: lamports live in `value`, next to slot context
#[derive(Debug, Deserialize)]
struct BalanceResult {
    value: u64,
}

/// The ledger boundary. Handed into the pipeline as a capability so tests
/// can swap in a fake with no process-wide connection state.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Confirmed balance of `address` in lamports.
    async fn get_balance(&self, address: &str) -> Result<u64, LedgerError>;
}

/// Reject anything that is not a base58-encoded 32-byte key
pub fn validate_pubkey(address: &str) -> Result<(), LedgerError> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|_| LedgerError::InvalidAddress(address.to_string()))?;
    if bytes.len() != 32 {
        return Err(LedgerError::InvalidAddress(address.to_string()));
    }
    Ok(())
}

/// Solana JSON-RPC client for balance lookups
pub struct RpcLedger {
    client: Client,
    rpc_url: String,
    commitment: String,
}

impl RpcLedger {
    pub fn new(rpc_url: &str, commitment: &str) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            rpc_url: rpc_url.to_string(),
            commitment: commitment.to_string(),
        })
    }
}

#[async_trait]
impl Ledger for RpcLedger {
    async fn get_balance(&self, address: &str) -> Result<u64, LedgerError> {
        validate_pubkey(address)?;

        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getBalance",
            "params": [address, { "commitment": self.commitment }]
        });

        debug!("📡 Sending getBalance → {} ({})", self.rpc_url, address);

        let resp = self.client.post(&self.rpc_url).json(&payload).send().await?;
        if resp.status() != StatusCode::OK {
            return Err(LedgerError::HttpStatus(resp.status()));
        }

        let text = resp.text().await?;
        debug!("📩 Raw getBalance response: {}", text);

        let parsed: RpcResponse<BalanceResult> = serde_json::from_str(&text)?;
        if let Some(err) = parsed.error {
            return Err(LedgerError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        parsed
            .result
            .map(|r| r.value)
            .ok_or(LedgerError::MissingResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_pubkeys() {
        // system program and the wrapped SOL mint, both 32 bytes
        validate_pubkey("11111111111111111111111111111111").unwrap();
        validate_pubkey("So11111111111111111111111111111111111111112").unwrap();
    }

    #[test]
    fn rejects_bad_pubkeys() {
        // not base58 (0, O, I and l are outside the alphabet)
        assert!(matches!(
            validate_pubkey("0OIl"),
            Err(LedgerError::InvalidAddress(_))
        ));
        // decodes, but not to 32 bytes
        assert!(matches!(
            validate_pubkey("abc"),
            Err(LedgerError::InvalidAddress(_))
        ));
        assert!(matches!(
            validate_pubkey(""),
            Err(LedgerError::InvalidAddress(_))
        ));
    }

    #[test]
    fn parses_balance_response() {
        let body = r#"{"jsonrpc":"2.0","result":{"context":{"slot":1234},"value":2500000000},"id":1}"#;
        let parsed: RpcResponse<BalanceResult> = serde_json::from_str(body).unwrap();
        assert!(parsed.error.is_none());
        assert_eq!(parsed.result.unwrap().value, 2_500_000_000);
    }

    #[test]
    fn parses_error_response() {
        let body = r#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"Invalid param"},"id":1}"#;
        let parsed: RpcResponse<BalanceResult> = serde_json::from_str(body).unwrap();
        assert!(parsed.result.is_none());
        let err = parsed.error.unwrap();
        assert_eq!(err.code, -32602);
        assert_eq!(err.message, "Invalid param");
    }
}
