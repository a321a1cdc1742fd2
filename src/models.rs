// src/models.rs
use serde::Serialize;
use rust_decimal::Decimal;
use chrono::{DateTime, Utc};

/// One row of the user_keys address store
#[derive(Debug, Clone, PartialEq)]
pub struct UserKey {
    pub user_id: String,
    pub public_key: String,
}

/// Balance of a single wallet at fetch time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletBalance {
    pub public_key: String,
    pub user_id: String,
    pub lamports: u64,     // raw smallest-unit balance
    pub sol: Decimal,      // lamports / 1e9 (math friendly)
}

/// Per-user rollup of wallet balances
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserBalance {
    pub user_id: String,
    pub wallet_count: u32,
    pub total_sol: Decimal,
    pub top_wallet_sol: Decimal,
}

/// Payload returned by GET /balances
#[derive(Debug, Serialize)]
pub struct BalancesResponse {
    pub wallets: Vec<WalletBalance>,
    pub users: Vec<UserBalance>,
    pub as_of: DateTime<Utc>,
}
