use futures_util::future::join_all;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{UserKey, WalletBalance};
use crate::rpc::{Ledger, LAMPORTS_PER_SOL};

/// Convert raw lamports to SOL in exact decimal arithmetic
pub fn lamports_to_sol(lamports: u64) -> Decimal {
    Decimal::from(lamports) / Decimal::from(LAMPORTS_PER_SOL)
}

/// Look up one wallet's balance. Never fails: a bad key or a dead RPC
/// degrades to a zero-balance record so one wallet cannot abort the batch.
pub async fn fetch_balance(ledger: &dyn Ledger, key: &UserKey) -> WalletBalance {
    let lamports = match ledger.get_balance(&key.public_key).await {
        Ok(lamports) => lamports,
        Err(e) => {
            warn!("Balance lookup failed for {}: {}", key.public_key, e);
            0
        }
    };

    WalletBalance {
        public_key: key.public_key.clone(),
        user_id: key.user_id.clone(),
        lamports,
        sol: lamports_to_sol(lamports),
    }
}

/// Look up every wallet concurrently and rank by balance, highest first.
/// One lookup per key, all launched together, joined once; no partial
/// results. Ties keep input order (stable sort).
pub async fn fetch_all(ledger: &dyn Ledger, keys: &[UserKey]) -> Vec<WalletBalance> {
    let lookups = keys.iter().map(|key| fetch_balance(ledger, key));
    let mut balances = join_all(lookups).await;

    balances.sort_by(|a, b| b.sol.cmp(&a.sol));
    balances
}
