use std::collections::HashMap;

use crate::models::{UserBalance, WalletBalance};

/// Roll wallet balances up into one row per user: wallet count, total SOL
/// and the single largest wallet. Users are discovered from the input;
/// output is ranked by total, highest first. Grouping preserves first-seen
/// user order so ties sort deterministically.
pub fn aggregate_by_user(wallets: &[WalletBalance]) -> Vec<UserBalance> {
    let mut users: Vec<UserBalance> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for wallet in wallets {
        match index.get(&wallet.user_id) {
            Some(&i) => {
                let user = &mut users[i];
                user.wallet_count += 1;
                user.total_sol += wallet.sol;
                user.top_wallet_sol = user.top_wallet_sol.max(wallet.sol);
            }
            None => {
                index.insert(wallet.user_id.clone(), users.len());
                users.push(UserBalance {
                    user_id: wallet.user_id.clone(),
                    wallet_count: 1,
                    total_sol: wallet.sol,
                    top_wallet_sol: wallet.sol,
                });
            }
        }
    }

    users.sort_by(|a, b| b.total_sol.cmp(&a.total_sol));
    users
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balances::lamports_to_sol;
    use rust_decimal::Decimal;

    fn wallet(user_id: &str, public_key: &str, lamports: u64) -> WalletBalance {
        WalletBalance {
            public_key: public_key.to_string(),
            user_id: user_id.to_string(),
            lamports,
            sol: lamports_to_sol(lamports),
        }
    }

    fn sol(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(aggregate_by_user(&[]).is_empty());
    }

    #[test]
    fn counts_sums_and_maxes_per_user() {
        let wallets = vec![
            wallet("u1", "B", 3_000_000_000),
            wallet("u2", "C", 2_000_000_000),
            wallet("u1", "A", 1_000_000_000),
        ];

        let users = aggregate_by_user(&wallets);
        assert_eq!(users.len(), 2);

        // u1 ranks first on aggregate despite not holding the top wallet
        assert_eq!(users[0].user_id, "u1");
        assert_eq!(users[0].wallet_count, 2);
        assert_eq!(users[0].total_sol, sol("4.0"));
        assert_eq!(users[0].top_wallet_sol, sol("3.0"));

        assert_eq!(users[1].user_id, "u2");
        assert_eq!(users[1].wallet_count, 1);
        assert_eq!(users[1].total_sol, sol("2.0"));
        assert_eq!(users[1].top_wallet_sol, sol("2.0"));
    }

    #[test]
    fn ranks_users_by_total_descending() {
        let wallets = vec![
            wallet("small", "S", 1_000_000_000),
            wallet("big", "B1", 2_000_000_000),
            wallet("big", "B2", 2_000_000_000),
        ];

        let users = aggregate_by_user(&wallets);
        assert_eq!(users[0].user_id, "big");
        assert_eq!(users[1].user_id, "small");

        for pair in users.windows(2) {
            assert!(pair[0].total_sol >= pair[1].total_sol);
        }
    }

    #[test]
    fn equal_totals_keep_first_seen_order() {
        let wallets = vec![
            wallet("u1", "A", 2_000_000_000),
            wallet("u2", "B", 1_000_000_000),
            wallet("u2", "C", 1_000_000_000),
        ];

        let users = aggregate_by_user(&wallets);
        assert_eq!(users[0].user_id, "u1");
        assert_eq!(users[1].user_id, "u2");
    }

    #[test]
    fn zero_balance_wallets_still_count() {
        let wallets = vec![
            wallet("u1", "A", 0),
            wallet("u1", "B", 0),
        ];

        let users = aggregate_by_user(&wallets);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].wallet_count, 2);
        assert_eq!(users[0].total_sol, Decimal::ZERO);
        assert_eq!(users[0].top_wallet_sol, Decimal::ZERO);
    }
}
