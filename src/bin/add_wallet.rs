use anyhow::{bail, Result};
use rusqlite::{params, Connection};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 2 {
        bail!("usage: add_wallet <user_id> <public_key>");
    }
    let (user_id, public_key) = (&args[0], &args[1]);

    // same syntax check the dashboard's ledger client applies
    let decoded = bs58::decode(public_key).into_vec()?;
    if decoded.len() != 32 {
        bail!("invalid public key (expected 32 bytes, got {})", decoded.len());
    }

    let db_path = std::env::var("DATABASE_URL").unwrap_or_else(|_| "wallets.db".to_string());
    let conn = Connection::open(&db_path)?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS user_keys (
           id         INTEGER PRIMARY KEY AUTOINCREMENT,
           user_id    TEXT NOT NULL,
           public_key TEXT NOT NULL,
           created_at TEXT NOT NULL DEFAULT (datetime('now'))
         );",
    )?;
    conn.execute(
        "INSERT INTO user_keys (user_id, public_key) VALUES (?1, ?2)",
        params![user_id, public_key],
    )?;

    println!("Registered {} for user {} in {}", public_key, user_id, db_path);
    Ok(())
}
