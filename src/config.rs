use dotenvy::dotenv;
use eyre::Result;
use serde::Deserialize;
use std::env;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rpc_http_url: String,       // ✅ HTTP RPC URL
    pub db_path: String,
    pub commitment: String,
    pub port: u16,
}

pub fn load() -> Result<Config> {
    dotenv().ok(); // ✅ Load from .env file

    // ✅ Load RPC URL (prefer generic name, fallback to public mainnet)
    let rpc_http_url = env::var("RPC_HTTP_URL")
        .or_else(|_| env::var("HELIUS_RPC_URL")) // alias support
        .unwrap_or_else(|_| "https://api.mainnet-beta.solana.com".to_string());

    // ✅ SQLite DB path (default: wallets.db)
    let db_path = env::var("DATABASE_URL").unwrap_or_else(|_| "wallets.db".to_string());

    // ✅ getBalance commitment level (default: confirmed)
    let commitment = env::var("COMMITMENT").unwrap_or_else(|_| "confirmed".to_string());

    // ✅ API port (default: 8080)
    let port = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let cfg = Config {
        rpc_http_url,
        db_path,
        commitment,
        port,
    };

    // ✅ Log loaded config for debugging
    info!("Loaded config: {:?}", cfg);

    Ok(cfg)
}
