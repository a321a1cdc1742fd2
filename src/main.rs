mod config;
mod db;
mod api;
mod models;
mod aggregator;
mod rpc;
mod balances;

use std::sync::{Arc, Mutex};
use tokio::signal;
use tracing::{error, info};

use crate::rpc::{Ledger, RpcLedger};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Force logging to stdout with DEBUG level for visibility
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)  // show everything (INFO, DEBUG, WARN, ERROR)
        .with_writer(std::io::stdout)           // force logs to stdout
        .with_target(false)                     // cleaner logs (no module names unless needed)
        .init();

    info!("SOL Balance Dashboard starting...");

    // Load configuration
    let cfg = config::load()?;
    info!("Loaded config:");
    info!("  RPC URL: {}", cfg.rpc_http_url);
    info!("  DB Path: {}", cfg.db_path);
    info!("  Port: {}", cfg.port);
    info!("  Commitment: {}", cfg.commitment);

    // Run DB migrations once at startup
    {
        let conn = db::connect(&cfg.db_path)?;
        db::run_migrations(&conn)?;
    }

    // Shared DB connection
    let shared_conn = Arc::new(Mutex::new(db::connect(&cfg.db_path)?));

    // Ledger client, injected into the API so tests can swap in a fake
    let ledger: Arc<dyn Ledger> = Arc::new(RpcLedger::new(&cfg.rpc_http_url, &cfg.commitment)?);

    // Spawn API task
    let api_handle = tokio::spawn({
        let cfg = cfg.clone();
        let conn = Arc::clone(&shared_conn);
        let ledger = Arc::clone(&ledger);
        async move { api::serve(cfg, conn, ledger).await }
    });

    // Graceful shutdown
    tokio::select! {
        res = api_handle => match res {
            Ok(Ok(_)) => info!("API exited cleanly"),
            Ok(Err(e)) => error!("API error: {:?}", e),
            Err(e) => error!("API task panicked: {:?}", e),
        },
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received, stopping...");
        }
    }

    info!("SOL Balance Dashboard stopped.");
    Ok(())
}
