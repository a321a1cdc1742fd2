use axum::{
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use rusqlite::Connection;
use crate::aggregator;
use crate::balances;
use crate::config::Config;
use crate::db;
use crate::models::BalancesResponse;
use crate::rpc::Ledger;
use tracing::{error, info};
use tower_http::cors::{CorsLayer, Any};
use tokio::task;

pub async fn serve(
    cfg: Config,
    conn: Arc<Mutex<Connection>>,
    ledger: Arc<dyn Ledger>,
) -> eyre::Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(|| async { "SOL Balance Dashboard API running" }))
        .route("/balances", get({
            let conn = Arc::clone(&conn);
            let ledger = Arc::clone(&ledger);
            move || {
                let conn = Arc::clone(&conn);
                let ledger = Arc::clone(&ledger);
                async move { get_balances(conn, ledger).await }
            }
        }))
        .layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], cfg.port));
    info!("API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

// ---------- handlers ----------

/// The whole pipeline behind one read: list every key on file, fan out the
/// balance lookups, rank and aggregate. A store failure fails the request
/// outright; per-wallet lookup failures were already degraded to zero
/// upstream, so an empty or partly-failing ledger still renders.
async fn get_balances(
    conn: Arc<Mutex<Connection>>,
    ledger: Arc<dyn Ledger>,
) -> Result<Json<BalancesResponse>, (StatusCode, String)> {
    let keys = task::spawn_blocking(move || {
        let db = conn.lock().unwrap();
        db::list_user_keys(&db)
    })
    .await
    .map_err(|e| {
        error!("Key listing task panicked: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to load wallet list".to_string(),
        )
    })?
    .map_err(|e| {
        error!("Key listing failed: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to load wallet list".to_string(),
        )
    })?;

    let wallets = balances::fetch_all(ledger.as_ref(), &keys).await;
    let users = aggregator::aggregate_by_user(&wallets);

    info!("Served {} wallets across {} users", wallets.len(), users.len());

    Ok(Json(BalancesResponse {
        wallets,
        users,
        as_of: Utc::now(),
    }))
}
