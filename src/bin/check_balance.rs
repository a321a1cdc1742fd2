use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RpcResponse<T> {
    Success { result: T },
    Error { error: RpcError },
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[allow(dead_code)]
    code: i64,
    #[allow(dead_code)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct BalanceResult {
    value: u64,
}

const RPC_URL: &str = "https://api.mainnet-beta.solana.com";
const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // default to the wrapped SOL mint so the tool works with no arguments
    let pubkey = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "So11111111111111111111111111111111111111112".to_string());
    let rpc_url = std::env::var("RPC_HTTP_URL").unwrap_or_else(|_| RPC_URL.to_string());

    let client = Client::new();
    println!("Fetching balance for {}...", pubkey);

    let res: RpcResponse<BalanceResult> = client
        .post(&rpc_url)
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getBalance",
            "params": [pubkey, { "commitment": "confirmed" }]
        }))
        .send()
        .await?
        .json()
        .await?;

    match res {
        RpcResponse::Success { result } => {
            let sol = Decimal::from(result.value) / Decimal::from(LAMPORTS_PER_SOL);
            println!("Balance: {} lamports ({} SOL)", result.value, sol);
        }
        RpcResponse::Error { error } => {
            eprintln!("RPC error while fetching balance: {:?}", error);
        }
    }

    Ok(())
}
