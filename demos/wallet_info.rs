//! Wallet summary example
//!
//! Reads the endpoint from the environment, then prints wallet info, the
//! spendable outputs, and the validity of one address.
//!
//! Run with:
//!
//! ```text
//! DAEMONRPC_URL=http://127.0.0.1:18332 DAEMONRPC_USER=rpc DAEMONRPC_PASSWORD=secret \
//!     RUST_LOG=daemonrpc::wire=info DAEMONRPC_VERBOSE=1 \
//!     cargo run --example wallet_info -- mzBc4XEFSdzCDcTxAgf6EZXgsZWpztRhef
//! ```

use daemonrpc::{ClientBuilder, Error, UnspentList, ValidatedAddress, Wallet};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let client = ClientBuilder::from_env()?.build()?;
    println!("Talking to {}", client.url());

    let wallet: Wallet = client
        .request_and_decode("getwalletinfo", ())
        .await?
        .into_value();
    println!(
        "wallet v{}: {} transactions, keypool {}",
        wallet.walletversion, wallet.txcount, wallet.keypoolsize
    );
    for (asset, amount) in &wallet.balance {
        println!("  balance {}: {}", asset, amount);
    }

    let unspent: UnspentList = client
        .request_and_decode("listunspent", json!([1, 9999999]))
        .await?
        .into_value();
    let total: f64 = unspent.iter().filter(|u| u.spendable).map(|u| u.amount).sum();
    println!("{} outputs, {} spendable in total", unspent.len(), total);

    if let Some(address) = std::env::args().nth(1) {
        match client.request("validateaddress", [address.as_str()]).await {
            Ok(response) => match response.fault() {
                Ok(fault) => println!("{}: daemon error {}", address, fault),
                Err(_) => {
                    let validated: ValidatedAddress = response.decode_result()?;
                    println!("{}: valid={} mine={}", address, validated.isvalid, validated.ismine);
                }
            },
            Err(Error::Transport(fault)) => {
                tracing::warn!(status = fault.status, body = %fault.body, "validateaddress rejected");
                if let Ok(rpc) = fault.response.fault() {
                    println!("{}: daemon error {}", address, rpc);
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
