//! Example: Listing charge points, their charges and the personal wallet
//!
//! # Setup
//!
//! 1. Set credentials: ```bash export MONTA_CLIENT_ID=... export
//!    MONTA_CLIENT_SECRET=... ```
//!
//! 2. Optionally override the configuration (`MONTA_BASE_URL`,
//!    `MONTA_PAGE_SIZE`, ...).
//!
//! 3. Run this example: ```bash RUST_LOG=monta_infra=debug cargo run
//!    --example list_charge_points ```

use std::sync::Arc;

use monta_infra::config::load_from_env;
use monta_infra::{HttpClient, MontaApiClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let client_id = std::env::var("MONTA_CLIENT_ID")?;
    let client_secret = std::env::var("MONTA_CLIENT_SECRET")?;

    let config = load_from_env()?;
    let session = Arc::new(HttpClient::from_config(&config)?);
    let client = MontaApiClient::builder()
        .config(config)
        .session(session)
        .credentials(client_id, client_secret)
        .build()?;

    let charge_points = client.async_get_charge_points().await?;
    println!("Charge points: {}", charge_points.len());

    for (id, charge_point) in &charge_points {
        println!("  [{}] {} ({})", id, charge_point.name, charge_point.state);

        let charges = client.async_get_charges(*id).await?;
        for charge in charges.iter().take(5) {
            let kwh = charge.consumed_kwh.unwrap_or_default();
            println!("      charge {} {} {:.2} kWh", charge.id, charge.state, kwh);
        }
    }

    let wallet = client.async_get_personal_wallet().await?;
    if let Some(balance) = wallet.formatted_balance() {
        println!("Wallet balance: {}", balance);
    }

    let transactions = client.async_get_wallet_transactions().await?;
    println!("Wallet transactions: {}", transactions.len());

    Ok(())
}
