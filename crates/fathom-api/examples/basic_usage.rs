//! Print account details and the first page of sites.
//!
//! ```sh
//! FATHOM_TOKEN=... cargo run -p fathom-api --example basic_usage
//! ```

use std::env;

use fathom_api::{ClientOptions, FathomApi};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let token = env::var("FATHOM_TOKEN")?;
    let fathom = FathomApi::new(ClientOptions::new(token))?;

    let account = fathom.api().get_account().await?;
    println!("Account: {} <{}>", account.name, account.email);

    let sites = fathom.api().sites.list(None).await?;
    for site in &sites.data {
        println!("{:<10} {}", site.id, site.name);
    }
    if sites.has_more {
        println!("(more sites available)");
    }

    Ok(())
}
