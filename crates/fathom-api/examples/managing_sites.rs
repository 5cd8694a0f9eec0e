//! Create, update, wipe and delete a site.
//!
//! ```sh
//! FATHOM_TOKEN=... cargo run -p fathom-api --example managing_sites
//! ```

use std::env;

use fathom_api::{CreateSiteParams, Error, FathomApi, ListAllOptions, Sharing, UpdateSiteParams};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let fathom = FathomApi::builder(env::var("FATHOM_TOKEN")?).build()?;
    let sites = &fathom.api().sites;

    let site = sites.create(&CreateSiteParams::new("My New Website")).await?;
    println!("Created site {} ({})", site.id, site.name);

    let update = UpdateSiteParams {
        name: Some("Updated Website Name".into()),
        sharing: Some(Sharing::Private),
        share_password: Some("password123".into()),
    };
    let site = sites.update(&site.id, &update).await?;
    println!("Updated site {} sharing={}", site.id, site.sharing);

    let all = sites.list_all(&ListAllOptions::default()).await?;
    println!("Account now has {} site(s)", all.len());

    let wiped = sites.wipe(&site.id).await?;
    println!("Wiped site {}: {}", wiped.id, wiped.wiped);

    match sites.delete(&site.id).await {
        Ok(deleted) => println!("Deleted site {}: {}", deleted.id, deleted.deleted),
        Err(Error::Api { message, status }) => eprintln!("API error ({status}): {message}"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
