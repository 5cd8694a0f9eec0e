//! Create, rename, wipe and delete an event on one site.
//!
//! ```sh
//! FATHOM_TOKEN=... FATHOM_SITE_ID=... cargo run -p fathom-api --example working_with_events
//! ```

use std::env;

use fathom_api::{CreateEventParams, FathomApi, ListAllOptions, UpdateEventParams};
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
    let events = fathom.api().events(&env::var("FATHOM_SITE_ID")?)?;

    let event = events
        .create(&CreateEventParams {
            name: "Newsletter Signup".into(),
        })
        .await?;
    println!("Created event {} on site {}", event.id, event.site_id);

    let event = events
        .update(
            &event.id,
            &UpdateEventParams {
                name: "Updated Event Name".into(),
            },
        )
        .await?;
    println!("Renamed event {} to {:?}", event.id, event.name);

    for e in events.list_all(&ListAllOptions::default().with_limit(50)).await? {
        println!("  {:<10} {}", e.id, e.name);
    }

    let wiped = events.wipe(&event.id).await?;
    println!("Wiped event {}: {}", wiped.id, wiped.wiped);

    let deleted = events.delete(&event.id).await?;
    println!("Deleted event {}: {}", deleted.id, deleted.deleted);

    Ok(())
}
