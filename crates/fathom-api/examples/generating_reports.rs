//! Run a few aggregation reports and check who is on the site right now.
//!
//! ```sh
//! FATHOM_TOKEN=... FATHOM_SITE_ID=... cargo run -p fathom-api --example generating_reports
//! ```

use std::env;

use fathom_api::{
    AggregationEntity, AggregationFilter, AggregationParams, DateGrouping, FathomApi,
    FilterOperator, ReportOptions,
};
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

    let fathom = FathomApi::builder(env::var("FATHOM_TOKEN")?).build()?;
    let site_id = env::var("FATHOM_SITE_ID")?;
    let reports = &fathom.api().reports;

    let params = AggregationParams::new(
        AggregationEntity::Pageview,
        site_id.as_str(),
        "visits,uniques,pageviews",
    )
    .date_grouping(DateGrouping::Day)
    .field_grouping("pathname")
    .date_range(Some("2022-01-01".into()), Some("2022-01-31".into()))
    .filter(AggregationFilter::new("pathname", FilterOperator::Is, "/blog"));
    for row in reports.aggregation(&params).await? {
        println!("{}", serde_json::Value::Object(row));
    }

    let options = ReportOptions {
        limit: Some(10),
        ..ReportOptions::default()
    };
    println!("Top pages:");
    for row in reports.top_pages(&site_id, &options).await? {
        println!("  {:?} {:?}", row.get("pathname"), row.get("pageviews"));
    }

    println!("Top referrers:");
    for row in reports.referrer_sources(&site_id, &options).await? {
        println!("  {:?} {:?}", row.get("referrer_hostname"), row.get("visits"));
    }

    let visitors = fathom.api().get_current_visitors(&site_id, true).await?;
    println!("Current visitors: {}", visitors.total);
    for page in visitors.content.unwrap_or_default() {
        println!("  {} {}", page.pathname, page.total);
    }

    Ok(())
}
