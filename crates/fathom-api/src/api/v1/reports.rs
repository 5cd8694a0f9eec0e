// Report endpoints: aggregations and current visitors
//
// The aggregation response does not follow the documented shape, so rows
// come back as open JSON objects. `aggregation_as` lets callers decode into
// their own row type when they know what they asked for.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::require_id;
use crate::error::Error;
use crate::http::HttpClient;
use crate::types::{
    AggregationEntity, AggregationParams, AggregationRow, CurrentVisitorsParams,
    CurrentVisitorsResponse, ReportOptions,
};
use crate::validation::{AGGREGATION, CURRENT_VISITORS, validate};

const DEFAULT_TIMEZONE: &str = "UTC";
const DEFAULT_TOP_N: u32 = 20;
const TRAFFIC_AGGREGATES: &str = "visits,uniques,pageviews,bounce_rate,avg_duration";

/// `/v1/aggregations` and `/v1/current_visitors`
#[derive(Debug, Clone)]
pub struct ReportsResource {
    http: Arc<HttpClient>,
}

impl ReportsResource {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Run an aggregation query.
    ///
    /// `GET /v1/aggregations`
    pub async fn aggregation(&self, params: &AggregationParams) -> Result<Vec<AggregationRow>, Error> {
        self.aggregation_as(params).await
    }

    /// Run an aggregation query and decode each row as `T`.
    pub async fn aggregation_as<T: DeserializeOwned>(
        &self,
        params: &AggregationParams,
    ) -> Result<Vec<T>, Error> {
        let params = validate(&AGGREGATION, params)?;
        debug!(
            entity = %params.entity,
            entity_id = %params.entity_id,
            aggregates = %params.aggregates,
            "running aggregation"
        );
        self.http.get("/v1/aggregations", Some(params)).await
    }

    /// Visitors on the site right now.
    ///
    /// `GET /v1/current_visitors`
    pub async fn current_visitors(
        &self,
        params: &CurrentVisitorsParams,
    ) -> Result<CurrentVisitorsResponse, Error> {
        let params = validate(&CURRENT_VISITORS, params)?;
        debug!(site_id = %params.site_id, "fetching current visitors");
        self.http.get("/v1/current_visitors", Some(params)).await
    }

    // ── Presets ──────────────────────────────────────────────────────

    /// Visits, uniques, pageviews, bounce rate and average duration,
    /// bucketed by `options.group_by`.
    pub async fn pageview_stats(
        &self,
        site_id: &str,
        options: &ReportOptions,
    ) -> Result<Vec<AggregationRow>, Error> {
        let site_id = require_id("Site", site_id)?;
        let mut params = base_params(AggregationEntity::Pageview, site_id, TRAFFIC_AGGREGATES, options);
        params.date_grouping = options.group_by;
        params.limit = options.limit;
        self.aggregation(&params).await
    }

    /// Pages ranked by pageviews. Returns 20 rows unless `options.limit`
    /// says otherwise.
    pub async fn top_pages(
        &self,
        site_id: &str,
        options: &ReportOptions,
    ) -> Result<Vec<AggregationRow>, Error> {
        let site_id = require_id("Site", site_id)?;
        let params = base_params(AggregationEntity::Pageview, site_id, TRAFFIC_AGGREGATES, options)
            .field_grouping("pathname")
            .sort_by("pageviews:desc")
            .limit(options.limit.unwrap_or(DEFAULT_TOP_N));
        self.aggregation(&params).await
    }

    /// Referrer hostnames ranked by visits. Returns 20 rows unless
    /// `options.limit` says otherwise.
    pub async fn referrer_sources(
        &self,
        site_id: &str,
        options: &ReportOptions,
    ) -> Result<Vec<AggregationRow>, Error> {
        let site_id = require_id("Site", site_id)?;
        let params = base_params(AggregationEntity::Pageview, site_id, "visits,uniques", options)
            .field_grouping("referrer_hostname")
            .sort_by("visits:desc")
            .limit(options.limit.unwrap_or(DEFAULT_TOP_N));
        self.aggregation(&params).await
    }

    /// Conversions and unique conversions for one event, bucketed by
    /// `options.group_by`.
    pub async fn event_conversions(
        &self,
        site_id: &str,
        event_id: &str,
        options: &ReportOptions,
    ) -> Result<Vec<AggregationRow>, Error> {
        let site_id = require_id("Site", site_id)?;
        let event_id = require_id("Event", event_id)?;
        debug!(site_id, event_id, "fetching event conversions");
        let mut params = base_params(
            AggregationEntity::Event,
            event_id,
            "conversions,unique_conversions",
            options,
        );
        params.date_grouping = options.group_by;
        self.aggregation(&params).await
    }
}

fn base_params(
    entity: AggregationEntity,
    entity_id: &str,
    aggregates: &str,
    options: &ReportOptions,
) -> AggregationParams {
    AggregationParams::new(entity, entity_id, aggregates)
        .timezone(
            options
                .timezone
                .clone()
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_owned()),
        )
        .date_range(options.date_from.clone(), options.date_to.clone())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn base_params_default_timezone() {
        let params = base_params(
            AggregationEntity::Pageview,
            "SITE",
            "visits",
            &ReportOptions::default(),
        );
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "entity": "pageview",
                "entity_id": "SITE",
                "aggregates": "visits",
                "timezone": "UTC",
            })
        );
    }

    #[test]
    fn base_params_carry_date_range() {
        let options = ReportOptions {
            date_from: Some("2024-01-01 00:00:00".into()),
            date_to: Some("2024-01-31 23:59:59".into()),
            timezone: Some("Europe/Amsterdam".into()),
            ..ReportOptions::default()
        };
        let params = base_params(AggregationEntity::Event, "EVT", "conversions", &options);
        assert_eq!(params.timezone.as_deref(), Some("Europe/Amsterdam"));
        assert_eq!(params.date_from.as_deref(), Some("2024-01-01 00:00:00"));
        assert_eq!(params.date_to.as_deref(), Some("2024-01-31 23:59:59"));
    }
}
