//! Request parameter types.
//!
//! Optional fields are omitted from the wire when unset, so the validation
//! schemas see exactly what the server will see.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::entities::Sharing;

// ── Sites ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSiteParams {
    pub name: String,
    /// Defaults to `none` server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharing: Option<Sharing>,
    /// Required when `sharing` is `private`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_password: Option<String>,
}

impl CreateSiteParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn sharing(mut self, sharing: Sharing) -> Self {
        self.sharing = Some(sharing);
        self
    }

    pub fn share_password(mut self, password: impl Into<String>) -> Self {
        self.share_password = Some(password.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSiteParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharing: Option<Sharing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_password: Option<String>,
}

// ── Events ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateEventParams {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEventParams {
    pub name: String,
}

// ── Aggregations ─────────────────────────────────────────────────────

/// What an aggregation reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AggregationEntity {
    Pageview,
    Event,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DateGrouping {
    Hour,
    Day,
    Month,
    Year,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr)]
pub enum FilterOperator {
    #[serde(rename = "is")]
    #[strum(serialize = "is")]
    Is,
    #[serde(rename = "is not")]
    #[strum(serialize = "is not")]
    IsNot,
    #[serde(rename = "is like")]
    #[strum(serialize = "is like")]
    IsLike,
    #[serde(rename = "is not like")]
    #[strum(serialize = "is not like")]
    IsNotLike,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregationFilter {
    pub property: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl AggregationFilter {
    pub fn new(property: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Parameters for `GET /v1/aggregations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregationParams {
    pub entity: AggregationEntity,
    /// Site ID for pageviews, event ID for events.
    pub entity_id: String,
    /// Comma-separated SUM aggregates, e.g. `visits,uniques`.
    pub aggregates: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_grouping: Option<DateGrouping>,
    /// Comma-separated fields to group by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_grouping: Option<String>,
    /// `field:asc` or `field:desc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// IANA name; the server defaults to UTC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<AggregationFilter>>,
}

impl AggregationParams {
    pub fn new(
        entity: AggregationEntity,
        entity_id: impl Into<String>,
        aggregates: impl Into<String>,
    ) -> Self {
        Self {
            entity,
            entity_id: entity_id.into(),
            aggregates: aggregates.into(),
            date_grouping: None,
            field_grouping: None,
            sort_by: None,
            timezone: None,
            date_from: None,
            date_to: None,
            limit: None,
            filters: None,
        }
    }

    pub fn date_grouping(mut self, grouping: DateGrouping) -> Self {
        self.date_grouping = Some(grouping);
        self
    }

    pub fn field_grouping(mut self, fields: impl Into<String>) -> Self {
        self.field_grouping = Some(fields.into());
        self
    }

    pub fn sort_by(mut self, sort: impl Into<String>) -> Self {
        self.sort_by = Some(sort.into());
        self
    }

    pub fn timezone(mut self, tz: impl Into<String>) -> Self {
        self.timezone = Some(tz.into());
        self
    }

    pub fn date_range(mut self, from: Option<String>, to: Option<String>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter(mut self, filter: AggregationFilter) -> Self {
        self.filters.get_or_insert_with(Vec::new).push(filter);
        self
    }
}

/// Shared options for the canned aggregation presets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    /// Defaults to `UTC`.
    pub timezone: Option<String>,
    /// Date bucket for time-series presets; ignored by the top-N presets.
    pub group_by: Option<DateGrouping>,
    /// Row cap; the top-N presets default to 20.
    pub limit: Option<u32>,
}

// ── Current visitors ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrentVisitorsParams {
    pub site_id: String,
    /// Include per-page and per-referrer breakdowns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed: Option<bool>,
}
