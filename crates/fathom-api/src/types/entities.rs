//! Response types for the Fathom v1 API.
//!
//! Field names match the wire format (snake_case). Timestamps are kept as
//! the server sends them (`YYYY-MM-DD HH:MM:SS`, UTC); use
//! [`parse_timestamp`] when a typed value is needed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumString};

use super::base::Identified;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a server timestamp such as `2022-01-01 12:00:00`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
}

// ── Account ──────────────────────────────────────────────────────────

/// The account that owns the API token (`GET /v1/account`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Numeric on the wire; kept as a string like every other ID.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub object: String,
    pub name: String,
    pub email: String,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number ID, got {other}"
        ))),
    }
}

// ── Sites ────────────────────────────────────────────────────────────

/// Public dashboard sharing mode.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sharing {
    #[default]
    None,
    Private,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub object: String,
    pub name: String,
    pub sharing: Sharing,
    pub created_at: String,
}

impl Site {
    pub fn created_at_time(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.created_at)
    }
}

impl Identified for Site {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Echo returned by `DELETE /v1/sites/{id}`. The server may send only
/// the ID alongside the flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedSite {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sharing: Option<Sharing>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

/// Echo returned by `DELETE /v1/sites/{id}/data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WipedSite {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sharing: Option<Sharing>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub wiped: bool,
}

// ── Events ───────────────────────────────────────────────────────────

/// A goal/conversion event tracked on a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub object: String,
    pub name: String,
    pub site_id: String,
    pub created_at: String,
}

impl Event {
    pub fn created_at_time(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.created_at)
    }
}

impl Identified for Event {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedEvent {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WipedEvent {
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub wiped: bool,
}

// ── Reports ──────────────────────────────────────────────────────────

/// One aggregation result row.
///
/// The keys depend on the requested aggregates and groupings, and the
/// server sends some numbers as strings, so rows stay untyped.
pub type AggregationRow = Map<String, Value>;

/// Visitors on a page right now, one entry of the detailed breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub pathname: String,
    pub hostname: String,
    pub total: u64,
}

/// Visitors arriving from a referrer right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferrerEntry {
    pub referrer_hostname: String,
    pub referrer_pathname: String,
    pub total: u64,
}

/// From `GET /v1/current_visitors`. Breakdowns are only present when
/// `detailed=true` was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentVisitorsResponse {
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<ContentEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrers: Option<Vec<ReferrerEntry>>,
}
