// Fathom API v1 surface
//
// Each resource is a thin struct over the shared `HttpClient`; endpoint
// modules hold the per-resource methods.

mod account;
mod events;
mod reports;
mod sites;

use std::sync::Arc;

pub use account::AccountResource;
pub use events::EventsResource;
pub use reports::ReportsResource;
pub use sites::SitesResource;

use crate::error::Error;
use crate::http::HttpClient;
use crate::types::{Account, CurrentVisitorsParams, CurrentVisitorsResponse, Event, Site};

/// Characters that would let an ID escape its path segment.
const RESERVED_ID_CHARS: &[char] = &['/', '?', '#', '%', '\\'];

/// Reject identifiers that are blank or would not stay a single path
/// segment, before a request is built.
fn require_id<'a>(kind: &str, id: &'a str) -> Result<&'a str, Error> {
    if id.trim().is_empty() {
        return Err(Error::missing_id(kind));
    }
    if id.contains(RESERVED_ID_CHARS) || id == "." || id == ".." {
        return Err(Error::InvalidArgument(format!(
            "{kind} ID contains reserved characters: {id:?}"
        )));
    }
    Ok(id)
}

/// The v1 resource namespace.
#[derive(Debug, Clone)]
pub struct ApiV1 {
    http: Arc<HttpClient>,
    pub account: AccountResource,
    pub sites: SitesResource,
    pub reports: ReportsResource,
}

impl ApiV1 {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self {
            account: AccountResource::new(Arc::clone(&http)),
            sites: SitesResource::new(Arc::clone(&http)),
            reports: ReportsResource::new(Arc::clone(&http)),
            http,
        }
    }

    /// Events for one site.
    pub fn events(&self, site_id: &str) -> Result<EventsResource, Error> {
        EventsResource::new(Arc::clone(&self.http), site_id)
    }

    // ── Shortcuts ────────────────────────────────────────────────────

    pub async fn get_account(&self) -> Result<Account, Error> {
        self.account.get().await
    }

    pub async fn get_site(&self, site_id: &str) -> Result<Site, Error> {
        self.sites.get(site_id).await
    }

    pub async fn get_event(&self, site_id: &str, event_id: &str) -> Result<Event, Error> {
        self.events(site_id)?.get(event_id).await
    }

    pub async fn get_current_visitors(
        &self,
        site_id: &str,
        detailed: bool,
    ) -> Result<CurrentVisitorsResponse, Error> {
        let site_id = require_id("Site", site_id)?;
        self.reports
            .current_visitors(&CurrentVisitorsParams {
                site_id: site_id.to_owned(),
                detailed: Some(detailed),
            })
            .await
    }
}
