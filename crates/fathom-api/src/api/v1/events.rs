// Event endpoints
//
// Events live under a site: `/v1/sites/{site_id}/events[/{event_id}[/data]]`.
// The resource is bound to one site at construction.

use std::sync::Arc;

use tracing::debug;

use super::require_id;
use crate::error::Error;
use crate::http::HttpClient;
use crate::pagination::{ListAllOptions, paginate_all};
use crate::types::{
    CreateEventParams, DeletedEvent, Event, ListResponse, PaginationParams, UpdateEventParams,
    WipedEvent,
};
use crate::validation::{CREATE_EVENT, PAGINATION, UPDATE_EVENT, validate};

/// `/v1/sites/{site_id}/events`
#[derive(Debug, Clone)]
pub struct EventsResource {
    http: Arc<HttpClient>,
    site_id: String,
}

impl EventsResource {
    /// Bind to `site_id`. Fails if the ID is blank.
    pub fn new(http: Arc<HttpClient>, site_id: &str) -> Result<Self, Error> {
        let site_id = require_id("Site", site_id)?.to_owned();
        Ok(Self { http, site_id })
    }

    /// The site this resource is bound to.
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    fn path(&self, suffix: &str) -> String {
        format!("/v1/sites/{}/events{suffix}", self.site_id)
    }

    /// One page of events for the site.
    ///
    /// `GET /v1/sites/{site_id}/events`
    pub async fn list(
        &self,
        params: Option<&PaginationParams>,
    ) -> Result<ListResponse<Event>, Error> {
        if let Some(params) = params {
            validate(&PAGINATION, params)?;
        }
        debug!(site_id = %self.site_id, ?params, "listing events");
        self.http.get(&self.path(""), params).await
    }

    /// Every event for the site, following cursors.
    pub async fn list_all(&self, options: &ListAllOptions) -> Result<Vec<Event>, Error> {
        paginate_all(options, |params| async move { self.list(Some(&params)).await }).await
    }

    /// `GET /v1/sites/{site_id}/events/{event_id}`
    pub async fn get(&self, event_id: &str) -> Result<Event, Error> {
        let event_id = require_id("Event", event_id)?;
        debug!(site_id = %self.site_id, event_id, "fetching event");
        self.http
            .get::<_, ()>(&self.path(&format!("/{event_id}")), None)
            .await
    }

    /// `POST /v1/sites/{site_id}/events`
    pub async fn create(&self, params: &CreateEventParams) -> Result<Event, Error> {
        let params = validate(&CREATE_EVENT, params)?;
        debug!(site_id = %self.site_id, name = %params.name, "creating event");
        self.http.post(&self.path(""), params).await
    }

    /// `POST /v1/sites/{site_id}/events/{event_id}`
    pub async fn update(&self, event_id: &str, params: &UpdateEventParams) -> Result<Event, Error> {
        let event_id = require_id("Event", event_id)?;
        let params = validate(&UPDATE_EVENT, params)?;
        debug!(site_id = %self.site_id, event_id, "updating event");
        self.http
            .post(&self.path(&format!("/{event_id}")), params)
            .await
    }

    /// Remove all conversion data, keeping the event.
    ///
    /// `DELETE /v1/sites/{site_id}/events/{event_id}/data`
    pub async fn wipe(&self, event_id: &str) -> Result<WipedEvent, Error> {
        let event_id = require_id("Event", event_id)?;
        debug!(site_id = %self.site_id, event_id, "wiping event data");
        self.http
            .delete(&self.path(&format!("/{event_id}/data")))
            .await
    }

    /// `DELETE /v1/sites/{site_id}/events/{event_id}`
    pub async fn delete(&self, event_id: &str) -> Result<DeletedEvent, Error> {
        let event_id = require_id("Event", event_id)?;
        debug!(site_id = %self.site_id, event_id, "deleting event");
        self.http.delete(&self.path(&format!("/{event_id}"))).await
    }
}
