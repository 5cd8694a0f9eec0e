// Site endpoints
//
// Sites are account-scoped: `/v1/sites[/{site_id}[/data]]`. Updates use
// POST, matching the API.

use std::sync::Arc;

use tracing::debug;

use super::require_id;
use crate::error::Error;
use crate::http::HttpClient;
use crate::pagination::{ListAllOptions, paginate_all};
use crate::types::{
    CreateSiteParams, DeletedSite, ListResponse, PaginationParams, Site, UpdateSiteParams,
    WipedSite,
};
use crate::validation::{CREATE_SITE, PAGINATION, UPDATE_SITE, validate};

/// `/v1/sites`
#[derive(Debug, Clone)]
pub struct SitesResource {
    http: Arc<HttpClient>,
}

impl SitesResource {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// One page of sites.
    ///
    /// `GET /v1/sites`
    pub async fn list(&self, params: Option<&PaginationParams>) -> Result<ListResponse<Site>, Error> {
        if let Some(params) = params {
            validate(&PAGINATION, params)?;
        }
        debug!(?params, "listing sites");
        self.http.get("/v1/sites", params).await
    }

    /// Every site, following cursors until the API reports no more.
    pub async fn list_all(&self, options: &ListAllOptions) -> Result<Vec<Site>, Error> {
        paginate_all(options, |params| async move { self.list(Some(&params)).await }).await
    }

    /// `GET /v1/sites/{site_id}`
    pub async fn get(&self, site_id: &str) -> Result<Site, Error> {
        let site_id = require_id("Site", site_id)?;
        debug!(site_id, "fetching site");
        self.http
            .get::<_, ()>(&format!("/v1/sites/{site_id}"), None)
            .await
    }

    /// `POST /v1/sites`
    pub async fn create(&self, params: &CreateSiteParams) -> Result<Site, Error> {
        let params = validate(&CREATE_SITE, params)?;
        debug!(name = %params.name, "creating site");
        self.http.post("/v1/sites", params).await
    }

    /// `POST /v1/sites/{site_id}`
    pub async fn update(&self, site_id: &str, params: &UpdateSiteParams) -> Result<Site, Error> {
        let site_id = require_id("Site", site_id)?;
        let params = validate(&UPDATE_SITE, params)?;
        debug!(site_id, "updating site");
        self.http
            .post(&format!("/v1/sites/{site_id}"), params)
            .await
    }

    /// Remove all pageview and event data, keeping the site.
    ///
    /// `DELETE /v1/sites/{site_id}/data`
    pub async fn wipe(&self, site_id: &str) -> Result<WipedSite, Error> {
        let site_id = require_id("Site", site_id)?;
        debug!(site_id, "wiping site data");
        self.http.delete(&format!("/v1/sites/{site_id}/data")).await
    }

    /// `DELETE /v1/sites/{site_id}`
    pub async fn delete(&self, site_id: &str) -> Result<DeletedSite, Error> {
        let site_id = require_id("Site", site_id)?;
        debug!(site_id, "deleting site");
        self.http.delete(&format!("/v1/sites/{site_id}")).await
    }
}
