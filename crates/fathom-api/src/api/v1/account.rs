// Account endpoint

use std::sync::Arc;

use tracing::debug;

use crate::error::Error;
use crate::http::HttpClient;
use crate::types::Account;

/// `/v1/account`
#[derive(Debug, Clone)]
pub struct AccountResource {
    http: Arc<HttpClient>,
}

impl AccountResource {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// The account that owns the API token.
    ///
    /// `GET /v1/account`
    pub async fn get(&self) -> Result<Account, Error> {
        debug!("fetching account");
        self.http.get::<_, ()>("/v1/account", None).await
    }
}
