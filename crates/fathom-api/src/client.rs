// Client facade
//
// Validates options once, builds the shared HttpClient, and hands out the
// versioned resource namespace.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use tracing::debug;

use crate::api::v1::ApiV1;
use crate::error::Error;
use crate::http::{DEFAULT_BASE_URL, HttpClient};
use crate::transport::TransportConfig;
use crate::types::ApiVersion;
use crate::validation::{CLIENT_OPTIONS, validate_value};

/// Everything needed to talk to the API.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API token from the Fathom dashboard.
    pub token: SecretString,
    /// Defaults to [`ApiVersion::V1`].
    pub version: Option<ApiVersion>,
    /// Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
    pub transport: TransportConfig,
}

impl ClientOptions {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            version: None,
            base_url: None,
            transport: TransportConfig::default(),
        }
    }

    fn validate(&self) -> Result<(), Error> {
        let mut fields = Map::new();
        fields.insert(
            "token".into(),
            Value::String(self.token.expose_secret().to_owned()),
        );
        if let Some(version) = self.version {
            fields.insert("version".into(), Value::String(version.to_string()));
        }
        if let Some(ref base_url) = self.base_url {
            fields.insert("base_url".into(), Value::String(base_url.clone()));
        }
        validate_value(&CLIENT_OPTIONS, &Value::Object(fields)).map(|_| ())
    }
}

/// Typed client for the Fathom Analytics API.
///
/// ```no_run
/// # async fn demo() -> Result<(), fathom_api::Error> {
/// let fathom = fathom_api::FathomApi::new(fathom_api::ClientOptions::new("token"))?;
/// let account = fathom.api().get_account().await?;
/// println!("{}", account.email);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FathomApi {
    http: Arc<HttpClient>,
    v1: ApiV1,
}

impl FathomApi {
    /// Validate `options` and build the client. No request is sent.
    pub fn new(options: ClientOptions) -> Result<Self, Error> {
        options.validate()?;

        let base_url = options.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let version = options.version.unwrap_or_default();
        debug!(%base_url, %version, "building Fathom client");

        let http = Arc::new(HttpClient::new(base_url, &options.token, &options.transport)?);
        let v1 = ApiV1::new(Arc::clone(&http));
        Ok(Self { http, v1 })
    }

    pub fn builder(token: impl Into<String>) -> FathomApiBuilder {
        FathomApiBuilder {
            options: ClientOptions::new(token),
        }
    }

    /// The v1 API.
    pub fn api(&self) -> &ApiV1 {
        &self.v1
    }

    /// Select an API version by name. Only `"v1"` exists.
    pub fn version(&self, version: &str) -> Result<&ApiV1, Error> {
        match version.parse::<ApiVersion>() {
            Ok(ApiVersion::V1) => Ok(&self.v1),
            Err(_) => Err(Error::UnsupportedVersion(version.to_owned())),
        }
    }

    /// The underlying HTTP client, for endpoints not wrapped here.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}

/// Builder for [`FathomApi`].
#[derive(Debug, Clone)]
pub struct FathomApiBuilder {
    options: ClientOptions,
}

impl FathomApiBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.options.base_url = Some(base_url.into());
        self
    }

    pub fn version(mut self, version: ApiVersion) -> Self {
        self.options.version = Some(version);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.transport.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.transport.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<FathomApi, Error> {
        FathomApi::new(self.options)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_rejected() {
        let err = FathomApi::new(ClientOptions::new("")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.status(), 400);
        assert!(err.to_string().contains("\"token\""), "{err}");
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let err = FathomApi::builder("t").base_url("not a url").build().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Invalid url"), "{err}");
    }

    #[test]
    fn default_base_url() {
        let fathom = FathomApi::new(ClientOptions::new("t")).unwrap();
        assert_eq!(fathom.http().base_url().as_str(), "https://api.usefathom.com/");
    }

    #[test]
    fn unsupported_version_fails_immediately() {
        let fathom = FathomApi::new(ClientOptions::new("t")).unwrap();
        assert!(fathom.version("v1").is_ok());
        let err = fathom.version("v2").unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion(ref v) if v == "v2"));
        assert_eq!(err.to_string(), "API version 'v2' is not supported");
    }
}
