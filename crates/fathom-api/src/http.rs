// HTTP pipeline for the Fathom API.
//
// Every resource method funnels through `HttpClient::request`: URL join,
// query encoding, JSON body, response classification. Endpoint modules
// never touch reqwest directly.

use reqwest::{Method, StatusCode};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.usefathom.com";

/// Query key whose array value is sent as one JSON-encoded parameter.
const FILTERS_KEY: &str = "filters";

const UNKNOWN_ERROR: &str = "Unknown error occurred";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Low-level client for the Fathom REST API.
///
/// Holds the configured `reqwest::Client` (with auth headers already
/// installed) and the base URL. Stateless between calls.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Build a client that authenticates with `token` against `base_url`.
    pub fn new(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(token)?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { http, base_url })
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Core request ─────────────────────────────────────────────────

    /// Issue one request and decode the JSON response into `T`.
    ///
    /// `path` is resolved against the base URL (an absolute path such as
    /// `/v1/sites` replaces any base path). `query` must be a JSON object;
    /// see [`encode_query`] for how values become parameters. `body` is
    /// only sent for non-GET methods.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Value>,
        body: Option<&Value>,
    ) -> Result<T, Error> {
        let url = self.base_url.join(path)?;
        let params = query.map(encode_query).unwrap_or_default();
        debug!("{method} {url} params={params:?}");

        let mut builder = self.http.request(method.clone(), url);
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        if method != Method::GET {
            if let Some(body) = body {
                builder = builder.json(body);
            }
        }

        let resp = builder.send().await?;
        Self::handle_response(resp).await
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let query = query.map(to_value).transpose()?;
        self.request(Method::GET, path, query.as_ref(), None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = to_value(body)?;
        self.request(Method::POST, path, None, Some(&body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request(Method::DELETE, path, None, None).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            debug!("request rejected with 401");
            return Err(Error::Authentication);
        }

        let body = resp.text().await?;

        // Error bodies are JSON too; anything else is a broken response,
        // whatever the status said.
        if !status.is_success() {
            let err = match serde_json::from_str::<Value>(&body) {
                Ok(value) => parse_error(status, value),
                Err(e) => malformed_body(&e, body),
            };
            debug!(status = status.as_u16(), "request failed: {err}");
            return Err(err);
        }

        trace!(bytes = body.len(), "response body received");
        serde_json::from_str(&body).map_err(|e| malformed_body(&e, body))
    }
}

fn parse_error(status: StatusCode, body: Value) -> Error {
    let message = serde_json::from_value::<ErrorResponse>(body)
        .ok()
        .and_then(|err| {
            err.error
                .filter(|m| !m.is_empty())
                .or_else(|| err.message.filter(|m| !m.is_empty()))
        })
        .unwrap_or_else(|| UNKNOWN_ERROR.to_owned());

    Error::Api {
        message,
        status: status.as_u16(),
    }
}

fn malformed_body(err: &serde_json::Error, body: String) -> Error {
    let preview: String = body.chars().take(200).collect();
    Error::Deserialization {
        message: format!("{err} (body preview: {preview:?})"),
        body,
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, Error> {
    serde_json::to_value(value)
        .map_err(|e| Error::InvalidArgument(format!("parameters could not be serialized: {e}")))
}

// ── Query encoding ───────────────────────────────────────────────────

/// Flatten a JSON object into query pairs.
///
/// - `null` values are skipped.
/// - A non-empty `filters` array becomes a single JSON-encoded value.
/// - Any other array becomes one repeated key per element.
/// - Strings are sent verbatim; numbers and booleans as their JSON text.
///
/// Anything other than an object yields no pairs.
pub fn encode_query(params: &Value) -> Vec<(String, String)> {
    let Value::Object(map) = params else {
        return Vec::new();
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) if key == FILTERS_KEY => {
                if !items.is_empty() {
                    pairs.push((key.clone(), value.to_string()));
                }
            }
            Value::Array(items) => pairs.extend(
                items
                    .iter()
                    .filter(|item| !item.is_null())
                    .map(|item| (key.clone(), scalar(item))),
            ),
            other => pairs.push((key.clone(), scalar(other))),
        }
    }
    pairs
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
