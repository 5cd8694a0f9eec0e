//! Async Rust client for the Fathom Analytics REST API.
//!
//! - **[`FathomApi`]**: facade. Validates [`ClientOptions`], builds one
//!   [`HttpClient`], and exposes the v1 namespace via
//!   [`api()`](FathomApi::api).
//! - **[`ApiV1`]**: `account`, `sites`, `reports` resources plus
//!   [`events(site_id)`](ApiV1::events).
//! - **[`HttpClient`]**: the request pipeline every method goes through:
//!   URL join, query encoding, bearer auth, error classification.
//! - **[`validation`]**: declarative schemas checked before any request
//!   leaves the process.
//!
//! Every failure is an [`Error`] carrying a message and a numeric
//! [`status`](Error::status).

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod pagination;
pub mod transport;
pub mod types;
pub mod validation;

pub use api::v1::{AccountResource, ApiV1, EventsResource, ReportsResource, SitesResource};
pub use client::{ClientOptions, FathomApi, FathomApiBuilder};
pub use error::Error;
pub use http::{DEFAULT_BASE_URL, HttpClient, encode_query};
pub use pagination::{ListAllOptions, MAX_PAGE_SIZE, paginate_all};
pub use transport::TransportConfig;
pub use types::*;
