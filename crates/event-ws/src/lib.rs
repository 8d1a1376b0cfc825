//! Client for the FDSN earthquake event web service.
//!
//! Builds `query` URLs from typed filters, fetches them with gzip
//! negotiation, and parses GeoJSON feature collections into event records.

pub mod config;
pub mod http;
pub mod parser;
pub mod query;
pub mod service;
pub mod types;

pub use config::{resolve_service_url, DEFAULT_SERVICE_URL, SERVICE_URL_ENV};
pub use http::{decode_body, Body, HttpTransport, ReqwestTransport};
pub use parser::{events_from_value, parse_event_collection};
pub use query::{iso8601, query_string, EventQuery, ISO8601_FORMAT};
pub use service::EventWebService;
pub use types::*;
pub use url::Url;
