//! Facade over the event web service: URL building, fetching, parsing.

use tracing::debug;
use url::Url;

use crate::config::resolve_service_url;
use crate::http::{Body, HttpTransport, ReqwestTransport};
use crate::parser::parse_event_collection;
use crate::query::EventQuery;
use crate::types::{EventRecord, EventWsResult, Format};

/// Client for one deployment of the event web service.
#[derive(Clone)]
pub struct EventWebService<T = ReqwestTransport> {
    service_url: Url,
    transport: T,
}

impl EventWebService<ReqwestTransport> {
    /// Client for `service_url` using the default blocking HTTP transport.
    pub fn new(service_url: Url) -> EventWsResult<Self> {
        Ok(Self::with_transport(service_url, ReqwestTransport::new()?))
    }

    /// Client for the URL chosen by [`resolve_service_url`].
    pub fn from_config(explicit: Option<&str>) -> EventWsResult<Self> {
        Self::new(resolve_service_url(explicit)?)
    }
}

impl<T: HttpTransport> EventWebService<T> {
    pub fn with_transport(service_url: Url, transport: T) -> Self {
        Self {
            service_url: as_directory(service_url),
            transport,
        }
    }

    /// Base URL that `query` is resolved against. Always ends in `/` unless
    /// the URL cannot be a base at all.
    pub fn service_url(&self) -> &Url {
        &self.service_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// URL for `query`. `format` overrides the query's own format.
    pub fn url(&self, query: &EventQuery, format: Option<Format>) -> EventWsResult<Url> {
        let reference = format!("query{}", query.to_query_string(format));
        Ok(self.service_url.join(&reference)?)
    }

    /// Open `url` through the transport, gzip negotiated.
    pub fn open(&self, url: &Url) -> EventWsResult<Body> {
        self.transport.open(url)
    }

    /// Fetch the events matching `query` as GeoJSON and parse them.
    ///
    /// The query's own format is ignored. The response stream is released
    /// before returning, whether parsing succeeded or not.
    pub fn events(&self, query: &EventQuery) -> EventWsResult<Vec<EventRecord>> {
        let url = self.url(query, Some(Format::GeoJson))?;
        let body = self.open(&url)?;
        let events = parse_event_collection(body)?;
        debug!("Received {} events from {url}", events.len());
        Ok(events)
    }
}

fn as_directory(mut url: Url) -> Url {
    if !url.cannot_be_a_base() && !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
