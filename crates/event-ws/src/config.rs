//! Service URL resolution.

use url::Url;

use crate::types::EventWsResult;

/// Environment variable consulted when no URL is given explicitly.
pub const SERVICE_URL_ENV: &str = "EVENT_WS_URL";

/// The public USGS deployment of the event web service.
pub const DEFAULT_SERVICE_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/";

/// Resolve the service base URL: explicit value, then `EVENT_WS_URL`, then
/// the USGS default.
pub fn resolve_service_url(explicit: Option<&str>) -> EventWsResult<Url> {
    if let Some(url) = explicit {
        return Ok(Url::parse(url)?);
    }

    if let Ok(env_url) = std::env::var(SERVICE_URL_ENV) {
        if !env_url.trim().is_empty() {
            return Ok(Url::parse(env_url.trim())?);
        }
    }

    Ok(Url::parse(DEFAULT_SERVICE_URL)?)
}
