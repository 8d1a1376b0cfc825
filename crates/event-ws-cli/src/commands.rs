//! Command implementations. Each writes its result to `out`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use event_ws::{
    decode_body, parse_event_collection, EventQuery, EventWebService, Format, HttpTransport,
};

use crate::output::write_events;

/// Print the request URL without fetching it.
pub fn url<T: HttpTransport, W: Write>(
    service: &EventWebService<T>,
    query: &EventQuery,
    format: Option<Format>,
    out: &mut W,
) -> Result<()> {
    let url = service.url(query, format)?;
    writeln!(out, "{url}")?;
    Ok(())
}

/// Fetch and print the events matching `query`.
pub fn events<T: HttpTransport, W: Write>(
    service: &EventWebService<T>,
    query: &EventQuery,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let events = service
        .events(query)
        .with_context(|| format!("Failed to query {}", service.service_url()))?;
    info!("{} events", events.len());
    write_events(out, &events, json)
}

/// Parse a GeoJSON file saved from the service. Files ending in `.gz` are
/// decompressed first.
pub fn parse_file<W: Write>(path: &Path, json: bool, out: &mut W) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let gzipped = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
    let body = decode_body(gzipped.then_some("gzip"), file);

    let events = parse_event_collection(body)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!("{} events in {}", events.len(), path.display());
    write_events(out, &events, json)
}
