//! GeoJSON feature collection parsing.

use std::io::{BufReader, Read};

use serde_json::Value;

use crate::types::{EventRecord, EventWsError, EventWsResult};

/// Parse a GeoJSON `FeatureCollection` into event records, in input order.
///
/// Reads the whole stream. Fails on the first feature that is not a JSON
/// object; no partial list is returned.
pub fn parse_event_collection<R: Read>(input: R) -> EventWsResult<Vec<EventRecord>> {
    let value: Value = serde_json::from_reader(BufReader::new(input)).map_err(|e| {
        if e.is_io() {
            EventWsError::Io(e.into())
        } else {
            EventWsError::Json(e)
        }
    })?;
    events_from_value(value)
}

/// Same as [`parse_event_collection`] for an already-decoded JSON value.
pub fn events_from_value(value: Value) -> EventWsResult<Vec<EventRecord>> {
    let Value::Object(mut collection) = value else {
        return Err(EventWsError::NotACollection);
    };

    let Some(Value::Array(features)) = collection.remove("features") else {
        return Err(EventWsError::MissingFeatures);
    };

    let events = features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| match feature {
            Value::Object(map) => Ok(EventRecord::new(map)),
            _ => Err(EventWsError::NotAFeature(index)),
        })
        .collect::<EventWsResult<Vec<_>>>()?;

    tracing::trace!("Parsed {} events", events.len());
    Ok(events)
}
