//! Core data types for event identifiers, parsed event records, and errors.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generates `as_str`, `Display` and case-insensitive `FromStr` for an enum
/// whose variants map one-to-one onto service parameter values.
macro_rules! wire_enum {
    ($name:ident, $what:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// All variants, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value sent to the service.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = EventWsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.trim().to_ascii_lowercase();
                match lower.as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(EventWsError::InvalidInput(format!(
                        "unknown {}: {s}",
                        $what
                    ))),
                }
            }
        }
    };
}

/// Output format requested from the service.
///
/// Only [`Format::GeoJson`] responses can be parsed by this crate; the other
/// formats are useful for building URLs handed to other tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[serde(rename = "geojson")]
    GeoJson,
    Kml,
    Csv,
    QuakeMl,
    Text,
    Xml,
}

wire_enum!(Format, "format", {
    GeoJson => "geojson",
    Kml => "kml",
    Csv => "csv",
    QuakeMl => "quakeml",
    Text => "text",
    Xml => "xml",
});

/// PAGER alert level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Green,
    Yellow,
    Orange,
    Red,
}

wire_enum!(AlertLevel, "alert level", {
    Green => "green",
    Yellow => "yellow",
    Orange => "orange",
    Red => "red",
});

/// How KML output colours its placemarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KmlColorBy {
    Age,
    Depth,
}

wire_enum!(KmlColorBy, "kml colour scheme", {
    Age => "age",
    Depth => "depth",
});

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderBy {
    Time,
    TimeAsc,
    Magnitude,
    MagnitudeAsc,
}

wire_enum!(OrderBy, "ordering", {
    Time => "time",
    TimeAsc => "time-asc",
    Magnitude => "magnitude",
    MagnitudeAsc => "magnitude-asc",
});

/// Review status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    All,
    Automatic,
    Reviewed,
}

wire_enum!(ReviewStatus, "review status", {
    All => "all",
    Automatic => "automatic",
    Reviewed => "reviewed",
});

/// Identifier of an event: contributing network plus the network's own code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventId {
    network: String,
    code: String,
}

impl EventId {
    pub fn new(network: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            code: code.into(),
        }
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.network, self.code)
    }
}

/// One event, holding a GeoJSON feature object exactly as the service sent it.
///
/// Nothing about the feature's shape is validated. The accessors return
/// `None` when a member is missing or has an unexpected type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRecord {
    feature: Map<String, Value>,
}

impl EventRecord {
    /// Wrap a feature object.
    pub fn new(feature: Map<String, Value>) -> Self {
        Self { feature }
    }

    /// Network plus code from the feature properties (`net`, `code`).
    pub fn id(&self) -> Option<EventId> {
        let network = self.property("net")?.as_str()?;
        let code = self.property("code")?.as_str()?;
        Some(EventId::new(network, code))
    }

    /// The feature-level `id` member.
    pub fn feature_id(&self) -> Option<&str> {
        self.feature.get("id")?.as_str()
    }

    /// The wrapped feature object.
    pub fn feature(&self) -> &Map<String, Value> {
        &self.feature
    }

    /// The feature's `properties` object.
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.feature.get("properties")?.as_object()
    }

    /// Look up a single property by name.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties()?.get(name)
    }

    pub fn magnitude(&self) -> Option<f64> {
        self.property("mag")?.as_f64()
    }

    pub fn magnitude_type(&self) -> Option<&str> {
        self.property("magType")?.as_str()
    }

    pub fn place(&self) -> Option<&str> {
        self.property("place")?.as_str()
    }

    /// Origin time; the service sends epoch milliseconds.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.millis_property("time")
    }

    /// Last update time of the event.
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.millis_property("updated")
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinate(0)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinate(1)
    }

    /// Depth in kilometres.
    pub fn depth(&self) -> Option<f64> {
        self.coordinate(2)
    }

    fn millis_property(&self, name: &str) -> Option<DateTime<Utc>> {
        let millis = self.property(name)?.as_i64()?;
        DateTime::from_timestamp_millis(millis)
    }

    fn coordinate(&self, index: usize) -> Option<f64> {
        self.feature
            .get("geometry")?
            .get("coordinates")?
            .get(index)?
            .as_f64()
    }
}

/// Errors that can occur talking to the event web service.
#[derive(thiserror::Error, Debug)]
pub enum EventWsError {
    #[error("Malformed URL: {0}")]
    MalformedUrl(#[from] url::ParseError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected feature collection")]
    NotACollection,

    #[error("Expected features")]
    MissingFeatures,

    #[error("Expected feature at index {0}")]
    NotAFeature(usize),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl EventWsError {
    /// True for errors caused by the shape of the response body.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            EventWsError::Json(_)
                | EventWsError::NotACollection
                | EventWsError::MissingFeatures
                | EventWsError::NotAFeature(_)
        )
    }

    /// True for failures while talking to the server or reading its reply.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            EventWsError::Transport(_) | EventWsError::HttpStatus { .. } | EventWsError::Io(_)
        )
    }
}

/// Convenience result type.
pub type EventWsResult<T> = Result<T, EventWsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> EventRecord {
        match value {
            Value::Object(map) => EventRecord::new(map),
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_event_id_parts() {
        let id = EventId::new("network", "code");
        assert_eq!(id.network(), "network");
        assert_eq!(id.code(), "code");
        assert_eq!(id.to_string(), "networkcode");
    }

    #[test]
    fn test_format_wire_names() {
        assert_eq!(Format::GeoJson.to_string(), "geojson");
        assert_eq!(Format::QuakeMl.to_string(), "quakeml");
        assert_eq!("GeoJSON".parse::<Format>().unwrap(), Format::GeoJson);
        assert_eq!(" csv ".parse::<Format>().unwrap(), Format::Csv);
        assert!("png".parse::<Format>().is_err());
    }

    #[test]
    fn test_order_by_wire_names() {
        assert_eq!(OrderBy::TimeAsc.as_str(), "time-asc");
        assert_eq!("magnitude-asc".parse::<OrderBy>().unwrap(), OrderBy::MagnitudeAsc);
        assert_eq!(OrderBy::ALL.len(), 4);
    }

    #[test]
    fn test_serde_matches_wire_names() {
        for format in Format::ALL {
            let encoded = serde_json::to_value(format).unwrap();
            assert_eq!(encoded, json!(format.as_str()));
        }
        for order in OrderBy::ALL {
            let encoded = serde_json::to_value(order).unwrap();
            assert_eq!(encoded, json!(order.as_str()));
        }
    }

    #[test]
    fn test_record_accessors() {
        let rec = record(json!({
            "type": "Feature",
            "id": "us7000abcd",
            "properties": {
                "net": "us",
                "code": "7000abcd",
                "mag": 5.4,
                "magType": "mww",
                "place": "10 km SSW of Somewhere",
                "time": 1577836800000i64,
                "updated": 1577836860000i64
            },
            "geometry": { "type": "Point", "coordinates": [-117.5, 35.25, 8.1] }
        }));

        assert_eq!(rec.id(), Some(EventId::new("us", "7000abcd")));
        assert_eq!(rec.feature_id(), Some("us7000abcd"));
        assert_eq!(rec.magnitude(), Some(5.4));
        assert_eq!(rec.magnitude_type(), Some("mww"));
        assert_eq!(rec.place(), Some("10 km SSW of Somewhere"));
        assert_eq!(
            rec.time().unwrap().to_rfc3339(),
            "2020-01-01T00:00:00+00:00"
        );
        assert_eq!(rec.updated().unwrap().timestamp(), 1577836860);
        assert_eq!(rec.longitude(), Some(-117.5));
        assert_eq!(rec.latitude(), Some(35.25));
        assert_eq!(rec.depth(), Some(8.1));
    }

    #[test]
    fn test_record_tolerates_missing_members() {
        let rec = record(json!({ "properties": { "net": "ci" } }));
        assert_eq!(rec.id(), None);
        assert_eq!(rec.magnitude(), None);
        assert_eq!(rec.depth(), None);
        assert_eq!(rec.property("net"), Some(&json!("ci")));

        let bare = record(json!({}));
        assert!(bare.properties().is_none());
        assert!(bare.time().is_none());
    }

    #[test]
    fn test_record_serializes_verbatim() {
        let source = json!({ "type": "Feature", "extra": [1, 2, 3] });
        let rec = record(source.clone());
        assert_eq!(serde_json::to_value(&rec).unwrap(), source);
    }

    #[test]
    fn test_error_classification() {
        assert!(EventWsError::NotACollection.is_format_error());
        assert!(EventWsError::MissingFeatures.is_format_error());
        assert!(!EventWsError::MissingFeatures.is_transport_error());
        assert!(EventWsError::Transport("refused".into()).is_transport_error());
        let status = EventWsError::HttpStatus {
            status: 503,
            url: "http://localhost/query".into(),
        };
        assert!(status.is_transport_error());
        assert_eq!(status.to_string(), "HTTP 503 from http://localhost/query");
    }
}
