//! Event query parameters and their query-string encoding.
//!
//! Values are written into the query string as-is. Nothing is
//! percent-encoded, so a text value containing `&`, `=` or `#` will corrupt
//! the resulting URL. Callers passing free text are responsible for it.

use chrono::{DateTime, Utc};

use crate::types::{AlertLevel, Format, KmlColorBy, OrderBy, ReviewStatus};

/// Timestamp layout sent to the service: millisecond precision, literal `Z`.
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Filters for an event search. Every field is optional; unset fields are
/// left out of the request entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQuery {
    pub alert_level: Option<AlertLevel>,
    pub catalog: Option<String>,
    pub contributor: Option<String>,
    pub end_time: Option<DateTime<Utc>>,
    pub event_id: Option<String>,
    pub event_type: Option<String>,
    pub format: Option<Format>,
    pub include_all_magnitudes: Option<bool>,
    pub include_all_origins: Option<bool>,
    pub include_arrivals: Option<bool>,
    pub kml_animated: Option<bool>,
    pub kml_color_by: Option<KmlColorBy>,
    pub latitude: Option<f64>,
    pub limit: Option<u32>,
    pub longitude: Option<f64>,
    pub magnitude_type: Option<String>,
    pub max_cdi: Option<f64>,
    pub max_depth: Option<f64>,
    pub max_gap: Option<f64>,
    pub max_latitude: Option<f64>,
    pub max_longitude: Option<f64>,
    pub max_magnitude: Option<f64>,
    pub max_mmi: Option<f64>,
    pub max_radius: Option<f64>,
    pub max_sig: Option<i32>,
    pub min_cdi: Option<f64>,
    pub min_depth: Option<f64>,
    pub min_felt: Option<u32>,
    pub min_gap: Option<f64>,
    pub min_latitude: Option<f64>,
    pub min_longitude: Option<f64>,
    pub min_magnitude: Option<f64>,
    pub min_mmi: Option<f64>,
    pub min_radius: Option<f64>,
    pub min_sig: Option<i32>,
    pub offset: Option<u32>,
    pub order_by: Option<OrderBy>,
    pub product_type: Option<String>,
    pub review_status: Option<ReviewStatus>,
    pub start_time: Option<DateTime<Utc>>,
    pub updated_after: Option<DateTime<Utc>>,
}

impl EventQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full parameter table in wire order, with `None` for unset fields.
    ///
    /// `format` overrides the query's own format when given.
    pub fn parameters(&self, format: Option<Format>) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("alertlevel", text(&self.alert_level)),
            ("catalog", self.catalog.clone()),
            ("contributor", self.contributor.clone()),
            ("endtime", self.end_time.as_ref().map(iso8601)),
            ("eventid", self.event_id.clone()),
            ("eventtype", self.event_type.clone()),
            ("format", text(&format.or(self.format))),
            ("includeallmagnitudes", text(&self.include_all_magnitudes)),
            ("includeallorigins", text(&self.include_all_origins)),
            ("includearrivals", text(&self.include_arrivals)),
            ("kmlanimated", text(&self.kml_animated)),
            ("kmlcolorby", text(&self.kml_color_by)),
            ("latitude", decimal(self.latitude)),
            ("limit", text(&self.limit)),
            ("longitude", decimal(self.longitude)),
            ("magnitudetype", self.magnitude_type.clone()),
            ("maxcdi", decimal(self.max_cdi)),
            ("maxdepth", decimal(self.max_depth)),
            ("maxgap", decimal(self.max_gap)),
            ("maxlatitude", decimal(self.max_latitude)),
            ("maxlongitude", decimal(self.max_longitude)),
            ("maxmagnitude", decimal(self.max_magnitude)),
            ("maxmmi", decimal(self.max_mmi)),
            ("maxradius", decimal(self.max_radius)),
            ("maxsig", text(&self.max_sig)),
            ("mincdi", decimal(self.min_cdi)),
            ("mindepth", decimal(self.min_depth)),
            ("minfelt", text(&self.min_felt)),
            ("mingap", decimal(self.min_gap)),
            ("minlatitude", decimal(self.min_latitude)),
            ("minlongitude", decimal(self.min_longitude)),
            ("minmagnitude", decimal(self.min_magnitude)),
            ("minmmi", decimal(self.min_mmi)),
            ("minradius", decimal(self.min_radius)),
            ("minsig", text(&self.min_sig)),
            ("offset", text(&self.offset)),
            ("orderby", text(&self.order_by)),
            ("producttype", self.product_type.clone()),
            ("reviewstatus", text(&self.review_status)),
            ("starttime", self.start_time.as_ref().map(iso8601)),
            ("updatedafter", self.updated_after.as_ref().map(iso8601)),
        ]
    }

    /// Query string for this query, including the leading `?` when non-empty.
    pub fn to_query_string(&self, format: Option<Format>) -> String {
        query_string(&self.parameters(format))
    }
}

/// Encode a timestamp the way the service expects it.
pub fn iso8601(date: &DateTime<Utc>) -> String {
    date.format(ISO8601_FORMAT).to_string()
}

/// Join `name=value` pairs with `?` first and `&` after, skipping unset
/// values. An all-unset table yields an empty string.
pub fn query_string(params: &[(&str, Option<String>)]) -> String {
    let mut buf = String::new();
    for (name, value) in params {
        let Some(value) = value else {
            continue;
        };
        buf.push(if buf.is_empty() { '?' } else { '&' });
        buf.push_str(name);
        buf.push('=');
        buf.push_str(value);
    }
    buf
}

fn text<T: ToString>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

/// Decimals are written in positional notation and always carry a
/// fractional part (`5.0`, not `5` or `5e0`).
fn decimal(value: Option<f64>) -> Option<String> {
    value.map(|v| {
        let plain = v.to_string();
        if plain.contains('.') || !v.is_finite() {
            plain
        } else {
            format!("{plain}.0")
        }
    })
}
