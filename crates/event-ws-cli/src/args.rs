//! Query flags shared by the `url` and `events` commands.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::Args;

use event_ws::{AlertLevel, EventQuery, OrderBy, ReviewStatus};

/// Common event filters. Anything left unset is omitted from the request.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Earliest origin time (RFC 3339, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`, UTC).
    #[arg(long, value_parser = parse_time)]
    pub start_time: Option<DateTime<Utc>>,

    /// Latest origin time.
    #[arg(long, value_parser = parse_time)]
    pub end_time: Option<DateTime<Utc>>,

    /// Only events updated after this time.
    #[arg(long, value_parser = parse_time)]
    pub updated_after: Option<DateTime<Utc>>,

    #[arg(long)]
    pub min_magnitude: Option<f64>,

    #[arg(long)]
    pub max_magnitude: Option<f64>,

    /// Minimum depth in km.
    #[arg(long, allow_negative_numbers = true)]
    pub min_depth: Option<f64>,

    /// Maximum depth in km.
    #[arg(long)]
    pub max_depth: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub min_latitude: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub max_latitude: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub min_longitude: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub max_longitude: Option<f64>,

    /// Centre latitude for a radius search.
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    /// Centre longitude for a radius search.
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Search radius in degrees.
    #[arg(long)]
    pub max_radius: Option<f64>,

    /// Maximum number of events returned.
    #[arg(long)]
    pub limit: Option<u32>,

    /// 1-based index of the first event returned.
    #[arg(long)]
    pub offset: Option<u32>,

    /// time, time-asc, magnitude or magnitude-asc.
    #[arg(long)]
    pub order_by: Option<OrderBy>,

    /// Event type, e.g. earthquake or quarry blast.
    #[arg(long)]
    pub event_type: Option<String>,

    #[arg(long)]
    pub catalog: Option<String>,

    #[arg(long)]
    pub contributor: Option<String>,

    /// A single event by its id.
    #[arg(long)]
    pub event_id: Option<String>,

    /// PAGER alert level: green, yellow, orange or red.
    #[arg(long)]
    pub alert_level: Option<AlertLevel>,

    /// all, automatic or reviewed.
    #[arg(long)]
    pub review_status: Option<ReviewStatus>,

    /// Only events with this product type, e.g. shakemap.
    #[arg(long)]
    pub product_type: Option<String>,

    /// Minimum number of "Did You Feel It?" responses.
    #[arg(long)]
    pub min_felt: Option<u32>,
}

impl From<QueryArgs> for EventQuery {
    fn from(args: QueryArgs) -> Self {
        EventQuery {
            start_time: args.start_time,
            end_time: args.end_time,
            updated_after: args.updated_after,
            min_magnitude: args.min_magnitude,
            max_magnitude: args.max_magnitude,
            min_depth: args.min_depth,
            max_depth: args.max_depth,
            min_latitude: args.min_latitude,
            max_latitude: args.max_latitude,
            min_longitude: args.min_longitude,
            max_longitude: args.max_longitude,
            latitude: args.latitude,
            longitude: args.longitude,
            max_radius: args.max_radius,
            limit: args.limit,
            offset: args.offset,
            order_by: args.order_by,
            event_type: args.event_type,
            catalog: args.catalog,
            contributor: args.contributor,
            event_id: args.event_id,
            alert_level: args.alert_level,
            review_status: args.review_status,
            product_type: args.product_type,
            min_felt: args.min_felt,
            ..Default::default()
        }
    }
}

/// Parse a command line timestamp. Values without an offset are UTC.
pub fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(format!(
        "invalid time '{s}': expected RFC 3339, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD"
    ))
}
