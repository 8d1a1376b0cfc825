//! Rendering parsed events for the terminal.

use std::io::Write;

use event_ws::EventRecord;

/// One line per event: id, origin time, magnitude, place.
pub fn event_line(event: &EventRecord) -> String {
    let id = event
        .id()
        .map(|id| id.to_string())
        .or_else(|| event.feature_id().map(str::to_owned))
        .unwrap_or_else(|| "-".to_string());
    let time = event
        .time()
        .map(|t| event_ws::iso8601(&t))
        .unwrap_or_else(|| "-".to_string());
    let magnitude = event
        .magnitude()
        .map(|m| format!("M{m:.1}"))
        .unwrap_or_else(|| "M-".to_string());
    let place = event.place().unwrap_or("");

    format!("{id:<14} {time:<24} {magnitude:<5} {place}")
        .trim_end()
        .to_string()
}

/// Write events either as text lines or as a pretty JSON array of the raw
/// features.
pub fn write_events<W: Write>(out: &mut W, events: &[EventRecord], json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, events)?;
        writeln!(out)?;
    } else {
        for event in events {
            writeln!(out, "{}", event_line(event))?;
        }
    }
    Ok(())
}
