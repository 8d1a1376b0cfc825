//! Command line front end for the earthquake event web service client.

pub mod args;
pub mod commands;
pub mod output;

pub use args::{parse_time, QueryArgs};
pub use output::{event_line, write_events};
