//! Output formatting for the final network list.
//!
//! - [`csv`] - quoted, aligned CSV rows
//! - [`json`] - JSON array of records
//! - [`terminal`] - field formatting helpers

mod csv;
mod json;
mod terminal;

pub use csv::write_csv;
pub use json::write_json;
pub use terminal::format_field;

use crate::config::OutputFormat;
use crate::error::RoutesError;
use crate::models::NetworkRecord;
use std::io::Write;

/// Write `networks` to `out` in the configured format.
pub fn write_networks<W: Write>(
    networks: &[NetworkRecord],
    format: OutputFormat,
    out: &mut W,
) -> Result<(), RoutesError> {
    match format {
        OutputFormat::Csv => write_csv(networks, out),
        OutputFormat::Json => write_json(networks, out),
    }
}
