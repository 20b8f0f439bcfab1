//! JSON listing of the final network list.

use super::csv::stdout_error;
use crate::error::RoutesError;
use crate::models::NetworkRecord;
use std::io::Write;

/// Write `networks` as a pretty-printed JSON array.
pub fn write_json<W: Write>(networks: &[NetworkRecord], out: &mut W) -> Result<(), RoutesError> {
    serde_json::to_writer_pretty(&mut *out, networks)
        .map_err(|e| stdout_error(std::io::Error::from(e)))?;
    writeln!(out).map_err(stdout_error)
}
