//! CSV listing of the final network list.

use super::terminal::format_field;
use crate::error::RoutesError;
use crate::models::NetworkRecord;
use itertools::Itertools;
use std::io::Write;

const ADDRESS_WIDTH: usize = 17;
const NETMASK_WIDTH: usize = 17;
const PREFIX_WIDTH: usize = 15;

/// Write `networks` as CSV, one quoted and right-aligned row per network.
pub fn write_csv<W: Write>(networks: &[NetworkRecord], out: &mut W) -> Result<(), RoutesError> {
    let header = [
        format_field("address", ADDRESS_WIDTH),
        format_field("netmask", NETMASK_WIDTH),
        format_field("prefix_length", PREFIX_WIDTH),
    ]
    .iter()
    .join(",");
    writeln!(out, "{header}").map_err(stdout_error)?;

    for network in networks {
        writeln!(out, "{}", csv_row(network)).map_err(stdout_error)?;
    }
    Ok(())
}

fn csv_row(network: &NetworkRecord) -> String {
    [
        format_field(network.address, ADDRESS_WIDTH),
        format_field(network.netmask, NETMASK_WIDTH),
        format_field(network.prefix_length, PREFIX_WIDTH),
    ]
    .iter()
    .join(",")
}

pub(super) fn stdout_error(source: std::io::Error) -> RoutesError {
    RoutesError::Io {
        path: "<stdout>".to_string(),
        source,
    }
}
