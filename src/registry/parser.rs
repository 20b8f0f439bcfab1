//! Delegation file parsing.
//!
//! A delegation file has one record per line:
//! `registry|cc|type|start|value|date|status`. Only `ipv4` records of the
//! target registry and country with an `allocated`/`assigned` status are kept.

use super::scholar::supplementary_networks;
use crate::config::Config;
use crate::error::RoutesError;
use crate::models::NetworkRecord;
use colored::Colorize;
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;

lazy_static! {
    static ref ALLOCATION_RE: Regex = Regex::new(
        r"(?i)^([a-z0-9-]+)\|([a-z]{2})\|ipv4\|([\d.]+)\|(\d+)\|([^|]*)\|(a\w*)$"
    )
    .expect("Invalid Regex?");
}

/// Parse the registry allocations for `config.registry`/`config.country`
/// and append the supplementary networks.
pub fn parse_registry(data: &[u8], config: &Config) -> Result<Vec<NetworkRecord>, RoutesError> {
    let text = std::str::from_utf8(data)?;
    let mut records = parse_allocations(text, &config.registry, &config.country)?;
    let allocations = records.len();

    records.extend(supplementary_networks(&config.custom_routes)?);
    log::info!(
        "parsed {} {}/{} allocations + {} supplementary networks",
        allocations,
        config.registry.on_blue(),
        config.country.to_uppercase().on_blue(),
        records.len() - allocations
    );
    Ok(records)
}

/// Registry allocations of one country, in file order.
pub fn parse_allocations(
    text: &str,
    registry: &str,
    country: &str,
) -> Result<Vec<NetworkRecord>, RoutesError> {
    let mut records = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let Some(caps) = ALLOCATION_RE.captures(line.trim_end()) else {
            continue;
        };
        if !caps[1].eq_ignore_ascii_case(registry) || !caps[2].eq_ignore_ascii_case(country) {
            continue;
        }

        let line_no = i + 1;
        let malformed = |reason: String| RoutesError::MalformedRecord {
            line: line_no,
            reason,
        };
        let start: Ipv4Addr = caps[3]
            .parse()
            .map_err(|_| malformed(format!("invalid start address '{}'", &caps[3])))?;
        let count: u64 = caps[4]
            .parse()
            .map_err(|_| malformed(format!("invalid address count '{}'", &caps[4])))?;
        let record = NetworkRecord::from_allocation(start, count).ok_or_else(|| {
            malformed(format!("address count {count} is not a power of two"))
        })?;

        log::trace!("line {line_no}: {record} mask {}", record.netmask);
        records.push(record);
    }

    Ok(records)
}
