//! Network lists for VPN split routing: the registry allocations of one
//! country plus a few supplementary networks, optionally aggregated.

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod registry;

use config::Config;
use error::RoutesError;
use models::NetworkRecord;
use std::path::Path;

/// Read an already downloaded delegation file.
pub fn read_registry_file(path: &Path) -> Result<Vec<u8>, RoutesError> {
    log::info!("Reading registry file: {}", path.display());
    std::fs::read(path).map_err(|source| RoutesError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Parse `data` and, when `config.aggregate` is set, aggregate the result.
///
/// A build without the `aggregate` feature warns and returns the parsed list.
pub fn generate_networks(data: &[u8], config: &Config) -> Result<Vec<NetworkRecord>, RoutesError> {
    let networks = registry::parse_registry(data, config)?;
    if !config::resolve_aggregate(config.aggregate) {
        return Ok(networks);
    }
    Ok(aggregate(networks))
}

#[cfg(feature = "aggregate")]
fn aggregate(networks: Vec<NetworkRecord>) -> Vec<NetworkRecord> {
    let parsed = networks.len();
    let mut aggregated = processing::aggregate_networks(networks);
    let result: Vec<NetworkRecord> = aggregated.by_ref().collect();
    log::info!(
        "aggregated {} networks into {} in {} batches",
        parsed,
        result.len(),
        aggregated.flush_count()
    );
    result
}

#[cfg(not(feature = "aggregate"))]
fn aggregate(networks: Vec<NetworkRecord>) -> Vec<NetworkRecord> {
    networks
}
