//! Network list processing.
//!
//! - [`network_set`] - canonical CIDR set with merge on insert
//! - [`aggregate`] - batched aggregation of the parsed network list

#[cfg(feature = "aggregate")]
mod aggregate;
mod network_set;

#[cfg(feature = "aggregate")]
pub use aggregate::{aggregate_networks, Aggregate};
pub use network_set::NetworkSet;
