//! Domain models for route generation.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 network in CIDR notation, plus mask arithmetic helpers
//! - [`NetworkRecord`] - address / netmask / prefix length handed to renderers

mod ipv4;
mod network;

// Re-export public types
pub use ipv4::{block_size, get_cidr_mask, netmask_addr, prefix_from_count, Ipv4, MAX_LENGTH};
pub use network::NetworkRecord;
