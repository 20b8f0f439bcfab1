//! Network record handed to the route renderers.

use super::ipv4::{netmask_addr, prefix_from_count, Ipv4};
use crate::error::RoutesError;
use serde::Serialize;
use std::net::Ipv4Addr;

/// One route entry: base address, dotted netmask and prefix length.
///
/// `netmask` always matches `prefix_length`. Records read from the registry
/// keep the registry's starting address even when it is not aligned.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkRecord {
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub prefix_length: u8,
}

impl NetworkRecord {
    /// Build a record from an address and a prefix length.
    pub fn new(address: Ipv4Addr, prefix_length: u8) -> Result<NetworkRecord, RoutesError> {
        Ok(NetworkRecord {
            address,
            netmask: netmask_addr(prefix_length)?,
            prefix_length,
        })
    }

    /// Build a record from a registry allocation: a start address and a
    /// block size that must be a power of two.
    ///
    /// Returns `None` when `count` does not describe a CIDR block.
    pub fn from_allocation(address: Ipv4Addr, count: u64) -> Option<NetworkRecord> {
        let prefix_length = prefix_from_count(count)?;
        let mask = u32::MAX ^ (count - 1) as u32;
        Some(NetworkRecord {
            address,
            netmask: Ipv4Addr::from(mask),
            prefix_length,
        })
    }

    /// Standard CIDR decomposition: network address, netmask, prefix length.
    pub fn from_cidr(cidr: &str) -> Result<NetworkRecord, RoutesError> {
        let ipv4 = Ipv4::new(cidr)?;
        NetworkRecord::new(ipv4.lo(), ipv4.mask)
    }

    /// The record as an [`Ipv4`] CIDR value.
    pub fn to_ipv4(&self) -> Ipv4 {
        Ipv4 {
            addr: self.address,
            mask: self.prefix_length,
        }
    }
}

impl From<Ipv4> for NetworkRecord {
    fn from(ipv4: Ipv4) -> Self {
        NetworkRecord {
            address: ipv4.addr,
            netmask: ipv4.netmask(),
            prefix_length: ipv4.mask,
        }
    }
}

impl std::fmt::Display for NetworkRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_length)
    }
}
