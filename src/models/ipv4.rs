//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] struct for representing IPv4 networks in CIDR notation,
//! along with the mask arithmetic used by the parser and the aggregator.

use crate::error::RoutesError;
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Mask bits for a prefix length that is already known to be `<= 32`.
fn mask_bits(len: u8) -> u32 {
    let right_len = MAX_LENGTH - len.min(MAX_LENGTH);
    let all_bits = u32::MAX as u64;
    ((all_bits >> right_len) << right_len) as u32
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use chnroutes::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, RoutesError> {
    if len > MAX_LENGTH {
        Err(RoutesError::invalid_cidr(
            &format!("/{len}"),
            "Network length is too long",
        ))
    } else {
        Ok(mask_bits(len))
    }
}

/// Dotted netmask for a prefix length, e.g. `/24` -> `255.255.255.0`.
pub fn netmask_addr(len: u8) -> Result<Ipv4Addr, RoutesError> {
    get_cidr_mask(len).map(Ipv4Addr::from)
}

/// Number of addresses in a block of the given prefix length.
pub fn block_size(len: u8) -> u64 {
    1u64 << (MAX_LENGTH - len.min(MAX_LENGTH))
}

/// Prefix length of a block holding `count` addresses.
///
/// Returns `None` unless `count` is a power of two between 1 and 2^32.
pub fn prefix_from_count(count: u64) -> Option<u8> {
    if count == 0 || !count.is_power_of_two() || count > block_size(0) {
        return None;
    }
    Some(MAX_LENGTH - count.trailing_zeros() as u8)
}

/// IPv4 network in CIDR notation.
#[derive(Eq, Ord, PartialEq, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// A bare address is read as a single host (`/32`).
    pub fn new(addr_cidr: &str) -> Result<Ipv4, RoutesError> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = match addr_cidr.split_once('/') {
            Some((addr, mask)) => (addr, Some(mask)),
            None => (addr_cidr, None),
        };
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| RoutesError::invalid_cidr(addr_cidr, format!("Invalid address {addr}")))?;
        let mask: u8 = match mask {
            Some(mask) => mask
                .parse()
                .map_err(|_| RoutesError::invalid_cidr(addr_cidr, format!("Invalid mask {mask}")))?,
            None => MAX_LENGTH,
        };
        if mask > MAX_LENGTH {
            return Err(RoutesError::invalid_cidr(
                addr_cidr,
                "Network length is too long",
            ));
        }
        Ok(Ipv4 { addr, mask })
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & mask_bits(self.mask))
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.lo()) | !mask_bits(self.mask))
    }

    /// Dotted netmask of this subnet.
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(mask_bits(self.mask))
    }

    /// Same subnet with the host bits cleared.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
