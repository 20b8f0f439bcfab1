//! Set of IPv4 networks kept in canonical CIDR form.
//!
//! Blocks are stored by base address. Inserting a block drops the blocks it
//! covers and merges sibling pairs upward, so the set never holds a block
//! inside another one nor two siblings that form a larger aligned block.

use crate::models::{block_size, Ipv4, MAX_LENGTH};
use std::collections::BTreeMap;
use std::net::Ipv4Addr;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NetworkSet {
    /// base address -> prefix length
    blocks: BTreeMap<u32, u8>,
}

impl NetworkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a network. Host bits of `network.addr` are ignored.
    pub fn insert(&mut self, network: Ipv4) {
        let mut block = Ipv4 {
            addr: network.addr,
            mask: network.mask.min(MAX_LENGTH),
        }
        .network();
        let base = u32::from(block.addr);

        // Already covered by a stored block starting at or before `base`.
        if let Some((&b, &p)) = self.blocks.range(..=base).next_back() {
            if p <= block.mask && b as u64 + block_size(p) > base as u64 {
                log::trace!("{network} already covered by {}/{p}", Ipv4Addr::from(b));
                return;
            }
        }

        let last = u32::from(block.hi());
        let covered: Vec<u32> = self.blocks.range(base..=last).map(|(&b, _)| b).collect();
        for b in covered {
            self.blocks.remove(&b);
        }

        while block.mask > 0 {
            let sibling = u32::from(block.addr) ^ (1u32 << (MAX_LENGTH - block.mask));
            if self.blocks.get(&sibling) != Some(&block.mask) {
                break;
            }
            self.blocks.remove(&sibling);
            block = Ipv4 {
                addr: block.addr,
                mask: block.mask - 1,
            }
            .network();
        }
        self.blocks.insert(u32::from(block.addr), block.mask);
    }

    /// Remove and return every block, in ascending address order.
    pub fn take(&mut self) -> Vec<Ipv4> {
        let blocks = std::mem::take(&mut self.blocks);
        blocks
            .into_iter()
            .map(|(b, p)| Ipv4 {
                addr: Ipv4Addr::from(b),
                mask: p,
            })
            .collect()
    }
}

#[cfg(test)]
impl NetworkSet {
    fn len(&self) -> usize {
        self.blocks.len()
    }

    fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// True if `addr` lies in one of the stored blocks.
    fn contains(&self, addr: Ipv4Addr) -> bool {
        let addr = u32::from(addr);
        self.blocks
            .range(..=addr)
            .next_back()
            .is_some_and(|(&b, &p)| (b as u64 + block_size(p)) > addr as u64)
    }

    /// Total number of addresses covered.
    fn address_count(&self) -> u64 {
        self.blocks.values().map(|&p| block_size(p)).sum()
    }

    fn iter(&self) -> impl Iterator<Item = Ipv4> + '_ {
        self.blocks.iter().map(|(&b, &p)| Ipv4 {
            addr: Ipv4Addr::from(b),
            mask: p,
        })
    }
}

#[cfg(test)]
impl FromIterator<Ipv4> for NetworkSet {
    fn from_iter<T: IntoIterator<Item = Ipv4>>(iter: T) -> Self {
        let mut set = NetworkSet::new();
        for network in iter {
            set.insert(network);
        }
        set
    }
}
