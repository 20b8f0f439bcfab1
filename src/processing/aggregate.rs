//! Batched route aggregation.
//!
//! Networks are inserted into a [`NetworkSet`] in input order. Every
//! `batch_size` insertions the set is flushed (its canonical blocks are
//! yielded in ascending order) and emptied. One last flush runs when the
//! input ends. Blocks from different batches are never merged.

use super::network_set::NetworkSet;
use crate::config::AGGREGATE_BATCH_SIZE;
use crate::models::NetworkRecord;

/// Lazy iterator over the aggregated networks of `I`.
///
/// At most one batch of input is pulled before the flushed records are
/// handed out.
#[derive(Debug)]
pub struct Aggregate<I> {
    input: std::iter::Fuse<I>,
    set: NetworkSet,
    batch_size: usize,
    pending: std::vec::IntoIter<NetworkRecord>,
    flush_count: usize,
    done: bool,
}

/// Aggregate `networks` with the default batch size.
pub fn aggregate_networks<I>(networks: I) -> Aggregate<I::IntoIter>
where
    I: IntoIterator<Item = NetworkRecord>,
{
    Aggregate::with_batch_size(networks, AGGREGATE_BATCH_SIZE)
}

impl<I: Iterator<Item = NetworkRecord>> Aggregate<I> {
    pub fn with_batch_size<T>(networks: T, batch_size: usize) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Aggregate {
            input: networks.into_iter().fuse(),
            set: NetworkSet::new(),
            batch_size: batch_size.max(1),
            pending: Vec::new().into_iter(),
            flush_count: 0,
            done: false,
        }
    }

    /// Number of flushes performed so far.
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    fn fill_batch(&mut self) {
        let mut inserted = 0;
        while inserted < self.batch_size {
            match self.input.next() {
                Some(record) => {
                    self.set.insert(record.to_ipv4());
                    inserted += 1;
                }
                None => {
                    self.done = true;
                    break;
                }
            }
        }
        log::trace!("batch #{} inserted={inserted}", self.flush_count);
    }

    fn flush(&mut self) {
        let blocks: Vec<NetworkRecord> = self
            .set
            .take()
            .into_iter()
            .map(NetworkRecord::from)
            .collect();
        log::debug!(
            "flush #{} emits {} networks",
            self.flush_count,
            blocks.len()
        );
        self.flush_count += 1;
        self.pending = blocks.into_iter();
    }
}

impl<I: Iterator<Item = NetworkRecord>> Iterator for Aggregate<I> {
    type Item = NetworkRecord;

    fn next(&mut self) -> Option<NetworkRecord> {
        loop {
            if let Some(record) = self.pending.next() {
                return Some(record);
            }
            if self.done {
                return None;
            }
            self.fill_batch();
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;
    use std::net::Ipv4Addr;

    fn records(cidrs: &[&str]) -> Vec<NetworkRecord> {
        cidrs
            .iter()
            .map(|c| NetworkRecord::from_cidr(c).unwrap())
            .collect()
    }

    /// Sorted, merged inclusive address ranges covered by `networks`.
    fn coverage(networks: &[NetworkRecord]) -> Vec<(u64, u64)> {
        let mut ranges: Vec<(u64, u64)> = networks
            .iter()
            .map(|n| {
                let ip = n.to_ipv4();
                (u32::from(ip.lo()) as u64, u32::from(ip.hi()) as u64)
            })
            .collect();
        ranges.sort();
        let mut merged: Vec<(u64, u64)> = Vec::new();
        for (lo, hi) in ranges {
            match merged.last_mut() {
                Some(last) if lo <= last.1 + 1 => last.1 = last.1.max(hi),
                _ => merged.push((lo, hi)),
            }
        }
        merged
    }

    /// Deterministic pseudo random networks between /16 and /32.
    fn pseudo_random_networks(n: usize, seed: u64) -> Vec<NetworkRecord> {
        let mut state = seed;
        (0..n)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                let addr = 0x0A00_0000 | ((state >> 33) as u32 & 0x000F_FFFF);
                let mask = 16 + ((state >> 20) % 17) as u8;
                NetworkRecord::from(
                    Ipv4 {
                        addr: Ipv4Addr::from(addr),
                        mask,
                    }
                    .network(),
                )
            })
            .collect()
    }

    #[test]
    fn test_two_halves_make_a_24() {
        let out: Vec<NetworkRecord> =
            aggregate_networks(records(&["1.2.3.0/25", "1.2.3.128/25"])).collect();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].address.to_string(), "1.2.3.0");
        assert_eq!(out[0].netmask.to_string(), "255.255.255.0");
        assert_eq!(out[0].prefix_length, 24);
    }

    #[test]
    fn test_single_host_keeps_prefix_32() {
        let out: Vec<NetworkRecord> = aggregate_networks(records(&["118.186.70.12/32"])).collect();
        assert_eq!(out[0].address.to_string(), "118.186.70.12");
        assert_eq!(out[0].netmask.to_string(), "255.255.255.255");
        assert_eq!(out[0].prefix_length, 32);
    }

    #[test]
    fn test_unaligned_registry_address_is_realigned() {
        let input = vec![NetworkRecord::from_allocation(Ipv4Addr::new(1, 0, 1, 128), 512).unwrap()];
        let out: Vec<String> = aggregate_networks(input).map(|r| r.to_string()).collect();
        assert_eq!(out, vec!["1.0.0.0/23"]);
    }

    #[test]
    fn test_301_hosts_two_flushes() {
        let input: Vec<NetworkRecord> = (0..301u32)
            .map(|i| NetworkRecord::new(Ipv4Addr::from(0x0A00_0000 + i * 4), 32).unwrap())
            .collect();
        let mut agg = aggregate_networks(input);

        let first: Vec<NetworkRecord> = agg.by_ref().take(300).collect();
        assert_eq!(first.len(), 300);
        assert_eq!(agg.flush_count(), 1);

        let rest: Vec<NetworkRecord> = agg.by_ref().collect();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].address, Ipv4Addr::from(0x0A00_0000 + 300 * 4));
        assert_eq!(agg.flush_count(), 2);
    }

    #[test]
    fn test_empty_input_flushes_once() {
        let mut agg = aggregate_networks(Vec::new());
        assert!(agg.next().is_none());
        assert_eq!(agg.flush_count(), 1);
        assert!(agg.next().is_none());
        assert_eq!(agg.flush_count(), 1);
    }

    fn spaced_hosts(n: u32) -> Vec<NetworkRecord> {
        (0..n)
            .map(|i| NetworkRecord::new(Ipv4Addr::from(0x0A00_0000 + i * 4), 32).unwrap())
            .collect()
    }

    #[test]
    fn test_exactly_one_full_batch() {
        let input = spaced_hosts(AGGREGATE_BATCH_SIZE as u32);
        let mut agg = aggregate_networks(input.clone());
        let out: Vec<NetworkRecord> = agg.by_ref().collect();
        assert_eq!(out, input);
        assert_eq!(agg.flush_count(), 2);
    }

    #[test]
    fn test_two_full_batches() {
        let input = spaced_hosts(2 * AGGREGATE_BATCH_SIZE as u32);
        let mut agg = aggregate_networks(input.clone());

        let first: Vec<NetworkRecord> = agg.by_ref().take(AGGREGATE_BATCH_SIZE).collect();
        assert_eq!(first, input[..AGGREGATE_BATCH_SIZE]);
        assert_eq!(agg.flush_count(), 1);

        let rest: Vec<NetworkRecord> = agg.by_ref().collect();
        assert_eq!(rest, input[AGGREGATE_BATCH_SIZE..]);
        assert_eq!(agg.flush_count(), 3);
    }

    #[test]
    fn test_no_merge_across_batches() {
        let input = records(&["1.2.3.0/25", "1.2.3.128/25"]);
        let out: Vec<String> = Aggregate::with_batch_size(input, 1)
            .map(|r| r.to_string())
            .collect();
        assert_eq!(out, vec!["1.2.3.0/25", "1.2.3.128/25"]);
    }

    #[test]
    fn test_ascending_within_batch_in_order_across_batches() {
        let input = records(&["9.0.0.0/8", "1.0.0.0/8", "5.0.0.0/8", "2.0.0.0/8"]);
        let out: Vec<String> = Aggregate::with_batch_size(input, 2)
            .map(|r| r.to_string())
            .collect();
        assert_eq!(out, vec!["1.0.0.0/8", "9.0.0.0/8", "2.0.0.0/8", "5.0.0.0/8"]);
    }

    #[test]
    fn test_coverage_preserved_single_batch() {
        let input = pseudo_random_networks(AGGREGATE_BATCH_SIZE, 7);
        let out: Vec<NetworkRecord> = aggregate_networks(input.clone()).collect();
        assert!(out.len() <= input.len());
        assert_eq!(coverage(&out), coverage(&input));
    }

    #[test]
    fn test_coverage_preserved_many_batches() {
        let input = pseudo_random_networks(2000, 42);
        let mut agg = aggregate_networks(input.clone());
        let out: Vec<NetworkRecord> = agg.by_ref().collect();
        assert_eq!(agg.flush_count(), 7);
        assert_eq!(coverage(&out), coverage(&input));
    }

    #[test]
    fn test_no_subset_within_batch() {
        let out: Vec<NetworkRecord> =
            aggregate_networks(pseudo_random_networks(AGGREGATE_BATCH_SIZE, 3)).collect();
        for (i, a) in out.iter().enumerate() {
            for b in out.iter().skip(i + 1) {
                let (a, b) = (a.to_ipv4(), b.to_ipv4());
                assert!(a.hi() < b.lo(), "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn test_idempotent_on_aggregated_batch() {
        let once: Vec<NetworkRecord> =
            aggregate_networks(pseudo_random_networks(AGGREGATE_BATCH_SIZE, 11)).collect();
        let twice: Vec<NetworkRecord> = aggregate_networks(once.clone()).collect();
        assert_eq!(once, twice);
    }
}
