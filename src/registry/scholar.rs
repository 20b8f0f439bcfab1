//! Academic publisher networks that always bypass the VPN.

use crate::error::RoutesError;
use crate::models::NetworkRecord;

pub const SCHOLAR_ROUTES: [&str; 10] = [
    "208.99.166.251/32", // IEEE Xplore
    "140.98.0.0/16",     // IEEE-org
    "64.238.147.53/32",  // dl.acm.org
    "64.238.147.56/32",  // dl.acm.org
    "140.174.24.0/24",   // springer
    "114.112.65.0/24",   // springer
    "118.186.70.12/32",  // springer
    "198.81.200.0/24",   // science direct
    "23.55.166.0/24",    // science direct
    "23.59.134.0/24",    // science direct
];

/// Records for the fixed scholar list followed by `custom_routes`, in order.
pub fn supplementary_networks<S: AsRef<str>>(
    custom_routes: &[S],
) -> Result<Vec<NetworkRecord>, RoutesError> {
    SCHOLAR_ROUTES
        .iter()
        .copied()
        .chain(custom_routes.iter().map(|r| r.as_ref()))
        .map(NetworkRecord::from_cidr)
        .collect()
}
