//! Registry delegation file parsing.
//!
//! - [`parser`] - allocation lines to [`NetworkRecord`](crate::models::NetworkRecord)s
//! - [`scholar`] - fixed supplementary networks appended after the allocations

mod parser;
mod scholar;

pub use parser::{parse_allocations, parse_registry};
pub use scholar::{supplementary_networks, SCHOLAR_ROUTES};
