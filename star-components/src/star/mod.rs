//! Star contraction operators.
//!
//! Each operator is an expansion step, a key-grouped concatenation of neighbor
//! lists, a contraction step and a deduplication. The expansion and contraction
//! steps are plain functions so they can be checked without a substrate.

mod large_star;
mod small_star;

pub use large_star::{large_star, large_star_contract, large_star_expand};
pub use small_star::{small_star, small_star_contract, small_star_expand};

use star_components_shared::{min_vertex, StarRecord, Vertex};

/// Minimum of a star's center and all of its neighbors.
fn star_minimum((center, neighbors): &StarRecord) -> Vertex {
    neighbors.iter().copied().fold(*center, min_vertex)
}
