//! Named reduce combinators.
//!
//! These are the operators handed to the substrate's key-grouped and global
//! reductions. Partitions may combine values in any grouping and any order, so
//! each operator must be associative and commutative (list concatenation is
//! commutative up to element order, which the star contraction never observes).

use num_bigint::BigUint;

use crate::types::{Neighbors, Vertex};

/// Total-order minimum of two vertices.
pub fn min_vertex(a: Vertex, b: Vertex) -> Vertex {
    a.min(b)
}

/// Concatenate two neighbor lists.
///
/// The left list is reused as the output buffer.
pub fn concat_neighbors(mut left: Neighbors, mut right: Neighbors) -> Neighbors {
    if left.len() < right.len() {
        std::mem::swap(&mut left, &mut right);
    }
    left.append(&mut right);
    left
}

/// Arbitrary-precision sum of two partial convergence sums.
pub fn add_sums(a: BigUint, b: BigUint) -> BigUint {
    a + b
}
