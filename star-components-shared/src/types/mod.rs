//! This module defines the core data structures flowing between contraction rounds.
//! It re-exports specific types like `Edge` and `ComponentAssignment`.

pub mod assignment;
pub mod edge;

pub use assignment::ComponentAssignment;
pub use edge::Edge;

/// Vertex identifier. Any signed 64-bit integer.
pub type Vertex = i64;

/// A keyed record flowing between rounds: `(key, value)`.
pub type VertexPair = (Vertex, Vertex);

/// Accumulated neighbor list of a star center.
pub type Neighbors = Vec<Vertex>;

/// A grouped star: its center and every neighbor seen for it.
pub type StarRecord = (Vertex, Neighbors);
