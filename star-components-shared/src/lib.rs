//! # Star Components Shared
//!
//! This crate defines the shared data structures used across the star-contraction
//! connected components job. It includes the vertex and edge types, the edge
//! normalizer, the named reduce combinators and the component assignment record
//! produced at the end of a run.

pub mod combinators;
pub mod errors;
pub mod types;

pub use combinators::{add_sums, concat_neighbors, min_vertex};
pub use errors::MalformedInputError;
pub use types::assignment::ComponentAssignment;
pub use types::edge::Edge;
pub use types::{Neighbors, StarRecord, Vertex, VertexPair};
