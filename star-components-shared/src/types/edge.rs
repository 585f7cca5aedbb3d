//! Canonical undirected edge.
//!
//! Every edge entering the contraction loop is oriented with its smaller
//! endpoint first. The star operators hook toward the smaller endpoint, so an
//! arbitrarily oriented input would break the hooking rule.

use serde::{Deserialize, Serialize};

use crate::errors::MalformedInputError;
use crate::types::{Vertex, VertexPair};

/// An undirected edge in canonical `(low, high)` form.
///
/// A raw self-loop normalizes to `low == high`; it is kept here and dropped by
/// the first large-star contraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub low: Vertex,
    pub high: Vertex,
}

impl Edge {
    /// Create a canonical edge from two endpoints in any order.
    ///
    /// # Example
    ///
    /// ```
    /// use star_components_shared::Edge;
    ///
    /// assert_eq!(Edge::new(7, 3), Edge::new(3, 7));
    /// assert_eq!(Edge::new(7, 3).low, 3);
    /// ```
    pub fn new(a: Vertex, b: Vertex) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// Parse a text record of two whitespace-separated vertex identifiers.
    ///
    /// # Arguments
    ///
    /// * `record` - A single input line
    ///
    /// # Returns
    ///
    /// * `Ok(Edge)` - The canonical edge
    /// * `Err(MalformedInputError)` - If the record does not hold exactly two
    ///   64-bit signed integers
    pub fn parse(record: &str) -> Result<Self, MalformedInputError> {
        let tokens: Vec<&str> = record.split_ascii_whitespace().collect();
        if tokens.len() != 2 {
            return Err(MalformedInputError::token_count(record, tokens.len()));
        }

        let a = parse_vertex(record, tokens[0])?;
        let b = parse_vertex(record, tokens[1])?;
        Ok(Self::new(a, b))
    }

    /// Returns true if both endpoints are the same vertex.
    pub fn is_self_loop(&self) -> bool {
        self.low == self.high
    }

    /// The initial keyed record for this edge, keyed by the low endpoint.
    pub fn into_pair(self) -> VertexPair {
        (self.low, self.high)
    }
}

impl From<Edge> for VertexPair {
    fn from(edge: Edge) -> Self {
        edge.into_pair()
    }
}

fn parse_vertex(record: &str, token: &str) -> Result<Vertex, MalformedInputError> {
    token
        .parse::<Vertex>()
        .map_err(|e| MalformedInputError::invalid_vertex(record, token, e.to_string()))
}
