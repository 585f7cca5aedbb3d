//! Component assignment records produced at the end of a run.

use serde::{Deserialize, Serialize};

use crate::types::{Vertex, VertexPair};

/// A vertex mapped to the representative of its connected component.
///
/// The representative is the minimum vertex identifier in the component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentAssignment {
    pub vertex: Vertex,
    pub representative: Vertex,
}

impl ComponentAssignment {
    /// Create an assignment from a final `(representative, member)` pair.
    pub fn from_final_pair((representative, vertex): VertexPair) -> Self {
        Self {
            vertex,
            representative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_final_pair_reverses() {
        let assignment = ComponentAssignment::from_final_pair((1, 7));
        assert_eq!(assignment.vertex, 7);
        assert_eq!(assignment.representative, 1);
    }

    #[test]
    fn test_sorts_by_vertex_first() {
        let mut assignments = vec![
            ComponentAssignment::from_final_pair((-5, 2)),
            ComponentAssignment::from_final_pair((-5, -5)),
            ComponentAssignment::from_final_pair((0, 1)),
        ];
        assignments.sort_unstable();
        let vertices: Vec<i64> = assignments.iter().map(|a| a.vertex).collect();
        assert_eq!(vertices, vec![-5, 1, 2]);
    }

    #[test]
    fn test_serialization() {
        let assignment = ComponentAssignment::from_final_pair((2, 9));
        let json = serde_json::to_string(&assignment).unwrap();
        assert_eq!(json, r#"{"vertex":9,"representative":2}"#);

        let deserialized: ComponentAssignment = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, assignment);
    }
}
