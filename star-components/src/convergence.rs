//! Convergence tracking.
//!
//! Each round is summarized by one global statistic: the sum of the low
//! endpoint of every non-self-loop pair in the edge set. Endpoints are summed
//! as their order key, an unsigned value with the same ordering as the signed
//! identifier, so every term is non-negative. Every hook either keeps or
//! lowers the endpoint a vertex points at and deduplication only ever removes
//! terms, so the sum is non-increasing and the loop stops once a round fails
//! to lower it.

use num_bigint::BigUint;
use num_traits::Zero;
use star_components_shared::{add_sums, Vertex, VertexPair};
use star_components_substrate::{Dataset, Substrate, SubstrateError};

/// Unsigned key with the same total order as the vertex identifier.
///
/// Flipping the sign bit maps `i64::MIN` to 0 and `i64::MAX` to `u64::MAX`.
pub fn order_key(vertex: Vertex) -> u64 {
    (vertex as u64) ^ (1 << 63)
}

/// Contribution of a single pair to the convergence sum.
///
/// Self-loops contribute nothing: the small-star representative markers carry
/// no hooking information.
pub fn low_endpoint(&(a, b): &VertexPair) -> BigUint {
    if a == b {
        BigUint::zero()
    } else {
        BigUint::from(order_key(a.min(b)))
    }
}

/// Compute the convergence sum of an edge set.
///
/// # Arguments
///
/// * `substrate` - The substrate executing the reduction
/// * `edges` - The edge set to summarize
///
/// # Returns
///
/// The arbitrary-precision sum, zero for an empty edge set.
pub async fn convergence_sum<S: Substrate>(
    substrate: &S,
    edges: &Dataset<VertexPair>,
) -> Result<BigUint, SubstrateError> {
    let terms = substrate.map(edges, low_endpoint).await?;
    let sum = substrate.reduce(&terms, add_sums).await?;
    Ok(sum.unwrap_or_else(BigUint::zero))
}

/// Progress baseline for the outer contraction cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConvergenceState {
    /// No baseline recorded yet; any observed sum counts as progress.
    #[default]
    NotYetStarted,
    /// Baseline recorded; progress means strictly dropping below it.
    InProgress(BigUint),
    /// The edge set has stabilized.
    Converged,
}

impl ConvergenceState {
    /// Whether `observed` is progress relative to this baseline.
    pub fn shows_progress(&self, observed: &BigUint) -> bool {
        match self {
            ConvergenceState::NotYetStarted => true,
            ConvergenceState::InProgress(baseline) => observed < baseline,
            ConvergenceState::Converged => false,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, ConvergenceState::Converged)
    }
}
