//! Large-star round.
//!
//! Every neighbor larger than a star's center is hooked to the minimum vertex
//! visible in that star. Long chains shrink quickly because each round lets a
//! vertex see two hops away.

use std::iter;

use star_components_shared::{concat_neighbors, Neighbors, StarRecord, Vertex, VertexPair};
use star_components_substrate::{Dataset, Substrate, SubstrateError};
use tracing::{debug, instrument};

use super::star_minimum;

/// Register each endpoint of a pair as a neighbor of the other.
pub fn large_star_expand(&(a, b): &VertexPair) -> [(Vertex, Neighbors); 2] {
    [(a, vec![b]), (b, vec![a])]
}

/// Hook every member of the star greater than its center to the star's minimum.
///
/// Emits `(v, m)` for each `v` in `neighbors ∪ {center}` with `center < v`,
/// where `m` is the star's minimum. Never emits a self-loop, since `m <= center < v`.
pub fn large_star_contract(star: &StarRecord) -> Vec<VertexPair> {
    let minimum = star_minimum(star);
    let (center, neighbors) = star;

    neighbors
        .iter()
        .copied()
        .chain(iter::once(*center))
        .filter(|member| center < member)
        .map(|member| (member, minimum))
        .collect()
}

/// Run one large-star round over an edge set snapshot.
///
/// # Arguments
///
/// * `substrate` - The substrate executing the round
/// * `edges` - The current edge set
///
/// # Returns
///
/// The deduplicated edge set produced by the round.
#[instrument(skip(substrate, edges), fields(input_pairs = edges.len()))]
pub async fn large_star<S: Substrate>(
    substrate: &S,
    edges: &Dataset<VertexPair>,
) -> Result<Dataset<VertexPair>, SubstrateError> {
    let expanded = substrate.flat_map(edges, large_star_expand).await?;
    let stars = substrate.reduce_by_key(&expanded, concat_neighbors).await?;
    let hooked = substrate.flat_map(&stars, large_star_contract).await?;
    let output = substrate.distinct(&hooked).await?;

    debug!(
        stars = stars.len(),
        output_pairs = output.len(),
        "Large-star round complete"
    );
    Ok(output)
}
