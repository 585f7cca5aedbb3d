//! Small-star round.
//!
//! Every vertex is re-pointed at the smallest vertex it can see. The output is
//! oriented `(minimum, member)` and keeps the `(minimum, minimum)` marker, so
//! once the edge set stops changing each record names a representative and one
//! member of its component.

use std::iter;

use star_components_shared::{concat_neighbors, Neighbors, StarRecord, Vertex, VertexPair};
use star_components_substrate::{Dataset, Substrate, SubstrateError};
use tracing::{debug, instrument};

use super::star_minimum;

/// Key a pair by its larger endpoint, with the smaller one as its only neighbor.
pub fn small_star_expand(&(a, b): &VertexPair) -> (Vertex, Neighbors) {
    if a < b {
        (b, vec![a])
    } else {
        (a, vec![b])
    }
}

/// Point every member of the star, center included, at the star's minimum.
pub fn small_star_contract(star: &StarRecord) -> Vec<VertexPair> {
    let minimum = star_minimum(star);
    let (center, neighbors) = star;

    neighbors
        .iter()
        .copied()
        .chain(iter::once(*center))
        .map(|member| (minimum, member))
        .collect()
}

/// Run one small-star round over an edge set snapshot.
///
/// # Arguments
///
/// * `substrate` - The substrate executing the round
/// * `edges` - The current edge set
///
/// # Returns
///
/// The deduplicated `(minimum, member)` set produced by the round.
#[instrument(skip(substrate, edges), fields(input_pairs = edges.len()))]
pub async fn small_star<S: Substrate>(
    substrate: &S,
    edges: &Dataset<VertexPair>,
) -> Result<Dataset<VertexPair>, SubstrateError> {
    let expanded = substrate.map(edges, small_star_expand).await?;
    let stars = substrate.reduce_by_key(&expanded, concat_neighbors).await?;
    let pointed = substrate.flat_map(&stars, small_star_contract).await?;
    let output = substrate.distinct(&pointed).await?;

    debug!(
        stars = stars.len(),
        output_pairs = output.len(),
        "Small-star round complete"
    );
    Ok(output)
}
