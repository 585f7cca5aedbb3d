//! Orchestrator module for a connected components run.
//!
//! Coordinates the reader, the contraction loop and the emitter.

mod contraction;

pub use contraction::{
    Contraction, ContractionConfig, ContractionLoop, ContractionReport, ContractionState, Phase,
};

use std::path::Path;
use std::sync::Arc;

use star_components_shared::{Edge, VertexPair};
use star_components_substrate::Substrate;
use tokio::sync::broadcast;
use tracing::{info, instrument};

use crate::emitter::{reverse_pairs, ResultEmitter};
use crate::errors::EmitError;
use crate::reader::EdgeReader;
use crate::RunError;

/// Orchestrator that runs one job from input file to output file.
///
/// The orchestrator:
/// - Reads and normalizes the input edge list
/// - Distributes the edges across the substrate
/// - Contracts the edge set until it converges
/// - Writes one component assignment per vertex
///
/// Nothing is written unless every earlier stage succeeds.
pub struct Orchestrator<S: Substrate> {
    substrate: Arc<S>,
    reader: EdgeReader,
    contraction: ContractionLoop<S>,
    emitter: ResultEmitter,
}

impl<S: Substrate> Orchestrator<S> {
    /// Create a new orchestrator with the default contraction configuration.
    pub fn new(substrate: Arc<S>, emitter: ResultEmitter) -> Self {
        Self::with_config(substrate, emitter, ContractionConfig::default())
    }

    /// Create a new orchestrator with a custom contraction configuration.
    pub fn with_config(
        substrate: Arc<S>,
        emitter: ResultEmitter,
        config: ContractionConfig,
    ) -> Self {
        let contraction = ContractionLoop::with_config(Arc::clone(&substrate), config);

        Self {
            substrate,
            reader: EdgeReader::new(),
            contraction,
            emitter,
        }
    }

    /// Handle that cancels the run before its next contraction round.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.contraction.shutdown_handle()
    }

    /// Run the job.
    ///
    /// # Arguments
    ///
    /// * `input` - Edge list to read
    /// * `output` - Destination for the component assignments
    ///
    /// # Returns
    ///
    /// * `Ok(ContractionReport)` - Round counts and final statistics
    /// * `Err(RunError)` - If any stage fails; `output` is left untouched
    #[instrument(skip(self, input, output), fields(input = %input.display(), output = %output.display()))]
    pub async fn run(&mut self, input: &Path, output: &Path) -> Result<ContractionReport, RunError> {
        info!("Starting connected components run");

        let edges = self.reader.read(input).await?;
        let pairs: Vec<VertexPair> = edges.into_iter().map(Edge::into_pair).collect();
        let dataset = self.substrate.parallelize(pairs);
        info!(
            pairs = dataset.len(),
            partitions = dataset.num_partitions(),
            "Distributed input edges"
        );

        let contraction = self.contraction.run(dataset).await?;

        let assignments = reverse_pairs(self.substrate.as_ref(), &contraction.pairs)
            .await
            .map_err(EmitError::from)?;
        let written = self.emitter.emit(&assignments, output).await?;

        info!(
            vertices = written,
            large_star_rounds = contraction.report.large_star_rounds,
            small_star_rounds = contraction.report.small_star_rounds,
            "Connected components run completed"
        );

        Ok(contraction.report)
    }
}
