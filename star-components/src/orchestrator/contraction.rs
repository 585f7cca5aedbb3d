//! Contraction loop.
//!
//! Alternates large-star and small-star rounds until the edge set stops
//! changing. Large-star rounds repeat while they keep lowering the convergence
//! sum; a single small-star round then either makes progress against the
//! sum the last large-star round started from, which restarts the cycle, or
//! the edge set is final.

use std::fmt;
use std::sync::Arc;

use num_bigint::BigUint;
use star_components_shared::VertexPair;
use star_components_substrate::{Dataset, Substrate, SubstrateError};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, info, instrument, warn};

use crate::convergence::{convergence_sum, ConvergenceState};
use crate::errors::ContractionError;
use crate::star::{large_star, small_star};

/// Phase of the contraction loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    LargeStar,
    SmallStar,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::LargeStar => "large-star",
            Phase::SmallStar => "small-star",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Configuration for the contraction loop.
#[derive(Debug, Clone, Default)]
pub struct ContractionConfig {
    /// Maximum number of rounds, across both phases, before giving up.
    pub max_rounds: Option<u32>,
}

impl ContractionConfig {
    /// Create a configuration that fails after `max_rounds` rounds.
    pub fn with_max_rounds(max_rounds: u32) -> Self {
        Self {
            max_rounds: Some(max_rounds),
        }
    }
}

/// Summary of a completed contraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractionReport {
    pub large_star_rounds: u32,
    pub small_star_rounds: u32,
    /// Number of large-star/small-star cycles.
    pub outer_iterations: u32,
    /// Convergence sum of the final edge set.
    pub final_sum: BigUint,
    /// Number of `(representative, member)` pairs in the final edge set.
    pub final_pairs: usize,
}

/// Final edge set of a contraction together with its report.
#[derive(Debug, Clone)]
pub struct Contraction {
    /// `(representative, member)` pairs, one per member, markers included.
    pub pairs: Dataset<VertexPair>,
    pub report: ContractionReport,
}

/// Phase transitions driven by observed convergence sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractionState {
    phase: Phase,
    baseline: ConvergenceState,
}

impl ContractionState {
    pub fn new() -> Self {
        Self {
            phase: Phase::LargeStar,
            baseline: ConvergenceState::NotYetStarted,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Sum the current small-star round is compared against.
    pub fn outer_baseline(&self) -> &ConvergenceState {
        &self.baseline
    }

    /// Record a large-star round that took the sum from `start` to `end`.
    ///
    /// # Returns
    ///
    /// The next phase: `LargeStar` while the sum keeps dropping, otherwise
    /// `SmallStar` with `start` recorded as the outer baseline.
    pub fn after_large_star(&mut self, start: &BigUint, end: &BigUint) -> Phase {
        if end >= start {
            self.baseline = ConvergenceState::InProgress(start.clone());
            self.phase = Phase::SmallStar;
        }
        self.phase
    }

    /// Record a small-star round that ended at `end`.
    ///
    /// # Returns
    ///
    /// `LargeStar` if `end` is below the outer baseline, otherwise `Done`.
    pub fn after_small_star(&mut self, end: &BigUint) -> Phase {
        if self.baseline.shows_progress(end) {
            self.phase = Phase::LargeStar;
        } else {
            self.baseline = ConvergenceState::Converged;
            self.phase = Phase::Done;
        }
        self.phase
    }
}

impl Default for ContractionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives contraction rounds on a substrate until the edge set converges.
///
/// Each round consumes the previous round's snapshot and produces a new one.
/// Cancellation is only observed between rounds.
pub struct ContractionLoop<S: Substrate> {
    substrate: Arc<S>,
    config: ContractionConfig,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl<S: Substrate> ContractionLoop<S> {
    /// Create a new contraction loop with the default configuration.
    pub fn new(substrate: Arc<S>) -> Self {
        Self::with_config(substrate, ContractionConfig::default())
    }

    /// Create a new contraction loop with a custom configuration.
    pub fn with_config(substrate: Arc<S>, config: ContractionConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        Self {
            substrate,
            config,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Request cancellation before the next round starts.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Handle that requests cancellation from another task.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Run rounds until the edge set converges.
    ///
    /// # Arguments
    ///
    /// * `edges` - Canonical `(low, high)` input pairs
    ///
    /// # Returns
    ///
    /// * `Ok(Contraction)` - The final `(representative, member)` set
    /// * `Err(ContractionError)` - If a round fails, cancellation is requested,
    ///   or the round limit is reached
    #[instrument(skip(self, edges), fields(input_pairs = edges.len()))]
    pub async fn run(
        &mut self,
        edges: Dataset<VertexPair>,
    ) -> Result<Contraction, ContractionError> {
        info!("Starting contraction");

        let mut state = ContractionState::new();
        let mut current = edges;
        let mut current_sum: Option<BigUint> = None;
        let mut round: u32 = 0;
        let mut large_star_rounds: u32 = 0;
        let mut small_star_rounds: u32 = 0;

        loop {
            let phase = state.phase();
            let at = match phase {
                Phase::Done => break,
                _ => {
                    round += 1;
                    self.begin_round(phase, round)?;
                    move |source: SubstrateError| ContractionError::substrate(phase, round, source)
                }
            };

            if phase == Phase::LargeStar {
                let start_sum = match current_sum.take() {
                    Some(sum) => sum,
                    None => convergence_sum(self.substrate.as_ref(), &current)
                        .await
                        .map_err(at)?,
                };
                let next = large_star(self.substrate.as_ref(), &current)
                    .await
                    .map_err(at)?;
                let end_sum = convergence_sum(self.substrate.as_ref(), &next)
                    .await
                    .map_err(at)?;
                large_star_rounds += 1;

                let next_phase = state.after_large_star(&start_sum, &end_sum);
                debug!(
                    round,
                    start_sum = %start_sum,
                    end_sum = %end_sum,
                    pairs = next.len(),
                    next_phase = %next_phase,
                    "Large-star round finished"
                );

                current = next;
                current_sum = Some(end_sum);
            } else {
                let next = small_star(self.substrate.as_ref(), &current)
                    .await
                    .map_err(at)?;
                let end_sum = convergence_sum(self.substrate.as_ref(), &next)
                    .await
                    .map_err(at)?;
                small_star_rounds += 1;

                let next_phase = state.after_small_star(&end_sum);
                debug!(
                    round,
                    end_sum = %end_sum,
                    pairs = next.len(),
                    next_phase = %next_phase,
                    "Small-star round finished"
                );

                current = next;
                current_sum = Some(end_sum);
            }
        }

        let report = ContractionReport {
            large_star_rounds,
            small_star_rounds,
            outer_iterations: small_star_rounds,
            final_sum: current_sum.unwrap_or_default(),
            final_pairs: current.len(),
        };

        info!(
            large_star_rounds = report.large_star_rounds,
            small_star_rounds = report.small_star_rounds,
            outer_iterations = report.outer_iterations,
            final_sum = %report.final_sum,
            final_pairs = report.final_pairs,
            "Contraction converged"
        );

        Ok(Contraction {
            pairs: current,
            report,
        })
    }

    /// Check cancellation and the round limit before starting a round.
    fn begin_round(&mut self, phase: Phase, round: u32) -> Result<(), ContractionError> {
        match self.shutdown_rx.try_recv() {
            Ok(()) | Err(TryRecvError::Lagged(_)) => {
                warn!(%phase, round, "Cancellation requested, stopping contraction");
                return Err(ContractionError::Cancelled { phase, round });
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => {}
        }

        if let Some(limit) = self.config.max_rounds {
            if round > limit {
                warn!(limit, "Round limit reached before convergence");
                return Err(ContractionError::RoundLimitExceeded { limit });
            }
        }

        Ok(())
    }
}
