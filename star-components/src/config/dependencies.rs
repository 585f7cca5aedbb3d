//! Dependency initialization and wiring for a connected components run.

use std::sync::Arc;

use star_components_substrate::{LocalSubstrate, LocalSubstrateConfig};
use tracing::info;

use crate::config::Settings;
use crate::emitter::ResultEmitter;
use crate::orchestrator::{ContractionConfig, Orchestrator};
use crate::RunError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator<LocalSubstrate>,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`Settings::from_env`] for the variables read.
    pub fn new() -> Result<Self, RunError> {
        Self::from_settings(Settings::from_env()?)
    }

    /// Initialize all dependencies from explicit settings.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(RunError)` - If the substrate cannot be configured
    pub fn from_settings(settings: Settings) -> Result<Self, RunError> {
        let substrate_config = match settings.partitions {
            Some(partitions) => LocalSubstrateConfig::with_partitions(partitions),
            None => LocalSubstrateConfig::default(),
        };

        info!(
            partitions = substrate_config.partitions,
            max_rounds = ?settings.max_rounds,
            output_format = %settings.output_format,
            "Initializing dependencies"
        );

        let substrate = LocalSubstrate::with_config(substrate_config)
            .map_err(|e| RunError::config(format!("Failed to create substrate: {}", e)))?;

        let contraction_config = ContractionConfig {
            max_rounds: settings.max_rounds,
        };

        let orchestrator = Orchestrator::with_config(
            Arc::new(substrate),
            ResultEmitter::new(settings.output_format),
            contraction_config,
        );

        Ok(Self { orchestrator })
    }
}
