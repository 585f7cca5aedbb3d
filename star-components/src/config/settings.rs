//! Runtime settings read from the environment.

use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::emitter::OutputFormat;
use crate::RunError;

/// Settings for a connected components run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Number of substrate partitions; `None` uses the available parallelism.
    pub partitions: Option<usize>,
    /// Round cap for the contraction loop; `None` runs until convergence.
    pub max_rounds: Option<u32>,
    pub output_format: OutputFormat,
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SUBSTRATE_PARTITIONS`: Number of partitions (default: available parallelism)
    /// - `MAX_ROUNDS`: Maximum number of contraction rounds (default: unlimited)
    /// - `OUTPUT_FORMAT`: "text" or "json" (default: text)
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - Parsed settings
    /// * `Err(RunError)` - If a numeric variable is not a valid number
    pub fn from_env() -> Result<Self, RunError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RunError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let partitions = parse_optional::<usize>(&lookup, "SUBSTRATE_PARTITIONS")?;
        if partitions == Some(0) {
            return Err(RunError::config("SUBSTRATE_PARTITIONS must be at least 1"));
        }

        let max_rounds = parse_optional::<u32>(&lookup, "MAX_ROUNDS")?;

        let output_format = match lookup("OUTPUT_FORMAT") {
            None => OutputFormat::default(),
            Some(value) => value.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Invalid OUTPUT_FORMAT, defaulting to 'text'");
                OutputFormat::Text
            }),
        };

        Ok(Self {
            partitions,
            max_rounds,
            output_format,
        })
    }
}

fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, RunError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| RunError::config(format!("Invalid {key} {value:?}: {e}"))),
    }
}
