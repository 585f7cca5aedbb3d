//! Result emitter.
//!
//! Turns the final `(representative, member)` set into one component assignment
//! per vertex and writes them sorted by vertex. Output goes to a sibling
//! `.partial` file first and is renamed into place once complete.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use star_components_shared::{ComponentAssignment, VertexPair};
use star_components_substrate::{Dataset, Substrate, SubstrateError};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{info, instrument, warn};

use crate::errors::EmitError;

/// Line format of the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `vertex representative`
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" | "jsonl" => Ok(Self::Json),
            other => Err(format!("unknown output format {other:?}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Reverse the final pairs into per-vertex component assignments.
///
/// # Arguments
///
/// * `substrate` - The substrate executing the map
/// * `pairs` - The converged `(representative, member)` set
pub async fn reverse_pairs<S: Substrate>(
    substrate: &S,
    pairs: &Dataset<VertexPair>,
) -> Result<Dataset<ComponentAssignment>, SubstrateError> {
    substrate
        .map(pairs, |pair: &VertexPair| {
            ComponentAssignment::from_final_pair(*pair)
        })
        .await
}

/// Writes component assignments to disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultEmitter {
    format: OutputFormat,
}

impl ResultEmitter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write every assignment to `path`, sorted by vertex.
    ///
    /// # Arguments
    ///
    /// * `assignments` - One assignment per vertex
    /// * `path` - Destination file; replaced only once fully written
    ///
    /// # Returns
    ///
    /// The number of records written.
    #[instrument(skip(self, assignments, path), fields(path = %path.display(), format = %self.format))]
    pub async fn emit(
        &self,
        assignments: &Dataset<ComponentAssignment>,
        path: &Path,
    ) -> Result<usize, EmitError> {
        let mut records = assignments.to_vec();
        records.sort_unstable();

        let staging = staging_path(path);
        if let Err(e) = self.write_records(&records, &staging).await {
            if fs::remove_file(&staging).await.is_err() {
                warn!(staging = %staging.display(), "Failed to remove partial output");
            }
            return Err(e);
        }

        fs::rename(&staging, path)
            .await
            .map_err(|e| EmitError::io(path, e))?;

        info!(records = records.len(), "Wrote component assignments");
        Ok(records.len())
    }

    async fn write_records(
        &self,
        records: &[ComponentAssignment],
        staging: &Path,
    ) -> Result<(), EmitError> {
        let file = File::create(staging)
            .await
            .map_err(|e| EmitError::io(staging, e))?;
        let mut writer = BufWriter::new(file);

        for record in records {
            let line = self.render(record)?;
            writer
                .write_all(line.as_bytes())
                .await
                .map_err(|e| EmitError::io(staging, e))?;
        }

        writer.flush().await.map_err(|e| EmitError::io(staging, e))?;
        writer
            .into_inner()
            .sync_all()
            .await
            .map_err(|e| EmitError::io(staging, e))
    }

    fn render(&self, record: &ComponentAssignment) -> Result<String, EmitError> {
        match self.format {
            OutputFormat::Text => Ok(format!("{} {}\n", record.vertex, record.representative)),
            OutputFormat::Json => {
                let mut line = serde_json::to_string(record)?;
                line.push('\n');
                Ok(line)
            }
        }
    }
}

/// Sibling path the output is staged at before the final rename.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use star_components_substrate::{LocalSubstrate, LocalSubstrateConfig};

    fn substrate() -> LocalSubstrate {
        LocalSubstrate::with_config(LocalSubstrateConfig::with_partitions(2)).unwrap()
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_staging_path_is_sibling() {
        let staging = staging_path(Path::new("/tmp/out/components.txt"));
        assert_eq!(staging, PathBuf::from("/tmp/out/components.txt.partial"));
    }

    #[tokio::test]
    async fn test_reverse_pairs() {
        let substrate = substrate();
        let pairs = substrate.parallelize(vec![(1, 1), (1, 2), (4, 5)]);

        let mut assignments = reverse_pairs(&substrate, &pairs).await.unwrap().to_vec();
        assignments.sort_unstable();

        assert_eq!(
            assignments,
            vec![
                ComponentAssignment::from_final_pair((1, 1)),
                ComponentAssignment::from_final_pair((1, 2)),
                ComponentAssignment::from_final_pair((4, 5)),
            ]
        );
    }

    #[tokio::test]
    async fn test_emit_text_sorted_by_vertex() {
        let substrate = substrate();
        let pairs = substrate.parallelize(vec![(4, 5), (1, 3), (1, 1), (4, 4), (1, 2)]);
        let assignments = reverse_pairs(&substrate, &pairs).await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("components.txt");

        let written = ResultEmitter::new(OutputFormat::Text)
            .emit(&assignments, &path)
            .await
            .unwrap();

        assert_eq!(written, 5);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "1 1\n2 1\n3 1\n4 4\n5 4\n"
        );
        assert!(!staging_path(&path).exists());
    }

    #[tokio::test]
    async fn test_emit_json_lines() {
        let substrate = substrate();
        let pairs = substrate.parallelize(vec![(2, 9), (2, 2)]);
        let assignments = reverse_pairs(&substrate, &pairs).await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("components.jsonl");

        ResultEmitter::new(OutputFormat::Json)
            .emit(&assignments, &path)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\"vertex\":2,\"representative\":2}\n{\"vertex\":9,\"representative\":2}\n"
        );
    }

    #[tokio::test]
    async fn test_emit_into_missing_directory_leaves_nothing() {
        let substrate = substrate();
        let pairs = substrate.parallelize(vec![(1, 1)]);
        let assignments = reverse_pairs(&substrate, &pairs).await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("components.txt");

        let err = ResultEmitter::default()
            .emit(&assignments, &path)
            .await
            .unwrap_err();

        assert!(matches!(err, EmitError::Io { .. }));
        assert!(!path.exists());
    }
}
