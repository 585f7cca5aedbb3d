//! Edge list reader.
//!
//! Reads the input text one line at a time. Each non-blank line holds exactly
//! two whitespace-separated vertex identifiers; the first line that doesn't
//! aborts the read.

use std::path::Path;

use star_components_shared::Edge;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};

use crate::errors::ReadError;

/// Reads edge lists from text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeReader;

impl EdgeReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every edge in the file at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the input edge list
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Edge>)` - The normalized edges, in file order
    /// * `Err(ReadError)` - If the file cannot be read or a line is malformed
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn read(&self, path: &Path) -> Result<Vec<Edge>, ReadError> {
        let file = File::open(path)
            .await
            .map_err(|e| ReadError::io(path, e))?;

        let edges = self
            .parse_edges(BufReader::new(file))
            .await
            .map_err(|e| match e {
                ReadError::Io { source, .. } => ReadError::io(path, source),
                other => other,
            })?;

        info!(edges = edges.len(), "Read input edges");
        Ok(edges)
    }

    /// Parse edges from any buffered source.
    ///
    /// I/O errors are reported against an empty path; `read` fills in the
    /// real one.
    pub async fn parse_edges<R>(&self, source: R) -> Result<Vec<Edge>, ReadError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = source.lines();
        let mut edges = Vec::new();
        let mut line_number = 0;

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| ReadError::io("", e))?
        {
            line_number += 1;
            if line.trim().is_empty() {
                debug!(line = line_number, "Skipping blank line");
                continue;
            }

            let edge = Edge::parse(&line).map_err(|e| ReadError::malformed(line_number, e))?;
            edges.push(edge);
        }

        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use star_components_shared::MalformedInputError;

    async fn parse(text: &str) -> Result<Vec<Edge>, ReadError> {
        EdgeReader::new().parse_edges(text.as_bytes()).await
    }

    #[tokio::test]
    async fn test_parse_normalizes_edges() {
        let edges = parse("1 2\n3\t1\n  5   4  \n").await.unwrap();
        assert_eq!(edges, vec![Edge::new(1, 2), Edge::new(1, 3), Edge::new(4, 5)]);
    }

    #[tokio::test]
    async fn test_parse_skips_blank_lines() {
        let edges = parse("\n1 2\n   \n\n2 3").await.unwrap();
        assert_eq!(edges, vec![Edge::new(1, 2), Edge::new(2, 3)]);
    }

    #[tokio::test]
    async fn test_parse_accepts_self_loops() {
        let edges = parse("3 3\n").await.unwrap();
        assert!(edges[0].is_self_loop());
    }

    #[tokio::test]
    async fn test_parse_reports_line_number() {
        let err = parse("1 2\n\n2 3 4\n5 6\n").await.unwrap_err();
        match err {
            ReadError::Malformed { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(source, MalformedInputError::TokenCount { found: 3, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_parse_accepts_negative_vertices() {
        let edges = parse("-5 2\n7 2\n").await.unwrap();
        assert_eq!(edges, vec![Edge::new(-5, 2), Edge::new(2, 7)]);
        assert_eq!(edges[0].low, -5);
    }

    #[tokio::test]
    async fn test_parse_rejects_out_of_range_vertex() {
        let err = parse("1 2\n-9223372036854775809 4\n").await.unwrap_err();
        assert!(matches!(
            err,
            ReadError::Malformed {
                line: 2,
                source: MalformedInputError::InvalidVertex { .. }
            }
        ));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let err = EdgeReader::new().read(&path).await.unwrap_err();

        match err {
            ReadError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.txt");
        std::fs::write(&path, "1 2\n2 3\n").unwrap();

        let edges = EdgeReader::new().read(&path).await.unwrap();

        assert_eq!(edges.len(), 2);
    }
}
