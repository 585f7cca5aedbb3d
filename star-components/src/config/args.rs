//! Command line arguments.

use std::path::PathBuf;

/// Usage line printed when the arguments are wrong.
pub const USAGE: &str = "Usage: star-components <input> <output>";

/// Positional arguments: the input edge list and the output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    ///
    /// Returns `None` unless exactly two arguments are given.
    pub fn parse<I>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let input = args.next()?;
        let output = args.next()?;
        if args.next().is_some() {
            return None;
        }

        Some(Self {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_two_paths() {
        let parsed = CliArgs::parse(args(&["edges.txt", "out.txt"])).unwrap();
        assert_eq!(parsed.input, PathBuf::from("edges.txt"));
        assert_eq!(parsed.output, PathBuf::from("out.txt"));
    }

    #[test]
    fn test_parse_wrong_count() {
        assert!(CliArgs::parse(args(&[])).is_none());
        assert!(CliArgs::parse(args(&["edges.txt"])).is_none());
        assert!(CliArgs::parse(args(&["a", "b", "c"])).is_none());
    }
}
