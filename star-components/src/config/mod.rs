//! Configuration and dependency initialization.

mod args;
mod dependencies;
mod settings;

pub use args::{CliArgs, USAGE};
pub use dependencies::Dependencies;
pub use settings::Settings;
