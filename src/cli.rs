//! Command-line argument parsing for the inspector demo
//!
//! Supports:
//! - Resolving scope names against a scheme document
//! - Printing a full report over a canned demo buffer
//! - Listing built-in schemes

use clap::{Parser, Subcommand};

use crate::host::{ResourceError, ResourceLoader};

/// Scope and color-scheme inspector
#[derive(Parser, Debug)]
#[command(name = "scopelens", version, about = "Scope and color-scheme inspector")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve scope names against a color scheme
    Resolve {
        /// Scheme file path or builtin id
        #[arg(short, long, value_name = "PATH", default_value = "lens-dark")]
        scheme: String,

        /// Report the simulated-transparency rendering instead
        #[arg(long)]
        simulate: bool,

        /// Scope names to resolve (e.g. "source.python string.quoted")
        #[arg(value_name = "SCOPE", required = true)]
        scopes: Vec<String>,
    },

    /// Print a full inspector report over a built-in demo buffer
    Report {
        /// Scheme file path or builtin id
        #[arg(short, long, value_name = "PATH", default_value = "lens-dark")]
        scheme: String,
    },

    /// List built-in schemes
    Schemes,
}

/// Filesystem-backed resource loader for the standalone binary
#[derive(Debug, Default)]
pub struct FsLoader;

impl ResourceLoader for FsLoader {
    fn load(&self, path: &str) -> Result<String, ResourceError> {
        std::fs::read_to_string(path).map_err(|_| ResourceError::NotFound(path.to_string()))
    }
}
