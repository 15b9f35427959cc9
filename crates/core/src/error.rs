//! Error taxonomy. Per-candidate problems (non-matching files, bad braces,
//! malformed signatures) never show up here; they are simply absent from output.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimplifierError>;

#[derive(Debug, Error)]
pub enum SimplifierError {
    /// Directory traversal failed. Aborts the scan.
    #[error("Error walking {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// A `.java` file could not be read. Aborts the scan.
    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing one stub failed. Collected per unit; other units still run.
    #[error("Error writing simplified SSO for {class} to {}: {source}", path.display())]
    Write {
        class: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("No .java files found to compile in {}", dir.display())]
    NoJavaFiles { dir: PathBuf },

    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// External tool ran and exited non-zero; `output` carries its diagnostics.
    #[error("{tool} failed ({status}):\n{output}")]
    Tool { tool: String, status: ExitStatus, output: String },
}
