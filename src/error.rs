/*============================================================
  Synavera Project: Syn-Pub
  Module: synpub_core::error
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Define the retrieval and fetch outcomes for package lookups
    alongside the crate-wide error taxonomy and exit codes.

  Security / Safety Notes:
    Messages carry package names and HTTP status codes only;
    response bodies are never echoed back to the operator.

  Dependencies:
    thiserror for ergonomic error definitions.

  Operational Scope:
    RetrievalError is caught per package by the report loop;
    everything else surfaces at the binary entry point.

  Revision History:
    2026-10-18 COD  Established Syn-Pub error definitions.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit error taxonomy with actionable context
    - No silent failure paths
    - Stable exit codes for operational tooling
============================================================*/

use std::io;
use std::process::ExitCode;

use thiserror::Error;

/// Result alias for Syn-Pub-Core operations.
pub type Result<T> = std::result::Result<T, SynpubError>;

/// A package whose metadata could not be retrieved.
///
/// `status_code` is present when the registry answered with something
/// other than `200 OK`, and absent when no response was observed at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Failed to retrieve package:{package_name} information{}!",
    status_clause(.status_code)
)]
pub struct RetrievalError {
    pub package_name: String,
    pub status_code: Option<u16>,
}

impl RetrievalError {
    pub fn new(package_name: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            package_name: package_name.into(),
            status_code,
        }
    }
}

fn status_clause(status_code: &Option<u16>) -> String {
    match status_code {
        Some(code) => format!(" with a status code of {code}"),
        None => String::new(),
    }
}

/// Failure modes of a single package fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Recoverable: the report loop prints it and moves on.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    /// A `200 OK` body that does not describe a package. Not caught by the
    /// report loop; it ends the run as a serialization failure.
    #[error("Failed to decode package:{package_name} information: {reason}")]
    Decode {
        package_name: String,
        reason: String,
    },
}

/// Enumerates high-level error domains surfaced by Syn-Pub-Core.
#[derive(Debug, Error)]
pub enum SynpubError {
    #[error("Configuration: {0}")]
    Config(String),
    #[error("Network: {0}")]
    Network(String),
    #[error("Serialization: {0}")]
    Serialization(String),
    #[error("Filesystem: {0}")]
    Filesystem(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl SynpubError {
    /// Map error category to a deterministic exit code.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    fn exit_status(&self) -> u8 {
        match self {
            SynpubError::Config(_) => 20,
            SynpubError::Network(_) => 30,
            SynpubError::Serialization(_) => 31,
            SynpubError::Filesystem(_) => 40,
            SynpubError::Io(_) => 41,
        }
    }
}
