/*============================================================
  Synavera Project: Syn-Pub
  Module: synpub_core::report
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Render package metadata for operators and drive the
    sequential fetch-then-print loop over the package list.

  Security / Safety Notes:
    Writes to the supplied sink only (stdout in production).

  Dependencies:
    None beyond std and crate modules.

  Operational Scope:
    Invoked once per run by the entry point.

  Revision History:
    2026-10-18 COD  Authored report writer and run loop.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Deterministic output ordering
    - Per-package failures never abort the run
============================================================*/

use std::io::{self, Write};

use crate::error::{FetchError, Result, SynpubError};
use crate::logger::Logger;
use crate::package_info::PackageInfo;
use crate::pub_api::PubClient;

/// Outcome counts for a completed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub reported: usize,
    pub failed: usize,
}

/// Write the four or five report lines for `info`.
pub fn write_details<W: Write>(out: &mut W, info: &PackageInfo) -> io::Result<()> {
    writeln!(out, "Information about the {} package:", info.name)?;
    writeln!(out, "Latest version: {}", info.latest_version)?;
    writeln!(out, "Description: {}", info.description)?;
    writeln!(out, "Publisher: {}", info.publisher)?;
    if let Some(repository) = &info.repository {
        writeln!(out, "Repository: {repository}")?;
    }
    Ok(())
}

/// Fetch and report each package in order.
///
/// Retrieval failures are printed in place of the report and the loop moves
/// on. Decode failures end the run.
pub async fn report_packages<W: Write>(
    client: &PubClient,
    packages: &[String],
    out: &mut W,
    logger: &Logger,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for (index, package) in packages.iter().enumerate() {
        let outcome = client.fetch_package(package, logger).await;
        if index > 0 && !matches!(outcome, Err(FetchError::Decode { .. })) {
            writeln!(out)?;
        }
        match outcome {
            Ok(info) => {
                write_details(out, &info)?;
                summary.reported += 1;
            }
            Err(FetchError::Retrieval(err)) => {
                logger.warn("RETRIEVE", err.to_string());
                writeln!(out, "{err}")?;
                summary.failed += 1;
            }
            Err(decode @ FetchError::Decode { .. }) => {
                out.flush()?;
                return Err(SynpubError::Serialization(decode.to_string()));
            }
        }
        out.flush()?;
    }

    Ok(summary)
}
