/*============================================================
  Synavera Project: Syn-Pub
  Module: synpub_core::package_info
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Immutable snapshot of a package's published metadata as
    reported by the registry JSON endpoint.

  Security / Safety Notes:
    Pure data container; no I/O performed in this module.

  Dependencies:
    serde/serde_json for decoding, url for repository links.

  Operational Scope:
    Produced by the registry client, consumed once by the
    report writer, then dropped.

  Revision History:
    2026-10-18 COD  Introduced PackageInfo decoding.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Clear data contracts between modules
    - Required fields enforced at the decoding boundary
============================================================*/

use serde::Deserialize;
use url::Url;

/// Published metadata for a single package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub latest_version: String,
    pub description: String,
    pub publisher: String,
    pub repository: Option<Url>,
}

/// Wire shape of the registry document. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageInfoJson {
    name: String,
    latest_version: String,
    description: String,
    publisher: String,
    #[serde(default)]
    repository: Option<String>,
}

impl From<PackageInfoJson> for PackageInfo {
    fn from(raw: PackageInfoJson) -> Self {
        Self {
            name: raw.name,
            latest_version: raw.latest_version,
            description: raw.description,
            publisher: raw.publisher,
            // Only absolute URIs count; anything else is treated as missing.
            repository: raw.repository.and_then(|link| Url::parse(&link).ok()),
        }
    }
}

impl PackageInfo {
    /// Map a decoded registry document onto a `PackageInfo`.
    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value::<PackageInfoJson>(value).map(Self::from)
    }
}
