//! BellSoft Liberica catalog.
//!
//! Flat records with plain strings. Architecture is reported as a family plus
//! a separate bitness (`"x86"` + `64` is x64), so the pair is resolved before
//! the usual normalization. Installer packages (`deb`, `msi`, `pkg`, ...) are
//! dropped; only `tar.gz` and `zip` records are kept.

use super::{CatalogClient, Provider, ReleaseEntry, keep_parsed};
use crate::error::Result;
use serde::Deserialize;

pub const API_BASE: &str = "https://api.bell-sw.com";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibericaRelease {
    pub version: String,
    pub os: String,
    pub architecture: String,
    #[serde(default)]
    pub bitness: Option<u32>,
    #[serde(default)]
    pub download_url: String,
    #[serde(default, rename = "LTS")]
    pub lts: bool,
    #[serde(default)]
    pub package_type: Option<String>,
}

pub(super) async fn fetch(
    client: &CatalogClient,
    base: &str,
    major: Option<u32>,
) -> Result<Vec<LibericaRelease>> {
    let mut url = format!(
        "{}/v1/liberica/releases?bundle-type=jdk&release-type=all&fields=version,os,architecture,bitness,downloadUrl,LTS,packageType",
        base
    );
    if let Some(major) = major {
        url.push_str(&format!("&version-feature={}", major));
    }
    client.get_records(Provider::Liberica, &url, None).await
}

pub fn normalize(releases: Vec<LibericaRelease>) -> Vec<ReleaseEntry> {
    releases
        .into_iter()
        .filter(|release| release.package_type.as_deref().is_none_or(is_archive_package))
        .filter_map(|release| {
            let arch = resolve_arch(&release.architecture, release.bitness);
            let entry = ReleaseEntry::new(
                Provider::Liberica,
                &release.version,
                &release.os,
                arch,
                release.lts,
                &release.download_url,
            );
            keep_parsed(Provider::Liberica, &release.version, entry)
        })
        .collect()
}

fn is_archive_package(package_type: &str) -> bool {
    matches!(package_type, "tar.gz" | "zip")
}

/// Combine an architecture family and bitness into a single name.
fn resolve_arch(family: &str, bitness: Option<u32>) -> &str {
    match (family.to_ascii_lowercase().as_str(), bitness) {
        ("x86", Some(64)) => "x64",
        ("x86", _) => "x86",
        ("arm", Some(64)) => "aarch64",
        ("arm", _) => "arm",
        ("ppc", _) => "ppc64le",
        ("sparc", _) => "sparcv9",
        _ => family,
    }
}
