//! Azul Zulu catalog.
//!
//! The metadata API returns flat records where the version is an integer array
//! and the platform is only encoded in the archive file name, e.g.
//! `zulu21.32.17-ca-jdk21.0.2-linux_x64.tar.gz`.

use super::{CatalogClient, Provider, ReleaseEntry, WELL_KNOWN_LTS, decode_records, keep_parsed};
use crate::error::Result;
use crate::version::VersionSpec;
use serde::Deserialize;

pub const API_BASE: &str = "https://api.azul.com";

#[derive(Debug, Clone, Deserialize)]
pub struct ZuluPackage {
    #[serde(default)]
    pub java_version: Vec<u32>,
    pub name: String,
    #[serde(default)]
    pub download_url: String,
}

/// Packages per metadata page.
pub const PAGE_SIZE: usize = 1000;

/// Upper bound on pages fetched for a single query.
const MAX_PAGES: u32 = 50;

pub(super) async fn fetch(
    client: &CatalogClient,
    base: &str,
    major: Option<u32>,
) -> Result<Vec<ZuluPackage>> {
    let mut packages = Vec::new();
    for page in 1..=MAX_PAGES {
        let records: Vec<serde_json::Value> = client
            .get_json(Provider::Zulu, &page_url(base, major, page), None)
            .await?;
        let last_page = records.len() < PAGE_SIZE;
        packages.extend(decode_records::<ZuluPackage>(Provider::Zulu, records));
        if last_page {
            return Ok(packages);
        }
    }
    tracing::warn!("Zulu catalog still had results after {} pages", MAX_PAGES);
    Ok(packages)
}

/// Metadata query for one page of GA JDK archives, optionally for one major.
fn page_url(base: &str, major: Option<u32>, page: u32) -> String {
    let mut url = format!(
        "{}/metadata/v1/zulu/packages/?java_package_type=jdk&javafx_bundled=false&release_status=ga&availability_types=CA&archive_type=tar.gz&archive_type=zip",
        base
    );
    if let Some(major) = major {
        url.push_str(&format!("&java_version={}", major));
    }
    url.push_str(&format!("&page_size={}&page={}", PAGE_SIZE, page));
    url
}

pub fn normalize(packages: Vec<ZuluPackage>) -> Vec<ReleaseEntry> {
    packages
        .into_iter()
        .filter_map(|package| {
            let Some((os, arch)) = infer_platform(&package.name) else {
                tracing::debug!("Skipping zulu package with unknown platform: {}", package.name);
                return None;
            };

            let raw_version = package
                .java_version
                .iter()
                .map(|part| part.to_string())
                .collect::<Vec<_>>()
                .join(".");

            let entry = VersionSpec::from_release_parts(&package.java_version).map(|spec| {
                ReleaseEntry::with_spec(
                    Provider::Zulu,
                    &raw_version,
                    spec,
                    os,
                    arch,
                    WELL_KNOWN_LTS.contains(&spec.major),
                    &package.download_url,
                )
            });
            keep_parsed(Provider::Zulu, &package.name, entry)
        })
        .collect()
}

/// Infer `(os, arch)` from a Zulu archive name by substring matching.
pub fn infer_platform(name: &str) -> Option<(&'static str, &'static str)> {
    let lower = name.to_ascii_lowercase();

    let os = if lower.contains("linux_musl") || lower.contains("musl") {
        "alpine-linux"
    } else if lower.contains("linux") {
        "linux"
    } else if lower.contains("macosx") || lower.contains("macos") {
        "macos"
    } else if lower.contains("win") {
        "windows"
    } else if lower.contains("solaris") {
        "solaris"
    } else {
        return None;
    };

    // Most specific tokens first: "aarch64" must not be read as "arm"
    let arch = if lower.contains("aarch64") || lower.contains("arm64") {
        "aarch64"
    } else if lower.contains("x64") || lower.contains("x86_64") || lower.contains("amd64") {
        "x64"
    } else if lower.contains("i686") || lower.contains("x86") {
        "x86"
    } else if lower.contains("aarch32") || lower.contains("arm") {
        "arm"
    } else if lower.contains("ppc64le") {
        "ppc64le"
    } else if lower.contains("ppc64") {
        "ppc64"
    } else if lower.contains("sparcv9") {
        "sparcv9"
    } else {
        return None;
    };

    Some((os, arch))
}
