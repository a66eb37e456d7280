//! Eclipse Adoptium (Temurin) catalog.
//!
//! The assets API nests platform binaries under each release and reports the
//! version separately in `version_data`. LTS status comes from the
//! `available_releases` info endpoint.

use super::{CatalogClient, Provider, ReleaseEntry, keep_parsed};
use crate::error::Result;
use serde::Deserialize;

pub const API_BASE: &str = "https://api.adoptium.net";

/// Feature releases older than this are not published by Adoptium.
const OLDEST_FEATURE_RELEASE: u32 = 8;

#[derive(Debug, Clone, Deserialize)]
pub struct AvailableReleases {
    #[serde(default)]
    pub available_releases: Vec<u32>,
    #[serde(default)]
    pub available_lts_releases: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdoptiumRelease {
    #[serde(default)]
    pub binaries: Vec<AdoptiumBinary>,
    pub version_data: AdoptiumVersionData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdoptiumBinary {
    pub os: String,
    pub architecture: String,
    #[serde(default)]
    pub image_type: Option<String>,
    #[serde(default)]
    pub package: Option<AdoptiumPackage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdoptiumPackage {
    pub link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdoptiumVersionData {
    pub openjdk_version: String,
}

/// Releases of every fetched feature line plus the LTS list.
#[derive(Debug, Clone)]
pub struct AdoptiumResponse {
    pub lts_releases: Vec<u32>,
    pub releases: Vec<AdoptiumRelease>,
}

pub(super) async fn fetch(
    client: &CatalogClient,
    base: &str,
    major: Option<u32>,
) -> Result<AdoptiumResponse> {
    let info: AvailableReleases = client
        .get_json(
            Provider::Adoptium,
            &format!("{}/v3/info/available_releases", base),
            None,
        )
        .await?;

    let mut releases = Vec::new();
    for feature in feature_majors(&info, major) {
        let url = format!(
            "{}/v3/assets/feature_releases/{}/ga?image_type=jdk&jvm_impl=hotspot&vendor=eclipse&page_size=50",
            base, feature
        );
        let page: Vec<AdoptiumRelease> =
            client.get_records(Provider::Adoptium, &url, None).await?;
        releases.extend(page);
    }

    Ok(AdoptiumResponse {
        lts_releases: info.available_lts_releases,
        releases,
    })
}

/// Feature lines to query: the requested major if Adoptium publishes it,
/// otherwise every published line from Java 8 on.
fn feature_majors(info: &AvailableReleases, major: Option<u32>) -> Vec<u32> {
    match major {
        Some(major) if info.available_releases.contains(&major) => vec![major],
        Some(major) => {
            tracing::debug!("Adoptium publishes no feature release {}", major);
            vec![]
        }
        None => info
            .available_releases
            .iter()
            .copied()
            .filter(|m| *m >= OLDEST_FEATURE_RELEASE)
            .collect(),
    }
}

pub fn normalize(response: AdoptiumResponse) -> Vec<ReleaseEntry> {
    let AdoptiumResponse {
        lts_releases,
        releases,
    } = response;

    releases
        .into_iter()
        .flat_map(|release| {
            let version = release.version_data.openjdk_version;
            release
                .binaries
                .into_iter()
                .filter(|binary| binary.image_type.as_deref().is_none_or(|t| t == "jdk"))
                .filter_map(|binary| {
                    let link = binary.package.map(|p| p.link).unwrap_or_default();
                    let entry = ReleaseEntry::new(
                        Provider::Adoptium,
                        &version,
                        &binary.os,
                        &binary.architecture,
                        false,
                        &link,
                    );
                    keep_parsed(Provider::Adoptium, &version, entry)
                })
                .collect::<Vec<_>>()
        })
        .map(|mut entry| {
            entry.is_lts = lts_releases.contains(&entry.spec.major);
            entry
        })
        .collect()
}
