//! User-configured catalog.
//!
//! The only catalog whose endpoint and credential come from configuration.
//! It must answer `GET <endpoint>` with a JSON array of
//! `{version, download, os, arch, lts}` records, authenticated by
//! `Authorization: Bearer <token>`.

use super::{CatalogClient, Provider, ReleaseEntry, keep_parsed};
use crate::config::CustomProvider;
use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CustomRelease {
    pub version: String,
    #[serde(default)]
    pub download: String,
    pub os: String,
    pub arch: String,
    #[serde(default)]
    pub lts: bool,
}

pub(super) async fn fetch(
    client: &CatalogClient,
    custom: &CustomProvider,
) -> Result<Vec<CustomRelease>> {
    client
        .get_records(Provider::Custom, &custom.endpoint, custom.token.as_deref())
        .await
}

pub fn normalize(releases: Vec<CustomRelease>) -> Vec<ReleaseEntry> {
    releases
        .into_iter()
        .filter_map(|release| {
            let entry = ReleaseEntry::new(
                Provider::Custom,
                &release.version,
                &release.os,
                &release.arch,
                release.lts,
                &release.download,
            );
            keep_parsed(Provider::Custom, &release.version, entry)
        })
        .collect()
}
