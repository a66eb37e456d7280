//! Release catalogs from independent JDK vendors.
//!
//! Each vendor publishes its releases through a differently shaped JSON API.
//! The adapters in this module fetch those responses and normalize them into a
//! single [`ReleaseEntry`] shape that the matcher and ranking engine work on.
//!
//! # Providers
//!
//! | Provider   | Shape                                                       |
//! |------------|-------------------------------------------------------------|
//! | `adoptium` | nested `binaries` array, separate `version_data` string     |
//! | `zulu`     | integer version array, platform inferred from archive name  |
//! | `liberica` | flat record with `version`, `os`, `architecture` strings    |
//! | `custom`   | user-configured HTTPS endpoint with a bearer token          |
//!
//! Entries whose version cannot be parsed are skipped; the rest of the catalog
//! is still returned.
//!
//! # Examples
//!
//! ```no_run
//! use jdkup::catalog::{CatalogClient, Provider};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CatalogClient::new(None)?;
//!     let entries = client.fetch_entries(Provider::Adoptium, Some(21)).await?;
//!     for entry in entries.iter().take(5) {
//!         println!("{} {}/{}", entry.raw_version, entry.os, entry.arch);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adoptium;
pub mod custom;
pub mod liberica;
pub mod zulu;

use crate::config::CustomProvider;
use crate::error::{JdkupError, Result};
use crate::platform::ArchiveFormat;
use crate::version::VersionSpec;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Major versions with long-term support, for catalogs that don't flag LTS.
pub const WELL_KNOWN_LTS: &[u32] = &[8, 11, 17, 21, 25];

/// A catalog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[serde(alias = "temurin")]
    Adoptium,
    #[serde(alias = "azul")]
    Zulu,
    #[serde(alias = "bellsoft")]
    Liberica,
    Custom,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Adoptium,
        Provider::Zulu,
        Provider::Liberica,
        Provider::Custom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Adoptium => "adoptium",
            Provider::Zulu => "zulu",
            Provider::Liberica => "liberica",
            Provider::Custom => "custom",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = JdkupError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "adoptium" | "temurin" => return Ok(Provider::Adoptium),
            "zulu" | "azul" => return Ok(Provider::Zulu),
            "liberica" | "bellsoft" => return Ok(Provider::Liberica),
            "custom" => return Ok(Provider::Custom),
            _ => {}
        }

        let closest = Provider::ALL
            .iter()
            .map(|p| (p, strsim::levenshtein(&lower, p.name())))
            .min_by_key(|(_, distance)| *distance)
            .filter(|(_, distance)| *distance <= 3);

        let message = match closest {
            Some((provider, _)) => format!("unknown provider '{}', did you mean '{}'?", s, provider),
            None => format!(
                "unknown provider '{}', expected one of: adoptium, zulu, liberica, custom",
                s
            ),
        };
        Err(JdkupError::Config(message))
    }
}

/// A provider-agnostic description of one downloadable release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseEntry {
    pub raw_version: String,
    #[serde(skip)]
    pub spec: VersionSpec,
    pub os: String,
    pub arch: String,
    pub is_lts: bool,
    pub download_url: String,
    pub provider: Provider,
}

impl ReleaseEntry {
    /// Build an entry from a catalog version string.
    ///
    /// Fails with a parse error when the version has no numeric major.
    pub fn new(
        provider: Provider,
        raw_version: &str,
        os: &str,
        arch: &str,
        is_lts: bool,
        download_url: &str,
    ) -> Result<Self> {
        let spec = VersionSpec::parse_release(raw_version)?;
        Ok(Self::with_spec(
            provider,
            raw_version,
            spec,
            os,
            arch,
            is_lts,
            download_url,
        ))
    }

    /// Build an entry whose version was already parsed by the adapter.
    pub fn with_spec(
        provider: Provider,
        raw_version: &str,
        spec: VersionSpec,
        os: &str,
        arch: &str,
        is_lts: bool,
        download_url: &str,
    ) -> Self {
        Self {
            raw_version: raw_version.trim().to_string(),
            spec: spec.promoted(),
            os: crate::platform::normalize_os(os),
            arch: crate::platform::normalize_arch(arch),
            is_lts,
            download_url: download_url.trim().to_string(),
            provider,
        }
    }

    /// Whether the entry can be downloaded at all.
    pub fn is_downloadable(&self) -> bool {
        !self.download_url.is_empty()
    }

    pub fn archive_format(&self) -> Option<ArchiveFormat> {
        ArchiveFormat::from_name(&self.download_url)
    }

    /// File name of the archive, taken from the last URL path segment.
    pub fn archive_file_name(&self) -> Option<String> {
        let url = reqwest::Url::parse(&self.download_url).ok()?;
        url.path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}

/// Raw catalog responses, one variant per provider shape.
#[derive(Debug)]
pub enum CatalogResponse {
    Adoptium(adoptium::AdoptiumResponse),
    Zulu(Vec<zulu::ZuluPackage>),
    Liberica(Vec<liberica::LibericaRelease>),
    Custom(Vec<custom::CustomRelease>),
}

impl CatalogResponse {
    pub fn provider(&self) -> Provider {
        match self {
            CatalogResponse::Adoptium(_) => Provider::Adoptium,
            CatalogResponse::Zulu(_) => Provider::Zulu,
            CatalogResponse::Liberica(_) => Provider::Liberica,
            CatalogResponse::Custom(_) => Provider::Custom,
        }
    }

    /// Normalize into release entries, skipping records that fail to parse.
    pub fn into_entries(self) -> Vec<ReleaseEntry> {
        match self {
            CatalogResponse::Adoptium(response) => adoptium::normalize(response),
            CatalogResponse::Zulu(packages) => zulu::normalize(packages),
            CatalogResponse::Liberica(releases) => liberica::normalize(releases),
            CatalogResponse::Custom(releases) => custom::normalize(releases),
        }
    }
}

/// Base URLs for the hard-coded vendor catalogs.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub adoptium: String,
    pub zulu: String,
    pub liberica: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            adoptium: adoptium::API_BASE.to_string(),
            zulu: zulu::API_BASE.to_string(),
            liberica: liberica::API_BASE.to_string(),
        }
    }
}

/// Result of fetching one provider during a fetch of every catalog.
#[derive(Debug)]
pub struct ProviderCatalog {
    pub provider: Provider,
    pub result: Result<Vec<ReleaseEntry>>,
}

/// HTTP client for all catalogs.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    endpoints: Endpoints,
    custom: Option<CustomProvider>,
}

impl CatalogClient {
    /// Create a client for the built-in vendors plus an optional custom catalog.
    pub fn new(custom: Option<CustomProvider>) -> Result<Self> {
        Self::with_endpoints(Endpoints::default(), custom)
    }

    pub fn with_endpoints(endpoints: Endpoints, custom: Option<CustomProvider>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("jdkup/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoints,
            custom,
        })
    }

    /// Fetch the raw response of one provider.
    ///
    /// `major` narrows the query on catalogs that support it; the custom
    /// catalog always returns everything.
    pub async fn fetch(&self, provider: Provider, major: Option<u32>) -> Result<CatalogResponse> {
        tracing::debug!("Fetching {} catalog (major: {:?})", provider, major);
        match provider {
            Provider::Adoptium => adoptium::fetch(self, &self.endpoints.adoptium, major)
                .await
                .map(CatalogResponse::Adoptium),
            Provider::Zulu => zulu::fetch(self, &self.endpoints.zulu, major)
                .await
                .map(CatalogResponse::Zulu),
            Provider::Liberica => liberica::fetch(self, &self.endpoints.liberica, major)
                .await
                .map(CatalogResponse::Liberica),
            Provider::Custom => {
                let custom = self.custom.as_ref().ok_or_else(|| {
                    JdkupError::Config(
                        "the custom provider needs `custom.endpoint` in the config file"
                            .to_string(),
                    )
                })?;
                custom::fetch(self, custom).await.map(CatalogResponse::Custom)
            }
        }
    }

    /// Fetch and normalize one provider's catalog.
    pub async fn fetch_entries(
        &self,
        provider: Provider,
        major: Option<u32>,
    ) -> Result<Vec<ReleaseEntry>> {
        let entries = self.fetch(provider, major).await?.into_entries();
        tracing::debug!("{} catalog: {} entries", provider, entries.len());
        Ok(entries)
    }

    /// Fetch every provider one after another.
    ///
    /// A failing provider is reported in its slot and does not stop the others.
    /// The custom provider is only queried when it is configured.
    pub async fn fetch_all(&self, major: Option<u32>) -> Vec<ProviderCatalog> {
        let mut catalogs = Vec::new();
        for provider in Provider::ALL {
            if provider == Provider::Custom && self.custom.is_none() {
                continue;
            }
            let result = self.fetch_entries(provider, major).await;
            if let Err(e) = &result {
                tracing::warn!("Failed to fetch {} catalog: {}", provider, e);
            }
            catalogs.push(ProviderCatalog { provider, result });
        }
        catalogs
    }

    /// GET a URL and decode the JSON body, mapping HTTP failures to network errors.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        provider: Provider,
        url: &str,
        bearer: Option<&str>,
    ) -> Result<T> {
        let mut request = self.client.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| JdkupError::network(provider.name(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(JdkupError::network(
                provider.name(),
                format!("GET {} returned {}", url, status),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| JdkupError::network(provider.name(), e.to_string()))?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// GET a JSON array and decode its records one at a time.
    pub(crate) async fn get_records<T: DeserializeOwned>(
        &self,
        provider: Provider,
        url: &str,
        bearer: Option<&str>,
    ) -> Result<Vec<T>> {
        let records: Vec<serde_json::Value> = self.get_json(provider, url, bearer).await?;
        Ok(decode_records(provider, records))
    }
}

/// Decode each raw record into `T`, dropping records of the wrong shape.
pub fn decode_records<T: DeserializeOwned>(
    provider: Provider,
    records: Vec<serde_json::Value>,
) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::debug!("Skipping malformed {} record: {}", provider, e);
                None
            }
        })
        .collect()
}

/// Log and drop records that failed to normalize.
pub(crate) fn keep_parsed(
    provider: Provider,
    raw: &str,
    entry: Result<ReleaseEntry>,
) -> Option<ReleaseEntry> {
    match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::debug!("Skipping {} entry '{}': {}", provider, raw, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str_aliases() {
        assert_eq!("Temurin".parse::<Provider>().unwrap(), Provider::Adoptium);
        assert_eq!("azul".parse::<Provider>().unwrap(), Provider::Zulu);
        assert_eq!("bellsoft".parse::<Provider>().unwrap(), Provider::Liberica);
        assert_eq!("custom".parse::<Provider>().unwrap(), Provider::Custom);
    }

    #[test]
    fn test_provider_typo_suggests_closest() {
        let err = "adoptum".parse::<Provider>().unwrap_err();
        assert!(err.to_string().contains("did you mean 'adoptium'"));

        let err = "openjdk-builds-from-somewhere".parse::<Provider>().unwrap_err();
        assert!(err.to_string().contains("expected one of"));
    }

    #[test]
    fn test_provider_deserializes_from_config_names() {
        let provider: Provider = serde_json::from_str("\"temurin\"").unwrap();
        assert_eq!(provider, Provider::Adoptium);
        let provider: Provider = serde_json::from_str("\"liberica\"").unwrap();
        assert_eq!(provider, Provider::Liberica);
    }

    #[test]
    fn test_entry_promotes_version_and_normalizes_platform() {
        let entry = ReleaseEntry::new(
            Provider::Custom,
            "17",
            "Darwin",
            "arm64",
            true,
            "https://example.com/jdk-17.tar.gz",
        )
        .unwrap();
        assert_eq!(entry.spec, VersionSpec::exact(17, 0, 0));
        assert_eq!(entry.os, "macos");
        assert_eq!(entry.arch, "aarch64");
        assert!(entry.is_downloadable());
        assert_eq!(entry.archive_format(), Some(ArchiveFormat::TarGz));
        assert_eq!(entry.archive_file_name().as_deref(), Some("jdk-17.tar.gz"));
    }

    #[test]
    fn test_entry_without_url_is_not_downloadable() {
        let entry = ReleaseEntry::new(Provider::Custom, "21.0.1", "linux", "x64", true, " ").unwrap();
        assert!(!entry.is_downloadable());
        assert_eq!(entry.archive_file_name(), None);
    }

    #[test]
    fn test_entry_with_bad_version_fails() {
        let result = ReleaseEntry::new(Provider::Custom, "latest", "linux", "x64", false, "u");
        assert!(matches!(result, Err(JdkupError::Parse { .. })));
    }

    #[test]
    fn test_archive_file_name_ignores_query_and_trailing_slash() {
        let entry = |url: &str| {
            ReleaseEntry::new(Provider::Custom, "21.0.1", "linux", "x64", true, url).unwrap()
        };
        assert_eq!(
            entry("https://mirror.example.com/jdk/jdk-21.zip?token=abc#top")
                .archive_file_name()
                .as_deref(),
            Some("jdk-21.zip")
        );
        assert_eq!(entry("https://mirror.example.com/jdk/").archive_file_name(), None);
        assert_eq!(entry("jdk-21.zip").archive_file_name(), None);
    }

    #[test]
    fn test_decode_records_skips_malformed_records() {
        let records: Vec<serde_json::Value> = serde_json::from_str(
            r#"[
              {"version": "21.0.3", "download": "https://mirror.corp/jdk-21.0.3.tar.gz", "os": "linux", "arch": "x64"},
              {"version": 21, "download": "https://mirror.corp/jdk-21.tar.gz", "os": "linux", "arch": "x64"},
              {"download": "https://mirror.corp/jdk.tar.gz", "os": "linux", "arch": "x64"},
              "not a record",
              {"version": "17.0.9", "os": "macos", "arch": "aarch64"}
            ]"#,
        )
        .unwrap();

        let releases: Vec<custom::CustomRelease> = decode_records(Provider::Custom, records);
        let versions: Vec<&str> = releases.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, vec!["21.0.3", "17.0.9"]);
    }
}
