//! High-level Installer API wiring the resolution and installation pipeline.
//!
//! ```text
//! catalog ─► matcher ─► ranking ─► download ─► extract ─► layout ─► <root>/<version>
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use jdkup::config::Config;
//! use jdkup::installer::Installer;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let installer = Installer::new(&Config::load()?)?;
//!     let outcome = installer.install("21", None).await?;
//!     println!("JAVA_HOME={}", outcome.path.display());
//!     Ok(())
//! }
//! ```
//!
//! # Staging
//!
//! Archives are downloaded and unpacked inside a hidden staging directory in
//! the install root. Only a fully normalized release is renamed into place, so
//! `<root>/<version>` either holds a complete installation or does not exist.
//! The staging directory is deleted when the install finishes or fails.

use crate::catalog::{CatalogClient, Provider, ReleaseEntry};
use crate::config::Config;
use crate::download::Downloader;
use crate::error::{ExtractionError, JdkupError, Result};
use crate::extract::{self, ExtractReport};
use crate::installed::InstallReceipt;
use crate::layout;
use crate::matcher;
use crate::platform::Host;
use crate::ranking;
use crate::version::VersionSpec;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::TempDir;

/// A request resolved against one catalog.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub request: VersionSpec,
    pub provider: Provider,
    /// Matches that can be installed on the host, in catalog order.
    pub candidates: Vec<ReleaseEntry>,
    pub best: ReleaseEntry,
}

/// Result of an install operation
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    pub entry: ReleaseEntry,
    /// Installation root, suitable for `JAVA_HOME`.
    pub path: PathBuf,
    /// The release was already present; nothing was downloaded.
    pub already_installed: bool,
    pub report: Option<ExtractReport>,
    pub time_ms: u64,
}

/// Resolves version requests and installs releases under one root.
pub struct Installer {
    catalog: CatalogClient,
    downloader: Downloader,
    root: PathBuf,
    host: Host,
    default_provider: Provider,
}

impl Installer {
    /// Build an installer for this host from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_parts(
            CatalogClient::new(config.custom.clone())?,
            Downloader::new(true)?,
            config.install_root(),
            Host::detect(),
            config.default_provider,
        ))
    }

    pub fn with_parts(
        catalog: CatalogClient,
        downloader: Downloader,
        root: PathBuf,
        host: Host,
        default_provider: Provider,
    ) -> Self {
        Self {
            catalog,
            downloader,
            root,
            host,
            default_provider,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn default_provider(&self) -> Provider {
        self.default_provider
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Resolve `request` to the best release `provider` offers for this host.
    pub async fn resolve(&self, request: &str, provider: Option<Provider>) -> Result<Resolution> {
        let spec = VersionSpec::parse_request(request)?;
        let provider = provider.unwrap_or(self.default_provider);
        let entries = self.catalog.fetch_entries(provider, Some(spec.major)).await?;
        resolve_in(&entries, spec, provider, &self.host)
    }

    /// One recommended release per major version, for this host.
    pub async fn recommended(
        &self,
        provider: Option<Provider>,
    ) -> Result<BTreeMap<u32, ReleaseEntry>> {
        let provider = provider.unwrap_or(self.default_provider);
        let entries = self.catalog.fetch_entries(provider, None).await?;
        Ok(recommend_for_host(&entries, &self.host))
    }

    /// Resolve, download and install `request`.
    pub async fn install(
        &self,
        request: &str,
        provider: Option<Provider>,
    ) -> Result<InstallOutcome> {
        let resolution = self.resolve(request, provider).await?;
        tracing::info!(
            "Resolved {} to {} from {}",
            request,
            resolution.best.raw_version,
            resolution.provider
        );
        self.install_entry(&resolution.best).await
    }

    /// Download and install a specific catalog entry.
    pub async fn install_entry(&self, entry: &ReleaseEntry) -> Result<InstallOutcome> {
        let start = Instant::now();
        let target = self.target_dir(entry);
        if let Some(outcome) = self.existing(entry, &target)? {
            return Ok(outcome);
        }

        let file_name = entry
            .archive_file_name()
            .filter(|_| entry.archive_format().is_some())
            .ok_or_else(|| {
                ExtractionError::UnsupportedFormat(PathBuf::from(&entry.download_url))
            })?;

        let staging = self.staging_dir()?;
        let archive = staging.path().join(&file_name);
        let label = format!("{} {}", entry.provider, entry.raw_version);
        self.downloader
            .download(&entry.download_url, &archive, &label)
            .await?;

        self.unpack(entry, &archive, &staging, &target, start)
    }

    /// Install `entry` from an archive that is already on disk.
    pub fn install_from_archive(
        &self,
        entry: &ReleaseEntry,
        archive: &Path,
    ) -> Result<InstallOutcome> {
        let start = Instant::now();
        let target = self.target_dir(entry);
        if let Some(outcome) = self.existing(entry, &target)? {
            return Ok(outcome);
        }

        let staging = self.staging_dir()?;
        self.unpack(entry, archive, &staging, &target, start)
    }

    /// `<root>/<major.minor.patch>`
    pub fn target_dir(&self, entry: &ReleaseEntry) -> PathBuf {
        self.root.join(entry.spec.to_string())
    }

    fn existing(&self, entry: &ReleaseEntry, target: &Path) -> Result<Option<InstallOutcome>> {
        if layout::looks_like_installation(target, self.host.executable_name()) {
            tracing::info!("{} is already installed at {}", entry.spec, target.display());
            return Ok(Some(InstallOutcome {
                entry: entry.clone(),
                path: target.to_path_buf(),
                already_installed: true,
                report: None,
                time_ms: 0,
            }));
        }
        if target.exists() {
            return Err(JdkupError::IoError(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!(
                    "{} exists but is not a valid installation; remove it first",
                    target.display()
                ),
            )));
        }
        Ok(None)
    }

    fn staging_dir(&self) -> Result<TempDir> {
        fs::create_dir_all(&self.root)?;
        Ok(tempfile::Builder::new()
            .prefix(".jdkup-staging-")
            .tempdir_in(&self.root)?)
    }

    fn unpack(
        &self,
        entry: &ReleaseEntry,
        archive: &Path,
        staging: &TempDir,
        target: &Path,
        start: Instant,
    ) -> Result<InstallOutcome> {
        let unpacked = staging.path().join("release");
        let report = extract::extract(archive, &unpacked)?;
        if report.skipped > 0 {
            tracing::warn!(
                "Skipped {} archive entries that pointed outside the install directory",
                report.skipped
            );
        }

        let release_root = layout::normalize(&unpacked, self.host.executable_name())?;
        InstallReceipt::for_entry(entry).write(&release_root)?;
        fs::rename(&release_root, target)?;
        tracing::info!("Installed {} at {}", entry.raw_version, target.display());

        Ok(InstallOutcome {
            entry: entry.clone(),
            path: target.to_path_buf(),
            already_installed: false,
            report: Some(report),
            time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

/// Match, filter for the host and pick the best of `entries`.
pub fn resolve_in(
    entries: &[ReleaseEntry],
    request: VersionSpec,
    provider: Provider,
    host: &Host,
) -> Result<Resolution> {
    let matched = matcher::match_candidates(&request, entries)?;
    let candidates = matcher::filter_for_host(&request, &matched, host)?;
    let best = ranking::best_match(&candidates)
        .cloned()
        .ok_or_else(|| JdkupError::no_match(&request.to_string(), format!(" for {}", host)))?;

    Ok(Resolution {
        request,
        provider,
        candidates,
        best,
    })
}

/// Per-major recommendations among the installable entries built for `host`.
pub fn recommend_for_host(entries: &[ReleaseEntry], host: &Host) -> BTreeMap<u32, ReleaseEntry> {
    let native: Vec<ReleaseEntry> = entries
        .iter()
        .filter(|e| matcher::is_installable(e) && host.matches(&e.os, &e.arch))
        .cloned()
        .collect();
    ranking::recommend_per_major(&native)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(version: &str, lts: bool, os: &str) -> ReleaseEntry {
        ReleaseEntry::new(
            Provider::Adoptium,
            version,
            os,
            "x64",
            lts,
            &format!("https://x/{}-{}.tar.gz", os, version),
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_in_picks_highest_host_build() {
        let host = Host::new("linux", "x64");
        let entries = vec![
            entry("21.0.1", true, "linux"),
            entry("21.0.3", true, "windows"),
            entry("21.0.2", true, "linux"),
            entry("20.0.1", false, "linux"),
        ];
        let spec = VersionSpec::parse_request("21").unwrap();
        let resolution = resolve_in(&entries, spec, Provider::Adoptium, &host).unwrap();

        assert_eq!(resolution.candidates.len(), 2);
        assert_eq!(resolution.best.raw_version, "21.0.2");
        assert_eq!(resolution.best.os, "linux");
    }

    #[test]
    fn test_resolve_in_reports_no_match() {
        let host = Host::new("linux", "x64");
        let entries = vec![entry("21.0.1", true, "linux")];
        let spec = VersionSpec::parse_request("17").unwrap();
        let err = resolve_in(&entries, spec, Provider::Adoptium, &host).unwrap_err();
        assert!(matches!(err, JdkupError::NoMatch { .. }));
    }

    #[test]
    fn test_resolve_in_skips_native_packages_listed_first() {
        let host = Host::new("linux", "x64");
        let deb = ReleaseEntry::new(
            Provider::Liberica,
            "21.0.2+14",
            "linux",
            "x86_64",
            true,
            "https://download.bell-sw.com/java/21.0.2+14/bellsoft-jdk21.0.2+14-linux-amd64.deb",
        )
        .unwrap();
        let tar = ReleaseEntry::new(
            Provider::Liberica,
            "21.0.2+14",
            "linux",
            "x86_64",
            true,
            "https://download.bell-sw.com/java/21.0.2+14/bellsoft-jdk21.0.2+14-linux-amd64.tar.gz",
        )
        .unwrap();

        let spec = VersionSpec::parse_request("21").unwrap();
        let resolution = resolve_in(&[deb, tar], spec, Provider::Liberica, &host).unwrap();
        assert_eq!(resolution.candidates.len(), 1);
        assert!(resolution.best.archive_format().is_some());
        assert!(resolution.best.download_url.ends_with(".tar.gz"));
    }

    #[test]
    fn test_recommend_for_host_skips_installer_packages() {
        let host = Host::new("linux", "x64");
        let entries = vec![
            ReleaseEntry::new(Provider::Zulu, "17.0.10", "linux", "x64", true, "https://x/17.0.10.rpm")
                .unwrap(),
            entry("17.0.9", true, "linux"),
        ];
        let recommended = recommend_for_host(&entries, &host);
        assert_eq!(recommended[&17].raw_version, "17.0.9");
    }

    #[test]
    fn test_recommend_for_host_ignores_other_platforms() {
        let host = Host::new("linux", "x64");
        let entries = vec![
            entry("17.0.9", true, "linux"),
            entry("17.0.10", true, "macos"),
            entry("21.0.2", true, "linux"),
        ];
        let recommended = recommend_for_host(&entries, &host);
        assert_eq!(recommended[&17].raw_version, "17.0.9");
        assert_eq!(recommended[&21].raw_version, "21.0.2");
    }

    #[test]
    fn test_target_dir_uses_canonical_version() {
        let dir = tempfile::TempDir::new().unwrap();
        let installer = Installer::with_parts(
            CatalogClient::new(None).unwrap(),
            Downloader::new(false).unwrap(),
            dir.path().to_path_buf(),
            Host::new("linux", "x64"),
            Provider::Adoptium,
        );
        let entry = entry("21.0.2+13-LTS", true, "linux");
        assert_eq!(installer.target_dir(&entry), dir.path().join("21.0.2"));
    }
}
