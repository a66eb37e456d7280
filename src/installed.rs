//! Installed releases under the install root.
//!
//! Every release lives in a directory named after its canonical version,
//! next to a small receipt describing where it came from:
//!
//! ```text
//! ~/.jdkup/versions/
//!   21.0.2/
//!     .jdkup-release.json     # provider, raw version, platform, time
//!     bin/java
//!     lib/
//!   17.0.9/
//! ```
//!
//! Directories starting with `.` are staging areas of in-flight installs and
//! are never listed.

use crate::catalog::{Provider, ReleaseEntry};
use crate::error::{JdkupError, Result};
use crate::layout;
use crate::matcher;
use crate::platform::Host;
use crate::version::VersionSpec;
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const RECEIPT_FILE: &str = ".jdkup-release.json";

/// Where an installed release came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReceipt {
    pub provider: Provider,
    pub raw_version: String,
    pub os: String,
    pub arch: String,
    #[serde(default)]
    pub is_lts: bool,
    pub download_url: String,
    /// Unix timestamp of the install.
    pub time: i64,
}

impl InstallReceipt {
    pub fn for_entry(entry: &ReleaseEntry) -> Self {
        Self {
            provider: entry.provider,
            raw_version: entry.raw_version.clone(),
            os: entry.os.clone(),
            arch: entry.arch.clone(),
            is_lts: entry.is_lts,
            download_url: entry.download_url.clone(),
            time: chrono::Utc::now().timestamp(),
        }
    }

    pub fn read(dir: &Path) -> Result<Self> {
        let contents = fs::read_to_string(dir.join(RECEIPT_FILE))?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn write(&self, dir: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(RECEIPT_FILE), contents)?;
        Ok(())
    }

    pub fn installed_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_opt(self.time, 0).single()
    }
}

/// An installed release directory.
#[derive(Debug, Clone)]
pub struct InstalledRelease {
    pub name: String,
    pub version: VersionSpec,
    pub path: PathBuf,
    pub receipt: Option<InstallReceipt>,
}

impl InstalledRelease {
    /// Read a release directory; `None` when its name is not a version.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().into_owned();
        if name.starts_with('.') {
            return None;
        }
        let version = VersionSpec::parse_release(&name).ok()?;
        let receipt = InstallReceipt::read(&path).ok();
        Some(Self {
            name,
            version,
            path,
            receipt,
        })
    }

    /// Total size of the files in the release.
    pub fn size_bytes(&self) -> u64 {
        WalkDir::new(&self.path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.metadata().ok())
            .map(|m| m.len())
            .sum()
    }

    pub fn is_valid(&self) -> bool {
        is_valid_installation(&self.path)
    }
}

/// Whether `path` holds a usable release for this host.
pub fn is_valid_installation(path: &Path) -> bool {
    layout::looks_like_installation(path, Host::detect().executable_name())
}

/// Every installed release under `root`, newest first.
pub fn list(root: &Path) -> Result<Vec<InstalledRelease>> {
    if !root.exists() {
        return Ok(vec![]);
    }

    let mut releases = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(release) = InstalledRelease::from_path(entry.path()) {
            releases.push(release);
        }
    }

    releases.sort_by(|a, b| {
        b.version
            .triple()
            .cmp(&a.version.triple())
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(releases)
}

/// The single installed release matching `request`.
///
/// A request that matches several releases (`21` with both 21.0.1 and
/// 21.0.2 installed) is an error listing them.
pub fn find(root: &Path, request: &VersionSpec) -> Result<InstalledRelease> {
    let mut matching: Vec<InstalledRelease> = list(root)?
        .into_iter()
        .filter(|release| matcher::matches(request, &release.version))
        .collect();

    match matching.len() {
        0 => Err(JdkupError::no_match(
            &request.to_string(),
            format!(" among installed releases in {}", root.display()),
        )),
        1 => Ok(matching.remove(0)),
        _ => Err(JdkupError::AmbiguousInstall {
            request: request.to_string(),
            candidates: matching.into_iter().map(|r| r.name).collect(),
        }),
    }
}

/// Delete the installed release matching `request` and return what was removed.
pub fn remove(root: &Path, request: &VersionSpec) -> Result<InstalledRelease> {
    let release = find(root, request)?;
    tracing::info!("Removing {}", release.path.display());
    fs::remove_dir_all(&release.path)?;
    Ok(release)
}
