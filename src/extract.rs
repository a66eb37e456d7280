//! Release archive extraction.
//!
//! Unpacks a downloaded JDK archive into a destination directory. Two
//! container formats are supported, chosen by file name suffix:
//!
//! - `.zip` (Windows and some macOS builds)
//! - `.tar.gz` / `.tgz` (everything else)
//!
//! # Path safety
//!
//! Every entry name is joined onto the destination and lexically normalized
//! with [`normalize_path`]. Entries that would land outside the destination
//! (`../../evil.txt`, `/etc/passwd`) are skipped and logged; the rest of the
//! archive is still extracted. The same check applies to both formats.
//!
//! # Failure behavior
//!
//! An unreadable archive or a write failure aborts the extraction. Files that
//! were already written are left in place; callers that need a clean slate
//! extract into a staging directory (see [`crate::installer`]).
//!
//! # Examples
//!
//! ```no_run
//! use jdkup::extract;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let report = extract::extract(
//!         Path::new("/tmp/OpenJDK21U-jdk_x64_linux_hotspot_21.0.2_13.tar.gz"),
//!         Path::new("/tmp/jdk-21"),
//!     )?;
//!     println!("{} files written, {} entries rejected", report.written, report.skipped);
//!     Ok(())
//! }
//! ```

use crate::error::ExtractionError;
use crate::platform::ArchiveFormat;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use tar::{Archive, EntryType};

/// What an extraction did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractReport {
    /// Regular files written
    pub written: usize,
    /// Directories created
    pub directories: usize,
    /// Entries rejected by the path check
    pub skipped: usize,
    /// Links, devices and other entry types left out
    pub ignored: usize,
}

/// Extract `archive_path` into `dest_dir`, dispatching on the file suffix.
pub fn extract(archive_path: &Path, dest_dir: &Path) -> Result<ExtractReport, ExtractionError> {
    let name = archive_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let format = ArchiveFormat::from_name(&name)
        .ok_or_else(|| ExtractionError::UnsupportedFormat(archive_path.to_path_buf()))?;

    fs::create_dir_all(dest_dir).map_err(|source| ExtractionError::Write {
        path: dest_dir.to_path_buf(),
        source,
    })?;

    let report = match format {
        ArchiveFormat::Zip => extract_zip(archive_path, dest_dir)?,
        ArchiveFormat::TarGz => extract_tar_gz(archive_path, dest_dir)?,
    };

    tracing::debug!(
        "Extracted {} into {}: {:?}",
        archive_path.display(),
        dest_dir.display(),
        report
    );
    Ok(report)
}

fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<ExtractReport, ExtractionError> {
    let unreadable = |source: io::Error| ExtractionError::Unreadable {
        path: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(unreadable)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| unreadable(io::Error::other(e)))?;
    let mut report = ExtractReport::default();

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| unreadable(io::Error::other(e)))?;
        let name = entry.name().to_string();

        let Some(target) = safe_join(dest_dir, Path::new(&name)) else {
            tracing::warn!("Skipping archive entry outside destination: {}", name);
            report.skipped += 1;
            continue;
        };

        if entry.is_dir() {
            create_dir(&target)?;
            report.directories += 1;
            continue;
        }

        let mode = entry.unix_mode();
        if mode.is_some_and(|m| m & 0o170000 == 0o120000) {
            tracing::debug!("Ignoring symlink entry: {}", name);
            report.ignored += 1;
            continue;
        }

        if let Some(parent) = target.parent() {
            create_dir(parent)?;
        }
        let mut output = File::create(&target).map_err(|source| write_error(&target, source))?;
        io::copy(&mut entry, &mut output).map_err(|source| write_error(&target, source))?;

        if let Some(mode) = mode {
            set_mode(&target, mode)?;
        }
        report.written += 1;
    }

    Ok(report)
}

fn extract_tar_gz(archive_path: &Path, dest_dir: &Path) -> Result<ExtractReport, ExtractionError> {
    let unreadable = |source: io::Error| ExtractionError::Unreadable {
        path: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(unreadable)?;
    let mut archive = Archive::new(GzDecoder::new(file));
    let mut report = ExtractReport::default();

    for entry in archive.entries().map_err(unreadable)? {
        let mut entry = entry.map_err(unreadable)?;
        let name = entry.path().map_err(unreadable)?.into_owned();
        let entry_type = entry.header().entry_type();

        let Some(target) = safe_join(dest_dir, &name) else {
            tracing::warn!(
                "Skipping archive entry outside destination: {}",
                name.display()
            );
            report.skipped += 1;
            continue;
        };

        match entry_type {
            EntryType::Directory => {
                create_dir(&target)?;
                report.directories += 1;
            }
            EntryType::Regular | EntryType::Continuous => {
                if let Some(parent) = target.parent() {
                    create_dir(parent)?;
                }
                let mut output =
                    File::create(&target).map_err(|source| write_error(&target, source))?;
                io::copy(&mut entry, &mut output).map_err(|source| write_error(&target, source))?;

                if let Ok(mode) = entry.header().mode() {
                    set_mode(&target, mode)?;
                }
                report.written += 1;
            }
            other => {
                tracing::debug!("Ignoring {:?} entry: {}", other, name.display());
                report.ignored += 1;
            }
        }
    }

    Ok(report)
}

/// Join an archive entry name onto `dest_dir`, refusing anything that
/// escapes it after normalization.
pub fn safe_join(dest_dir: &Path, entry_name: &Path) -> Option<PathBuf> {
    let root = normalize_path(dest_dir);
    let joined = normalize_path(&root.join(entry_name));
    let rest = joined.strip_prefix(&root).ok()?;
    // Anything but plain names left after the root means the entry escaped it
    if rest.components().all(|c| matches!(c, Component::Normal(_))) {
        Some(joined)
    } else {
        None
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above a root or drive prefix.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            Component::CurDir => {}
            c => components.push(c),
        }
    }
    components.iter().collect()
}

fn create_dir(path: &Path) -> Result<(), ExtractionError> {
    fs::create_dir_all(path).map_err(|source| write_error(path, source))
}

fn write_error(path: &Path, source: io::Error) -> ExtractionError {
    ExtractionError::Write {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), ExtractionError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))
        .map_err(|source| write_error(path, source))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), ExtractionError> {
    Ok(())
}
