//! Installation layout normalization.
//!
//! Most vendors wrap the JDK in a single versioned folder, some do not, and
//! macOS builds nest it inside a bundle:
//!
//! ```text
//! dest/jdk-21.0.2+13/bin/java                    wrapped (Adoptium, Zulu)
//! dest/bin/java                                  flat
//! dest/jdk-21.0.2+13/Contents/Home/bin/java      macOS bundle
//! ```
//!
//! [`normalize`] turns all of these into the flat shape so that an installed
//! release always has `bin/` and `lib/` directly under its root.

use crate::error::LayoutError;
use std::fs;
use std::path::{Path, PathBuf};

/// Whether `dir` has `bin/<executable>` and `lib/`.
pub fn looks_like_installation(dir: &Path, executable: &str) -> bool {
    let bin = dir.join("bin");
    bin.is_dir() && dir.join("lib").is_dir() && bin.join(executable).is_file()
}

/// The installation root inside a top-level child, if it holds one.
fn nested_root(child: &Path, executable: &str) -> Option<PathBuf> {
    if looks_like_installation(child, executable) {
        return Some(child.to_path_buf());
    }
    let bundle_home = child.join("Contents").join("Home");
    if looks_like_installation(&bundle_home, executable) {
        return Some(bundle_home);
    }
    None
}

/// Make `dest_dir` itself the installation root and return it.
///
/// A directory that already has the expected shape is left alone. Otherwise
/// its immediate children are searched; exactly one of them may hold the
/// installation, and its contents are moved up into `dest_dir`.
pub fn normalize(dest_dir: &Path, executable: &str) -> Result<PathBuf, LayoutError> {
    // Checked first: JDK 8 ships a nested `jre/` with its own bin/ and lib/
    if looks_like_installation(dest_dir, executable) {
        return Ok(dest_dir.to_path_buf());
    }

    let mut candidates = Vec::new();
    for entry in read_dir(dest_dir)? {
        let entry = entry.map_err(|source| io_error(dest_dir, source))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(root) = nested_root(&path, executable) {
            candidates.push((path, root));
        }
    }

    match candidates.as_slice() {
        [] => Err(LayoutError::NotFound {
            dir: dest_dir.to_path_buf(),
            executable: executable.to_string(),
        }),
        [(wrapper, root)] => {
            flatten(dest_dir, wrapper, root)?;
            Ok(dest_dir.to_path_buf())
        }
        many => Err(LayoutError::Ambiguous {
            dir: dest_dir.to_path_buf(),
            candidates: many
                .iter()
                .map(|(wrapper, _)| display_name(wrapper))
                .collect(),
        }),
    }
}

/// Move the contents of `root` into `dest_dir` and delete `wrapper`.
///
/// Items go through a sibling staging directory first, so a child that
/// shares the wrapper's name cannot collide with it.
fn flatten(dest_dir: &Path, wrapper: &Path, root: &Path) -> Result<(), LayoutError> {
    tracing::debug!(
        "Flattening {} into {}",
        root.display(),
        dest_dir.display()
    );

    let staging = staging_dir(dest_dir);
    fs::create_dir(&staging).map_err(|source| io_error(&staging, source))?;

    for entry in read_dir(root)? {
        let entry = entry.map_err(|source| io_error(root, source))?;
        move_item(&entry.path(), &staging.join(entry.file_name()))?;
    }

    fs::remove_dir_all(wrapper).map_err(|source| io_error(wrapper, source))?;

    for entry in read_dir(&staging)? {
        let entry = entry.map_err(|source| io_error(&staging, source))?;
        move_item(&entry.path(), &dest_dir.join(entry.file_name()))?;
    }

    fs::remove_dir(&staging).map_err(|source| io_error(&staging, source))
}

fn staging_dir(dest_dir: &Path) -> PathBuf {
    let name = format!(
        ".{}.flatten-{}",
        display_name(dest_dir),
        std::process::id()
    );
    match dest_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => dest_dir.join(name),
    }
}

fn move_item(from: &Path, to: &Path) -> Result<(), LayoutError> {
    fs::rename(from, to).map_err(|source| LayoutError::Move {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

fn read_dir(dir: &Path) -> Result<fs::ReadDir, LayoutError> {
    fs::read_dir(dir).map_err(|source| io_error(dir, source))
}

fn io_error(path: &Path, source: std::io::Error) -> LayoutError {
    LayoutError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
