//! Library interface for jdkup
//!
//! Resolves informal JDK version requests ("17", "17.0.5", "8u352") against
//! several vendor catalogs and installs the chosen release into a predictable
//! `<root>/<version>/bin/java` layout.

pub mod catalog;
pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod installed;
pub mod installer;
pub mod layout;
pub mod matcher;
pub mod platform;
pub mod ranking;
pub mod version;

// Re-export commonly used types
pub use catalog::{Provider, ReleaseEntry};
pub use error::{JdkupError, Result};
pub use extract::normalize_path;
pub use installer::Installer;
pub use version::VersionSpec;
