//! Platform detection and vocabulary normalization.
//!
//! Every vendor names platforms differently: Adoptium says `mac`/`x64`, Azul
//! says `macosx_aarch64`, BellSoft says `macos`/`arm` with a separate bitness.
//! Catalog adapters run vendor strings through [`normalize_os`] and
//! [`normalize_arch`] so that release entries and the [`Host`] share a single
//! canonical vocabulary:
//!
//! - **OS**: `linux`, `alpine-linux`, `macos`, `windows`, `solaris`, `aix`
//! - **Arch**: `x64`, `x86`, `aarch64`, `arm`, `ppc64le`, `ppc64`, `s390x`,
//!   `riscv64`, `sparcv9`
//!
//! # Examples
//!
//! ```
//! use jdkup::platform::{self, Host};
//!
//! let host = Host::new("darwin", "arm64");
//! assert_eq!(host.os, "macos");
//! assert_eq!(host.arch, "aarch64");
//! assert_eq!(platform::normalize_arch("amd64"), "x64");
//! ```

use std::fmt;

/// Operating system and architecture of the machine running the installer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub os: String,
    pub arch: String,
}

impl Host {
    /// Build a host from vendor-style names, normalizing both.
    pub fn new(os: &str, arch: &str) -> Self {
        Self {
            os: normalize_os(os),
            arch: normalize_arch(arch),
        }
    }

    /// Detect the current system.
    pub fn detect() -> Self {
        #[cfg(all(target_os = "linux", target_env = "musl"))]
        let os = "alpine-linux";
        #[cfg(not(all(target_os = "linux", target_env = "musl")))]
        let os = std::env::consts::OS;

        Self::new(os, std::env::consts::ARCH)
    }

    /// Name of the `java` launcher inside `bin/` on this host.
    pub fn executable_name(&self) -> &'static str {
        executable_name_for(&self.os)
    }

    pub fn matches(&self, os: &str, arch: &str) -> bool {
        self.os == os && self.arch == arch
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// Map a vendor OS name onto the canonical vocabulary.
pub fn normalize_os(raw: &str) -> String {
    let lower = raw.trim().to_ascii_lowercase();
    let canonical = match lower.as_str() {
        "linux" | "linux-glibc" => Some("linux"),
        "alpine" | "alpine-linux" | "alpine_linux" | "linux-musl" | "linux_musl" | "musl" => {
            Some("alpine-linux")
        }
        "mac" | "macos" | "macosx" | "darwin" | "osx" => Some("macos"),
        "win" | "windows" => Some("windows"),
        "solaris" | "sunos" => Some("solaris"),
        "aix" => Some("aix"),
        _ => None,
    };
    canonical.map(str::to_string).unwrap_or(lower)
}

/// Map a vendor architecture name onto the canonical vocabulary.
pub fn normalize_arch(raw: &str) -> String {
    let lower = raw.trim().to_ascii_lowercase();
    let canonical = match lower.as_str() {
        "x64" | "x86_64" | "x86-64" | "amd64" => Some("x64"),
        "x86" | "x32" | "i386" | "i586" | "i686" | "x86_32" => Some("x86"),
        "aarch64" | "arm64" => Some("aarch64"),
        "arm" | "arm32" | "aarch32" | "armv7" | "armhf" => Some("arm"),
        "ppc64le" | "ppc64el" => Some("ppc64le"),
        "ppc64" => Some("ppc64"),
        "s390x" => Some("s390x"),
        "riscv64" => Some("riscv64"),
        "sparcv9" | "sparc" => Some("sparcv9"),
        _ => None,
    };
    canonical.map(str::to_string).unwrap_or(lower)
}

/// Name of the `java` launcher for a canonical OS name.
pub fn executable_name_for(os: &str) -> &'static str {
    if os == "windows" { "java.exe" } else { "java" }
}

/// Archive container formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// Detect the format from a file name or URL by suffix.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        // Ignore query strings on URLs
        let lower = lower.split(['?', '#']).next().unwrap_or_default();
        if lower.ends_with(".zip") {
            Some(Self::Zip)
        } else if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            Some(Self::TarGz)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
        }
    }
}
