//! Version parsing for JDK release strings and user requests.
//!
//! Vendors encode the same release in several incompatible ways:
//!
//! ```text
//! 17.0.5+8        modern OpenJDK version with build metadata
//! 8u352-b08       vendor "update" form
//! 1.8.0_352-b09   legacy dotted form with an underscore update marker
//! [17, 0, 5, 8]   integer arrays (handled by the catalog adapters)
//! ```
//!
//! Everything collapses into a [`VersionSpec`]: a `major` number plus optional
//! `minor` and `patch`. A missing component is `None`, which is distinct from
//! an explicit `0`:
//!
//! - [`VersionSpec::parse_request`] keeps `None` so `"17"` can match any 17.x.y.
//! - [`VersionSpec::parse_release`] promotes `None` to `0` because a catalog
//!   entry always describes one concrete release.

use crate::error::{JdkupError, Result};
use std::fmt;
use std::str::FromStr;

/// A parsed, possibly partial, version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionSpec {
    pub major: u32,
    pub minor: Option<u32>,
    pub patch: Option<u32>,
}

impl VersionSpec {
    pub fn new(major: u32, minor: Option<u32>, patch: Option<u32>) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// A fully specified version.
    pub fn exact(major: u32, minor: u32, patch: u32) -> Self {
        Self::new(major, Some(minor), Some(patch))
    }

    /// Parse a version the user asked for. Missing components stay unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use jdkup::version::VersionSpec;
    ///
    /// let spec = VersionSpec::parse_request("17").unwrap();
    /// assert_eq!(spec.major, 17);
    /// assert_eq!(spec.minor, None);
    /// assert_eq!(spec.patch, None);
    /// ```
    pub fn parse_request(input: &str) -> Result<Self> {
        parse_components(input)
    }

    /// Parse a version published by a catalog. Missing components become `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jdkup::version::VersionSpec;
    ///
    /// let spec = VersionSpec::parse_release("1.8.0_352-b09").unwrap();
    /// assert_eq!(spec, VersionSpec::exact(8, 0, 352));
    /// ```
    pub fn parse_release(input: &str) -> Result<Self> {
        parse_components(input).map(|spec| spec.promoted())
    }

    /// Build a release version from an integer array such as `[17, 0, 5, 8]`.
    /// Components past the third are build numbers and are ignored.
    pub fn from_release_parts(parts: &[u32]) -> Result<Self> {
        let major = *parts
            .first()
            .ok_or_else(|| JdkupError::parse("[]", "empty version array"))?;
        Ok(Self::exact(
            major,
            parts.get(1).copied().unwrap_or(0),
            parts.get(2).copied().unwrap_or(0),
        ))
    }

    /// Replace unspecified components with `0`.
    pub fn promoted(self) -> Self {
        Self::exact(
            self.major,
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        )
    }

    /// The numeric triple with unspecified components treated as `0`.
    pub fn triple(&self) -> (u32, u32, u32) {
        (
            self.major,
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        )
    }

    pub fn is_exact(&self) -> bool {
        self.minor.is_some() && self.patch.is_some()
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{}", minor)?;
            if let Some(patch) = self.patch {
                write!(f, ".{}", patch)?;
            }
        } else if let Some(patch) = self.patch {
            write!(f, ".0.{}", patch)?;
        }
        Ok(())
    }
}

impl FromStr for VersionSpec {
    type Err = JdkupError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_request(s)
    }
}

fn parse_components(input: &str) -> Result<VersionSpec> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(JdkupError::parse(input, "empty version"));
    }

    if let Some(spec) = parse_update_form(trimmed) {
        return Ok(spec);
    }
    if let Some(spec) = parse_legacy_dotted(trimmed) {
        return Ok(spec);
    }

    let mut parts = strip_build_metadata(trimmed).split('.');
    let major = parts
        .next()
        .and_then(parse_number)
        .ok_or_else(|| JdkupError::parse(input, "major version is not a number"))?;
    let minor = parts.next().and_then(parse_number);
    let patch = parts.next().and_then(parse_number);

    Ok(VersionSpec::new(major, minor, patch))
}

/// `8u352` and `8u352-b08` style versions.
fn parse_update_form(input: &str) -> Option<VersionSpec> {
    let (major, update) = input.split_once(['u', 'U'])?;
    let major = parse_number(major)?;
    let update = parse_number(strip_build_metadata(update))?;
    Some(VersionSpec::exact(major, 0, update))
}

/// `1.8.0_352-b09` style versions, plus bare `1.8` / `1.8.0` requests.
fn parse_legacy_dotted(input: &str) -> Option<VersionSpec> {
    let (dotted, update) = match input.split_once('_') {
        Some((dotted, update)) => (dotted, Some(update)),
        None => (strip_build_metadata(input), None),
    };

    let mut parts = dotted.split('.');
    if parts.next()? != "1" {
        return None;
    }
    let major = parts.next().and_then(parse_number)?;

    match update {
        Some(update) => Some(VersionSpec::new(
            major,
            Some(0),
            parse_number(strip_build_metadata(update)),
        )),
        // Without an update marker only the pre-9 numbering scheme is legacy
        None if (2..=8).contains(&major) => {
            let minor = parts.next().and_then(parse_number);
            Some(VersionSpec::new(major, minor.map(|_| 0), None))
        }
        None => None,
    }
}

fn strip_build_metadata(input: &str) -> &str {
    match input.find(['+', '-']) {
        Some(pos) => &input[..pos],
        None => input,
    }
}

fn parse_number(part: &str) -> Option<u32> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
