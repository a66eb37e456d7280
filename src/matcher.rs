//! Matching catalog entries against a (possibly partial) version request.
//!
//! Matching happens in two passes:
//!
//! 1. **Version**: [`match_candidates`] keeps entries whose version agrees with
//!    every component the request specifies. `17` accepts any 17.x.y, `17.0`
//!    any 17.0.y and `17.0.5` only 17.0.5.
//! 2. **Platform**: [`filter_for_host`] drops entries the extractor cannot
//!    unpack, then prefers entries built for the host and otherwise falls back
//!    to the remaining builds for other platforms, in catalog order.
//!
//! Picking a single winner among the survivors is the ranking engine's job.

use crate::catalog::ReleaseEntry;
use crate::error::{JdkupError, Result};
use crate::platform::Host;
use crate::version::VersionSpec;

/// Whether a concrete release satisfies the request.
pub fn matches(spec: &VersionSpec, candidate: &VersionSpec) -> bool {
    let (major, minor, patch) = candidate.triple();
    match (spec.minor, spec.patch) {
        (None, None) => major == spec.major,
        (Some(want_minor), None) => major == spec.major && minor == want_minor,
        // The parser never produces a patch without a minor; read it as x.0.patch
        (want_minor, Some(want_patch)) => {
            major == spec.major && minor == want_minor.unwrap_or(0) && patch == want_patch
        }
    }
}

/// Keep the candidates whose version satisfies `spec`, in catalog order.
///
/// Returns a no-match error when nothing qualifies.
pub fn match_candidates(
    spec: &VersionSpec,
    candidates: &[ReleaseEntry],
) -> Result<Vec<ReleaseEntry>> {
    let matched: Vec<ReleaseEntry> = candidates
        .iter()
        .filter(|entry| matches(spec, &entry.spec))
        .cloned()
        .collect();

    if matched.is_empty() {
        return Err(JdkupError::no_match(&spec.to_string(), ""));
    }

    tracing::debug!("{} of {} entries match {}", matched.len(), candidates.len(), spec);
    Ok(matched)
}

/// Whether `entry` has a URL and an archive format the extractor can unpack.
pub fn is_installable(entry: &ReleaseEntry) -> bool {
    entry.is_downloadable() && entry.archive_format().is_some()
}

/// Narrow the matches for `request` to what can be installed on `host`.
///
/// Only installable entries are considered. Entries built for the host win.
/// Without any, every installable entry is returned, in catalog order.
pub fn filter_for_host(
    request: &VersionSpec,
    matches: &[ReleaseEntry],
    host: &Host,
) -> Result<Vec<ReleaseEntry>> {
    let installable: Vec<&ReleaseEntry> = matches.iter().filter(|e| is_installable(e)).collect();
    if installable.is_empty() {
        return Err(JdkupError::no_match(
            &request.to_string(),
            format!(" with a downloadable archive for {}", host),
        ));
    }

    let native: Vec<ReleaseEntry> = installable
        .iter()
        .filter(|e| host.matches(&e.os, &e.arch))
        .map(|e| (*e).clone())
        .collect();
    if !native.is_empty() {
        return Ok(native);
    }

    tracing::warn!(
        "No release built for {}; falling back to {} other platform build(s)",
        host,
        installable.len()
    );
    Ok(installable.into_iter().cloned().collect())
}
