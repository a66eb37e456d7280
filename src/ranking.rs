//! Deterministic release ranking.
//!
//! Two policies, both pure functions of the version triple and the LTS flag:
//!
//! - [`recommend_per_major`] picks one release per major line, ordering each
//!   line by `(is_lts, patch, minor)` descending. Patch deliberately outranks
//!   minor so the most-patched build of a line is recommended.
//! - [`best_match`] picks the highest `(major, minor, patch)` among the
//!   results of a single request, preferring LTS on ties.
//!
//! Remaining ties always keep the entry that came first in catalog order.

use crate::catalog::ReleaseEntry;
use std::collections::BTreeMap;

/// One recommended entry per major version, keyed by major.
pub fn recommend_per_major(entries: &[ReleaseEntry]) -> BTreeMap<u32, ReleaseEntry> {
    let mut groups: BTreeMap<u32, Vec<&ReleaseEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.spec.major).or_default().push(entry);
    }

    groups
        .into_iter()
        .filter_map(|(major, mut group)| {
            // Stable sort keeps catalog order among equal keys
            group.sort_by(|a, b| recommendation_key(b).cmp(&recommendation_key(a)));
            group.first().map(|best| (major, (*best).clone()))
        })
        .collect()
}

fn recommendation_key(entry: &ReleaseEntry) -> (bool, u32, u32) {
    let (_, minor, patch) = entry.spec.triple();
    (entry.is_lts, patch, minor)
}

/// The best entry among the matches of a single request.
pub fn best_match(matches: &[ReleaseEntry]) -> Option<&ReleaseEntry> {
    matches.iter().reduce(|best, candidate| {
        if selection_key(candidate) > selection_key(best) {
            candidate
        } else {
            best
        }
    })
}

fn selection_key(entry: &ReleaseEntry) -> ((u32, u32, u32), bool) {
    (entry.spec.triple(), entry.is_lts)
}
