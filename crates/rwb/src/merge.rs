//! Minimal-diff header reconciliation.
//!
//! [`merge_headers`] brings a live header set in line with a staged copy without
//! rewriting it wholesale. Names the staged copy dropped are deleted. Values the
//! live set already had stay where they were, and only staged values it lacks are
//! appended.

use http::{HeaderMap, HeaderName};
use tracing::trace;

/// What a merge changed on the target.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    /// Names removed because the staged set no longer has them.
    pub removed_keys: usize,
    pub appended_values: usize,
}

impl MergeStats {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Reconciles `target` against `staged`.
///
/// - a name present in `target` but not in `staged` is removed entirely
/// - a staged value missing from `target` is appended, once
///
/// Values already in `target` under a staged name are never touched, even those
/// the staged set lacks.
pub fn merge_headers(target: &mut HeaderMap, staged: &HeaderMap) -> MergeStats {
    let mut stats = MergeStats::default();

    let deleted: Vec<HeaderName> = target.keys().filter(|name| !staged.contains_key(*name)).cloned().collect();
    for name in deleted {
        trace!(header = %name, "remove header");
        target.remove(&name);
        stats.removed_keys += 1;
    }

    for name in staged.keys() {
        for value in staged.get_all(name) {
            if target.get_all(name).iter().any(|existing| existing == value) {
                continue;
            }
            trace!(header = %name, "append header value");
            target.append(name.clone(), value.clone());
            stats.appended_values += 1;
        }
    }

    stats
}
