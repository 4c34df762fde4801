//! Match-or-adjacent reconciliation of candidate time steps against a baseline

use std::collections::BTreeSet;

/// Select the candidate time steps to show next to a baseline time line.
///
/// For every baseline time `t` the smallest candidate `u >= t` is kept. When
/// `u` is not an exact match, the candidate right before `u` is kept as well.
/// Baseline times with no candidate at or after them contribute nothing.
///
/// If nothing matched but both sets are non-empty, the latest candidate is
/// returned alone.
///
/// The search only ever looks forward and then one step back; a baseline
/// time after every candidate is covered by the latest-candidate fallback
/// only when no other baseline time matched.
pub fn reconcile<T: Ord + Clone>(baseline: &BTreeSet<T>, candidates: &BTreeSet<T>) -> BTreeSet<T> {
    let mut result = BTreeSet::new();

    for base in baseline {
        let Some(at_or_after) = candidates.range(base..).next() else {
            continue;
        };
        result.insert(at_or_after.clone());

        if at_or_after != base {
            if let Some(before) = candidates.range(..at_or_after).next_back() {
                result.insert(before.clone());
            }
        }
    }

    if result.is_empty() && !baseline.is_empty() {
        if let Some(latest) = candidates.last() {
            result.insert(latest.clone());
        }
    }

    result
}
