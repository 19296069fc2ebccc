//! Generic set-difference filter.
//!
//! A single parametric function over any hashable key type: membership is an
//! exact test against a prebuilt `HashSet`, no partial or fuzzy matching.

use std::collections::HashSet;
use std::hash::Hash;

/// Return the haystack entries whose key is absent from the needle set.
///
/// Input order is preserved. Consumes the haystack so stages hand immutable
/// snapshots forward instead of mutating shared state.
pub fn difference<T>(haystack: Vec<T>, needles: &HashSet<T>) -> Vec<T>
where
    T: Eq + Hash,
{
    haystack
        .into_iter()
        .filter(|item| !needles.contains(item))
        .collect()
}
