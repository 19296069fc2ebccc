//! Path normalization, pruning, and ordering.
//!
//! The save-path pruner collapses a set of base storage paths so that nested
//! paths fold into their shallowest ancestor: the result is an antichain
//! under the path-prefix partial order. Descendant testing is segment-wise
//! via `Path::starts_with`, so `/data/ab` is never misread as a descendant
//! of `/data/a` the way a raw string-prefix comparison would.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Normalize a raw path string from the client API.
///
/// Trims surrounding whitespace, collapses doubled separators, and strips any
/// trailing separator (the filesystem root stays `/`). Returns `None` for
/// empty input so callers can skip absent paths instead of erroring.
pub fn normalize(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut prev_sep = false;
    for ch in trimmed.chars() {
        if ch == '/' {
            if !prev_sep {
                out.push(ch);
            }
            prev_sep = true;
        } else {
            out.push(ch);
            prev_sep = false;
        }
    }

    while out.len() > 1 && out.ends_with('/') {
        out.pop();
    }

    Some(PathBuf::from(out))
}

/// Join a member's relative name onto a base storage path.
///
/// Leading separators on the member name are stripped first so the result
/// never escapes the base, and doubled separators collapse in normalization.
pub fn join_member(base: &Path, member: &str) -> Option<PathBuf> {
    let member = member.trim_start_matches('/');
    if member.is_empty() {
        return None;
    }
    normalize(&format!("{}/{}", base.display(), member))
}

/// Whether `candidate` is a strict path-prefix descendant of `ancestor`.
///
/// Segment-wise: `/data/ab` is not a descendant of `/data/a`.
pub fn is_descendant(candidate: &Path, ancestor: &Path) -> bool {
    candidate != ancestor && candidate.starts_with(ancestor)
}

/// Collapse a save-path set to its topmost roots.
///
/// Scans in descending lexical order and keeps a candidate unless it equals
/// or descends from an already-kept path. The returned set is sorted
/// ascending for deterministic output.
pub fn prune(paths: &HashSet<PathBuf>) -> Vec<PathBuf> {
    let mut ordered: Vec<&PathBuf> = paths.iter().collect();
    ordered.sort_unstable_by(|a, b| b.cmp(a));

    let mut kept: Vec<PathBuf> = Vec::new();
    for candidate in ordered {
        let redundant = kept
            .iter()
            .any(|k| candidate == k || is_descendant(candidate, k));
        if !redundant {
            // A shorter path arriving later may supersede kept descendants.
            kept.retain(|k| !is_descendant(k, candidate));
            kept.push(candidate.clone());
        }
    }

    kept.sort_unstable();
    kept
}

/// Order directories deepest-first so children are removed before parents.
pub fn deepest_first(dirs: &mut [PathBuf]) {
    dirs.sort_unstable_by(|a, b| {
        let depth_a = a.components().count();
        let depth_b = b.components().count();
        depth_b.cmp(&depth_a).then_with(|| b.cmp(a))
    });
}
