//! Inventory fetching: the tracked-item snapshot and its managed path sets.
//!
//! For each torrent the client reports, the save path feeds the save-path
//! set and the member file list feeds the managed-file set:
//!
//! - zero or one member: single-file item. The explicit `content_path` is
//!   preferred as the complete managed path (it already includes the final
//!   filename); when absent, the path is synthesized from the save path and
//!   the member name.
//! - more than one member: one synthesized path per member, with any leading
//!   separator stripped from the relative name first.
//!
//! Empty or absent paths are skipped, not errors. A failed per-item file
//! fetch is warned and skipped so one flaky torrent cannot abort the run.
//!
//! Beyond the managed files themselves, every strict-ancestor directory of a
//! managed file (up to its save-path root, exclusive) is recorded as a
//! managed directory. The directory pass of the set-difference filter stays
//! a pure membership test, yet a directory sheltering managed data is never
//! proposed for deletion.

use crate::client::Session;
use crate::error::Result;
use crate::pathset;
use std::collections::HashSet;
use std::path::PathBuf;

/// One tracked item, as reported by a client instance.
///
/// Immutable snapshot for the run.
#[derive(Debug, Clone)]
pub struct TrackedItem {
    pub hash: String,
    pub name: String,
    /// Normalized base storage path, if the item reported one.
    pub save_path: Option<PathBuf>,
    /// Normalized explicit content path, if the item reported one.
    pub content_path: Option<PathBuf>,
    /// Member file names relative to the save path.
    pub members: Vec<String>,
}

/// The reconciliation inventory accumulated across instances.
#[derive(Debug, Default)]
pub struct Inventory {
    /// Unique normalized base storage paths of all tracked items.
    pub save_paths: HashSet<PathBuf>,
    /// Absolute file paths some tracked item claims ownership of.
    pub managed_files: HashSet<PathBuf>,
    /// Strict-ancestor directories of managed files, below their save roots.
    pub managed_dirs: HashSet<PathBuf>,
    /// Tracked items successfully recorded.
    pub item_count: usize,
    /// Items skipped because their file listing could not be fetched.
    pub skipped_items: usize,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tracked item into the sets.
    pub fn add_item(&mut self, item: &TrackedItem) {
        if let Some(save_path) = &item.save_path {
            self.save_paths.insert(save_path.clone());
        }
        self.item_count += 1;

        if item.members.len() > 1 {
            let Some(base) = &item.save_path else { return };
            for member in &item.members {
                if let Some(path) = pathset::join_member(base, member) {
                    self.record_managed_file(path, item);
                }
            }
        } else {
            // Single-file item: the content path is the complete managed
            // path; synthesize from the member name only when it is absent.
            let managed = item.content_path.clone().or_else(|| {
                let base = item.save_path.as_ref()?;
                let member = item.members.first()?;
                pathset::join_member(base, member)
            });
            if let Some(path) = managed {
                self.record_managed_file(path, item);
            }
        }
    }

    fn record_managed_file(&mut self, path: PathBuf, item: &TrackedItem) {
        if let Some(root) = &item.save_path {
            let mut parent = path.parent();
            while let Some(dir) = parent {
                if dir == root || !pathset::is_descendant(dir, root) {
                    break;
                }
                self.managed_dirs.insert(dir.to_path_buf());
                parent = dir.parent();
            }
        }
        self.managed_files.insert(path);
    }
}

/// Fetch the inventory from one authenticated instance, accumulating into
/// an existing inventory so multiple instances reconcile as one snapshot.
///
/// # Errors
///
/// `SweepError::Fetch` if the item list itself cannot be retrieved; callers
/// warn and continue with the remaining instances. Per-item file-list
/// failures are warned here and the item skipped.
pub fn fetch_from(session: &Session, inventory: &mut Inventory) -> Result<()> {
    let torrents = session.torrents()?;

    for torrent in torrents {
        let members = match session.torrent_files(&torrent.hash) {
            Ok(files) => files.into_iter().map(|f| f.name).collect(),
            Err(e) => {
                eprintln!(
                    "warning: skipping torrent '{}' ({}): {}",
                    torrent.name, torrent.hash, e
                );
                inventory.skipped_items += 1;
                // The save path is still known-good; keep it so pruning and
                // root exclusion see every storage location.
                if let Some(save_path) = pathset::normalize(&torrent.save_path) {
                    inventory.save_paths.insert(save_path);
                }
                continue;
            }
        };

        let item = TrackedItem {
            hash: torrent.hash,
            name: torrent.name,
            save_path: pathset::normalize(&torrent.save_path),
            content_path: pathset::normalize(&torrent.content_path),
            members,
        };
        inventory.add_item(&item);
    }

    Ok(())
}
