//! Wire types for the torrent client's web API.

use serde::Deserialize;

/// One entry from the item-list endpoint (`torrents/info`).
///
/// Only the fields reconciliation needs are modeled; the endpoint returns
/// many more and serde ignores them.
#[derive(Debug, Clone, Deserialize)]
pub struct TorrentInfo {
    /// Unique identifier of the torrent.
    pub hash: String,

    /// Display name, used only in warnings.
    #[serde(default)]
    pub name: String,

    /// Base storage path. May carry a trailing separator.
    #[serde(default)]
    pub save_path: String,

    /// Full path of the content: the file itself for single-file torrents,
    /// the root folder for multi-file torrents. May be empty on older
    /// client versions.
    #[serde(default)]
    pub content_path: String,
}

/// One entry from the per-item files endpoint (`torrents/files`).
#[derive(Debug, Clone, Deserialize)]
pub struct TorrentFileEntry {
    /// Path of the member file relative to the save path.
    pub name: String,
}
