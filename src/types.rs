//! Core types shared by the fetcher, renderer and router.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Kind of a content entry as reported by the content API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Dir,
    File,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

/// One file-or-directory record from a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    /// Repository-relative path.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Size in bytes; the API reports 0 for directories.
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Key used by the date cache: `{path}:{size}`.
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.path, self.size)
    }

    pub fn icon(&self) -> &'static str {
        if self.is_dir() {
            "📁"
        } else {
            "📄"
        }
    }
}

/// Directories first, then by name ignoring case; exact bytes break ties.
fn listing_order(a: &Entry, b: &Entry) -> Ordering {
    (!a.is_dir())
        .cmp(&!b.is_dir())
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

/// A directory listing in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    entries: Vec<Entry>,
}

impl Listing {
    /// Build a listing, sorting directories before files and then by name.
    /// The sort is stable.
    pub fn new(mut entries: Vec<Entry>) -> Self {
        entries.sort_by(listing_order);
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single file object; the browser hands off to its raw-content URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleFile {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub download_url: String,
}

/// Result of the primary fetch for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Listing(Listing),
    File(SingleFile),
}
