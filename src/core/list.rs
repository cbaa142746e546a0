//! Owned, ordered collection of video entries

use crate::core::entry::{VideoEntry, VideoStatus};

/// Field-wise patch applied to a single entry.
///
/// Only `Some` fields are written. Moving an entry to `Ready` clears any
/// previous error message.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub status: Option<VideoStatus>,
    pub error: Option<String>,
}

/// Ordered sequence of video entries, unique by ID.
///
/// Insertion order is preserved. Uniqueness is enforced inside
/// [`VideoList::insert_many`], not by callers.
#[derive(Debug, Default)]
pub struct VideoList {
    entries: Vec<VideoEntry>,
}

impl VideoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append entries, dropping any whose ID is already present.
    ///
    /// Duplicates within the batch itself are dropped too. Returns the IDs
    /// actually inserted, in insertion order.
    pub fn insert_many(&mut self, new_entries: Vec<VideoEntry>) -> Vec<String> {
        let mut inserted = Vec::new();

        for entry in new_entries {
            if self.contains(&entry.id) {
                continue;
            }
            inserted.push(entry.id.clone());
            self.entries.push(entry);
        }

        inserted
    }

    /// Apply a patch to the entry with the given ID.
    ///
    /// Returns false if no such entry exists.
    pub fn update_one(&mut self, id: &str, patch: EntryPatch) -> bool {
        let entry = match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => entry,
            None => return false,
        };

        if let Some(status) = patch.status {
            entry.status = status;
            if status == VideoStatus::Ready {
                entry.error = None;
            }
        }
        if let Some(title) = patch.title {
            entry.title = title;
        }
        if let Some(error) = patch.error {
            entry.error = Some(error);
        }

        true
    }

    /// Remove the entry with the given ID; no-op if absent
    pub fn remove_one(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() < before
    }

    /// Empty the collection unconditionally
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&VideoEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[VideoEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries currently in the given status, in collection order
    pub fn with_status(&self, status: VideoStatus) -> impl Iterator<Item = &VideoEntry> {
        self.entries.iter().filter(move |e| e.status == status)
    }
}
