//! Cross-cycle deduplication of paste identifiers.
//!
//! The same paste stays on the site's "latest" list for several polling
//! cycles, so discovery re-reports identifiers constantly. This cache is
//! the single gate in front of fetching and matching: an identifier is
//! admitted exactly once for the lifetime of the process. Nothing is
//! persisted; a restart reprocesses the current frontier.

use pastewatch_core::PasteId;
use std::collections::HashSet;

/// In-memory set of every identifier ever offered.
#[derive(Debug, Default)]
pub struct SeenCache {
    seen: HashSet<PasteId>,
}

impl SeenCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer an identifier: a single check-and-insert.
    ///
    /// Returns `true` exactly once per distinct identifier, `false` on
    /// every subsequent offer.
    pub fn offer(&mut self, id: &PasteId) -> bool {
        self.seen.insert(id.clone())
    }

    /// Whether an identifier has been offered before.
    #[must_use]
    pub fn contains(&self, id: &PasteId) -> bool {
        self.seen.contains(id)
    }

    /// Number of distinct identifiers offered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been offered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
