//! Running aggregate totals and per-source hit evidence.
//!
//! The store owns one [`AggregateRecord`] per configured pattern
//! definition, keyed by category. Records exist from startup with a zero
//! count; counts only grow, and every nonzero report appends its source
//! evidence in discovery order.

use crate::error::{Result, StoreError};
use pastewatch_core::{PasteId, PatternDefinition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running totals for one pattern category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRecord {
    /// Category label, the record's identity
    pub category: String,
    /// Pattern source text the category was configured with
    pub pattern: String,
    /// Total hits across all scanned documents; never decreases
    pub count: u64,
    /// `(paste id, hits)` evidence pairs, appended in discovery order,
    /// one per document that produced a nonzero hit count
    pub sources: Vec<(String, u64)>,
}

impl AggregateRecord {
    fn seeded_from(definition: &PatternDefinition) -> Self {
        Self {
            category: definition.category.clone(),
            pattern: definition.pattern.clone(),
            count: 0,
            sources: Vec::new(),
        }
    }
}

/// Exclusive owner of all aggregate records.
///
/// Keyed by category in a `BTreeMap` so iteration (and therefore the
/// persisted snapshot) is always category-sorted.
#[derive(Debug, Clone)]
pub struct AggregateStore {
    records: BTreeMap<String, AggregateRecord>,
}

impl AggregateStore {
    /// Seed one zero-count record per definition.
    #[must_use]
    pub fn new(definitions: &[PatternDefinition]) -> Self {
        let records = definitions
            .iter()
            .map(|def| (def.category.clone(), AggregateRecord::seeded_from(def)))
            .collect();
        Self { records }
    }

    /// Merge one document's hit count for one category.
    ///
    /// A zero count is a no-op. A nonzero count adds to the category's
    /// total and appends `(source, hits)` to its evidence list.
    ///
    /// # Errors
    /// Returns `StoreError::UnknownCategory` when the category was never
    /// configured; the store and the matcher are built from the same
    /// definitions, so this indicates a bug rather than bad input.
    pub fn record(&mut self, category: &str, source: &PasteId, hits: u64) -> Result<()> {
        if hits == 0 {
            return Ok(());
        }

        let record = self
            .records
            .get_mut(category)
            .ok_or_else(|| StoreError::UnknownCategory {
                category: category.to_string(),
            })?;

        record.count += hits;
        record.sources.push((source.to_string(), hits));
        Ok(())
    }

    /// All records in category-sorted order.
    pub fn records(&self) -> impl Iterator<Item = &AggregateRecord> {
        self.records.values()
    }

    /// Look up one category's record.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&AggregateRecord> {
        self.records.get(category)
    }

    /// Sum of all category counts.
    #[must_use]
    pub fn total_hits(&self) -> u64 {
        self.records.values().map(|r| r.count).sum()
    }

    /// Number of configured categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether any categories are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
