//! Pattern compilation and text matching.
//!
//! A `PatternSet` is built once at startup from the configured
//! definitions. Definitions sharing the same pattern source text share a
//! single compiled matcher; nothing is compiled after construction.

use crate::error::{PatternError, Result};
use pastewatch_core::PatternDefinition;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Match results for one pattern definition against one text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternHits {
    /// Category label of the definition that matched
    pub category: String,
    /// Number of non-overlapping whole matches
    pub count: u64,
    /// Raw matched substrings; empty when `count` is zero
    pub matches: Vec<String>,
}

/// One definition paired with its compiled matcher.
///
/// The `Arc` is shared with every other definition carrying the same
/// pattern source; matchers are never mutated after compilation.
#[derive(Debug, Clone)]
struct CompiledPattern {
    definition: PatternDefinition,
    regex: Arc<Regex>,
}

/// The full set of configured patterns in their compiled form.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
    distinct_matchers: usize,
}

impl PatternSet {
    /// Compile every definition, reusing one matcher per distinct pattern
    /// source text.
    ///
    /// Matching is case-insensitive and multi-line (`^`/`$` anchor at line
    /// boundaries), mirroring how the patterns are written.
    ///
    /// # Errors
    /// Returns `PatternError::Invalid` naming the offending category on
    /// the first syntactically invalid pattern. This is the fail-fast
    /// gate: a bad pattern never reaches match time.
    pub fn compile(definitions: &[PatternDefinition]) -> Result<Self> {
        let mut cache: HashMap<String, Arc<Regex>> = HashMap::new();
        let mut patterns = Vec::with_capacity(definitions.len());

        for def in definitions {
            let regex = match cache.get(&def.pattern) {
                Some(shared) => Arc::clone(shared),
                None => {
                    let compiled = RegexBuilder::new(&def.pattern)
                        .case_insensitive(true)
                        .multi_line(true)
                        .build()
                        .map_err(|source| PatternError::Invalid {
                            category: def.category.clone(),
                            source,
                        })?;
                    let shared = Arc::new(compiled);
                    cache.insert(def.pattern.clone(), Arc::clone(&shared));
                    shared
                }
            };

            patterns.push(CompiledPattern {
                definition: def.clone(),
                regex,
            });
        }

        debug!(
            definitions = patterns.len(),
            matchers = cache.len(),
            "compiled pattern set"
        );

        Ok(Self {
            distinct_matchers: cache.len(),
            patterns,
        })
    }

    /// Number of configured definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of distinct compiled matchers backing the set.
    ///
    /// Smaller than [`len`](Self::len) when definitions share a pattern
    /// source.
    #[must_use]
    pub fn distinct_matchers(&self) -> usize {
        self.distinct_matchers
    }

    /// The definitions this set was compiled from, in configuration order.
    pub fn definitions(&self) -> impl Iterator<Item = &PatternDefinition> {
        self.patterns.iter().map(|p| &p.definition)
    }

    /// Match `text` against every definition.
    ///
    /// Returns one entry per definition in configuration order, including
    /// zero-count entries. Pure: no state is touched.
    #[must_use]
    pub fn scan(&self, text: &str) -> Vec<PatternHits> {
        self.patterns
            .iter()
            .map(|p| {
                let matches: Vec<String> = p
                    .regex
                    .find_iter(text)
                    .map(|m| m.as_str().to_string())
                    .collect();
                PatternHits {
                    category: p.definition.category.clone(),
                    count: matches.len() as u64,
                    matches,
                }
            })
            .collect()
    }
}
