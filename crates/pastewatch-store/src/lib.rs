//! Pastewatch Store - Aggregate bookkeeping and snapshot persistence.
//!
//! The [`AggregateStore`] exclusively owns the per-category running
//! totals and per-source evidence; the [`SnapshotWriter`] serializes them
//! to a category-sorted JSON file once per cycle and once more on
//! shutdown.
//!
//! # Example
//!
//! ```rust
//! use pastewatch_core::{PasteId, PatternDefinition};
//! use pastewatch_store::AggregateStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let defs = vec![PatternDefinition::new("Email Address", r"[a-z]+@[a-z]+\.[a-z]+")];
//! let mut store = AggregateStore::new(&defs);
//!
//! let id = PasteId::new("dR7wq2Lx")?;
//! store.record("Email Address", &id, 2)?;
//! assert_eq!(store.total_hits(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod aggregate;
#[allow(missing_docs)]
pub mod error;
pub mod snapshot;

// Re-export commonly used types
pub use aggregate::{AggregateRecord, AggregateStore};
pub use error::{Result, SnapshotError, StoreError};
pub use snapshot::SnapshotWriter;
