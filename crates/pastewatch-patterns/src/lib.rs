//! Pastewatch Patterns - Sensitive-data pattern matching.
//!
//! This crate compiles the configured pattern definitions into a
//! [`PatternSet`] and applies them to fetched paste text. Compilation
//! happens once at startup; a syntactically invalid pattern surfaces as a
//! [`PatternError`] before the scrape loop starts, never at match time.
//!
//! # Example
//!
//! ```rust
//! use pastewatch_core::PatternDefinition;
//! use pastewatch_patterns::PatternSet;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let defs = vec![PatternDefinition::new("IPv4 Address", r"(?:[0-9]{1,3}\.){3}[0-9]{1,3}")];
//! let set = PatternSet::compile(&defs)?;
//!
//! let hits = set.scan("server at 10.0.0.1");
//! assert_eq!(hits[0].count, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[allow(missing_docs)]
pub mod error;
pub mod matcher;

// Re-export commonly used types
pub use error::{PatternError, Result};
pub use matcher::{PatternHits, PatternSet};
