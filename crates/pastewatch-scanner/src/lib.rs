//! Pastewatch Scanner - Scrape orchestration.
//!
//! This crate ties the pipeline together: frontier discovery on the
//! landing page, the seen-cache admission gate, bounded concurrent paste
//! fetching and matching, aggregate merging, per-cycle snapshots, and the
//! adaptive polling cadence with graceful-shutdown semantics.
//!
//! # Example
//!
//! ```rust,ignore
//! use pastewatch_core::AppConfig;
//! use pastewatch_scanner::ScrapeOrchestrator;
//! use tokio_util::sync::CancellationToken;
//!
//! let config = AppConfig::load_with_env()?;
//! let cancel = CancellationToken::new();
//! let mut orchestrator = ScrapeOrchestrator::new(config)?;
//! orchestrator.run(cancel).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod dedup;
#[allow(missing_docs)]
pub mod error;
pub mod frontier;
pub mod orchestrator;
#[allow(missing_docs)]
pub mod url;

// Re-export commonly used types
pub use dedup::SeenCache;
pub use error::{DiscoveryError, Result, ScanError};
pub use frontier::extract_frontier;
pub use orchestrator::{CycleOutcome, ScrapeOrchestrator};
pub use url::build_raw_url;
