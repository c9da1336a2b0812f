//! Pastewatch Core - Foundation crate for the pastewatch scraper.
//!
//! This crate provides shared types, error handling, and configuration
//! management that all other pastewatch crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes (`PasteId`, `PatternDefinition`)
//!
//! # Example
//!
//! ```rust
//! use pastewatch_core::{AppConfig, PasteId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let id = PasteId::new("dR7wq2Lx")?;
//! assert_eq!(id.as_str(), "dR7wq2Lx");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{default_patterns, AppConfig, PollingConfig, SiteConfig, SnapshotConfig};
pub use error::{ConfigError, ConfigResult, PastewatchError, Result};
pub use types::{PasteId, PatternDefinition};
