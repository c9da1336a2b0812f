//! Pastewatch Fetch - HTTP content retrieval.
//!
//! This crate wraps a single shared HTTP client that presents the
//! configured browser-like user agent, transparently decompresses gzipped
//! bodies, and sorts failures into the transport / http-status / decode
//! taxonomy the control loop dispatches on. Retries are deliberately not
//! implemented here; they are a control-loop policy.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
#[allow(missing_docs)]
pub mod error;

// Re-export commonly used types
pub use client::PasteFetcher;
pub use error::{FetchError, Result};
