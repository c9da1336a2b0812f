use pastewatch_fetch::FetchError;
use pastewatch_patterns::PatternError;
use pastewatch_store::{SnapshotError, StoreError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

/// Frontier discovery failures.
///
/// Distinct from an empty frontier: a missing navigation region means the
/// site layout changed (or the page is an interstitial) and an operator
/// needs to look at it.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("landing page has no '{region}' navigation region; site layout may have changed")]
    RegionMissing { region: &'static str },
}

/// Errors that end a scrape run.
///
/// Per-document fetch failures never appear here; the loop logs and skips
/// those documents.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("frontier discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("landing page rejected: {0}")]
    LandingPage(#[source] FetchError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("snapshot persistence failed {failures} consecutive cycles: {source}")]
    Persistence {
        failures: u32,
        #[source]
        source: SnapshotError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_missing_display() {
        let err = DiscoveryError::RegionMissing {
            region: "div#menu_2 ul.right_menu",
        };
        assert!(err.to_string().contains("div#menu_2"));
    }

    #[test]
    fn test_landing_page_error_wraps_status() {
        let fetch = FetchError::HttpStatus {
            url: "https://pastebin.com/".to_string(),
            status: 403,
        };
        let err = ScanError::LandingPage(fetch);
        assert!(err.to_string().contains("landing page rejected"));
        assert!(err.to_string().contains("403"));
    }
}
