//! Frontier discovery on the site's landing page.
//!
//! The landing page advertises recently published pastes as anchor links
//! inside a sidebar menu. Discovery is a pure transformation of the
//! fetched markup; cross-cycle deduplication is the seen-cache's job, so
//! duplicates within one page are passed through untouched.

use crate::error::DiscoveryError;
use once_cell::sync::Lazy;
use pastewatch_core::PasteId;
use scraper::{Html, Selector};
use tracing::debug;

/// Sidebar region listing the latest pastes, most recent first.
const LATEST_REGION: &str = "div#menu_2 ul.right_menu";

static REGION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(LATEST_REGION).expect("region selector is hardcoded and valid"));

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("anchor selector is hardcoded and valid"));

/// Extract the advertised paste identifiers in presentation order.
///
/// # Errors
/// Returns `DiscoveryError::RegionMissing` when the expected navigation
/// region is absent, so the caller can distinguish "no updates" from
/// "site layout changed". Anchors without a usable path segment are
/// skipped with a debug log.
pub fn extract_frontier(html: &str) -> Result<Vec<PasteId>, DiscoveryError> {
    let document = Html::parse_document(html);

    let region = document
        .select(&REGION_SELECTOR)
        .next()
        .ok_or(DiscoveryError::RegionMissing {
            region: LATEST_REGION,
        })?;

    let mut ids = Vec::new();
    for anchor in region.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        match PasteId::new(href.trim_start_matches('/')) {
            Ok(id) => ids.push(id),
            Err(_) => debug!(href, "skipping frontier link without a usable path segment"),
        }
    }

    Ok(ids)
}
