//! Scrape orchestrator: the polling control loop.
//!
//! Each cycle fetches the landing page, discovers the frontier, admits
//! unseen identifiers through the [`SeenCache`], fetches and scans every
//! admitted paste (bounded concurrency), merges results into the
//! aggregate store, and writes a snapshot. Cycles that admitted nothing
//! back off to the longer idle sleep.
//!
//! Failure policy: a rejected landing page or a missing navigation region
//! ends the run (site blocking or layout change needs an operator); a
//! failed paste fetch is logged and that one document is forfeited, its
//! identifier staying in the seen cache; snapshot failures are tolerated
//! and retried next cycle until the configured consecutive-failure
//! threshold.

use crate::dedup::SeenCache;
use crate::error::{Result, ScanError};
use crate::{frontier, url};
use chrono::{DateTime, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use pastewatch_core::{AppConfig, PasteId};
use pastewatch_fetch::{FetchError, PasteFetcher};
use pastewatch_patterns::PatternSet;
use pastewatch_store::{AggregateStore, SnapshotWriter};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// What one polling cycle saw and did.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleOutcome {
    /// Identifiers listed on the landing page
    pub listed: usize,
    /// Identifiers admitted as new
    pub admitted: usize,
    /// Identifiers skipped as already seen
    pub already_seen: usize,
    /// Pattern hits recorded this cycle
    pub hits: u64,
    /// Whether cancellation interrupted the cycle
    pub cancelled: bool,
}

/// Drives the scrape-dedup-match-persist pipeline.
///
/// Owns the seen cache and the aggregate store; no other component holds
/// state the orchestrator doesn't drive.
#[derive(Debug)]
pub struct ScrapeOrchestrator {
    config: AppConfig,
    fetcher: PasteFetcher,
    patterns: PatternSet,
    store: AggregateStore,
    seen: SeenCache,
    snapshot: SnapshotWriter,
    snapshot_failures: u32,
    snapshot_failing_since: Option<DateTime<Utc>>,
    cycle: u64,
}

impl ScrapeOrchestrator {
    /// Build the pipeline from a validated configuration.
    ///
    /// # Errors
    /// Fails fast on a syntactically invalid pattern or an unbuildable
    /// HTTP client, before any polling starts.
    pub fn new(config: AppConfig) -> Result<Self> {
        let patterns = PatternSet::compile(&config.patterns)?;
        let fetcher =
            PasteFetcher::new(&config.site.user_agent, config.polling.request_timeout_secs)?;
        let store = AggregateStore::new(&config.patterns);
        let snapshot = SnapshotWriter::new(config.snapshot.path.clone());

        Ok(Self {
            config,
            fetcher,
            patterns,
            store,
            seen: SeenCache::new(),
            snapshot,
            snapshot_failures: 0,
            snapshot_failing_since: None,
            cycle: 0,
        })
    }

    /// Read access to the aggregate state, mainly for tests and shutdown
    /// reporting.
    #[must_use]
    pub fn store(&self) -> &AggregateStore {
        &self.store
    }

    /// Run the polling loop until cancellation or a fatal error.
    ///
    /// Cancellation is not an error: one final snapshot is written and
    /// `Ok(())` returned. A fatal error also attempts a best-effort final
    /// snapshot before propagating.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        info!(
            patterns = self.patterns.len(),
            matchers = self.patterns.distinct_matchers(),
            root = %self.config.site.root_url,
            "starting scrape loop"
        );

        let active_sleep = Duration::from_secs(self.config.polling.active_sleep_secs);
        let idle_sleep = Duration::from_secs(self.config.polling.idle_sleep_secs);

        loop {
            if cancel.is_cancelled() {
                break;
            }

            self.cycle += 1;
            let outcome = match self.poll_cycle(&cancel).await {
                Ok(outcome) => outcome,
                Err(fatal) => {
                    error!(error = %fatal, "fatal error, ending run");
                    self.final_snapshot();
                    return Err(fatal);
                }
            };

            if outcome.cancelled {
                break;
            }

            // State is never more than one cycle stale, even on abnormal exit.
            if let Err(fatal) = self.persist_cycle() {
                error!(error = %fatal, "snapshot failures exceeded threshold, ending run");
                return Err(fatal);
            }

            info!(
                cycle = self.cycle,
                listed = outcome.listed,
                new = outcome.admitted,
                seen = outcome.already_seen,
                hits = outcome.hits,
                total_hits = self.store.total_hits(),
                "cycle complete"
            );

            let sleep = if outcome.admitted > 0 {
                active_sleep
            } else {
                debug!("no updates, backing off");
                idle_sleep
            };

            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(sleep) => {}
            }
        }

        info!("cancellation received, shutting down");
        self.final_snapshot();
        Ok(())
    }

    /// One discover-admit-fetch-match pass.
    async fn poll_cycle(&mut self, cancel: &CancellationToken) -> Result<CycleOutcome> {
        let landing = tokio::select! {
            () = cancel.cancelled() => {
                return Ok(CycleOutcome { cancelled: true, ..CycleOutcome::default() });
            }
            fetched = self.fetcher.fetch_text(&self.config.site.root_url) => match fetched {
                Ok(html) => html,
                Err(e @ FetchError::HttpStatus { .. }) => {
                    // The site is rejecting us outright; retrying every
                    // cycle would only dig the hole deeper.
                    return Err(ScanError::LandingPage(e));
                }
                Err(e) => {
                    warn!(error = %e, "landing page fetch failed, retrying next cycle");
                    return Ok(CycleOutcome::default());
                }
            }
        };

        let listed_ids = frontier::extract_frontier(&landing)?;
        let listed = listed_ids.len();

        let mut admitted = Vec::new();
        for id in listed_ids {
            if self.seen.offer(&id) {
                admitted.push(id);
            } else {
                debug!(paste = %id, "already seen");
            }
        }
        let already_seen = listed - admitted.len();

        let (hits, cancelled) = self.scan_admitted(&admitted, cancel).await?;

        Ok(CycleOutcome {
            listed,
            admitted: admitted.len(),
            already_seen,
            hits,
            cancelled,
        })
    }

    /// Fetch and scan the admitted pastes with bounded concurrency.
    ///
    /// Each completed fetch is merged into the store on this task, one
    /// document at a time, so a document's results are recorded as a unit
    /// or not at all. Cancellation abandons in-flight fetches wholly.
    async fn scan_admitted(
        &mut self,
        admitted: &[PasteId],
        cancel: &CancellationToken,
    ) -> Result<(u64, bool)> {
        let template = self.config.site.raw_url_template.clone();
        let max_in_flight = self.config.polling.max_concurrent_fetches;

        let mut pending = admitted.iter().cloned();
        let mut in_flight = FuturesUnordered::new();
        let mut cycle_hits = 0u64;

        loop {
            while in_flight.len() < max_in_flight {
                let Some(id) = pending.next() else {
                    break;
                };
                let raw_url = url::build_raw_url(&template, &id);
                let fetcher = self.fetcher.clone();
                in_flight.push(async move {
                    let fetched = fetcher.fetch_text(&raw_url).await;
                    (id, raw_url, fetched)
                });
            }

            if in_flight.is_empty() {
                break;
            }

            tokio::select! {
                () = cancel.cancelled() => {
                    // In-flight results are discarded wholly; nothing is
                    // half recorded.
                    return Ok((cycle_hits, true));
                }
                completed = in_flight.next() => {
                    let Some((id, raw_url, fetched)) = completed else {
                        break;
                    };
                    match fetched {
                        Ok(content) => {
                            let hits = self.scan_document(&id, &content)?;
                            if hits > 0 {
                                info!(paste = %id, hits, "hits discovered");
                            }
                            cycle_hits += hits;
                        }
                        Err(e) => {
                            // Forfeit this one document; its id stays seen
                            // so it is never retried.
                            warn!(paste = %id, url = %raw_url, error = %e, "paste fetch failed, skipping");
                        }
                    }
                }
            }
        }

        Ok((cycle_hits, false))
    }

    /// Match one document against every pattern and merge the results.
    ///
    /// All `record` calls for the document happen here, synchronously, so
    /// the store either reflects the whole document or none of it.
    fn scan_document(&mut self, id: &PasteId, content: &str) -> Result<u64> {
        let mut document_hits = 0;
        for hit in self.patterns.scan(content) {
            document_hits += hit.count;
            self.store.record(&hit.category, id, hit.count)?;
        }
        Ok(document_hits)
    }

    /// End-of-cycle snapshot with failure escalation.
    fn persist_cycle(&mut self) -> Result<()> {
        match self.snapshot.save(&self.store) {
            Ok(()) => {
                self.snapshot_failures = 0;
                self.snapshot_failing_since = None;
                Ok(())
            }
            Err(e) => {
                self.snapshot_failures += 1;
                let since = *self.snapshot_failing_since.get_or_insert_with(Utc::now);
                warn!(
                    error = %e,
                    failures = self.snapshot_failures,
                    failing_since = %since.to_rfc3339(),
                    path = %self.snapshot.path().display(),
                    "snapshot write failed; aggregate state preserved in memory"
                );
                if self.snapshot_failures >= self.config.polling.max_snapshot_failures {
                    Err(ScanError::Persistence {
                        failures: self.snapshot_failures,
                        source: e,
                    })
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Best-effort snapshot on the way out.
    fn final_snapshot(&self) {
        if let Err(e) = self.snapshot.save(&self.store) {
            warn!(error = %e, "final snapshot failed");
        }
    }
}
