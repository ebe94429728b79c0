//! Date Enrichment
//!
//! Fills each row's date cell from the latest commit touching that entry.
//! Requests for all rows are issued together and applied in completion order;
//! a failure only marks its own row. Fresh cached dates skip the request.

use crate::error::ApiError;
use crate::path::{PathResolver, RepoPath};
use crate::source::{commit_date, ContentSource};
use crate::store::{DateCache, DateCacheEntry};
use crate::types::{Entry, Listing};
use crate::views::{row_href, DateCell, TableView};
use chrono::{DateTime, Duration, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default freshness window for cached dates.
pub const DEFAULT_CACHE_TTL_HOURS: i64 = 24;

/// Outcome counts of one enrichment pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Rows filled from the cache.
    pub cached: usize,
    /// Rows filled from a fresh request.
    pub fetched: usize,
    /// Rows whose request failed.
    pub failed: usize,
    /// Results whose row was no longer in the view.
    pub missing_rows: usize,
}

pub struct DateEnricher {
    source: Arc<dyn ContentSource>,
    cache: Option<Arc<dyn DateCache>>,
    ttl: Duration,
}

impl DateEnricher {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self {
            source,
            cache: None,
            ttl: Duration::hours(DEFAULT_CACHE_TTL_HOURS),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn DateCache>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.ttl = ttl;
        self
    }

    /// Enrich every row of `view`, which must have been rendered from `listing`.
    pub async fn enrich_dates(
        &self,
        listing: &Listing,
        dir: &RepoPath,
        resolver: &PathResolver,
        view: &mut TableView,
    ) -> EnrichReport {
        self.enrich_dates_at(listing, dir, resolver, view, Utc::now())
            .await
    }

    pub async fn enrich_dates_at(
        &self,
        listing: &Listing,
        dir: &RepoPath,
        resolver: &PathResolver,
        view: &mut TableView,
        now: DateTime<Utc>,
    ) -> EnrichReport {
        let mut report = EnrichReport::default();
        let mut pending = FuturesUnordered::new();

        for entry in listing.iter() {
            let href = row_href(resolver, dir, entry);
            if let Some(date) = self.cached_date(entry, now) {
                report.cached += 1;
                apply(view, &href, DateCell::Loaded(date), &mut report);
                continue;
            }
            pending.push(async move {
                let result = self.fetch_date(entry).await;
                (entry, href, result)
            });
        }

        while let Some((entry, href, result)) = pending.next().await {
            match result {
                Ok(date) => {
                    report.fetched += 1;
                    self.store_date(entry, date, now);
                    apply(view, &href, DateCell::Loaded(date), &mut report);
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(path = %entry.path, error = %e, "Failed to fetch last-modified date");
                    apply(view, &href, DateCell::Failed, &mut report);
                }
            }
        }

        debug!(?report, "Date enrichment finished");
        report
    }

    async fn fetch_date(&self, entry: &Entry) -> Result<DateTime<Utc>, ApiError> {
        let value = self.source.last_commit(&entry.path).await?;
        commit_date(&value)
    }

    fn cached_date(&self, entry: &Entry, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let cache = self.cache.as_ref()?;
        match cache.get(&entry.cache_key()) {
            Ok(Some(cached)) if cached.is_fresh(now, self.ttl) => cached.parsed_date(),
            Ok(_) => None,
            Err(e) => {
                warn!(key = %entry.cache_key(), error = %e, "Date cache read failed");
                None
            }
        }
    }

    fn store_date(&self, entry: &Entry, date: DateTime<Utc>, now: DateTime<Utc>) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(&entry.cache_key(), &DateCacheEntry::new(date, now)) {
                warn!(key = %entry.cache_key(), error = %e, "Date cache write failed");
            }
        }
    }
}

fn apply(view: &mut TableView, href: &str, cell: DateCell, report: &mut EnrichReport) {
    if let Err(e) = view.set_date(href, cell) {
        report.missing_rows += 1;
        debug!(error = %e, "Dropping date for row no longer shown");
    }
}
