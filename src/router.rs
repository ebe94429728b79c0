//! Router
//!
//! Owns the navigation state and drives the fetch → render → enrich pipeline
//! for each navigation event. Navigation returns as soon as the primary fetch
//! is rendered; dates are filled by a separate [`Router::enrich`] call.

use crate::enrich::{DateEnricher, EnrichReport};
use crate::fetcher::DirectoryFetcher;
use crate::navigation::NavigationState;
use crate::path::{PathResolver, RepoPath};
use crate::types::{Fetched, Listing};
use crate::views::TableView;
use tracing::{error, info};

/// What a navigation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// A rendered directory, or a one-row error table.
    Table(TableView),
    /// The path is a file; hand off to its raw-content URL.
    Redirect { path: RepoPath, url: String },
}

pub struct Router {
    resolver: PathResolver,
    fetcher: DirectoryFetcher,
    enricher: Option<DateEnricher>,
    nav: NavigationState,
    pending: Option<(RepoPath, Listing)>,
    last_report: Option<EnrichReport>,
}

impl Router {
    /// `enricher` is `None` when dates are not wanted.
    pub fn new(
        resolver: PathResolver,
        fetcher: DirectoryFetcher,
        enricher: Option<DateEnricher>,
    ) -> Self {
        let nav = NavigationState::new(resolver.root());
        Self {
            resolver,
            fetcher,
            enricher,
            nav,
            pending: None,
            last_report: None,
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn current(&self) -> &RepoPath {
        self.nav.current()
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn last_report(&self) -> Option<&EnrichReport> {
        self.last_report.as_ref()
    }

    /// Follow a root-relative href. Files redirect without entering history.
    /// A returned table has pending dates.
    pub async fn navigate(&mut self, location: &str) -> View {
        let path = self.resolver.location_to_path(location);
        info!(location = %location, path = %path, "Navigating");
        let view = self.load(&path).await;
        if matches!(view, View::Table(_)) {
            self.nav.push(path);
        }
        view
    }

    /// Step back in history; `None` at the oldest entry.
    pub async fn back(&mut self) -> Option<View> {
        let path = self.nav.go_back()?;
        Some(self.load(&path).await)
    }

    pub async fn forward(&mut self) -> Option<View> {
        let path = self.nav.go_forward()?;
        Some(self.load(&path).await)
    }

    /// Re-fetch the current path.
    pub async fn reload(&mut self) -> View {
        let path = self.nav.current().clone();
        self.load(&path).await
    }

    /// Fill the date cells of `view`, the table most recently returned.
    /// Returns `None` when there is nothing to enrich: no enricher, an error
    /// table, or a view that is no longer current.
    pub async fn enrich(&mut self, view: &mut TableView) -> Option<EnrichReport> {
        let enricher = self.enricher.as_ref()?;
        let (path, listing) = self.pending.take()?;
        if path != view.path {
            return None;
        }
        let report = enricher
            .enrich_dates(&listing, &path, &self.resolver, view)
            .await;
        self.last_report = Some(report.clone());
        Some(report)
    }

    async fn load(&mut self, path: &RepoPath) -> View {
        self.last_report = None;
        self.pending = None;
        match self.fetcher.fetch(path).await {
            Ok(Fetched::Listing(listing)) => {
                let view = TableView::render(&listing, path, &self.resolver);
                self.pending = Some((path.clone(), listing));
                View::Table(view)
            }
            Ok(Fetched::File(file)) => View::Redirect {
                path: path.clone(),
                url: file.download_url,
            },
            Err(e) => {
                error!(path = %path, error = %e, "Error loading content");
                View::Table(TableView::error(path, &self.resolver, &e))
            }
        }
    }
}
