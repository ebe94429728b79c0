//! CLI Tooling
//!
//! Command-line interface for browsing a remote repository. One-shot listing,
//! an interactive session, and location resolution all share one router
//! pipeline.

use crate::config::{BrowseConfig, ConfigLoader};
use crate::enrich::DateEnricher;
use crate::error::ApiError;
use crate::fetcher::DirectoryFetcher;
use crate::logging::LoggingConfig;
use crate::path::PathResolver;
use crate::router::{Router, View};
use crate::source::{ContentSource, GithubSource, MemorySource};
use crate::store::{DateCache, SledDateCache};
use crate::tooling::browse;
use crate::views::OutputFormat;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{info, warn};

/// repobrowse - browse a remote repository directory from the terminal
#[derive(Parser)]
#[command(name = "repobrowse")]
#[command(about = "Browse a remote repository directory with last-modified dates")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the user config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Serve API responses from a JSON fixture instead of the network
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Enable verbose logging to stderr (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Render one location as a table
    Ls {
        /// Root-relative location, e.g. /contents/docs (default: the root)
        location: Option<String>,
        /// Output format (text, json, html)
        #[arg(long, default_value = "text")]
        format: String,
        /// Skip last-modified date lookups
        #[arg(long)]
        no_dates: bool,
    },
    /// Browse interactively
    Browse {
        /// Starting location (default: the root)
        location: Option<String>,
    },
    /// Show how a location resolves
    Resolve {
        /// Root-relative location
        location: String,
    },
}

impl Cli {
    /// Apply logging flags over the configured logging section.
    pub fn apply_logging_overrides(&self, logging: &mut LoggingConfig) {
        if self.verbose {
            logging.enabled = true;
            logging.level = "debug".to_string();
            logging.output = "stderr".to_string();
        }
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
    }
}

/// CLI context: configuration, content source, optional date cache and the
/// runtime commands block on.
pub struct CliContext {
    config: BrowseConfig,
    source: Arc<dyn ContentSource>,
    cache: Option<Arc<SledDateCache>>,
    runtime: Runtime,
}

impl CliContext {
    /// Load configuration the way the binary does.
    pub fn load_config(config_path: Option<&Path>) -> Result<BrowseConfig, ApiError> {
        match config_path {
            Some(path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(),
        }
    }

    /// Create a context from config files and environment.
    pub fn new(config_path: Option<PathBuf>, fixture: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = Self::load_config(config_path.as_deref())?;
        Self::from_config(config, fixture)
    }

    /// Create a context from an already merged configuration.
    pub fn from_config(config: BrowseConfig, fixture: Option<PathBuf>) -> Result<Self, ApiError> {
        let source: Arc<dyn ContentSource> = match &fixture {
            Some(path) => {
                info!(fixture = %path.display(), "Using fixture content source");
                Arc::new(MemorySource::from_fixture_file(path)?)
            }
            None => Arc::new(GithubSource::new(&config.repository, &config.http)?),
        };

        let cache = if config.cache.enabled {
            let path = config.cache.resolve_path()?;
            match SledDateCache::open(&path) {
                Ok(cache) => Some(Arc::new(cache)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Date cache unavailable, continuing without it");
                    None
                }
            }
        } else {
            None
        };

        let runtime = Runtime::new()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;

        Ok(Self {
            config,
            source,
            cache,
            runtime,
        })
    }

    pub fn config(&self) -> &BrowseConfig {
        &self.config
    }

    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(&self.config.repository.root)
    }

    /// Build a router; `dates` controls last-modified enrichment.
    pub fn router(&self, dates: bool) -> Router {
        let enricher = dates.then(|| {
            let enricher = DateEnricher::new(Arc::clone(&self.source));
            match &self.cache {
                Some(cache) => {
                    let cache: Arc<dyn DateCache> = cache.clone();
                    enricher.with_cache(
                        cache,
                        chrono::Duration::hours(self.config.cache.ttl_hours as i64),
                    )
                }
                None => enricher,
            }
        });
        Router::new(
            self.resolver(),
            DirectoryFetcher::new(Arc::clone(&self.source)),
            enricher,
        )
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let result = match command {
            Commands::Ls {
                location,
                format,
                no_dates,
            } => self.handle_ls(location.as_deref(), format, !*no_dates),
            Commands::Browse { location } => {
                let mut router = self.router(true);
                browse::run(&self.runtime, &mut router, location.as_deref())
                    .map(|()| String::new())
            }
            Commands::Resolve { location } => Ok(self.handle_resolve(location)),
        };
        self.flush_cache();
        result
    }

    fn handle_ls(
        &self,
        location: Option<&str>,
        format: &str,
        dates: bool,
    ) -> Result<String, ApiError> {
        let format = OutputFormat::parse(format)?;
        let mut router = self.router(dates);
        let location = location
            .map(str::to_string)
            .unwrap_or_else(|| router.resolver().root_location());
        let view = self.runtime.block_on(router.navigate(&location));
        match view {
            View::Table(mut table) => {
                if let Some(report) = self.runtime.block_on(router.enrich(&mut table)) {
                    info!(
                        cached = report.cached,
                        fetched = report.fetched,
                        failed = report.failed,
                        "Dates resolved"
                    );
                }
                format.format(&table)
            }
            View::Redirect { path, url } => format_redirect(format, path.as_str(), &url),
        }
    }

    fn handle_resolve(&self, location: &str) -> String {
        let resolver = self.resolver();
        let path = resolver.location_to_path(location);
        let mut out = String::new();
        out.push_str(&format!("{}\n", "Resolved location".bold()));
        out.push_str(&format!("  Path:     {}\n", path));
        out.push_str(&format!("  Location: {}\n", resolver.path_to_location(&path)));
        out.push_str(&format!("  API URL:  {}", self.source.contents_url(&path)));
        out
    }

    fn flush_cache(&self) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.flush() {
                warn!(error = %e, "Failed to flush date cache");
            }
        }
    }
}

fn format_redirect(format: OutputFormat, path: &str, url: &str) -> Result<String, ApiError> {
    match format {
        OutputFormat::Text => Ok(browse::redirect_line(url)),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "path": path,
            "redirect": url,
        }))
        .map_err(|e| ApiError::UnexpectedShape(e.to_string())),
        OutputFormat::Html => Ok(format!(
            "<meta http-equiv=\"refresh\" content=\"0; url={}\">",
            crate::views::format::escape_html(url)
        )),
    }
}
