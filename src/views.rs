//! Table Views
//!
//! The rendered state of one directory: breadcrumbs plus either a table of
//! rows or a single error row. Rows are addressed by href so that late
//! date updates can find them.

pub mod format;

use crate::error::ApiError;
use crate::path::{decode_segment, Crumb, PathResolver, RepoPath};
use crate::types::{Entry, Listing};
use chrono::{DateTime, Local, Utc};

pub use format::{format_html, format_json, format_text, OutputFormat};

/// Column headers, in order.
pub const HEADERS: [&str; 3] = ["Name", "Date", "Size"];

const DATE_PLACEHOLDER: &str = "Not available";
const DATE_ERROR: &str = "Error";

/// State of a row's date cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateCell {
    Pending,
    Loaded(DateTime<Utc>),
    Failed,
}

impl DateCell {
    pub fn display(&self) -> String {
        match self {
            DateCell::Pending => DATE_PLACEHOLDER.to_string(),
            DateCell::Loaded(date) => date
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            DateCell::Failed => DATE_ERROR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub icon: &'static str,
    pub label: String,
    pub href: String,
    pub is_dir: bool,
    pub date: DateCell,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Rows(Vec<Row>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub path: RepoPath,
    pub breadcrumbs: Vec<Crumb>,
    pub body: TableBody,
}

/// Size in kilobytes with two decimals.
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// Href of `entry` inside the directory at `dir`.
pub fn row_href(resolver: &PathResolver, dir: &RepoPath, entry: &Entry) -> String {
    resolver.path_to_location(&resolver.join(dir, &entry.name))
}

impl TableView {
    /// One row per entry, in listing order, with pending dates.
    pub fn render(listing: &Listing, dir: &RepoPath, resolver: &PathResolver) -> Self {
        let rows = listing
            .iter()
            .map(|entry| Row {
                icon: entry.icon(),
                label: decode_segment(&entry.name),
                href: row_href(resolver, dir, entry),
                is_dir: entry.is_dir(),
                date: DateCell::Pending,
                size: if entry.is_dir() {
                    "-".to_string()
                } else {
                    format_size(entry.size)
                },
            })
            .collect();

        Self {
            path: dir.clone(),
            breadcrumbs: resolver.breadcrumbs(dir),
            body: TableBody::Rows(rows),
        }
    }

    /// Table replaced by a single error row.
    pub fn error(dir: &RepoPath, resolver: &PathResolver, err: &ApiError) -> Self {
        Self {
            path: dir.clone(),
            breadcrumbs: resolver.breadcrumbs(dir),
            body: TableBody::Error(format!(
                "Error loading content: {}. Please check the log for more details and try again.",
                err
            )),
        }
    }

    pub fn rows(&self) -> &[Row] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Error(_) => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.body, TableBody::Error(_))
    }

    /// Number of body rows; an error table has exactly one.
    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Error(_) => 1,
        }
    }

    pub fn row(&self, href: &str) -> Option<&Row> {
        self.rows().iter().find(|r| r.href == href)
    }

    /// Update the date cell of the row linking to `href`.
    pub fn set_date(&mut self, href: &str, date: DateCell) -> Result<(), ApiError> {
        let TableBody::Rows(rows) = &mut self.body else {
            return Err(ApiError::RowNotFound(href.to_string()));
        };
        let row = rows
            .iter_mut()
            .find(|r| r.href == href)
            .ok_or_else(|| ApiError::RowNotFound(href.to_string()))?;
        row.date = date;
        Ok(())
    }
}
