//! Interactive browse session.
//!
//! Each prompt offers the rows of the current table plus navigation actions.
//! Picking a directory follows its href; picking a file prints its download URL
//! and keeps the current table on screen. A new table is printed as soon as it
//! is fetched and printed again once its dates have arrived.

use crate::error::ApiError;
use crate::router::{Router, View};
use crate::views::{format_text, TableView};
use owo_colors::OwoColorize;
use tokio::runtime::Runtime;
use tracing::debug;

/// One selectable item in the browse prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseAction {
    /// Follow a row href.
    Open { label: String, href: String },
    /// Go to the parent directory.
    Parent(String),
    Back,
    Forward,
    Reload,
    Quit,
}

impl BrowseAction {
    pub fn label(&self) -> String {
        match self {
            BrowseAction::Open { label, .. } => label.clone(),
            BrowseAction::Parent(_) => "..".to_string(),
            BrowseAction::Back => "<- Back".to_string(),
            BrowseAction::Forward => "-> Forward".to_string(),
            BrowseAction::Reload => "Reload".to_string(),
            BrowseAction::Quit => "Quit".to_string(),
        }
    }
}

/// Actions available for `view` given the router's history.
pub fn browse_actions(view: &TableView, router: &Router) -> Vec<BrowseAction> {
    let mut actions = Vec::new();
    let resolver = router.resolver();
    if let Some(parent) = resolver.parent(&view.path) {
        actions.push(BrowseAction::Parent(resolver.path_to_location(&parent)));
    }
    actions.extend(view.rows().iter().map(|row| BrowseAction::Open {
        label: format!("{} {}", row.icon, row.label),
        href: row.href.clone(),
    }));
    if router.navigation().can_go_back() {
        actions.push(BrowseAction::Back);
    }
    if router.navigation().can_go_forward() {
        actions.push(BrowseAction::Forward);
    }
    actions.push(BrowseAction::Reload);
    actions.push(BrowseAction::Quit);
    actions
}

pub(crate) fn redirect_line(url: &str) -> String {
    format!("{} {}", "File:".bold(), url)
}

/// Run the prompt loop until the user quits.
pub fn run(runtime: &Runtime, router: &mut Router, start: Option<&str>) -> Result<(), ApiError> {
    use dialoguer::Select;

    let first = match start {
        Some(location) => runtime.block_on(router.navigate(location)),
        None => runtime.block_on(router.reload()),
    };
    let mut shown = match first {
        View::Table(table) => show(runtime, router, table),
        View::Redirect { url, .. } => {
            println!("{}", redirect_line(&url));
            match runtime.block_on(router.reload()) {
                View::Table(table) => show(runtime, router, table),
                View::Redirect { .. } => return Ok(()),
            }
        }
    };

    loop {
        let actions = browse_actions(&shown, router);
        let labels: Vec<String> = actions.iter().map(BrowseAction::label).collect();
        let selection = Select::new()
            .with_prompt("Open")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;

        let Some(index) = selection else {
            return Ok(());
        };
        let action = &actions[index];
        debug!(action = ?action, "Browse action");

        let next = match action {
            BrowseAction::Open { href, .. } => Some(runtime.block_on(router.navigate(href))),
            BrowseAction::Parent(location) => Some(runtime.block_on(router.navigate(location))),
            BrowseAction::Back => runtime.block_on(router.back()),
            BrowseAction::Forward => runtime.block_on(router.forward()),
            BrowseAction::Reload => Some(runtime.block_on(router.reload())),
            BrowseAction::Quit => return Ok(()),
        };

        match next {
            Some(View::Table(table)) => shown = show(runtime, router, table),
            Some(View::Redirect { url, .. }) => {
                println!("{}", redirect_line(&url));
                println!("{}", format_text(&shown));
            }
            None => {}
        }
    }
}

/// Print the pending table, fill its dates, and reprint it if any arrived.
fn show(runtime: &Runtime, router: &mut Router, mut table: TableView) -> TableView {
    println!("{}", format_text(&table));
    if let Some(report) = runtime.block_on(router.enrich(&mut table)) {
        debug!(?report, "Dates resolved");
        if report.cached + report.fetched + report.failed > 0 {
            println!("{}", format_text(&table));
        }
    }
    table
}
