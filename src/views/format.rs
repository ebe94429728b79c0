//! Format a table view as terminal text, JSON, or an HTML fragment.

use crate::error::ApiError;
use crate::path::Crumb;
use crate::views::{DateCell, TableBody, TableView, HEADERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(format: &str) -> Result<Self, ApiError> {
        match format {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(ApiError::ConfigError(format!(
                "Invalid output format: {} (must be 'text', 'json', or 'html')",
                other
            ))),
        }
    }

    pub fn format(&self, view: &TableView) -> Result<String, ApiError> {
        match self {
            OutputFormat::Text => Ok(format_text(view)),
            OutputFormat::Json => format_json(view),
            OutputFormat::Html => Ok(format_html(view)),
        }
    }
}

fn breadcrumb_line(crumbs: &[Crumb]) -> String {
    crumbs
        .iter()
        .map(|c| c.label.as_str())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Breadcrumb heading followed by a bordered table.
pub fn format_text(view: &TableView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        breadcrumb_line(&view.breadcrumbs).bold().underline()
    ));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    match &view.body {
        TableBody::Rows(rows) => {
            table.set_header(HEADERS.to_vec());
            for row in rows {
                table.add_row(vec![
                    format!("{} {}", row.icon, row.label),
                    row.date.display(),
                    row.size.clone(),
                ]);
            }
        }
        TableBody::Error(message) => {
            table.add_row(vec![message.clone()]);
        }
    }
    out.push_str(&table.to_string());
    out
}

pub fn format_json(view: &TableView) -> Result<String, ApiError> {
    let crumbs: Vec<serde_json::Value> = view
        .breadcrumbs
        .iter()
        .map(|c| json!({ "label": c.label, "location": c.location }))
        .collect();
    let value = match &view.body {
        TableBody::Rows(rows) => {
            let rows: Vec<serde_json::Value> = rows
                .iter()
                .map(|r| {
                    let date = match &r.date {
                        DateCell::Loaded(d) => json!(d.to_rfc3339()),
                        DateCell::Pending => serde_json::Value::Null,
                        DateCell::Failed => json!("error"),
                    };
                    json!({
                        "name": r.label,
                        "href": r.href,
                        "type": if r.is_dir { "dir" } else { "file" },
                        "date": date,
                        "size": r.size,
                    })
                })
                .collect();
            json!({ "path": view.path, "breadcrumbs": crumbs, "rows": rows })
        }
        TableBody::Error(message) => {
            json!({ "path": view.path, "breadcrumbs": crumbs, "error": message })
        }
    };
    serde_json::to_string_pretty(&value)
        .map_err(|e| ApiError::UnexpectedShape(format!("Failed to serialize view: {}", e)))
}

/// Breadcrumb `<nav>` plus the `<table>` the page used to inject.
pub fn format_html(view: &TableView) -> String {
    let mut out = String::from("<nav id=\"breadcrumb\">");
    let links: Vec<String> = view
        .breadcrumbs
        .iter()
        .map(|c| {
            format!(
                "<a href=\"{}\">{}</a>",
                escape_html(&c.location),
                escape_html(&c.label)
            )
        })
        .collect();
    out.push_str(&links.join(" / "));
    out.push_str("</nav>\n<table>\n");

    match &view.body {
        TableBody::Rows(rows) => {
            out.push_str("<thead>\n<tr>");
            for header in HEADERS {
                out.push_str(&format!("<th>{}</th>", header));
            }
            out.push_str("</tr>\n</thead>\n<tbody>\n");
            for row in rows {
                out.push_str(&format!(
                    "<tr><td>{} <a href=\"{}\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
                    row.icon,
                    escape_html(&row.href),
                    escape_html(&row.label),
                    escape_html(&row.date.display()),
                    escape_html(&row.size)
                ));
            }
            out.push_str("</tbody>\n");
        }
        TableBody::Error(message) => {
            out.push_str(&format!(
                "<tr><td colspan=\"3\">{}</td></tr>\n",
                escape_html(message)
            ));
        }
    }
    out.push_str("</table>");
    out
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
