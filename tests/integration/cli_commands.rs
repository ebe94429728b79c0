use clap::{CommandFactory, Parser};
use repobrowse::config::BrowseConfig;
use repobrowse::tooling::cli::{Cli, CliContext, Commands};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["repobrowse", "ls"],
        vec!["repobrowse", "ls", "/contents/docs"],
        vec!["repobrowse", "ls", "--format", "json", "--no-dates"],
        vec!["repobrowse", "browse"],
        vec!["repobrowse", "browse", "/contents/docs"],
        vec!["repobrowse", "resolve", "/contents/contents/docs"],
        vec!["repobrowse", "--config", "c.toml", "--verbose", "ls"],
    ];
    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "failed to parse {:?}: {:?}", args, parsed.err());
    }
}

#[test]
fn parse_rejects_unknown_command() {
    assert!(Cli::try_parse_from(["repobrowse", "scan"]).is_err());
    assert!(Cli::try_parse_from(["repobrowse"]).is_err());
}

#[test]
fn help_lists_every_command() {
    let help = Cli::command().render_help().to_string();
    for name in ["ls", "browse", "resolve"] {
        assert!(help.contains(name), "help is missing {}", name);
    }
}

/// Writes a fixture and returns a context serving it, with the date cache off.
fn fixture_context(dir: &TempDir) -> CliContext {
    let fixture = json!({
        "contents": {
            "contents": [
                {"name": "readme.md", "path": "contents/readme.md", "type": "file", "size": 3072},
                {"name": "docs", "path": "contents/docs", "type": "dir"}
            ],
            "contents/readme.md": {
                "name": "readme.md",
                "path": "contents/readme.md",
                "type": "file",
                "size": 3072,
                "download_url": "https://raw.example/readme.md"
            },
            "contents/broken": {"status": 500}
        },
        "commits": {
            "contents/readme.md": [{"commit": {"committer": {"date": "2024-01-02T03:04:05Z"}}}]
        }
    });
    let path: PathBuf = dir.path().join("fixture.json");
    std::fs::write(&path, serde_json::to_string(&fixture).unwrap()).unwrap();

    let mut config = BrowseConfig::default();
    config.cache.enabled = false;
    CliContext::from_config(config, Some(path)).unwrap()
}

#[test]
fn ls_json_lists_rows_in_order() {
    let dir = TempDir::new().unwrap();
    let context = fixture_context(&dir);
    let out = context
        .execute(&Commands::Ls {
            location: None,
            format: "json".to_string(),
            no_dates: false,
        })
        .unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();
    let rows = value["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "docs");
    assert_eq!(rows[1]["name"], "readme.md");
    assert_eq!(rows[1]["size"], "3.00 KB");
    assert_eq!(rows[0]["date"], "error");
    assert_eq!(rows[1]["date"], "2024-01-02T03:04:05+00:00");
}

#[test]
fn ls_without_dates_keeps_placeholder() {
    let dir = TempDir::new().unwrap();
    let context = fixture_context(&dir);
    let out = context
        .execute(&Commands::Ls {
            location: Some("/contents".to_string()),
            format: "json".to_string(),
            no_dates: true,
        })
        .unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();
    assert!(value["rows"][1]["date"].is_null());
}

#[test]
fn ls_file_prints_redirect() {
    let dir = TempDir::new().unwrap();
    let context = fixture_context(&dir);
    let out = context
        .execute(&Commands::Ls {
            location: Some("/contents/readme.md".to_string()),
            format: "json".to_string(),
            no_dates: true,
        })
        .unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["redirect"], "https://raw.example/readme.md");
}

#[test]
fn ls_html_error_row_spans_all_columns() {
    let dir = TempDir::new().unwrap();
    let context = fixture_context(&dir);
    let out = context
        .execute(&Commands::Ls {
            location: Some("/contents/broken".to_string()),
            format: "html".to_string(),
            no_dates: true,
        })
        .unwrap();
    assert!(out.contains("colspan=\"3\""));
    assert!(out.contains("HTTP error! status: 500"));
}

#[test]
fn ls_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let context = fixture_context(&dir);
    let result = context.execute(&Commands::Ls {
        location: None,
        format: "yaml".to_string(),
        no_dates: true,
    });
    assert!(result.is_err());
}

#[test]
fn resolve_collapses_duplicate_root() {
    let dir = TempDir::new().unwrap();
    let context = fixture_context(&dir);
    let out = context
        .execute(&Commands::Resolve {
            location: "/contents/contents/docs/../docs".to_string(),
        })
        .unwrap();
    assert!(out.contains("contents/docs"));
    assert!(out.contains("memory://contents/contents/docs"));
}
