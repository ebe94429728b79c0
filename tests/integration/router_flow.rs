use crate::integration::support::{file, revisit, router, sample_source, visit};
use chrono::{TimeZone, Utc};
use repobrowse::router::View;
use repobrowse::source::Canned;
use repobrowse::views::DateCell;
use serde_json::json;

fn table(view: View) -> repobrowse::views::TableView {
    match view {
        View::Table(table) => table,
        View::Redirect { url, .. } => panic!("unexpected redirect to {}", url),
    }
}

#[tokio::test]
async fn root_listing_sorts_dirs_first_and_fills_dates() {
    let source = sample_source();
    let mut router = router(source.clone());

    let pending = table(router.navigate("/contents").await);
    assert!(pending.rows().iter().all(|r| r.date == DateCell::Pending));
    assert_eq!(source.commit_requests(), 0);

    let view = table(visit(&mut router, "/contents").await);
    let labels: Vec<&str> = view.rows().iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["alpha", "Beta", "my file.txt", "zeta.txt"]);

    let sizes: Vec<&str> = view.rows().iter().map(|r| r.size.as_str()).collect();
    assert_eq!(sizes, vec!["-", "-", "0.00 KB", "2.00 KB"]);

    let zeta = view.row("/contents/zeta.txt").unwrap();
    assert_eq!(
        zeta.date,
        DateCell::Loaded(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap())
    );
    assert!(view.row("/contents/my%20file.txt").is_some());
    assert_eq!(source.commit_requests(), 4);

    let report = router.last_report().unwrap();
    assert_eq!(report.fetched, 4);
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn duplicated_root_prefix_resolves_once() {
    let source = sample_source();
    let mut router = router(source.clone());

    let view = table(router.navigate("/contents/contents/alpha").await);
    assert_eq!(view.path.as_str(), "contents/alpha");
    assert_eq!(view.rows().len(), 1);
    assert!(source
        .requests()
        .contains(&"contents:contents/alpha".to_string()));
}

#[tokio::test]
async fn location_without_root_gets_prefixed() {
    let mut router = router(sample_source());
    let view = table(router.navigate("/alpha").await);
    assert_eq!(view.path.as_str(), "contents/alpha");
    let labels: Vec<&str> = view.breadcrumbs.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Home", "alpha"]);
}

#[tokio::test]
async fn back_and_forward_refetch() {
    let source = sample_source();
    let mut router = router(source.clone());

    table(router.navigate("/contents/alpha").await);
    table(router.navigate("/contents/Beta").await);

    let back = table(router.back().await.unwrap());
    assert_eq!(back.path.as_str(), "contents/alpha");
    assert!(router.navigation().can_go_forward());

    let forward = table(router.forward().await.unwrap());
    assert_eq!(forward.path.as_str(), "contents/Beta");
    assert!(router.forward().await.is_none());

    let alpha_fetches = source
        .requests()
        .iter()
        .filter(|r| *r == "contents:contents/alpha")
        .count();
    assert_eq!(alpha_fetches, 2);
}

#[tokio::test]
async fn file_location_redirects_to_download_url() {
    let mut router = router(sample_source());
    let view = router.navigate("/contents/zeta.txt").await;
    match view {
        View::Redirect { url, path } => {
            assert_eq!(url, "https://raw.example/contents/zeta.txt");
            assert_eq!(path.as_str(), "contents/zeta.txt");
        }
        View::Table(_) => panic!("expected redirect"),
    }
    assert_eq!(router.current().as_str(), "contents");
}

#[tokio::test]
async fn http_failure_renders_single_error_row() {
    let source = sample_source();
    source.set_contents("contents/locked", Canned::Status { status: 403 });
    let mut router = router(source);

    let view = table(router.navigate("/contents/locked").await);
    assert!(view.is_error());
    assert_eq!(view.row_count(), 1);
    let repobrowse::views::TableBody::Error(message) = &view.body else {
        panic!("expected error body");
    };
    assert!(message.contains("HTTP error! status: 403"));
    assert!(message.starts_with("Error loading content:"));
}

#[tokio::test]
async fn one_failed_date_does_not_affect_siblings() {
    let source = sample_source();
    source.set_commit("contents/alpha", Canned::Network {
        network_error: "connection reset".to_string(),
    });
    source.set_commit("contents/Beta", Canned::Json(json!([])));
    let mut router = router(source);

    let view = table(visit(&mut router, "/contents").await);
    assert_eq!(view.row("/contents/alpha").unwrap().date, DateCell::Failed);
    assert_eq!(view.row("/contents/Beta").unwrap().date, DateCell::Failed);
    assert!(matches!(
        view.row("/contents/zeta.txt").unwrap().date,
        DateCell::Loaded(_)
    ));
    let report = router.last_report().unwrap();
    assert_eq!(report.failed, 2);
    assert_eq!(report.fetched, 2);
}

#[tokio::test]
async fn empty_directory_renders_no_rows() {
    let mut router = router(sample_source());
    let view = table(router.navigate("/contents/Beta").await);
    assert!(!view.is_error());
    assert_eq!(view.row_count(), 0);
}

#[tokio::test]
async fn file_without_commit_history_shows_error_date() {
    let source = sample_source();
    source.set_contents(
        "contents",
        Canned::Json(json!([file("new.txt", "contents/new.txt", 10)])),
    );
    let mut router = router(source);
    let view = table(revisit(&mut router).await);
    assert_eq!(view.rows()[0].date, DateCell::Failed);
    assert_eq!(view.rows()[0].date.display(), "Error");
}
