use repobrowse::enrich::DateEnricher;
use repobrowse::fetcher::DirectoryFetcher;
use repobrowse::path::PathResolver;
use repobrowse::router::{Router, View};
use repobrowse::source::{Canned, MemorySource};
use repobrowse::store::DateCache;
use serde_json::{json, Value};
use std::sync::Arc;

pub const ROOT: &str = "contents";

pub fn dir(name: &str, path: &str) -> Value {
    json!({"name": name, "path": path, "type": "dir", "size": 0})
}

pub fn file(name: &str, path: &str, size: u64) -> Value {
    json!({
        "name": name,
        "path": path,
        "type": "file",
        "size": size,
        "download_url": format!("https://raw.example/{}", path),
    })
}

pub fn commit(date: &str) -> Canned {
    Canned::Json(json!([{"commit": {"committer": {"date": date}}}]))
}

/// A small repository:
///
/// ```text
/// contents/
///   zeta.txt (2048 bytes)
///   alpha/
///     notes.md (512 bytes)
///   Beta/
///   my file.txt (0 bytes)
/// ```
pub fn sample_source() -> Arc<MemorySource> {
    let source = Arc::new(MemorySource::new());
    source.set_contents(
        "contents",
        Canned::Json(json!([
            file("zeta.txt", "contents/zeta.txt", 2048),
            dir("alpha", "contents/alpha"),
            file("my file.txt", "contents/my file.txt", 0),
            dir("Beta", "contents/Beta"),
        ])),
    );
    source.set_contents(
        "contents/alpha",
        Canned::Json(json!([file("notes.md", "contents/alpha/notes.md", 512)])),
    );
    source.set_contents("contents/Beta", Canned::Json(json!([])));
    source.set_contents(
        "contents/zeta.txt",
        Canned::Json(file("zeta.txt", "contents/zeta.txt", 2048)),
    );
    source.set_commit("contents/zeta.txt", commit("2024-03-01T10:00:00Z"));
    source.set_commit("contents/alpha", commit("2024-02-01T10:00:00Z"));
    source.set_commit("contents/Beta", commit("2024-01-01T10:00:00Z"));
    source.set_commit("contents/my file.txt", commit("2023-12-01T10:00:00Z"));
    source.set_commit("contents/alpha/notes.md", commit("2024-02-01T09:00:00Z"));
    source
}

pub fn router(source: Arc<MemorySource>) -> Router {
    Router::new(
        PathResolver::new(ROOT),
        DirectoryFetcher::new(source.clone()),
        Some(DateEnricher::new(source)),
    )
}

pub fn cached_router(source: Arc<MemorySource>, cache: Arc<dyn DateCache>) -> Router {
    Router::new(
        PathResolver::new(ROOT),
        DirectoryFetcher::new(source.clone()),
        Some(DateEnricher::new(source).with_cache(cache, chrono::Duration::hours(24))),
    )
}

/// Navigate and wait for the dates, the way `ls` does.
pub async fn visit(router: &mut Router, location: &str) -> View {
    let view = router.navigate(location).await;
    enrich(router, view).await
}

/// Reload the current path and wait for the dates.
pub async fn revisit(router: &mut Router) -> View {
    let view = router.reload().await;
    enrich(router, view).await
}

async fn enrich(router: &mut Router, mut view: View) -> View {
    if let View::Table(table) = &mut view {
        router.enrich(table).await;
    }
    view
}
