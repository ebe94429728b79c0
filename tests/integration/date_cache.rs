use crate::integration::support::{cached_router, revisit, sample_source, visit};
use chrono::{Duration, TimeZone, Utc};
use repobrowse::router::View;
use repobrowse::store::{DateCache, DateCacheEntry, SledDateCache};
use repobrowse::views::DateCell;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn second_visit_within_window_skips_date_requests() {
    let source = sample_source();
    let cache: Arc<dyn DateCache> = Arc::new(SledDateCache::temporary().unwrap());
    let mut router = cached_router(source.clone(), cache);

    visit(&mut router, "/contents").await;
    assert_eq!(source.commit_requests(), 4);

    let View::Table(view) = revisit(&mut router).await else {
        panic!("expected table");
    };
    assert_eq!(source.commit_requests(), 4);
    assert_eq!(router.last_report().unwrap().cached, 4);
    assert!(view.rows().iter().all(|r| matches!(r.date, DateCell::Loaded(_))));
}

#[tokio::test]
async fn stale_entry_is_refetched_and_overwritten() {
    let source = sample_source();
    let cache = Arc::new(SledDateCache::temporary().unwrap());
    let old = Utc::now() - Duration::hours(25);
    let stale_date = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    cache
        .put("contents/zeta.txt:2048", &DateCacheEntry::new(stale_date, old))
        .unwrap();

    let mut router = cached_router(source.clone(), cache.clone());
    let View::Table(view) = visit(&mut router, "/contents").await else {
        panic!("expected table");
    };

    let fresh = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    assert_eq!(
        view.row("/contents/zeta.txt").unwrap().date,
        DateCell::Loaded(fresh)
    );
    let stored = cache.get("contents/zeta.txt:2048").unwrap().unwrap();
    assert_eq!(stored.parsed_date(), Some(fresh));
    assert!(stored.timestamp > old.timestamp_millis());
}

#[tokio::test]
async fn size_change_misses_cache() {
    let source = sample_source();
    let cache = Arc::new(SledDateCache::temporary().unwrap());
    let stale_date = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    cache
        .put(
            "contents/zeta.txt:1024",
            &DateCacheEntry::new(stale_date, Utc::now()),
        )
        .unwrap();

    let mut router = cached_router(source.clone(), cache);
    let View::Table(view) = visit(&mut router, "/contents").await else {
        panic!("expected table");
    };
    assert_ne!(
        view.row("/contents/zeta.txt").unwrap().date,
        DateCell::Loaded(stale_date)
    );
    assert_eq!(source.commit_requests(), 4);
}

#[tokio::test]
async fn cache_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let source = sample_source();
    {
        let cache = Arc::new(SledDateCache::open(dir.path()).unwrap());
        let mut router = cached_router(source.clone(), cache.clone());
        visit(&mut router, "/contents/alpha").await;
        cache.flush().unwrap();
    }
    assert_eq!(source.commit_requests(), 1);

    let cache = Arc::new(SledDateCache::open(dir.path()).unwrap());
    assert_eq!(cache.len(), 1);
    let mut router = cached_router(source.clone(), cache);
    visit(&mut router, "/contents/alpha").await;
    assert_eq!(source.commit_requests(), 1);
}

#[tokio::test]
async fn failed_dates_are_not_cached() {
    let source = sample_source();
    source.set_commit(
        "contents/alpha",
        repobrowse::source::Canned::Status { status: 500 },
    );
    let cache = Arc::new(SledDateCache::temporary().unwrap());
    let mut router = cached_router(source, cache.clone());
    visit(&mut router, "/contents").await;
    assert_eq!(cache.len(), 3);
    assert!(cache.get("contents/alpha:0").unwrap().is_none());
}
