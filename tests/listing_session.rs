//! End-to-end listing flows: session driver, view store, and a file backend.

use manhwadex::app::{Event, ListingPhase, ListingSession, PageKind, SortKey, SourceFilter};
use manhwadex::catalog::{Aggregator, CatalogSource};
use manhwadex::storage::{JsonKeyValueStore, ViewStore};
use manhwadex::suggest::{SuggestionBox, SuggestionDebouncer};
use manhwadex::CatalogItem;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

const PAGE_SIZE: u64 = 25;

/// Five pages of top titles; odd ids are Action webtoons, even ids Drama.
///
/// While `down` is set, every top page comes back empty, the way the client
/// reports a failed request.
#[derive(Default)]
struct ShelfCatalog {
    top_calls: AtomicUsize,
    searches: Mutex<Vec<String>>,
    down: AtomicBool,
}

impl ShelfCatalog {
    fn item(id: u64) -> CatalogItem {
        let genres: &[&str] = if id % 2 == 1 { &["Action", "Webtoon"] } else { &["Drama"] };
        CatalogItem::new(id, format!("Title {id}"))
            .with_genres(genres.iter().copied())
            .with_rank(u32::try_from(id).unwrap())
            .with_score(f64::from(u32::try_from(id % 10).unwrap()))
    }

    fn top_calls(&self) -> usize {
        self.top_calls.load(Ordering::SeqCst)
    }
}

impl CatalogSource for ShelfCatalog {
    async fn fetch_top_page(&self, page: u32) -> Vec<CatalogItem> {
        self.top_calls.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) || page == 0 || page > 5 {
            return Vec::new();
        }
        let first = u64::from(page - 1) * PAGE_SIZE + 1;
        (first..first + PAGE_SIZE).map(Self::item).collect()
    }

    async fn search(&self, query: &str) -> Vec<CatalogItem> {
        if query.is_empty() {
            return Vec::new();
        }
        self.searches.lock().unwrap().push(query.to_string());
        vec![CatalogItem::new(900, format!("{query} result")), CatalogItem::new(901, "Other")]
    }

    async fn fetch_by_id(&self, id: u64) -> Option<CatalogItem> {
        (1..=5 * PAGE_SIZE).contains(&id).then(|| Self::item(id))
    }
}

fn open_session(
    page: PageKind,
    catalog: &Arc<ShelfCatalog>,
    views: &Path,
) -> ListingSession<ShelfCatalog, JsonKeyValueStore> {
    let store = ViewStore::new(JsonKeyValueStore::new(views.to_path_buf()).unwrap());
    ListingSession::new(page, Arc::clone(catalog), Aggregator::new(Arc::clone(catalog)), store)
}

#[tokio::test(start_paused = true)]
async fn browse_state_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let views = dir.path().join("views.json");
    let catalog = Arc::new(ShelfCatalog::default());

    {
        let mut session = open_session(PageKind::Browse, &catalog, &views);
        session.mount(None).await.unwrap();
        assert_eq!(session.state().view.pool.len(), 120);
        assert_eq!(catalog.top_calls(), 5);

        session.dispatch(Event::ToggleGenre("Action".into())).await.unwrap();
        session.dispatch(Event::SetSort(SortKey::Score)).await.unwrap();
    }

    let mut reopened = open_session(PageKind::Browse, &catalog, &views);
    reopened.mount(None).await.unwrap();

    assert_eq!(catalog.top_calls(), 5, "restored pool must not refetch");
    assert_eq!(reopened.state().phase, ListingPhase::Ready);
    assert_eq!(reopened.state().view.selected_genres, vec!["Action".to_string()]);
    assert_eq!(reopened.state().view.sort, SortKey::Score);

    let shown = reopened.displayed();
    assert_eq!(shown.len(), 60);
    assert!(shown.iter().all(|item| item.genres.iter().any(|g| g == "Action")));
    assert!(shown.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test(start_paused = true)]
async fn reset_clears_criteria_and_refetches() {
    let dir = TempDir::new().unwrap();
    let views = dir.path().join("views.json");
    let catalog = Arc::new(ShelfCatalog::default());

    let mut session = open_session(PageKind::Browse, &catalog, &views);
    session.mount(None).await.unwrap();
    session.dispatch(Event::SetSource(SourceFilter::NonWebtoon)).await.unwrap();
    assert!(session.displayed().iter().all(|item| !item.is_webtoon()));

    session.dispatch(Event::Reset).await.unwrap();

    assert_eq!(catalog.top_calls(), 10);
    assert_eq!(session.state().view.source, SourceFilter::All);
    assert_eq!(session.displayed().len(), 120);
}

#[tokio::test(start_paused = true)]
async fn pages_keep_independent_state() {
    let dir = TempDir::new().unwrap();
    let views = dir.path().join("views.json");
    let catalog = Arc::new(ShelfCatalog::default());

    let mut ranking = open_session(PageKind::Ranking, &catalog, &views);
    ranking.mount(None).await.unwrap();
    ranking.dispatch(Event::QueryEdited("title 1".into())).await.unwrap();
    let ranked: Vec<u64> = ranking.displayed().iter().map(|item| item.id).collect();
    drop(ranking);

    assert_eq!(ranked.first(), Some(&1));
    assert!(ranked.windows(2).all(|w| w[0] < w[1]));

    let mut genres = open_session(PageKind::Genres, &catalog, &views);
    genres.mount(None).await.unwrap();
    assert_eq!(genres.state().view.query, "");

    genres.dispatch(Event::PickGenre("Romance".into())).await.unwrap();
    assert_eq!(catalog.searches.lock().unwrap().as_slice(), ["Romance"]);
    assert_eq!(genres.displayed()[0].title, "Romance result");
}

#[tokio::test(start_paused = true)]
async fn ranking_refetches_after_a_failed_load() {
    let dir = TempDir::new().unwrap();
    let views = dir.path().join("views.json");
    let catalog = Arc::new(ShelfCatalog::default());

    catalog.down.store(true, Ordering::SeqCst);
    {
        let mut session = open_session(PageKind::Ranking, &catalog, &views);
        session.mount(None).await.unwrap();
        assert_eq!(session.state().phase, ListingPhase::Ready);
        assert!(session.displayed().is_empty());
    }
    let calls_while_down = catalog.top_calls();

    catalog.down.store(false, Ordering::SeqCst);
    let mut reopened = open_session(PageKind::Ranking, &catalog, &views);
    reopened.mount(None).await.unwrap();

    assert!(catalog.top_calls() > calls_while_down, "an empty pool must not be restored");
    assert_eq!(reopened.displayed().len(), 125);

    drop(reopened);
    let mut third = open_session(PageKind::Ranking, &catalog, &views);
    let calls_before = catalog.top_calls();
    third.mount(None).await.unwrap();
    assert_eq!(catalog.top_calls(), calls_before, "a real pool is restored from the cache");
}

#[tokio::test(start_paused = true)]
async fn ranking_filter_does_not_outlive_the_session() {
    let dir = TempDir::new().unwrap();
    let views = dir.path().join("views.json");
    let catalog = Arc::new(ShelfCatalog::default());

    {
        let mut session = open_session(PageKind::Ranking, &catalog, &views);
        session.mount(None).await.unwrap();
        session.dispatch(Event::QueryEdited("title 7".into())).await.unwrap();
        assert!(session.displayed().len() < 125);
    }

    let mut reopened = open_session(PageKind::Ranking, &catalog, &views);
    reopened.mount(None).await.unwrap();

    assert_eq!(reopened.state().view.query, "");
    assert_eq!(reopened.displayed().len(), 125);
}

#[tokio::test(start_paused = true)]
async fn browse_deep_link_searches_immediately() {
    let dir = TempDir::new().unwrap();
    let catalog = Arc::new(ShelfCatalog::default());

    let mut session = open_session(PageKind::Browse, &catalog, &dir.path().join("views.json"));
    session.mount(Some("  tower  ".into())).await.unwrap();

    assert_eq!(catalog.top_calls(), 0);
    assert_eq!(catalog.searches.lock().unwrap().as_slice(), ["tower"]);
    assert_eq!(session.state().view.query, "tower");
}

#[tokio::test(start_paused = true)]
async fn typing_in_browse_feeds_the_suggestion_box() {
    let dir = TempDir::new().unwrap();
    let catalog = Arc::new(ShelfCatalog::default());
    let debouncer = SuggestionDebouncer::new(Arc::clone(&catalog), SuggestionBox::Compact);

    let mut session = open_session(PageKind::Browse, &catalog, &dir.path().join("views.json"))
        .with_debouncer(debouncer);
    session.mount(None).await.unwrap();
    let mut suggestions = session.suggestions().unwrap();

    for partial in ["s", "so", "sol", "solo"] {
        session.dispatch(Event::QueryEdited(partial.into())).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    tokio::time::sleep(Duration::from_millis(400)).await;
    suggestions.changed().await.unwrap();

    assert_eq!(catalog.searches.lock().unwrap().as_slice(), ["solo"]);
    assert_eq!(suggestions.borrow()[0].title, "solo result");
}
