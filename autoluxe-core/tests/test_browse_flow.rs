mod support;

use autoluxe_common::{FilterField, FilterSelection};
use autoluxe_core::catalog::CatalogClient;
use autoluxe_core::filter_store::{FilterStore, FILTERS_STORAGE_KEY};
use autoluxe_core::listing::{ListingController, ListingStatus};
use autoluxe_core::query_codec;
use autoluxe_core::storage::{FileSessionStorage, SessionStorage};
use std::sync::Arc;
use support::{spawn_catalog, tracing_init, CatalogState};
use tempfile::TempDir;

#[tokio::test]
async fn shared_link_drives_listing_until_last_page() {
    tracing_init();
    let state = CatalogState::new(3);
    let client = CatalogClient::new(spawn_catalog(state.clone()).await, 2);

    let temp = TempDir::new().unwrap();
    let storage = Arc::new(FileSessionStorage::open(temp.path().join("filters")).unwrap());
    let store = FilterStore::new(storage.clone());
    let mut updates = store.subscribe();

    let applied = query_codec::apply_query(&store, "?brands=bentley,rolls-royce&type=suv");
    assert_eq!(applied.brands, vec!["bentley", "rolls-royce"]);

    let mut listing = ListingController::new(FilterSelection::default());
    assert!(listing.sync_filters(&mut updates));
    assert_eq!(listing.status(), ListingStatus::Pending);

    while listing.load_next(&client).await {}

    assert_eq!(listing.status(), ListingStatus::Success);
    assert_eq!(listing.pages_loaded(), 3);
    assert_eq!(listing.car_count(), 6);
    assert!(!listing.has_next_page());
    assert!(listing.cars().all(|car| car.make == "bentley"));

    let pages: Vec<String> = state
        .recorded()
        .iter()
        .map(|r| r.query["page"].clone())
        .collect();
    assert_eq!(pages, vec!["1", "2", "3"]);

    // The selection survives a restart of the session.
    assert!(storage.get_item(FILTERS_STORAGE_KEY).unwrap().is_some());
    let reopened = FilterStore::new(Arc::new(
        FileSessionStorage::open(temp.path().join("filters")).unwrap(),
    ));
    assert_eq!(reopened.current(), applied);
}

#[tokio::test]
async fn filter_change_mid_scroll_restarts_from_first_page() {
    tracing_init();
    let state = CatalogState::new(5);
    let client = CatalogClient::new(spawn_catalog(state.clone()).await, 2);

    let store = FilterStore::new(Arc::new(
        autoluxe_core::storage::MemorySessionStorage::new(),
    ));
    let mut updates = store.subscribe();
    let mut listing = ListingController::new(store.current());

    assert!(listing.load_next(&client).await);
    let stale = listing.begin_next().unwrap();
    assert_eq!(stale.cursor.get(), 2);

    store.set_field(FilterField::Transmission("manual".into()));
    assert!(listing.sync_filters(&mut updates));

    // The page-2 response for the old filters arrives after the reset.
    let late = client.fetch_page(stale.cursor, &stale.filters).await;
    assert!(!listing.complete(stale.generation, late));
    assert_eq!(listing.car_count(), 0);

    assert!(listing.load_next(&client).await);
    let last = state.recorded().last().cloned().unwrap();
    assert_eq!(last.query["page"], "1");
    assert_eq!(last.query["transmission"], "manual");
    assert_eq!(listing.car_count(), 2);
}

#[tokio::test]
async fn ending_the_session_forgets_filters() {
    tracing_init();
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("filters");

    let storage = Arc::new(FileSessionStorage::open(&dir).unwrap());
    FilterStore::new(storage.clone()).toggle_brand("porsche");
    drop(storage);

    FileSessionStorage::open(&dir).unwrap().end_session().unwrap();

    let store = FilterStore::new(Arc::new(FileSessionStorage::open(&dir).unwrap()));
    assert_eq!(store.current(), FilterSelection::default());
    assert_eq!(query_codec::listing_href(&store.current()), "/");
}
