//! Filter state store
//!
//! Single source of truth for the current [`FilterSelection`], shared by the
//! filter panel and the listing. Every mutation publishes a whole new
//! snapshot to subscribers and writes it to session storage.

use crate::storage::{self, SessionStorage};
use autoluxe_common::{FilterField, FilterPatch, FilterSelection, PriceRange};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Session storage key holding the persisted selection.
pub const FILTERS_STORAGE_KEY: &str = "car-filters";

#[derive(Serialize)]
struct PersistedFiltersRef<'a> {
    filters: &'a FilterSelection,
}

#[derive(Deserialize)]
struct PersistedFilters {
    filters: FilterSelection,
}

#[derive(Clone)]
pub struct FilterStore {
    storage: Arc<dyn SessionStorage>,
    state: Arc<watch::Sender<FilterSelection>>,
}

impl FilterStore {
    /// Create a store, hydrating from session storage when a valid snapshot
    /// is present.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let initial = match storage::get_json::<PersistedFilters>(storage.as_ref(), FILTERS_STORAGE_KEY)
        {
            Ok(Some(persisted)) => {
                debug!("Restored filters from session: {:?}", persisted.filters);
                persisted.filters
            }
            Ok(None) => FilterSelection::default(),
            Err(e) => {
                warn!("Ignoring unreadable persisted filters: {e}");
                FilterSelection::default()
            }
        };

        let (state, _) = watch::channel(initial);
        Self {
            storage,
            state: Arc::new(state),
        }
    }

    /// Snapshot of the current selection.
    pub fn current(&self) -> FilterSelection {
        self.state.borrow().clone()
    }

    /// Observe every published selection.
    pub fn subscribe(&self) -> watch::Receiver<FilterSelection> {
        self.state.subscribe()
    }

    /// Merge a partial selection (the `setAll` operation).
    pub fn set_all(&self, patch: FilterPatch) -> FilterSelection {
        debug!("Setting filters: {:?}", patch);
        self.update(|filters| filters.apply_patch(patch))
    }

    pub fn set_field(&self, field: FilterField) -> FilterSelection {
        debug!("Setting filter: {:?}", field);
        self.update(|filters| filters.set_field(field))
    }

    pub fn set_price_range(&self, range: PriceRange) -> FilterSelection {
        debug!("Setting price range: {:?}", range);
        self.update(|filters| filters.set_price_range(range))
    }

    pub fn toggle_brand(&self, brand_id: &str) -> FilterSelection {
        debug!("Toggling brand: {brand_id}");
        self.update(|filters| filters.toggle_brand(brand_id))
    }

    pub fn clear(&self) -> FilterSelection {
        info!("Clearing filters");
        self.update(|filters| *filters = FilterSelection::default())
    }

    /// Apply `mutate` and persist the result while the channel's write lock
    /// is held, so concurrent updates reach storage in publish order.
    fn update(&self, mutate: impl FnOnce(&mut FilterSelection)) -> FilterSelection {
        let mut snapshot = FilterSelection::default();
        self.state.send_if_modified(|current| {
            let mut next = current.clone();
            mutate(&mut next);
            self.persist(&next);
            snapshot = next.clone();
            if next == *current {
                false
            } else {
                *current = next;
                true
            }
        });
        snapshot
    }

    /// Best-effort write. A failure never rolls back the in-memory state.
    fn persist(&self, filters: &FilterSelection) {
        let persisted = PersistedFiltersRef { filters };
        if let Err(e) = storage::set_json(self.storage.as_ref(), FILTERS_STORAGE_KEY, &persisted) {
            warn!("Failed to persist filters: {e}");
        }
    }
}
