//! Infinite-scroll listing controller
//!
//! Accumulates pages for one filter snapshot and gates "fetch next" so at
//! most one page request is in flight. Each filter change starts a new
//! generation; results tagged with an older generation are discarded.

use crate::catalog::{Car, CarPage, CarSource, CatalogError};
use autoluxe_common::{FilterSelection, PageCursor};
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingStatus {
    /// No page has arrived yet for the current filters.
    Pending,
    Success,
    Error,
}

/// A page request handed out by [`ListingController::begin_next`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub cursor: PageCursor,
    pub filters: FilterSelection,
}

pub struct ListingController {
    filters: FilterSelection,
    generation: u64,
    pages: Vec<CarPage>,
    next_cursor: Option<PageCursor>,
    in_flight: bool,
    error: Option<CatalogError>,
}

impl ListingController {
    pub fn new(filters: FilterSelection) -> Self {
        Self {
            filters,
            generation: 0,
            pages: Vec::new(),
            next_cursor: Some(PageCursor::FIRST),
            in_flight: false,
            error: None,
        }
    }

    /// Start a new stream for `filters`. Returns the new generation id.
    ///
    /// Any request still in flight belongs to the previous generation and
    /// will be discarded on completion.
    pub fn reset(&mut self, filters: FilterSelection) -> u64 {
        self.generation += 1;
        self.filters = filters;
        self.pages.clear();
        self.next_cursor = Some(PageCursor::FIRST);
        self.in_flight = false;
        self.error = None;
        info!("Listing reset (generation {})", self.generation);
        self.generation
    }

    /// Reset if the store published a selection different from ours.
    pub fn sync_filters(&mut self, filters: &mut watch::Receiver<FilterSelection>) -> bool {
        if !filters.has_changed().unwrap_or(false) {
            return false;
        }
        let latest = filters.borrow_and_update().clone();
        if latest == self.filters {
            return false;
        }
        self.reset(latest);
        true
    }

    /// Claim the next page to fetch.
    ///
    /// Returns `None` while a request is in flight, after an error, or when
    /// the last page has been reached.
    pub fn begin_next(&mut self) -> Option<PageRequest> {
        if self.in_flight || self.error.is_some() {
            return None;
        }
        let cursor = self.next_cursor?;
        self.in_flight = true;
        Some(PageRequest {
            generation: self.generation,
            cursor,
            filters: self.filters.clone(),
        })
    }

    /// Record the outcome of a request. Returns false if it was stale.
    pub fn complete(&mut self, generation: u64, result: Result<CarPage, CatalogError>) -> bool {
        if generation != self.generation {
            debug!(
                "Discarding page from generation {generation} (current {})",
                self.generation
            );
            return false;
        }
        self.in_flight = false;

        match result {
            Ok(page) => {
                self.next_cursor = page.next_cursor();
                self.pages.push(page);
            }
            Err(e) => {
                warn!("Listing fetch failed: {e}");
                self.error = Some(e);
            }
        }
        true
    }

    /// Clear a recorded error so the failed page can be requested again.
    pub fn retry(&mut self) {
        self.error = None;
    }

    /// Fetch and record the next page, if one may be requested now.
    ///
    /// Returns true when a page was appended.
    pub async fn load_next(&mut self, source: &dyn CarSource) -> bool {
        let Some(request) = self.begin_next() else {
            return false;
        };
        let result = source.fetch_page(request.cursor, &request.filters).await;
        let ok = result.is_ok();
        self.complete(request.generation, result) && ok
    }

    /// All loaded cars, in page order.
    pub fn cars(&self) -> impl Iterator<Item = &Car> {
        self.pages.iter().flat_map(|page| page.cars.iter())
    }

    pub fn car_count(&self) -> usize {
        self.pages.iter().map(|page| page.cars.len()).sum()
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages.len()
    }

    /// Total reported by the most recent page.
    pub fn total_cars(&self) -> Option<u64> {
        self.pages.last().and_then(|page| page.total_cars)
    }

    pub fn has_next_page(&self) -> bool {
        self.error.is_none() && self.next_cursor.is_some()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&CatalogError> {
        self.error.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn status(&self) -> ListingStatus {
        if self.error.is_some() {
            ListingStatus::Error
        } else if self.pages.is_empty() {
            ListingStatus::Pending
        } else {
            ListingStatus::Success
        }
    }
}
