//! Shared catalog types with no I/O.
//!
//! Used by `autoluxe-core` for the filter store, the query codec and the
//! listing controller.

mod filters;
pub mod options;
mod pagination;

pub use filters::{FilterField, FilterPatch, FilterSelection, PriceRange};
pub use pagination::{PageCursor, PageInfo};
