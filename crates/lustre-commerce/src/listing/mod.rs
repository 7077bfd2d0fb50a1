//! Listing pipeline: client-side sort and show-more truncation.

mod listing;
mod sort;

pub use listing::{Listing, DEFAULT_VISIBLE};
pub use sort::{SortKey, Sortable};
