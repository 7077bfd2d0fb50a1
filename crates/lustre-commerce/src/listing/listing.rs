//! Sort + truncate view over a fetched product collection.

use crate::listing::{SortKey, Sortable};

/// Items shown before the shopper asks to see everything.
pub const DEFAULT_VISIBLE: usize = 8;

/// What a listing page renders from a fetched collection.
///
/// Holds the items in fetch order, the selected sort key, and the
/// view-all toggle. The sorted sequence is recomputed on every state
/// change, and truncation always applies to the current sorted sequence.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    fetched: Vec<T>,
    sorted: Vec<T>,
    sort: SortKey,
    show_all: bool,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            fetched: Vec::new(),
            sorted: Vec::new(),
            sort: SortKey::Featured,
            show_all: false,
        }
    }
}

impl<T: Sortable + Clone> Listing<T> {
    /// Create a listing over `items` in fetch order.
    pub fn new(items: Vec<T>) -> Self {
        let mut listing = Self::default();
        listing.set_items(items);
        listing
    }

    /// Replace the fetched collection. Sort and toggle are kept.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.fetched = items;
        self.recompute();
    }

    /// Append a further page of results in fetch order.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.fetched.extend(items);
        self.recompute();
    }

    /// Select a sort key. The view-all toggle is kept.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.recompute();
    }

    /// Show every sorted item.
    pub fn show_all(&mut self) {
        self.show_all = true;
    }

    /// Go back to the first [`DEFAULT_VISIBLE`] items.
    pub fn show_less(&mut self) {
        self.show_all = false;
    }

    /// Flip the view-all toggle.
    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
    }

    fn recompute(&mut self) {
        let mut sorted = self.fetched.clone();
        self.sort.sort(&mut sorted);
        self.sorted = sorted;
    }
}

impl<T> Listing<T> {
    /// Items to render: all sorted items, or the first [`DEFAULT_VISIBLE`].
    pub fn visible(&self) -> &[T] {
        if self.show_all {
            &self.sorted
        } else {
            &self.sorted[..self.sorted.len().min(DEFAULT_VISIBLE)]
        }
    }

    /// The full sorted sequence.
    pub fn sorted(&self) -> &[T] {
        &self.sorted
    }

    /// Items in the order the server returned them.
    pub fn fetched(&self) -> &[T] {
        &self.fetched
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn is_showing_all(&self) -> bool {
        self.show_all
    }

    /// Whether the view-all / show-less control should be rendered.
    pub fn has_view_all_control(&self) -> bool {
        self.sorted.len() > DEFAULT_VISIBLE
    }

    /// Number of sorted items hidden by truncation.
    pub fn hidden_count(&self) -> usize {
        self.sorted.len() - self.visible().len()
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProductRecord, ProductType};

    fn catalog(n: usize) -> Vec<ProductRecord> {
        (0..n)
            .map(|i| {
                let mut p = ProductRecord::new(
                    format!("p{}", i),
                    format!("Product {}", i),
                    "Brand",
                    (n - i) as f64,
                    ProductType::Skincare,
                );
                p.rating = (i % 5) as f64;
                p
            })
            .collect()
    }

    fn visible_ids(listing: &Listing<ProductRecord>) -> Vec<String> {
        listing
            .visible()
            .iter()
            .map(|p| p.id.to_string())
            .collect()
    }

    #[test]
    fn test_default_view_truncates_to_eight() {
        let listing = Listing::new(catalog(20));
        assert_eq!(listing.visible().len(), DEFAULT_VISIBLE);
        assert!(listing.has_view_all_control());
        assert_eq!(listing.hidden_count(), 12);
    }

    #[test]
    fn test_view_all_shows_everything() {
        let mut listing = Listing::new(catalog(20));
        listing.show_all();
        assert_eq!(listing.visible().len(), 20);
        assert_eq!(listing.hidden_count(), 0);

        listing.toggle_show_all();
        assert_eq!(listing.visible().len(), DEFAULT_VISIBLE);
    }

    #[test]
    fn test_short_listing_has_no_control() {
        for n in [0, 1, 7, 8] {
            let listing = Listing::new(catalog(n));
            assert_eq!(listing.visible().len(), n);
            assert!(!listing.has_view_all_control(), "n = {}", n);
        }
        assert!(Listing::new(catalog(9)).has_view_all_control());
    }

    #[test]
    fn test_resort_retruncates_from_new_order() {
        let mut listing = Listing::new(catalog(12));
        assert_eq!(visible_ids(&listing)[0], "p0");

        // Prices descend with index, so ascending price starts at the end.
        listing.set_sort(SortKey::PriceLowToHigh);
        let ids = visible_ids(&listing);
        assert_eq!(ids.len(), DEFAULT_VISIBLE);
        assert_eq!(ids[0], "p11");
        assert_eq!(ids[7], "p4");
    }

    #[test]
    fn test_resort_keeps_view_all() {
        let mut listing = Listing::new(catalog(12));
        listing.show_all();
        listing.set_sort(SortKey::Rating);
        assert!(listing.is_showing_all());
        assert_eq!(listing.visible().len(), 12);
    }

    #[test]
    fn test_extend_appends_in_fetch_order() {
        let mut all = catalog(10);
        let second = all.split_off(6);
        let mut listing = Listing::new(all);
        listing.extend(second);

        assert_eq!(listing.len(), 10);
        assert_eq!(listing.fetched()[6].id.as_str(), "p6");
    }
}
