//! Client-side catalog filtering.
//!
//! A pure predicate over one fetched collection: text search on title or
//! description, category equality and an inclusive price range. There is
//! no server-side filtering and no pagination; the whole collection is
//! re-evaluated whenever an input changes.

use serde::{Deserialize, Serialize};

/// Category sentinel meaning "no category constraint".
pub const ALL_CATEGORIES: &str = "All";

/// Price slider range shown before any electronics data has arrived.
pub const DEFAULT_PRICE_RANGE: PriceRange = PriceRange {
    min: 0.0,
    max: 2000.0,
};

/// Anything that can be shown in a filtered catalog grid.
pub trait Listing {
    fn title(&self) -> &str;
    fn description(&self) -> &str;

    fn category(&self) -> Option<&str> {
        None
    }

    fn price(&self) -> Option<f64> {
        None
    }
}

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Current filter inputs of a catalog page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub search: String,
    /// `None`, `""` and [`ALL_CATEGORIES`] all mean "any category".
    pub category: Option<String>,
    pub price: Option<PriceRange>,
}

impl CatalogFilter {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }

    /// The category constraint, if there is one.
    fn category_constraint(&self) -> Option<&str> {
        match self.category.as_deref() {
            None | Some("") | Some(ALL_CATEGORIES) => None,
            Some(c) => Some(c),
        }
    }

    /// Whether a single item passes every active constraint.
    pub fn matches<T: Listing + ?Sized>(&self, item: &T) -> bool {
        self.matches_search(item) && self.matches_category(item) && self.matches_price(item)
    }

    fn matches_search<T: Listing + ?Sized>(&self, item: &T) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        item.title().to_lowercase().contains(&needle)
            || item.description().to_lowercase().contains(&needle)
    }

    fn matches_category<T: Listing + ?Sized>(&self, item: &T) -> bool {
        match self.category_constraint() {
            None => true,
            Some(wanted) => item.category() == Some(wanted),
        }
    }

    fn matches_price<T: Listing + ?Sized>(&self, item: &T) -> bool {
        match (self.price, item.price()) {
            (Some(range), Some(price)) => range.contains(price),
            _ => true,
        }
    }

    /// Filter a collection, preserving its order.
    pub fn apply<'a, T: Listing>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }

    /// Indices of the matching items, preserving order.
    pub fn matching_indices<T: Listing>(&self, items: &[T]) -> Vec<usize> {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(*item))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Category options for a collection: the sentinel first, then each
/// distinct category in first-seen order.
pub fn categories<T: Listing>(items: &[T]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for category in items.iter().filter_map(Listing::category) {
        if !out.iter().any(|c| c == category) {
            out.push(category.to_string());
        }
    }
    out
}

/// Observed minimum and maximum price, or `None` when nothing is priced.
pub fn price_bounds<T: Listing>(items: &[T]) -> Option<PriceRange> {
    items
        .iter()
        .filter_map(Listing::price)
        .fold(None, |acc: Option<PriceRange>, p| match acc {
            None => Some(PriceRange::new(p, p)),
            Some(r) => Some(PriceRange::new(r.min.min(p), r.max.max(p))),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
