//! A public catalog page: one fetched collection plus filter inputs.
//!
//! The visible subset is derived from the rows and the filter. It is
//! cached as a list of row indices and recomputed only after an input
//! actually changes, so re-rendering with unchanged inputs is free.

use techhub_core::fetch::FetchOutcome;
use techhub_core::filter::{
    categories, price_bounds, CatalogFilter, Listing, PriceRange, ALL_CATEGORIES,
    DEFAULT_PRICE_RANGE,
};
use techhub_db::models::electronics::ElectronicsProduct;
use techhub_db::models::service::Service;
use techhub_db::models::software::SoftwareProduct;

use crate::backend::ListQuery;
use crate::context::AppContext;
use crate::fetcher::{fetch_public, FetchState};
use crate::records::Record;

pub type SoftwareCatalog = CatalogView<SoftwareProduct>;
pub type ElectronicsCatalog = CatalogView<ElectronicsProduct>;
pub type ServiceList = CatalogView<Service>;

#[derive(Debug)]
pub struct CatalogView<R> {
    state: FetchState<R>,
    filter: CatalogFilter,
    categories: Vec<String>,
    bounds: Option<PriceRange>,
    visible: Option<Vec<usize>>,
    recomputes: usize,
}

impl<R: Record + Listing> CatalogView<R> {
    pub fn new() -> Self {
        Self {
            state: FetchState::Loading,
            filter: CatalogFilter::default(),
            categories: vec![ALL_CATEGORIES.to_string()],
            bounds: None,
            visible: None,
            recomputes: 0,
        }
    }

    /// Mount the page: fetch the collection and show it.
    pub async fn load(ctx: &AppContext) -> Self {
        let mut view = Self::new();
        view.refresh(ctx).await;
        view
    }

    /// Re-fetch and replace the rows. Filter inputs are kept, except the
    /// price range which is reset to the new observed bounds (or cleared
    /// when nothing priced came back).
    pub async fn refresh(&mut self, ctx: &AppContext) {
        let outcome = fetch_public::<R>(ctx, ListQuery::newest_first()).await;
        self.set_outcome(outcome);
    }

    pub fn set_outcome(&mut self, outcome: FetchOutcome<R>) {
        self.categories = categories(outcome.rows());
        self.bounds = price_bounds(outcome.rows());
        self.filter.price = self.bounds;
        self.state = FetchState::Ready(outcome);
        self.visible = None;
    }

    pub fn state(&self) -> &FetchState<R> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Every fetched row, unfiltered.
    pub fn rows(&self) -> &[R] {
        self.state.rows()
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    /// `"All"` followed by each distinct category.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Range for the price slider: the observed bounds, or the default
    /// range while nothing priced has been loaded.
    pub fn price_bounds(&self) -> PriceRange {
        self.bounds.unwrap_or(DEFAULT_PRICE_RANGE)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.filter.search != search {
            self.filter.search = search;
            self.visible = None;
        }
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = Some(category.into());
        if self.filter.category != category {
            self.filter.category = category;
            self.visible = None;
        }
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        if self.filter.price != Some(range) {
            self.filter.price = Some(range);
            self.visible = None;
        }
    }

    /// Rows passing the current filter, in fetch order.
    pub fn visible(&mut self) -> Vec<&R> {
        if self.visible.is_none() {
            self.recomputes += 1;
            self.visible = Some(self.filter.matching_indices(self.state.rows()));
        }
        let rows = self.state.rows();
        self.visible
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|&i| rows.get(i))
            .collect()
    }

    /// How many times the visible subset has been derived.
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }
}

impl<R: Record + Listing> Default for CatalogView<R> {
    fn default() -> Self {
        Self::new()
    }
}
