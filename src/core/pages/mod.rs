//! Page view-models.
//!
//! A page is one or more independently loaded sections plus a fetch-cycle
//! tracker. Every section settles on its own: a failing endpoint only moves
//! its own section to [`LoadState::Error`], whatever else the page shows.

pub mod dashboard;
pub mod item;
pub mod resources;
pub mod screen;

use crate::api::CatalogApi;
use crate::core::cycle::{Fetch, FetchCycles, Settled};
use crate::core::load_state::LoadState;
use crate::error::ApiError;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::debug;

pub use dashboard::{DashboardPage, DashboardResults};
pub use item::{ItemDetailPage, ItemResults};
pub use resources::{
    ApiRoot, InventoryItemResource, InventoryList, ItemImages, LegoSetDetail, LegoSetList,
    Messages, Resource, Statistics,
};
pub use screen::{FilterChange, Screen, ScreenFetch, ScreenSettled};

/// Fetch of a single resource
pub type ResourceFetch<R> = Fetch<Result<<R as Resource>::Data, ApiError>>;

#[async_trait]
pub trait PageModel: Send {
    type Output: Send + 'static;

    /// Start a new fetch cycle. Every section goes back to `Loading`.
    fn begin(&mut self) -> Fetch<Self::Output>;

    /// Apply a settled fetch. Returns false when it was discarded.
    fn settle(&mut self, settled: Settled<Self::Output>) -> bool;

    fn is_loading(&self) -> bool;

    /// True when every section ended in an error
    fn all_failed(&self) -> bool;

    /// Mount: begin a cycle and wait for it to settle
    async fn load(&mut self) {
        let fetch = self.begin();
        let settled = fetch.run().await;
        self.settle(settled);
    }
}

/// One independently loaded resource on a page
pub struct Section<R: Resource> {
    query: R::Query,
    state: LoadState<R::Data>,
}

impl<R: Resource> Section<R> {
    pub fn new(query: R::Query) -> Self {
        Self {
            query,
            state: LoadState::Loading,
        }
    }

    pub fn query(&self) -> &R::Query {
        &self.query
    }

    pub fn state(&self) -> &LoadState<R::Data> {
        &self.state
    }

    pub(crate) fn set_query(&mut self, query: R::Query) {
        self.query = query;
    }

    /// Reset to `Loading` and build the request for the current query
    pub(crate) fn start(
        &mut self,
        api: Arc<dyn CatalogApi>,
    ) -> BoxFuture<'static, Result<R::Data, ApiError>> {
        self.state = LoadState::Loading;
        R::fetch(api, self.query.clone())
    }

    pub(crate) fn apply(&mut self, result: Result<R::Data, ApiError>) {
        self.state = LoadState::from_result(result, R::MESSAGES.label, R::MESSAGES.error);
    }
}

/// Page showing exactly one resource
pub struct Page<R: Resource> {
    api: Arc<dyn CatalogApi>,
    section: Section<R>,
    cycles: FetchCycles,
}

impl<R: Resource> Page<R> {
    pub fn new(api: Arc<dyn CatalogApi>, query: R::Query) -> Self {
        Self {
            api,
            section: Section::new(query),
            cycles: FetchCycles::new(),
        }
    }

    pub fn query(&self) -> &R::Query {
        self.section.query()
    }

    pub fn state(&self) -> &LoadState<R::Data> {
        self.section.state()
    }

    pub fn section(&self) -> &Section<R> {
        &self.section
    }

    /// Edit the query. Starts exactly one new cycle when the query actually
    /// changed, none otherwise.
    pub fn update_query(&mut self, edit: impl FnOnce(&mut R::Query)) -> Option<ResourceFetch<R>> {
        let mut next = self.section.query().clone();
        edit(&mut next);
        if &next == self.section.query() {
            return None;
        }
        self.section.set_query(next);
        Some(self.begin())
    }
}

impl<R: Resource> PageModel for Page<R> {
    type Output = Result<R::Data, ApiError>;

    fn begin(&mut self) -> Fetch<Self::Output> {
        let ticket = self.cycles.begin();
        debug!(page = R::MESSAGES.label, generation = ticket.generation, "fetch cycle started");
        let request = self.section.start(Arc::clone(&self.api));
        Fetch::new(ticket, request)
    }

    fn settle(&mut self, settled: Settled<Self::Output>) -> bool {
        let Some(outcome) = settled.outcome else {
            debug!(page = R::MESSAGES.label, generation = settled.generation, "cancelled fetch dropped");
            return false;
        };
        if !self.cycles.finish(settled.generation) {
            debug!(page = R::MESSAGES.label, generation = settled.generation, "stale result discarded");
            return false;
        }
        self.section.apply(outcome);
        true
    }

    fn is_loading(&self) -> bool {
        self.section.state().is_loading()
    }

    fn all_failed(&self) -> bool {
        self.section.state().is_error()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FakeApi;
    use super::*;
    use crate::api::models::InventoryFilter;

    fn inventory_page(api: Arc<FakeApi>) -> Page<InventoryList> {
        Page::new(api, InventoryFilter::page_default())
    }

    #[tokio::test]
    async fn test_page_starts_loading_then_loads() {
        let api = Arc::new(FakeApi::default());
        let mut page = inventory_page(api.clone());
        assert!(page.is_loading());

        page.load().await;
        assert_eq!(page.state().data().map(Vec::len), Some(0));
        assert_eq!(api.calls(), vec!["inventory Some(100)"]);
    }

    #[tokio::test]
    async fn test_unchanged_query_starts_no_cycle() {
        let api = Arc::new(FakeApi::default());
        let mut page = inventory_page(api);
        page.load().await;

        assert!(page.update_query(|f| f.limit = Some(100)).is_none());
        let fetch = page.update_query(|f| f.limit = Some(5));
        assert!(fetch.is_some());
        assert!(page.is_loading());
        assert_eq!(page.query().limit, Some(5));
    }

    #[tokio::test]
    async fn test_superseded_result_is_discarded() {
        let api = Arc::new(FakeApi::default());
        let mut page = inventory_page(api);

        let stale = page.begin();
        let fresh = page.begin();

        let stale_settled = stale.run().await;
        assert!(!page.settle(stale_settled));
        assert!(page.is_loading());

        let fresh_settled = fresh.run().await;
        assert!(page.settle(fresh_settled));
        assert!(page.state().is_loaded());
    }

    #[tokio::test]
    async fn test_failure_sets_error_message() {
        let api = Arc::new(FakeApi {
            fail_stats: true,
            ..FakeApi::default()
        });
        let mut page: Page<Statistics> = Page::new(api, ());
        page.load().await;
        assert_eq!(page.state().error(), Some("Failed to fetch statistics"));
        assert!(page.all_failed());
    }
}
