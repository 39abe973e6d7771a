//! The page currently mounted in the navigation shell.

use super::resources::{
    ApiRoot, InventoryList, ItemImages, LegoSetDetail, LegoSetList, Statistics,
};
use super::{DashboardPage, DashboardResults, ItemDetailPage, ItemResults, Page, PageModel};
use crate::api::CatalogApi;
use crate::api::models::{InventoryFilter, LegoSetFilter};
use crate::core::cycle::{Fetch, Settled};
use crate::core::route::Route;
use crate::error::{ApiError, CliError};
use crate::utils::validation::validate_limit;
use std::sync::Arc;

type ResultOf<R> = Result<<R as super::Resource>::Data, ApiError>;

pub enum Screen {
    Dashboard(DashboardPage),
    Inventory(Page<InventoryList>),
    LegoSets(Page<LegoSetList>),
    Stats(Page<Statistics>),
    Item(ItemDetailPage),
    Images(Page<ItemImages>),
    LegoSet(Page<LegoSetDetail>),
    Root(Page<ApiRoot>),
}

pub enum ScreenFetch {
    Dashboard(Fetch<DashboardResults>),
    Inventory(Fetch<ResultOf<InventoryList>>),
    LegoSets(Fetch<ResultOf<LegoSetList>>),
    Stats(Fetch<ResultOf<Statistics>>),
    Item(Fetch<ItemResults>),
    Images(Fetch<ResultOf<ItemImages>>),
    LegoSet(Fetch<ResultOf<LegoSetDetail>>),
    Root(Fetch<ResultOf<ApiRoot>>),
}

pub enum ScreenSettled {
    Dashboard(Settled<DashboardResults>),
    Inventory(Settled<ResultOf<InventoryList>>),
    LegoSets(Settled<ResultOf<LegoSetList>>),
    Stats(Settled<ResultOf<Statistics>>),
    Item(Settled<ItemResults>),
    Images(Settled<ResultOf<ItemImages>>),
    LegoSet(Settled<ResultOf<LegoSetDetail>>),
    Root(Settled<ResultOf<ApiRoot>>),
}

/// A filter edit issued from the command line or browse mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    Limit(u32),
    Skip(u32),
    /// `Some(true)` LEGO only, `Some(false)` non-LEGO only, `None` all
    Lego(Option<bool>),
}

macro_rules! each_screen {
    ($value:expr, $from:ident => $to:ident, |$page:ident| $body:expr) => {
        match $value {
            $from::Dashboard($page) => $to::Dashboard($body),
            $from::Inventory($page) => $to::Inventory($body),
            $from::LegoSets($page) => $to::LegoSets($body),
            $from::Stats($page) => $to::Stats($body),
            $from::Item($page) => $to::Item($body),
            $from::Images($page) => $to::Images($body),
            $from::LegoSet($page) => $to::LegoSet($body),
            $from::Root($page) => $to::Root($body),
        }
    };
}

impl Screen {
    /// Mount the page behind a navigation route with its default filters
    pub fn for_route(route: Route, api: Arc<dyn CatalogApi>) -> Self {
        match route {
            Route::Dashboard => Screen::Dashboard(DashboardPage::new(api)),
            Route::Inventory => {
                Screen::Inventory(Page::new(api, InventoryFilter::page_default()))
            }
            Route::LegoSets => Screen::LegoSets(Page::new(api, LegoSetFilter::page_default())),
            Route::Stats => Screen::Stats(Page::new(api, ())),
        }
    }

    pub fn item(api: Arc<dyn CatalogApi>, inventory_id: u64) -> Self {
        Screen::Item(ItemDetailPage::new(api, inventory_id))
    }

    pub fn images(api: Arc<dyn CatalogApi>, inventory_id: u64) -> Self {
        Screen::Images(Page::new(api, inventory_id))
    }

    pub fn lego_set(api: Arc<dyn CatalogApi>, set_number: impl Into<String>) -> Self {
        Screen::LegoSet(Page::new(api, set_number.into()))
    }

    /// API root payload, used as a connectivity check
    pub fn root(api: Arc<dyn CatalogApi>) -> Self {
        Screen::Root(Page::new(api, ()))
    }

    /// Active navigation entry; detail pages have none
    pub fn route(&self) -> Option<Route> {
        match self {
            Screen::Dashboard(_) => Some(Route::Dashboard),
            Screen::Inventory(_) => Some(Route::Inventory),
            Screen::LegoSets(_) => Some(Route::LegoSets),
            Screen::Stats(_) => Some(Route::Stats),
            Screen::Item(_) | Screen::Images(_) | Screen::LegoSet(_) | Screen::Root(_) => None,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Screen::Dashboard(_) => "eBay LEGO Analyzer Dashboard".to_string(),
            Screen::Inventory(_) => "Inventory".to_string(),
            Screen::LegoSets(_) => "LEGO Sets".to_string(),
            Screen::Stats(_) => "Statistics".to_string(),
            Screen::Item(page) => format!("Inventory Item #{}", page.inventory_id()),
            Screen::Images(page) => format!("Images of Item #{}", page.query()),
            Screen::LegoSet(page) => format!("LEGO Set {}", page.query()),
            Screen::Root(_) => "API".to_string(),
        }
    }

    pub fn begin(&mut self) -> ScreenFetch {
        each_screen!(self, Screen => ScreenFetch, |page| page.begin())
    }

    /// Apply a settled fetch. Fetches of another page are discarded.
    pub fn settle(&mut self, settled: ScreenSettled) -> bool {
        match (self, settled) {
            (Screen::Dashboard(page), ScreenSettled::Dashboard(s)) => page.settle(s),
            (Screen::Inventory(page), ScreenSettled::Inventory(s)) => page.settle(s),
            (Screen::LegoSets(page), ScreenSettled::LegoSets(s)) => page.settle(s),
            (Screen::Stats(page), ScreenSettled::Stats(s)) => page.settle(s),
            (Screen::Item(page), ScreenSettled::Item(s)) => page.settle(s),
            (Screen::Images(page), ScreenSettled::Images(s)) => page.settle(s),
            (Screen::LegoSet(page), ScreenSettled::LegoSet(s)) => page.settle(s),
            (Screen::Root(page), ScreenSettled::Root(s)) => page.settle(s),
            _ => false,
        }
    }

    pub async fn load(&mut self) {
        let fetch = self.begin();
        let settled = fetch.run().await;
        self.settle(settled);
    }

    pub fn is_loading(&self) -> bool {
        match self {
            Screen::Dashboard(page) => page.is_loading(),
            Screen::Inventory(page) => page.is_loading(),
            Screen::LegoSets(page) => page.is_loading(),
            Screen::Stats(page) => page.is_loading(),
            Screen::Item(page) => page.is_loading(),
            Screen::Images(page) => page.is_loading(),
            Screen::LegoSet(page) => page.is_loading(),
            Screen::Root(page) => page.is_loading(),
        }
    }

    pub fn all_failed(&self) -> bool {
        match self {
            Screen::Dashboard(page) => page.all_failed(),
            Screen::Inventory(page) => page.all_failed(),
            Screen::LegoSets(page) => page.all_failed(),
            Screen::Stats(page) => page.all_failed(),
            Screen::Item(page) => page.all_failed(),
            Screen::Images(page) => page.all_failed(),
            Screen::LegoSet(page) => page.all_failed(),
            Screen::Root(page) => page.all_failed(),
        }
    }

    /// Apply a filter edit. Returns the new cycle when the filter changed.
    pub fn change_filter(&mut self, change: FilterChange) -> Result<Option<ScreenFetch>, CliError> {
        if let FilterChange::Limit(limit) = change {
            validate_limit(limit)?;
        }

        match (self, change) {
            (Screen::Inventory(page), FilterChange::Limit(limit)) => {
                Ok(page.update_query(|f| f.limit = Some(limit)).map(ScreenFetch::Inventory))
            }
            (Screen::Inventory(page), FilterChange::Skip(skip)) => {
                Ok(page.update_query(|f| f.skip = Some(skip)).map(ScreenFetch::Inventory))
            }
            (Screen::Inventory(page), FilterChange::Lego(is_lego)) => {
                Ok(page.update_query(|f| f.is_lego = is_lego).map(ScreenFetch::Inventory))
            }
            (Screen::LegoSets(page), FilterChange::Limit(limit)) => {
                Ok(page.update_query(|f| f.limit = Some(limit)).map(ScreenFetch::LegoSets))
            }
            (Screen::LegoSets(page), FilterChange::Skip(skip)) => {
                Ok(page.update_query(|f| f.skip = Some(skip)).map(ScreenFetch::LegoSets))
            }
            (screen, change) => Err(CliError::InvalidArguments(format!(
                "{:?} is not available on the {} page",
                change,
                screen.title()
            ))),
        }
    }
}

impl ScreenFetch {
    pub fn generation(&self) -> u64 {
        match self {
            ScreenFetch::Dashboard(f) => f.generation(),
            ScreenFetch::Inventory(f) => f.generation(),
            ScreenFetch::LegoSets(f) => f.generation(),
            ScreenFetch::Stats(f) => f.generation(),
            ScreenFetch::Item(f) => f.generation(),
            ScreenFetch::Images(f) => f.generation(),
            ScreenFetch::LegoSet(f) => f.generation(),
            ScreenFetch::Root(f) => f.generation(),
        }
    }

    pub async fn run(self) -> ScreenSettled {
        each_screen!(self, ScreenFetch => ScreenSettled, |fetch| fetch.run().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pages::test_support::FakeApi;

    #[tokio::test]
    async fn test_for_route_and_load() {
        let api = Arc::new(FakeApi::default());
        let mut screen = Screen::for_route(Route::LegoSets, api.clone());
        assert_eq!(screen.route(), Some(Route::LegoSets));
        assert!(screen.is_loading());

        screen.load().await;
        assert!(!screen.is_loading());
        assert!(!screen.all_failed());
        assert_eq!(api.calls(), vec!["sets Some(100)"]);
    }

    #[tokio::test]
    async fn test_filter_change_starts_one_cycle() {
        let api = Arc::new(FakeApi::default());
        let mut screen = Screen::for_route(Route::Inventory, api.clone());
        screen.load().await;

        let fetch = screen
            .change_filter(FilterChange::Limit(5))
            .expect("limit is valid")
            .expect("limit changed");
        assert!(screen.settle(fetch.run().await));

        let unchanged = screen.change_filter(FilterChange::Limit(5)).expect("limit is valid");
        assert!(unchanged.is_none());
        assert_eq!(api.calls(), vec!["inventory Some(100)", "inventory Some(5)"]);
    }

    #[tokio::test]
    async fn test_filter_change_rejected_on_pages_without_filter() {
        let api = Arc::new(FakeApi::default());
        let mut screen = Screen::for_route(Route::Stats, api);
        assert!(screen.change_filter(FilterChange::Skip(3)).is_err());

        let mut sets = Screen::for_route(Route::LegoSets, Arc::new(FakeApi::default()));
        assert!(sets.change_filter(FilterChange::Lego(Some(true))).is_err());
        assert!(sets.change_filter(FilterChange::Limit(0)).is_err());
        assert!(sets.change_filter(FilterChange::Limit(1001)).is_err());
    }

    #[tokio::test]
    async fn test_detail_screens_have_no_route() {
        let api = Arc::new(FakeApi::default());
        let mut images = Screen::images(api.clone(), 17);
        assert_eq!(images.route(), None);
        assert_eq!(images.title(), "Images of Item #17");

        images.load().await;
        assert!(images.all_failed());

        let mut set = Screen::lego_set(api.clone(), "7140-1");
        set.load().await;
        assert!(!set.all_failed());
        assert_eq!(set.title(), "LEGO Set 7140-1");
        assert_eq!(api.calls(), vec!["images 17", "set 7140-1"]);
    }

    #[tokio::test]
    async fn test_settled_fetch_of_other_page_is_discarded() {
        let api = Arc::new(FakeApi::default());
        let mut stats = Screen::for_route(Route::Stats, api.clone());
        let mut dashboard = Screen::for_route(Route::Dashboard, api);

        let settled = stats.begin().run().await;
        assert!(!dashboard.settle(settled));
    }
}
