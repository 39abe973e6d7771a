use super::resources::{InventoryList, LegoSetList, Statistics};
use super::{PageModel, Section};
use crate::api::CatalogApi;
use crate::api::models::{InventoryFilter, InventoryItem, LegoSet, LegoSetFilter, Stats};
use crate::core::cycle::{Fetch, FetchCycles, Settled};
use crate::error::ApiError;
use futures::FutureExt;
use std::sync::Arc;
use tracing::debug;

/// Number of recent items and sets requested by the dashboard
pub const DASHBOARD_RECENT_LIMIT: u32 = 5;

/// Landing page: statistics, recent inventory and recent LEGO sets
pub struct DashboardPage {
    api: Arc<dyn CatalogApi>,
    pub stats: Section<Statistics>,
    pub inventory: Section<InventoryList>,
    pub sets: Section<LegoSetList>,
    cycles: FetchCycles,
}

/// Results of one dashboard cycle, each settled independently
#[derive(Debug)]
pub struct DashboardResults {
    pub stats: Result<Stats, ApiError>,
    pub inventory: Result<Vec<InventoryItem>, ApiError>,
    pub sets: Result<Vec<LegoSet>, ApiError>,
}

impl DashboardPage {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            stats: Section::new(()),
            inventory: Section::new(InventoryFilter {
                limit: Some(DASHBOARD_RECENT_LIMIT),
                ..InventoryFilter::default()
            }),
            sets: Section::new(LegoSetFilter {
                limit: Some(DASHBOARD_RECENT_LIMIT),
                ..LegoSetFilter::default()
            }),
            cycles: FetchCycles::new(),
        }
    }
}

impl PageModel for DashboardPage {
    type Output = DashboardResults;

    fn begin(&mut self) -> Fetch<DashboardResults> {
        let ticket = self.cycles.begin();
        debug!(page = "dashboard", generation = ticket.generation, "fetch cycle started");

        let stats = self.stats.start(Arc::clone(&self.api));
        let inventory = self.inventory.start(Arc::clone(&self.api));
        let sets = self.sets.start(Arc::clone(&self.api));

        let requests = async move {
            let (stats, inventory, sets) = tokio::join!(stats, inventory, sets);
            DashboardResults {
                stats,
                inventory,
                sets,
            }
        };
        Fetch::new(ticket, requests.boxed())
    }

    fn settle(&mut self, settled: Settled<DashboardResults>) -> bool {
        let Some(results) = settled.outcome else {
            return false;
        };
        if !self.cycles.finish(settled.generation) {
            debug!(page = "dashboard", generation = settled.generation, "stale result discarded");
            return false;
        }
        self.stats.apply(results.stats);
        self.inventory.apply(results.inventory);
        self.sets.apply(results.sets);
        true
    }

    fn is_loading(&self) -> bool {
        self.stats.state().is_loading()
            || self.inventory.state().is_loading()
            || self.sets.state().is_loading()
    }

    fn all_failed(&self) -> bool {
        self.stats.state().is_error()
            && self.inventory.state().is_error()
            && self.sets.state().is_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pages::test_support::FakeApi;

    #[tokio::test]
    async fn test_dashboard_requests_recent_limit() {
        let api = Arc::new(FakeApi::default());
        let mut page = DashboardPage::new(api.clone());
        assert!(page.is_loading());
        page.load().await;

        let mut calls = api.calls();
        calls.sort();
        assert_eq!(calls, vec!["inventory Some(5)", "sets Some(5)", "stats"]);
        assert!(!page.is_loading());
    }

    #[tokio::test]
    async fn test_dashboard_partial_success() {
        let api = Arc::new(FakeApi {
            fail_stats: true,
            fail_sets: true,
            ..FakeApi::default()
        });
        let mut page = DashboardPage::new(api);
        page.load().await;

        assert_eq!(page.inventory.state().data().map(Vec::len), Some(0));
        assert_eq!(page.stats.state().error(), Some("Failed to fetch statistics"));
        assert_eq!(page.sets.state().error(), Some("Failed to fetch LEGO sets"));
        assert!(!page.all_failed());
    }

    #[tokio::test]
    async fn test_dashboard_reload_resets_sections() {
        let api = Arc::new(FakeApi::default());
        let mut page = DashboardPage::new(api);
        page.load().await;
        assert!(page.stats.state().is_loaded());

        let _fetch = page.begin();
        assert!(page.stats.state().is_loading());
        assert!(page.inventory.state().is_loading());
        assert!(page.sets.state().is_loading());
    }
}
