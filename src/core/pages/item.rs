use super::resources::{InventoryItemResource, ItemImages};
use super::{PageModel, Section};
use crate::api::CatalogApi;
use crate::api::models::{Image, InventoryItem};
use crate::core::cycle::{Fetch, FetchCycles, Settled};
use crate::error::ApiError;
use futures::FutureExt;
use std::sync::Arc;

/// One inventory item together with its images
pub struct ItemDetailPage {
    api: Arc<dyn CatalogApi>,
    pub item: Section<InventoryItemResource>,
    pub images: Section<ItemImages>,
    cycles: FetchCycles,
}

#[derive(Debug)]
pub struct ItemResults {
    pub item: Result<InventoryItem, ApiError>,
    pub images: Result<Vec<Image>, ApiError>,
}

impl ItemDetailPage {
    pub fn new(api: Arc<dyn CatalogApi>, inventory_id: u64) -> Self {
        Self {
            api,
            item: Section::new(inventory_id),
            images: Section::new(inventory_id),
            cycles: FetchCycles::new(),
        }
    }

    pub fn inventory_id(&self) -> u64 {
        *self.item.query()
    }
}

impl PageModel for ItemDetailPage {
    type Output = ItemResults;

    fn begin(&mut self) -> Fetch<ItemResults> {
        let ticket = self.cycles.begin();
        let item = self.item.start(Arc::clone(&self.api));
        let images = self.images.start(Arc::clone(&self.api));

        let requests = async move {
            let (item, images) = tokio::join!(item, images);
            ItemResults { item, images }
        };
        Fetch::new(ticket, requests.boxed())
    }

    fn settle(&mut self, settled: Settled<ItemResults>) -> bool {
        let Some(results) = settled.outcome else {
            return false;
        };
        if !self.cycles.finish(settled.generation) {
            return false;
        }
        self.item.apply(results.item);
        self.images.apply(results.images);
        true
    }

    fn is_loading(&self) -> bool {
        self.item.state().is_loading() || self.images.state().is_loading()
    }

    fn all_failed(&self) -> bool {
        self.item.state().is_error() && self.images.state().is_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pages::test_support::FakeApi;

    #[tokio::test]
    async fn test_item_loads_even_when_images_fail() {
        let api = Arc::new(FakeApi::default());
        let mut page = ItemDetailPage::new(api.clone(), 17);
        page.load().await;

        assert_eq!(page.inventory_id(), 17);
        assert_eq!(
            page.item.state().data().and_then(|item| item.get("id")).cloned(),
            Some(serde_json::json!(17))
        );
        assert_eq!(page.images.state().error(), Some("Failed to fetch images"));
        assert!(!page.all_failed());

        let mut calls = api.calls();
        calls.sort();
        assert_eq!(calls, vec!["images 17", "item 17"]);
    }
}
