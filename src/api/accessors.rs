use crate::api::client::{ApiClient, QueryParams};
use crate::api::models::{Image, InventoryFilter, InventoryItem, LegoSet, LegoSetFilter, Stats};
use crate::error::ApiError;
use async_trait::async_trait;
use serde_json::Value;

/// One operation per API resource.
///
/// Page view-models only see this trait, so they can run against
/// [`ApiClient`] or against an in-memory double.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_inventory(&self, filter: &InventoryFilter)
    -> Result<Vec<InventoryItem>, ApiError>;

    async fn get_inventory_item(&self, inventory_id: u64) -> Result<InventoryItem, ApiError>;

    async fn list_images(&self, inventory_id: u64) -> Result<Vec<Image>, ApiError>;

    async fn list_lego_sets(&self, filter: &LegoSetFilter) -> Result<Vec<LegoSet>, ApiError>;

    async fn get_lego_set(&self, set_number: &str) -> Result<LegoSet, ApiError>;

    async fn get_stats(&self) -> Result<Stats, ApiError>;

    async fn get_root(&self) -> Result<Value, ApiError>;
}

impl InventoryFilter {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("skip", self.skip)
            .with("limit", self.limit)
            .with("is_lego", self.is_lego)
    }
}

impl LegoSetFilter {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("skip", self.skip)
            .with("limit", self.limit)
    }
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn list_inventory(
        &self,
        filter: &InventoryFilter,
    ) -> Result<Vec<InventoryItem>, ApiError> {
        self.get_json(&["inventory"], &filter.to_query()).await
    }

    async fn get_inventory_item(&self, inventory_id: u64) -> Result<InventoryItem, ApiError> {
        let id = inventory_id.to_string();
        self.get_json(&["inventory", id.as_str()], &QueryParams::new()).await
    }

    async fn list_images(&self, inventory_id: u64) -> Result<Vec<Image>, ApiError> {
        let id = inventory_id.to_string();
        self.get_json(&["images", id.as_str()], &QueryParams::new()).await
    }

    async fn list_lego_sets(&self, filter: &LegoSetFilter) -> Result<Vec<LegoSet>, ApiError> {
        self.get_json(&["lego-sets"], &filter.to_query()).await
    }

    async fn get_lego_set(&self, set_number: &str) -> Result<LegoSet, ApiError> {
        self.get_json(&["lego-sets", set_number], &QueryParams::new())
            .await
    }

    async fn get_stats(&self) -> Result<Stats, ApiError> {
        self.get_json(&["stats"], &QueryParams::new()).await
    }

    async fn get_root(&self) -> Result<Value, ApiError> {
        self.get_json(&[], &QueryParams::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_filter_query() {
        let filter = InventoryFilter {
            skip: Some(10),
            limit: Some(25),
            is_lego: Some(true),
        };
        let pairs: Vec<_> = filter.to_query().iter().map(|(k, v)| format!("{k}={v}")).collect();
        assert_eq!(pairs, vec!["skip=10", "limit=25", "is_lego=true"]);

        assert!(InventoryFilter::default().to_query().is_empty());
    }

    #[test]
    fn test_lego_set_filter_query_omits_absent() {
        let filter = LegoSetFilter {
            skip: None,
            limit: Some(5),
        };
        let pairs: Vec<_> = filter.to_query().iter().map(|(k, v)| format!("{k}={v}")).collect();
        assert_eq!(pairs, vec!["limit=5"]);
    }
}
