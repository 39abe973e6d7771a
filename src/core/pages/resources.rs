//! The resources a page section can show.

use crate::api::CatalogApi;
use crate::api::models::{Image, InventoryFilter, InventoryItem, LegoSet, LegoSetFilter, Stats};
use crate::core::load_state::IsEmpty;
use crate::error::ApiError;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Fixed user-facing texts of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub label: &'static str,
    pub loading: &'static str,
    pub error: &'static str,
    pub empty: &'static str,
}

pub trait Resource: 'static {
    type Query: Clone + PartialEq + Send + Sync + 'static;
    type Data: IsEmpty + Serialize + Send + Sync + 'static;

    const MESSAGES: Messages;

    fn fetch(
        api: Arc<dyn CatalogApi>,
        query: Self::Query,
    ) -> BoxFuture<'static, Result<Self::Data, ApiError>>;
}

pub struct InventoryList;

impl Resource for InventoryList {
    type Query = InventoryFilter;
    type Data = Vec<InventoryItem>;

    const MESSAGES: Messages = Messages {
        label: "inventory",
        loading: "Loading inventory...",
        error: "Failed to fetch inventory",
        empty: "No inventory items found.",
    };

    fn fetch(
        api: Arc<dyn CatalogApi>,
        query: InventoryFilter,
    ) -> BoxFuture<'static, Result<Self::Data, ApiError>> {
        async move { api.list_inventory(&query).await }.boxed()
    }
}

pub struct LegoSetList;

impl Resource for LegoSetList {
    type Query = LegoSetFilter;
    type Data = Vec<LegoSet>;

    const MESSAGES: Messages = Messages {
        label: "lego-sets",
        loading: "Loading LEGO sets...",
        error: "Failed to fetch LEGO sets",
        empty: "No LEGO sets found.",
    };

    fn fetch(
        api: Arc<dyn CatalogApi>,
        query: LegoSetFilter,
    ) -> BoxFuture<'static, Result<Self::Data, ApiError>> {
        async move { api.list_lego_sets(&query).await }.boxed()
    }
}

pub struct Statistics;

impl Resource for Statistics {
    type Query = ();
    type Data = Stats;

    const MESSAGES: Messages = Messages {
        label: "stats",
        loading: "Loading statistics...",
        error: "Failed to fetch statistics",
        empty: "No statistics available.",
    };

    fn fetch(api: Arc<dyn CatalogApi>, _query: ()) -> BoxFuture<'static, Result<Stats, ApiError>> {
        async move { api.get_stats().await }.boxed()
    }
}

pub struct InventoryItemResource;

impl Resource for InventoryItemResource {
    /// Inventory id
    type Query = u64;
    type Data = InventoryItem;

    const MESSAGES: Messages = Messages {
        label: "inventory-item",
        loading: "Loading inventory item...",
        error: "Failed to fetch inventory item",
        empty: "No inventory item found.",
    };

    fn fetch(
        api: Arc<dyn CatalogApi>,
        inventory_id: u64,
    ) -> BoxFuture<'static, Result<InventoryItem, ApiError>> {
        async move { api.get_inventory_item(inventory_id).await }.boxed()
    }
}

pub struct ItemImages;

impl Resource for ItemImages {
    /// Inventory id the images belong to
    type Query = u64;
    type Data = Vec<Image>;

    const MESSAGES: Messages = Messages {
        label: "images",
        loading: "Loading images...",
        error: "Failed to fetch images",
        empty: "No images found.",
    };

    fn fetch(
        api: Arc<dyn CatalogApi>,
        inventory_id: u64,
    ) -> BoxFuture<'static, Result<Vec<Image>, ApiError>> {
        async move { api.list_images(inventory_id).await }.boxed()
    }
}

pub struct LegoSetDetail;

impl Resource for LegoSetDetail {
    /// Set number, e.g. `7140-1`
    type Query = String;
    type Data = LegoSet;

    const MESSAGES: Messages = Messages {
        label: "lego-set",
        loading: "Loading LEGO set...",
        error: "Failed to fetch LEGO set",
        empty: "No LEGO set found.",
    };

    fn fetch(
        api: Arc<dyn CatalogApi>,
        set_number: String,
    ) -> BoxFuture<'static, Result<LegoSet, ApiError>> {
        async move { api.get_lego_set(&set_number).await }.boxed()
    }
}

pub struct ApiRoot;

impl Resource for ApiRoot {
    type Query = ();
    type Data = Value;

    const MESSAGES: Messages = Messages {
        label: "root",
        loading: "Connecting...",
        error: "Failed to reach the API",
        empty: "Empty response.",
    };

    fn fetch(api: Arc<dyn CatalogApi>, _query: ()) -> BoxFuture<'static, Result<Value, ApiError>> {
        async move { api.get_root().await }.boxed()
    }
}
