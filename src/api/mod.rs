pub mod accessors;
pub mod client;
pub mod models;

pub use accessors::CatalogApi;
pub use client::{ApiClient, DEFAULT_BASE_URL, QueryParams};
