pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → Storage)
pub mod cli; // Command-line interface
pub mod core; // Pages, routes, fetch cycles
pub mod storage; // Configuration persistence

/// Support modules (used across layers)
pub mod api; // Catalog API client
pub mod display; // Cards, navigation shell, themes
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;
