//! Loading state of one page section.

use crate::api::models::JsonObject;
use crate::error::ApiError;
use serde_json::Value;
use tracing::warn;

/// Section state. The three variants are mutually exclusive, so a section
/// can never show stale data while loading or alongside an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    /// Data is being fetched
    #[default]
    Loading,
    /// Data successfully loaded
    Loaded(T),
    /// Loading failed with a human-readable message
    Error(String),
}

impl<T> LoadState<T> {
    /// Reduce a fetch result to a state. Error detail goes to the log only.
    pub fn from_result(result: Result<T, ApiError>, label: &str, message: &str) -> Self {
        match result {
            Ok(data) => LoadState::Loaded(data),
            Err(error) => {
                warn!(section = label, status = ?error.status(), error = %error, "{}", message);
                LoadState::Error(message.to_string())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Whether a loaded result should render as "no data"
pub trait IsEmpty {
    fn is_empty_data(&self) -> bool;
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty_data(&self) -> bool {
        self.is_empty()
    }
}

impl IsEmpty for JsonObject {
    fn is_empty_data(&self) -> bool {
        self.is_empty()
    }
}

impl IsEmpty for Value {
    fn is_empty_data(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}
