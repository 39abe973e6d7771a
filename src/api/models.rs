use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// The API schema is open-ended; entities are kept verbatim for display.
pub type JsonObject = Map<String, Value>;
pub type InventoryItem = JsonObject;
pub type LegoSet = JsonObject;
pub type Image = JsonObject;
pub type Stats = JsonObject;

/// Query filters for `/inventory`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    /// `Some(true)` LEGO only, `Some(false)` non-LEGO only, `None` all items
    pub is_lego: Option<bool>,
}

impl InventoryFilter {
    /// Filter used by the inventory page on first load
    pub fn page_default() -> Self {
        Self {
            skip: Some(0),
            limit: Some(100),
            is_lego: None,
        }
    }
}

/// Query filters for `/lego-sets`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegoSetFilter {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl LegoSetFilter {
    pub fn page_default() -> Self {
        Self {
            skip: Some(0),
            limit: Some(100),
        }
    }
}

/// Validation failure body returned by the API with status 422
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HttpValidationError {
    #[serde(default)]
    pub detail: Option<Vec<ValidationError>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationError {
    pub loc: Vec<LocSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LocSegment {
    Index(i64),
    Key(String),
}

impl std::fmt::Display for LocSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocSegment::Index(i) => write!(f, "{}", i),
            LocSegment::Key(k) => f.write_str(k),
        }
    }
}

impl ValidationError {
    /// `query.limit: Input should be a valid integer`
    pub fn summary(&self) -> String {
        let path = self
            .loc
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>()
            .join(".");
        format!("{}: {}", path, self.msg)
    }
}
