//! Contest snapshots exported from the legacy document store.
//!
//! Field names follow the legacy camelCase documents. Score values were
//! stored exactly as the rating sliders produced them, usually strings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestSnapshot {
    pub contest: ContestData,
    #[serde(default)]
    pub categories: Vec<CategoryData>,
    #[serde(default)]
    pub photos: Vec<PhotoData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestData {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub voters: Vec<String>,
}

fn default_status() -> String {
    "draft".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryData {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoData {
    pub id: String,
    pub category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_file_id: Option<String>,
    #[serde(default)]
    pub ratings: Vec<RatingData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingData {
    pub evaluator: String,
    /// Raw criterion values: numbers, numeric strings, or garbage
    #[serde(default)]
    pub scores: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}
