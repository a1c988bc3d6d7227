use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::common::{PaginationParams, default_page, default_page_size};
use crate::models::Category;
use crate::services::ranking::{CategoryFilter, RankedPhoto};

/// Label used for photos whose category no longer exists.
pub const UNKNOWN_CATEGORY: &str = "Sem Categoria";

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RankingQuery {
    /// `all` or a category id
    #[serde(default)]
    #[param(value_type = String, example = "all")]
    pub category: CategoryFilter,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl RankingQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ExportQuery {
    /// `all` or a category id
    #[serde(default)]
    #[param(value_type = String, example = "all")]
    pub category: CategoryFilter,
}

/// One row of a published ranking
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankingEntry {
    /// 1-based position in the full ranking
    pub position: u32,
    pub photo_id: Uuid,
    pub author_name: String,
    pub url: String,
    pub category_id: Uuid,
    pub category_name: String,
    /// Unrounded average score
    pub average: f64,
    pub num_evaluations: usize,
}

impl RankingEntry {
    /// Turns an ordered ranking into display rows, resolving category names.
    pub fn from_ranking(ranked: Vec<RankedPhoto>, categories: &[Category]) -> Vec<Self> {
        let names: HashMap<Uuid, &str> = categories
            .iter()
            .map(|c| (c.category_id, c.name.as_str()))
            .collect();

        ranked
            .into_iter()
            .zip(1u32..)
            .map(|(entry, position)| {
                let category_name = names
                    .get(&entry.photo.category_id)
                    .copied()
                    .unwrap_or(UNKNOWN_CATEGORY)
                    .to_string();

                Self {
                    position,
                    author_name: entry.photo.display_author().to_string(),
                    photo_id: entry.photo.photo_id,
                    url: entry.photo.url,
                    category_id: entry.photo.category_id,
                    category_name,
                    average: entry.average,
                    num_evaluations: entry.num_evaluations,
                }
            })
            .collect()
    }
}
