use serde::{Deserialize, Serialize};
use crate::models::domain::{ModelFit, ShoeModel};

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<ModelFit>,
    pub total_models: usize,
}

/// Catalog listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub model: String,
    pub sport: bool,
    pub sizes: usize,
}

impl From<&ShoeModel> for CatalogEntry {
    fn from(model: &ShoeModel) -> Self {
        Self {
            model: model.model.clone(),
            sport: model.is_sport(),
            sizes: model.sizes.len(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub models: Option<usize>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
