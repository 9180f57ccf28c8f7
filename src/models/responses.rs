use serde::{Deserialize, Serialize};
use crate::models::domain::{BreedRecord, PreferenceRecord};

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub request_id: String,
    pub preferences: PreferenceRecord,
    pub candidates: Vec<BreedRecord>,
    pub explanation: String,
    pub diagnostic: Option<String>,
}

/// Response for the extract endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub preferences: PreferenceRecord,
    pub diagnostic: Option<String>,
}

/// Response for the filter endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterResponse {
    pub candidates: Vec<BreedRecord>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub catalog_size: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
