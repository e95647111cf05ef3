use serde::{Deserialize, Serialize};
use crate::models::domain::Animal;

/// Response for the animal search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAnimalsResponse {
    pub animals: Vec<Animal>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response for the spotlight endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotlightResponse {
    pub animals: Vec<Animal>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
