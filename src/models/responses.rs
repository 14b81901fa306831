use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, Neighborhood, ScoreBreakdown, UserAccount, UserPreferences};

/// Response for the catalog browse endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseResponse {
    pub neighborhoods: Vec<MatchResult>,
    pub total_results: usize,
    pub personalized: bool,
}

/// Response for the neighborhood detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborhoodDetailResponse {
    pub neighborhood: Neighborhood,
    #[serde(rename = "matchScore")]
    pub match_score: Option<f64>,
    pub breakdown: Option<ScoreBreakdown>,
}

/// Response for the top matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopMatchesResponse {
    pub matches: Vec<MatchResult>,
    #[serde(rename = "averageMatch")]
    pub average_match: Option<u8>,
    pub catalog_size: usize,
}

/// Public view of a user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub preferences: Option<UserPreferences>,
    #[serde(rename = "hasPreferences")]
    pub has_preferences: bool,
}

impl From<UserAccount> for UserResponse {
    fn from(account: UserAccount) -> Self {
        Self {
            has_preferences: account.preferences.is_some(),
            id: account.id,
            email: account.email,
            name: account.name,
            preferences: account.preferences,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub catalog_size: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
