use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string for browsing the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub search: Option<String>,
    pub budget: Option<String>,
    pub sort: Option<String>,
}

/// Query string carrying an optional user id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Query string for the top matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TopMatchesQuery {
    #[validate(length(min = 1))]
    #[serde(rename = "userId")]
    pub user_id: String,
    pub limit: Option<usize>,
}

/// Request to register a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1))]
    pub name: String,
}

/// Request to log in
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}
