use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use validator::{Validate, ValidationError};

/// A user-set importance level for one neighborhood attribute, always in `1..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, PriorityOutOfRange> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PriorityOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = PriorityOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        value.0
    }
}

/// Raised when a priority falls outside `1..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("priority must be between 1 and 10, got {0}")]
pub struct PriorityOutOfRange(pub u8);

/// Monthly rent budget in currency units, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: u32,
    pub max: u32,
}

impl BudgetRange {
    pub fn contains(&self, rent: u32) -> bool {
        rent >= self.min && rent <= self.max
    }
}

/// Lifestyle preferences collected from the profile form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_budget_range"))]
pub struct UserPreferences {
    #[serde(rename = "budgetRange")]
    pub budget_range: BudgetRange,
    pub lifestyle: BTreeSet<String>,
    pub amenities: BTreeSet<String>,
    #[serde(rename = "housingType")]
    pub housing_type: BTreeSet<String>,
    pub commute: String,
    #[serde(rename = "safetyPriority")]
    pub safety_priority: Priority,
    #[serde(rename = "nightlifePriority")]
    pub nightlife_priority: Priority,
    #[serde(rename = "greenSpacePriority")]
    pub green_space_priority: Priority,
    #[serde(rename = "schoolsPriority")]
    pub schools_priority: Priority,
    #[serde(rename = "transportPriority")]
    pub transport_priority: Priority,
}

fn validate_budget_range(preferences: &UserPreferences) -> Result<(), ValidationError> {
    if preferences.budget_range.min > preferences.budget_range.max {
        let mut error = ValidationError::new("budget_range");
        error.message = Some("budget minimum must not exceed maximum".into());
        return Err(error);
    }
    Ok(())
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            budget_range: BudgetRange { min: 15_000, max: 50_000 },
            lifestyle: BTreeSet::new(),
            amenities: BTreeSet::new(),
            housing_type: BTreeSet::new(),
            commute: String::new(),
            safety_priority: Priority(5),
            nightlife_priority: Priority(3),
            green_space_priority: Priority(4),
            schools_priority: Priority(3),
            transport_priority: Priority(4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrimeRate {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingOption {
    #[serde(rename = "type")]
    pub housing_type: String,
    #[serde(rename = "avgRent")]
    pub avg_rent: u32,
    pub availability: Availability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportLink {
    pub name: String,
    #[serde(rename = "type")]
    pub transport_type: String,
    pub distance: String,
}

/// Catalog record for one neighborhood
///
/// The five attribute scores (`safety_score`, `connectivity`, `green_spaces`,
/// `schools`, `nightlife`) are on a `0..=10` scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub id: String,
    pub name: String,
    pub city: String,
    pub description: String,
    #[serde(rename = "avgRent")]
    pub avg_rent: u32,
    pub rating: f64,
    #[serde(rename = "safetyScore")]
    pub safety_score: u8,
    pub connectivity: u8,
    #[serde(rename = "greenSpaces")]
    pub green_spaces: u8,
    pub schools: u8,
    pub nightlife: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(rename = "housingOptions", default)]
    pub housing_options: Vec<HousingOption>,
    #[serde(rename = "nearbyTransport", default)]
    pub nearby_transport: Vec<TransportLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(rename = "avgAge", default, skip_serializing_if = "Option::is_none")]
    pub avg_age: Option<u8>,
    #[serde(rename = "crimeRate", default, skip_serializing_if = "Option::is_none")]
    pub crime_rate: Option<CrimeRate>,
}

impl Neighborhood {
    /// The five attribute scores keyed by their JSON field names
    pub fn attribute_scores(&self) -> [(&'static str, u8); 5] {
        [
            ("safetyScore", self.safety_score),
            ("connectivity", self.connectivity),
            ("greenSpaces", self.green_spaces),
            ("schools", self.schools),
            ("nightlife", self.nightlife),
        ]
    }
}

/// A neighborhood annotated with its match score
///
/// `match_score` is `None` when the caller has no preferences to score with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub neighborhood: Neighborhood,
    #[serde(rename = "matchScore")]
    pub match_score: Option<f64>,
}

/// Per-component sub-scores in `[0, 1]` and the final score in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub budget: f64,
    pub lifestyle: f64,
    pub amenities: f64,
    pub safety: f64,
    pub nightlife: f64,
    #[serde(rename = "greenSpace")]
    pub green_space: f64,
    pub schools: f64,
    pub transport: f64,
    pub total: f64,
}

/// Relative weight of each scoring component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub budget: f64,
    pub lifestyle: f64,
    pub amenities: f64,
    pub safety: f64,
    pub nightlife: f64,
    pub green_space: f64,
    pub schools: f64,
    pub transport: f64,
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.budget
            + self.lifestyle
            + self.amenities
            + self.safety
            + self.nightlife
            + self.green_space
            + self.schools
            + self.transport
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            budget: 25.0,
            lifestyle: 20.0,
            amenities: 15.0,
            safety: 10.0,
            nightlife: 8.0,
            green_space: 8.0,
            schools: 7.0,
            transport: 7.0,
        }
    }
}

/// Registered user in the local directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl fmt::Display for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.id, self.email)
    }
}
