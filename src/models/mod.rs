// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Availability, BudgetRange, CrimeRate, HousingOption, MatchResult, Neighborhood, Priority,
    PriorityOutOfRange, ScoreBreakdown, ScoringWeights, TransportLink, UserAccount, UserPreferences,
};
pub use requests::{BrowseQuery, LoginRequest, RegisterRequest, TopMatchesQuery, UserQuery};
pub use responses::{
    BrowseResponse, ErrorResponse, HealthResponse, NeighborhoodDetailResponse, TopMatchesResponse,
    UserResponse,
};
