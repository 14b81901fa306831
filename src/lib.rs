//! Hoodmatch - neighborhood recommendations from lifestyle preferences
//!
//! This library provides the match scorer that rates catalog neighborhoods
//! against a user's budget, lifestyle, amenity and priority preferences,
//! plus the catalog, user store and HTTP routes built around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, BrowseOptions, Matcher};
pub use models::{MatchResult, Neighborhood, Priority, ScoreBreakdown, ScoringWeights, UserPreferences};
pub use services::{Catalog, UserStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let catalog = Catalog::builtin().unwrap();
        let matcher = Matcher::default();
        let score = matcher.score(&UserPreferences::default(), &catalog.list()[0]);
        assert!((0.0..=100.0).contains(&score));
    }
}
