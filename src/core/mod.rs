// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use filters::{matches_search, BudgetFilter, FilterError, SortOrder};
pub use matcher::{average_match, BrowseOptions, Matcher};
pub use scoring::{budget_match, calculate_match_score, priority_match, score_breakdown, tag_match};
