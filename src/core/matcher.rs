use std::cmp::Ordering;
use crate::models::{MatchResult, Neighborhood, ScoreBreakdown, ScoringWeights, UserPreferences};
use crate::core::{
    filters::{matches_search, BudgetFilter, SortOrder},
    scoring::{calculate_match_score, score_breakdown},
};

/// Filters and ordering for a catalog browse
#[derive(Debug, Clone, Default)]
pub struct BrowseOptions {
    pub search: String,
    pub budget: BudgetFilter,
    pub sort: SortOrder,
}

/// Ranks catalog neighborhoods against a user's preferences
///
/// # Pipeline Stages
/// 1. Search term filter
/// 2. Budget band filter
/// 3. Scoring (only when preferences are supplied)
/// 4. Stable sort
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Match score (0-100) of a single neighborhood
    pub fn score(&self, preferences: &UserPreferences, neighborhood: &Neighborhood) -> f64 {
        calculate_match_score(preferences, neighborhood, &self.weights)
    }

    /// Full sub-score breakdown for a single neighborhood
    pub fn score_neighborhood(
        &self,
        preferences: &UserPreferences,
        neighborhood: &Neighborhood,
    ) -> ScoreBreakdown {
        score_breakdown(preferences, neighborhood, &self.weights)
    }

    /// Filter, annotate and sort the catalog
    ///
    /// # Arguments
    /// * `catalog` - Neighborhoods in catalog order
    /// * `preferences` - The user's preferences, if they have saved any
    /// * `options` - Search term, budget band and sort order
    ///
    /// # Returns
    /// Matching neighborhoods. Without preferences every `match_score` is
    /// `None`, so sorting by match keeps catalog order.
    pub fn browse(
        &self,
        catalog: &[Neighborhood],
        preferences: Option<&UserPreferences>,
        options: &BrowseOptions,
    ) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = catalog
            .iter()
            // Stage 1: Search term
            .filter(|neighborhood| matches_search(neighborhood, &options.search))
            // Stage 2: Budget band
            .filter(|neighborhood| options.budget.matches(neighborhood))
            // Stage 3: Scoring
            .map(|neighborhood| MatchResult {
                match_score: preferences.map(|preferences| self.score(preferences, neighborhood)),
                neighborhood: neighborhood.clone(),
            })
            .collect();

        // Stage 4: sort_by is stable, equal keys keep catalog order
        results.sort_by(|a, b| compare(a, b, options.sort));

        results
    }

    /// The best `limit` matches for a user, highest score first
    pub fn top_matches(
        &self,
        catalog: &[Neighborhood],
        preferences: &UserPreferences,
        limit: usize,
    ) -> Vec<MatchResult> {
        let mut results = self.browse(catalog, Some(preferences), &BrowseOptions::default());
        results.truncate(limit);
        results
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

fn compare(a: &MatchResult, b: &MatchResult, sort: SortOrder) -> Ordering {
    let (left, right) = (&a.neighborhood, &b.neighborhood);
    match sort {
        SortOrder::Match => score_of(b).total_cmp(&score_of(a)),
        SortOrder::PriceLow => left.avg_rent.cmp(&right.avg_rent),
        SortOrder::PriceHigh => right.avg_rent.cmp(&left.avg_rent),
        SortOrder::Rating => right.rating.total_cmp(&left.rating),
        SortOrder::Safety => right.safety_score.cmp(&left.safety_score),
    }
}

#[inline]
fn score_of(result: &MatchResult) -> f64 {
    result.match_score.unwrap_or(0.0)
}

/// Rounded mean match score of the scored results, if any were scored
pub fn average_match(results: &[MatchResult]) -> Option<u8> {
    let scores: Vec<f64> = results.iter().filter_map(|result| result.match_score).collect();
    if scores.is_empty() {
        return None;
    }

    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    Some(mean.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetRange, Priority};

    fn create_neighborhood(id: &str, avg_rent: u32, rating: f64, safety: u8) -> Neighborhood {
        Neighborhood {
            id: id.to_string(),
            name: format!("Neighborhood {}", id),
            city: "Test City".to_string(),
            description: "Quiet streets".to_string(),
            avg_rent,
            rating,
            safety_score: safety,
            connectivity: 7,
            green_spaces: 7,
            schools: 7,
            nightlife: 5,
            tags: vec!["Residential".to_string()],
            amenities: vec!["Parks".to_string()],
            housing_options: vec![],
            nearby_transport: vec![],
            population: None,
            area: None,
            avg_age: None,
            crime_rate: None,
        }
    }

    fn create_preferences() -> UserPreferences {
        UserPreferences {
            budget_range: BudgetRange { min: 20_000, max: 30_000 },
            safety_priority: Priority::new(9).unwrap(),
            ..UserPreferences::default()
        }
    }

    fn ids(results: &[MatchResult]) -> Vec<&str> {
        results.iter().map(|r| r.neighborhood.id.as_str()).collect()
    }

    #[test]
    fn test_browse_without_preferences_keeps_catalog_order() {
        let matcher = Matcher::with_default_weights();
        let catalog = vec![
            create_neighborhood("1", 50_000, 4.0, 5),
            create_neighborhood("2", 25_000, 4.5, 9),
            create_neighborhood("3", 10_000, 3.5, 7),
        ];

        let results = matcher.browse(&catalog, None, &BrowseOptions::default());

        assert_eq!(ids(&results), vec!["1", "2", "3"]);
        assert!(results.iter().all(|r| r.match_score.is_none()));
    }

    #[test]
    fn test_browse_sorted_by_score() {
        let matcher = Matcher::with_default_weights();
        let preferences = create_preferences();
        let catalog = vec![
            create_neighborhood("1", 50_000, 4.0, 5),
            create_neighborhood("2", 25_000, 4.5, 9),
            create_neighborhood("3", 10_000, 3.5, 7),
        ];

        let results = matcher.browse(&catalog, Some(&preferences), &BrowseOptions::default());

        assert_eq!(results[0].neighborhood.id, "2");
        for pair in results.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
    }

    #[test]
    fn test_equal_scores_keep_catalog_order() {
        let matcher = Matcher::with_default_weights();
        let preferences = create_preferences();
        let catalog = vec![
            create_neighborhood("a", 25_000, 4.0, 7),
            create_neighborhood("b", 60_000, 4.0, 7),
            create_neighborhood("c", 25_000, 4.0, 7),
            create_neighborhood("d", 26_000, 4.0, 7),
        ];

        let results = matcher.browse(&catalog, Some(&preferences), &BrowseOptions::default());

        assert_eq!(ids(&results), vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn test_other_sort_orders() {
        let matcher = Matcher::with_default_weights();
        let catalog = vec![
            create_neighborhood("1", 50_000, 4.0, 5),
            create_neighborhood("2", 25_000, 4.5, 9),
            create_neighborhood("3", 10_000, 3.5, 7),
        ];
        let browse = |sort| {
            let options = BrowseOptions { sort, ..BrowseOptions::default() };
            ids(&matcher.browse(&catalog, None, &options))
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>()
        };

        assert_eq!(browse(SortOrder::PriceLow), vec!["3", "2", "1"]);
        assert_eq!(browse(SortOrder::PriceHigh), vec!["1", "2", "3"]);
        assert_eq!(browse(SortOrder::Rating), vec!["2", "1", "3"]);
        assert_eq!(browse(SortOrder::Safety), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_browse_applies_filters() {
        let matcher = Matcher::with_default_weights();
        let mut loud = create_neighborhood("2", 25_000, 4.5, 9);
        loud.description = "Bars and clubs".to_string();
        let catalog = vec![create_neighborhood("1", 50_000, 4.0, 5), loud];

        let options = BrowseOptions {
            search: "quiet".to_string(),
            ..BrowseOptions::default()
        };
        assert_eq!(ids(&matcher.browse(&catalog, None, &options)), vec!["1"]);

        let options = BrowseOptions {
            budget: BudgetFilter::Range { min: 20_000, max: Some(40_000) },
            ..BrowseOptions::default()
        };
        assert_eq!(ids(&matcher.browse(&catalog, None, &options)), vec!["2"]);
    }

    #[test]
    fn test_top_matches_respects_limit() {
        let matcher = Matcher::with_default_weights();
        let preferences = create_preferences();
        let catalog: Vec<Neighborhood> = (0..10)
            .map(|i| create_neighborhood(&i.to_string(), 20_000 + i * 5_000, 4.0, 7))
            .collect();

        let results = matcher.top_matches(&catalog, &preferences, 3);

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.match_score.is_some()));
    }

    #[test]
    fn test_average_match() {
        let mut results = vec![
            MatchResult { neighborhood: create_neighborhood("1", 1, 1.0, 1), match_score: Some(80.0) },
            MatchResult { neighborhood: create_neighborhood("2", 1, 1.0, 1), match_score: Some(71.0) },
        ];
        assert_eq!(average_match(&results), Some(76));

        results.iter_mut().for_each(|r| r.match_score = None);
        assert_eq!(average_match(&results), None);
        assert_eq!(average_match(&[]), None);
    }
}
