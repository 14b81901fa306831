use std::collections::BTreeSet;
use crate::models::{BudgetRange, Neighborhood, Priority, ScoreBreakdown, ScoringWeights, UserPreferences};

/// Sub-score used for lifestyle and amenities when the user selected nothing
pub const NEUTRAL_TAG_SCORE: f64 = 0.5;

/// Sub-score for attributes the user rates at 4 or below
pub const LOW_PRIORITY_SCORE: f64 = 0.7;

/// Calculate a match score (0-100) for a neighborhood based on user preferences
///
/// Scoring formula (default weights):
/// score = (
///     budget * 25 +          # rent inside the budget range
///     lifestyle * 20 +       # lifestyle labels found in neighborhood tags
///     amenities * 15 +       # wanted amenities available
///     safety * 10 +          # priority-adjusted attribute scores
///     nightlife * 8 +
///     green_space * 8 +
///     schools * 7 +
///     transport * 7
/// ) / total_weight * 100
pub fn calculate_match_score(
    preferences: &UserPreferences,
    neighborhood: &Neighborhood,
    weights: &ScoringWeights,
) -> f64 {
    score_breakdown(preferences, neighborhood, weights).total
}

/// Compute every sub-score together with the final weighted score
pub fn score_breakdown(
    preferences: &UserPreferences,
    neighborhood: &Neighborhood,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let budget = budget_match(&preferences.budget_range, neighborhood.avg_rent);
    let lifestyle = tag_match(&preferences.lifestyle, &neighborhood.tags);
    let amenities = tag_match(&preferences.amenities, &neighborhood.amenities);

    let safety = priority_match(neighborhood.safety_score, preferences.safety_priority);
    let nightlife = priority_match(neighborhood.nightlife, preferences.nightlife_priority);
    let green_space = priority_match(neighborhood.green_spaces, preferences.green_space_priority);
    let schools = priority_match(neighborhood.schools, preferences.schools_priority);
    let transport = priority_match(neighborhood.connectivity, preferences.transport_priority);

    let weighted = budget * weights.budget
        + lifestyle * weights.lifestyle
        + amenities * weights.amenities
        + safety * weights.safety
        + nightlife * weights.nightlife
        + green_space * weights.green_space
        + schools * weights.schools
        + transport * weights.transport;

    let total_weight = weights.total();
    let total = if total_weight > f64::EPSILON {
        (weighted / total_weight).clamp(0.0, 1.0) * 100.0
    } else {
        0.0
    };

    ScoreBreakdown {
        budget,
        lifestyle,
        amenities,
        safety,
        nightlife,
        green_space,
        schools,
        transport,
        total,
    }
}

/// Budget score (0-1)
/// Full score inside the range, then falls off linearly with the relative
/// distance past the nearer bound, reaching zero at 100% deviation
pub fn budget_match(budget: &BudgetRange, avg_rent: u32) -> f64 {
    if budget.contains(avg_rent) {
        return 1.0;
    }

    let rent = f64::from(avg_rent);
    let (bound, distance) = if avg_rent < budget.min {
        (f64::from(budget.min), f64::from(budget.min) - rent)
    } else {
        (f64::from(budget.max), rent - f64::from(budget.max))
    };

    if bound <= 0.0 {
        return 0.0;
    }

    (1.0 - distance / bound).clamp(0.0, 1.0)
}

/// Tag score (0-1)
/// Fraction of the user's labels that appear in the neighborhood's labels,
/// neutral when the user picked none
pub fn tag_match(wanted: &BTreeSet<String>, available: &[String]) -> f64 {
    if wanted.is_empty() {
        return NEUTRAL_TAG_SCORE;
    }

    let available: Vec<String> = available.iter().map(|label| label.to_lowercase()).collect();

    let matched = wanted
        .iter()
        .filter(|label| labels_overlap(&label.to_lowercase(), &available))
        .count();

    (matched as f64 / wanted.len() as f64).clamp(0.0, 1.0)
}

/// Case-folded containment in either direction, so "Pet" matches "Pet-friendly"
#[inline]
fn labels_overlap(wanted: &str, available: &[String]) -> bool {
    available
        .iter()
        .any(|label| label.contains(wanted) || wanted.contains(label.as_str()))
}

/// Priority-adjusted attribute score (0-1)
///
/// * priority 8-10: tracks the attribute directly
/// * priority 5-7: half sensitivity, floored at 0.5
/// * priority 1-4: fixed 0.7 regardless of the attribute
#[inline]
pub fn priority_match(item_score: u8, priority: Priority) -> f64 {
    let normalized_item = f64::from(item_score.min(10)) / 10.0;

    match priority.get() {
        8..=10 => normalized_item,
        5..=7 => 0.5 + normalized_item * 0.5,
        _ => LOW_PRIORITY_SCORE,
    }
}
