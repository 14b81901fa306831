use std::str::FromStr;
use thiserror::Error;
use crate::models::Neighborhood;

/// Errors raised while parsing browse filters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid budget filter: {0}")]
    InvalidBudget(String),

    #[error("Invalid sort order: {0}")]
    InvalidSort(String),
}

/// Rent band used to narrow the catalog
///
/// Parsed from `"all"` or `"<min>-<max>"`, where a `max` of 0 means no upper
/// bound (e.g. `"60000-0"`). Both bounds are inclusive. An inverted band such
/// as `"40000-20000"` is accepted and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BudgetFilter {
    #[default]
    All,
    Range { min: u32, max: Option<u32> },
}

impl BudgetFilter {
    #[inline]
    pub fn matches(&self, neighborhood: &Neighborhood) -> bool {
        match *self {
            BudgetFilter::All => true,
            BudgetFilter::Range { min, max } => {
                neighborhood.avg_rent >= min && max.map_or(true, |max| neighborhood.avg_rent <= max)
            }
        }
    }
}

impl FromStr for BudgetFilter {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Ok(BudgetFilter::All);
        }

        let (min, max) = value
            .split_once('-')
            .ok_or_else(|| FilterError::InvalidBudget(value.to_string()))?;

        let min: u32 = min
            .trim()
            .parse()
            .map_err(|_| FilterError::InvalidBudget(value.to_string()))?;
        let max: u32 = max
            .trim()
            .parse()
            .map_err(|_| FilterError::InvalidBudget(value.to_string()))?;

        let max = if max == 0 { None } else { Some(max) };
        Ok(BudgetFilter::Range { min, max })
    }
}

/// Ordering applied to browse results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Match,
    PriceLow,
    PriceHigh,
    Rating,
    Safety,
}

impl FromStr for SortOrder {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "" | "match" => Ok(SortOrder::Match),
            "price-low" => Ok(SortOrder::PriceLow),
            "price-high" => Ok(SortOrder::PriceHigh),
            "rating" => Ok(SortOrder::Rating),
            "safety" => Ok(SortOrder::Safety),
            other => Err(FilterError::InvalidSort(other.to_string())),
        }
    }
}

/// Check if a neighborhood matches a free-text search term
///
/// Case-insensitive substring search over name and description.
#[inline]
pub fn matches_search(neighborhood: &Neighborhood, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    neighborhood.name.to_lowercase().contains(&term)
        || neighborhood.description.to_lowercase().contains(&term)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_neighborhood(name: &str, description: &str, avg_rent: u32) -> Neighborhood {
        Neighborhood {
            id: name.to_lowercase(),
            name: name.to_string(),
            city: "Test City".to_string(),
            description: description.to_string(),
            avg_rent,
            rating: 4.0,
            safety_score: 7,
            connectivity: 7,
            green_spaces: 7,
            schools: 7,
            nightlife: 7,
            tags: vec![],
            amenities: vec![],
            housing_options: vec![],
            nearby_transport: vec![],
            population: None,
            area: None,
            avg_age: None,
            crime_rate: None,
        }
    }

    #[test]
    fn test_search_matches_name_and_description() {
        let neighborhood = create_test_neighborhood("Bandra West", "Trendy cafes by the sea", 65_000);

        assert!(matches_search(&neighborhood, "bandra"));
        assert!(matches_search(&neighborhood, "CAFES"));
        assert!(matches_search(&neighborhood, ""));
        assert!(!matches_search(&neighborhood, "temple"));
    }

    #[test]
    fn test_parse_budget_filter() {
        assert_eq!("all".parse::<BudgetFilter>().unwrap(), BudgetFilter::All);
        assert_eq!(
            "20000-40000".parse::<BudgetFilter>().unwrap(),
            BudgetFilter::Range { min: 20_000, max: Some(40_000) }
        );
        assert_eq!(
            "60000-0".parse::<BudgetFilter>().unwrap(),
            BudgetFilter::Range { min: 60_000, max: None }
        );
        assert!("cheap".parse::<BudgetFilter>().is_err());
    }

    #[test]
    fn test_inverted_budget_filter_matches_nothing() {
        let filter = "40000-20000".parse::<BudgetFilter>().unwrap();
        assert_eq!(filter, BudgetFilter::Range { min: 40_000, max: Some(20_000) });

        for rent in [15_000, 20_000, 30_000, 40_000, 45_000] {
            assert!(!filter.matches(&create_test_neighborhood("A", "", rent)));
        }
    }

    #[test]
    fn test_budget_filter_bounds_inclusive() {
        let filter = BudgetFilter::Range { min: 20_000, max: Some(40_000) };

        assert!(filter.matches(&create_test_neighborhood("A", "", 20_000)));
        assert!(filter.matches(&create_test_neighborhood("B", "", 40_000)));
        assert!(!filter.matches(&create_test_neighborhood("C", "", 40_001)));

        let open = BudgetFilter::Range { min: 60_000, max: None };
        assert!(open.matches(&create_test_neighborhood("D", "", 250_000)));
        assert!(!open.matches(&create_test_neighborhood("E", "", 59_999)));
    }

    #[test]
    fn test_parse_sort_order() {
        assert_eq!("match".parse::<SortOrder>().unwrap(), SortOrder::Match);
        assert_eq!("price-high".parse::<SortOrder>().unwrap(), SortOrder::PriceHigh);
        assert_eq!("Safety".parse::<SortOrder>().unwrap(), SortOrder::Safety);
        assert!("distance".parse::<SortOrder>().is_err());
    }
}
