use crate::models::Neighborhood;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../../data/neighborhoods.json");

/// Errors that can occur while loading the neighborhood catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid catalog format: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate neighborhood id: {0}")]
    DuplicateId(String),

    #[error("Neighborhood {id} has {field} = {value}, expected 0-10")]
    ScoreOutOfRange {
        id: String,
        field: &'static str,
        value: u8,
    },
}

/// Read-only neighborhood catalog
///
/// Loaded once at startup and never mutated afterwards. Ids are unique and
/// every attribute score is within `0..=10`.
#[derive(Debug, Clone)]
pub struct Catalog {
    neighborhoods: Vec<Neighborhood>,
}

impl Catalog {
    /// The dataset bundled with the service
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::info!("Loading catalog from {}", path.as_ref().display());
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let neighborhoods: Vec<Neighborhood> = serde_json::from_str(json)?;
        Self::from_neighborhoods(neighborhoods)
    }

    /// Build a catalog, validating ids and attribute scores
    pub fn from_neighborhoods(neighborhoods: Vec<Neighborhood>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(neighborhoods.len());

        for neighborhood in &neighborhoods {
            if !seen.insert(neighborhood.id.as_str()) {
                return Err(CatalogError::DuplicateId(neighborhood.id.clone()));
            }

            if let Some((field, value)) = neighborhood
                .attribute_scores()
                .into_iter()
                .find(|(_, value)| *value > 10)
            {
                return Err(CatalogError::ScoreOutOfRange {
                    id: neighborhood.id.clone(),
                    field,
                    value,
                });
            }
        }

        tracing::debug!("Catalog ready with {} neighborhoods", neighborhoods.len());

        Ok(Self { neighborhoods })
    }

    /// All neighborhoods in catalog order
    pub fn list(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    /// Look up a neighborhood by id
    pub fn get_by_id(&self, id: &str) -> Option<&Neighborhood> {
        self.neighborhoods.iter().find(|neighborhood| neighborhood.id == id)
    }

    pub fn len(&self) -> usize {
        self.neighborhoods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighborhoods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().expect("builtin catalog should parse");

        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog.list()[0].id, "1");
        assert_eq!(catalog.list()[0].name, "Jalandhar");
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::builtin().unwrap();

        let bandra = catalog.get_by_id("7").expect("id 7 should exist");
        assert_eq!(bandra.name, "Bandra West");
        assert_eq!(bandra.nightlife, 10);

        assert!(catalog.get_by_id("999").is_none());
        assert!(catalog.get_by_id("").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let catalog = Catalog::builtin().unwrap();
        let mut neighborhoods = catalog.list().to_vec();
        neighborhoods.push(neighborhoods[0].clone());

        let result = Catalog::from_neighborhoods(neighborhoods);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "1"));
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        let catalog = Catalog::builtin().unwrap();
        let mut neighborhoods = catalog.list()[..1].to_vec();
        neighborhoods[0].green_spaces = 11;

        let result = Catalog::from_neighborhoods(neighborhoods);
        assert!(matches!(
            result,
            Err(CatalogError::ScoreOutOfRange { field: "greenSpaces", value: 11, .. })
        ));
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::ParseError(_))));
    }
}
