use log::debug;
use std::collections::HashSet;
use std::path::Path;

use crate::error::BrowserError;
use crate::model::Recipe;

const BUILTIN_CATALOG: &str = include_str!("../data/recipes.json");

/// Fixed, immutable sequence of recipes loaded once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// The eight recipes bundled with the crate
    pub fn builtin() -> Result<Self, BrowserError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog from a JSON array of recipes
    pub fn from_json(json: &str) -> Result<Self, BrowserError> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Self::new(recipes)
    }

    /// Read a catalog from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, BrowserError> {
        let path = path.as_ref();
        debug!("Loading catalog from {}", path.display());
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    pub fn new(recipes: Vec<Recipe>) -> Result<Self, BrowserError> {
        let mut seen = HashSet::new();
        for recipe in &recipes {
            if recipe.id == 0 {
                return Err(BrowserError::InvalidCatalog(format!(
                    "recipe '{}' has id 0",
                    recipe.title
                )));
            }
            if recipe.time == 0 {
                return Err(BrowserError::InvalidCatalog(format!(
                    "recipe {} has no cooking time",
                    recipe.id
                )));
            }
            if !seen.insert(recipe.id) {
                return Err(BrowserError::InvalidCatalog(format!(
                    "duplicate recipe id {}",
                    recipe.id
                )));
            }
        }
        Ok(Self { recipes })
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }
}
