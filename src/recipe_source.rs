//! Loading [`Recipe`] records from JSON documents.
//!
//! A document is either an array of recipes or an object with a `recipes` array.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::errors::error_logging::{log_filesystem_error, log_recipe_error};
use crate::errors::{AppError, AppResult};
use crate::shopping_list::Recipe;

#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeDocument {
    List(Vec<Recipe>),
    Wrapped { recipes: Vec<Recipe> },
}

/// Parse recipes from a JSON string
pub fn parse_recipes(json: &str) -> AppResult<Vec<Recipe>> {
    let document: RecipeDocument = serde_json::from_str(json).map_err(|e| {
        AppError::Parse(format!(
            "Expected a JSON array of recipes or an object with a 'recipes' array: {}",
            e
        ))
    })?;

    Ok(match document {
        RecipeDocument::List(recipes) => recipes,
        RecipeDocument::Wrapped { recipes } => recipes,
    })
}

/// Read and parse a recipes file
pub fn load_recipes(path: impl AsRef<Path>) -> AppResult<Vec<Recipe>> {
    let path = path.as_ref();
    let path_display = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|e| {
        log_filesystem_error(&e, "load_recipes", Some(&path_display));
        AppError::FileSystem(format!("Failed to read recipes from '{}': {}", path_display, e))
    })?;

    let recipes = parse_recipes(&content).inspect_err(|e| {
        log_recipe_error(e, "load_recipes", Some(&path_display), None);
    })?;

    let line_count: usize = recipes.iter().map(|r| r.ingredients.len()).sum();
    info!(
        path = %path_display,
        recipe_count = recipes.len(),
        line_count = line_count,
        "Loaded recipes"
    );

    Ok(recipes)
}
