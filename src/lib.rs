//! # Cookbook Core
//!
//! Ingredient line parsing and shopping list aggregation for recipe collections.
//! Free-text lines such as "1 1/2 cups flour, sifted" are split into quantity, unit and
//! item, and the lines of many recipes are grouped by item into a sorted shopping list.

pub mod config;
pub mod descriptors;
pub mod errors;
pub mod ingredient_parser;
pub mod observability;
pub mod observability_config;
pub mod quantity;
pub mod recipe_source;
pub mod scaling;
pub mod shopping_list;
pub mod units;

// Re-export types for easier access
pub use ingredient_parser::{parse_ingredient, ParsedIngredient};
pub use shopping_list::{generate_shopping_list, Recipe, ShoppingListEntry, ShoppingListItem};
