//! # Shopping List Module
//!
//! Groups the ingredient lines of many recipes into one shopping list. Every line is parsed,
//! lines whose items match are collected under a single [`ShoppingListItem`], and each
//! contributing line is kept as its own [`ShoppingListEntry`]. Quantities are never summed or
//! converted; two "1 cup flour" lines give one item with two entries.

use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::ingredient_parser::{normalize_item, parse_ingredient};
use crate::observability::{aggregation_span, record_shopping_list_metrics};

/// A recipe as supplied by the storage layer; only the name and ingredient lines matter here
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub name: String,
    /// Raw ingredient lines; `None` marks entries that were missing or not text
    #[serde(default, deserialize_with = "deserialize_ingredient_lines")]
    pub ingredients: Vec<Option<String>>,
}

impl Recipe {
    /// Create a recipe from plain ingredient lines
    pub fn new<I, S>(name: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ingredients: ingredients.into_iter().map(|s| Some(s.into())).collect(),
        }
    }

    /// Ingredient lines that can be parsed, skipping absent and empty ones
    pub fn ingredient_lines(&self) -> impl Iterator<Item = &str> {
        self.ingredients
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|line| !line.is_empty())
    }
}

/// Accept any JSON for the ingredient list: non-arrays become empty, non-strings become `None`
fn deserialize_ingredient_lines<'de, D>(deserializer: D) -> Result<Vec<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let lines = match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(line) => Some(line),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(lines)
}

/// One contributing ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListEntry {
    /// Name of the recipe the line came from
    pub recipe: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// The parsed line's original text
    pub original: String,
    /// The untouched source line
    pub ingredient: String,
}

/// One distinct item with every line that asked for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    /// First-seen item name
    pub item: String,
    /// Contributing lines in processing order
    pub entries: Vec<ShoppingListEntry>,
}

impl ShoppingListItem {
    pub fn new(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            entries: Vec::new(),
        }
    }

    /// Names of the recipes contributing to this item, in order, without repeats
    pub fn recipes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !names.contains(&entry.recipe.as_str()) {
                names.push(entry.recipe.as_str());
            }
        }
        names
    }
}

impl fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.item)?;
        for entry in &self.entries {
            write!(f, "\n  {}: \"{}\"", entry.recipe, entry.ingredient)?;
        }
        Ok(())
    }
}

/// Display name of a shopping list item
pub fn format_shopping_list_item(item: &ShoppingListItem) -> &str {
    &item.item
}

/// Build a shopping list from recipes
///
/// Items are matched by normalized name; the first line seen for an item names it. The result
/// is sorted case-insensitively by item and entries keep the order recipes and lines were given.
///
/// ```rust
/// use cookbook_core::{generate_shopping_list, Recipe};
///
/// let recipes = vec![
///     Recipe::new("Pancakes", ["2 cups flour", "2 eggs"]),
///     Recipe::new("Bread", ["3 cups flour"]),
/// ];
/// let list = generate_shopping_list(&recipes);
/// assert_eq!(list.len(), 2);
/// assert_eq!(list[0].item, "eggs");
/// assert_eq!(list[1].item, "flour");
/// assert_eq!(list[1].entries.len(), 2);
/// ```
pub fn generate_shopping_list(recipes: &[Recipe]) -> Vec<ShoppingListItem> {
    let span = aggregation_span(recipes.len());
    let _guard = span.enter();
    let start_time = Instant::now();

    let mut items: Vec<ShoppingListItem> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();
    let mut line_count = 0;

    for recipe in recipes {
        for line in recipe.ingredient_lines() {
            line_count += 1;
            let parsed = parse_ingredient(line);
            let key = normalize_item(&parsed.item);

            let slot = *index_by_key.entry(key).or_insert_with(|| {
                items.push(ShoppingListItem::new(parsed.item.clone()));
                items.len() - 1
            });

            items[slot].entries.push(ShoppingListEntry {
                recipe: recipe.name.clone(),
                quantity: parsed.quantity,
                unit: parsed.unit,
                original: parsed.original,
                ingredient: line.to_string(),
            });
        }
        debug!(recipe = %recipe.name, items_so_far = items.len(), "Processed recipe");
    }

    items.sort_by(|a, b| a.item.to_lowercase().cmp(&b.item.to_lowercase()));

    let duration = start_time.elapsed();
    record_shopping_list_metrics(duration, recipes.len(), line_count, items.len());
    info!(
        recipe_count = recipes.len(),
        line_count = line_count,
        item_count = items.len(),
        duration_ms = duration.as_millis() as u64,
        "Generated shopping list"
    );

    items
}

/// Render a shopping list as plain text, one block per item
pub fn render_text(items: &[ShoppingListItem]) -> String {
    if items.is_empty() {
        return "No ingredients found in recipes\n".to_string();
    }

    let mut output = String::new();
    for item in items {
        output.push_str(&item.to_string());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_lenient_deserialization() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"name": "Soup", "ingredients": ["1 onion", 3, null, {"a": 1}, ""], "servings": 4}"#)
                .unwrap();
        assert_eq!(recipe.name, "Soup");
        assert_eq!(
            recipe.ingredients,
            vec![Some("1 onion".to_string()), None, None, None, Some(String::new())]
        );
        assert_eq!(recipe.ingredient_lines().collect::<Vec<_>>(), vec!["1 onion"]);

        let recipe: Recipe = serde_json::from_str(r#"{"name": "Empty", "ingredients": null}"#).unwrap();
        assert!(recipe.ingredients.is_empty());

        let recipe: Recipe = serde_json::from_str(r#"{"name": "Missing"}"#).unwrap();
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_entries_keep_first_seen_name_and_order() {
        let recipes = vec![
            Recipe::new("A", ["1 cup Flour"]),
            Recipe::new("B", ["2 cups flour", "1 tsp salt"]),
        ];
        let list = generate_shopping_list(&recipes);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].item, "flour");
        let recipes_for_flour: Vec<&str> = list[0].entries.iter().map(|e| e.recipe.as_str()).collect();
        assert_eq!(recipes_for_flour, vec!["A", "B"]);
        assert_eq!(list[0].entries[0].unit.as_deref(), Some("cup"));
        assert_eq!(list[0].entries[1].quantity, Some(2.0));
        assert_eq!(list[1].item, "salt");
    }

    #[test]
    fn test_display_and_render() {
        let list = generate_shopping_list(&[Recipe::new("Cake", ["2 eggs"]), Recipe::new("Quiche", ["3 eggs"])]);
        assert_eq!(list[0].to_string(), "eggs\n  Cake: \"2 eggs\"\n  Quiche: \"3 eggs\"");
        assert_eq!(format_shopping_list_item(&list[0]), "eggs");
        assert_eq!(list[0].recipes(), vec!["Cake", "Quiche"]);
        assert_eq!(render_text(&list), "eggs\n  Cake: \"2 eggs\"\n  Quiche: \"3 eggs\"\n");
        assert_eq!(render_text(&[]), "No ingredients found in recipes\n");
    }

    #[test]
    fn test_serialization_omits_missing_fields() {
        let list = generate_shopping_list(&[Recipe::new("Salad", ["fresh basil"])]);
        let json = serde_json::to_value(&list).unwrap();
        let entry = &json[0]["entries"][0];
        assert_eq!(json[0]["item"], "fresh basil");
        assert_eq!(entry["recipe"], "Salad");
        assert_eq!(entry["ingredient"], "fresh basil");
        assert!(entry.get("quantity").is_none());
        assert!(entry.get("unit").is_none());
    }
}
