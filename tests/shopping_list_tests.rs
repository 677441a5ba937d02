
#[cfg(test)]
mod tests {
    use crate::test_helpers::{assert_quantity, baking_recipes, write_recipes_file};
    use cookbook_core::errors::AppError;
    use cookbook_core::recipe_source::load_recipes;
    use cookbook_core::shopping_list::render_text;
    use cookbook_core::{generate_shopping_list, Recipe};

    #[test]
    fn test_flour_and_butter_grouped() {
        let recipes = vec![
            Recipe::new("Cookies", ["2 cups flour", "1 cup butter"]),
            Recipe::new("Cake", ["1.5 cups flour", "0.5 cup butter"]),
        ];

        let list = generate_shopping_list(&recipes);
        assert_eq!(list.len(), 2);

        let butter = &list[0];
        assert_eq!(butter.item, "butter");
        assert_eq!(butter.entries.len(), 2);
        assert_eq!(butter.entries[0].ingredient, "1 cup butter");
        assert_eq!(butter.entries[0].original, "1 cup butter");
        assert_eq!(butter.entries[1].ingredient, "0.5 cup butter");

        let flour = &list[1];
        assert_eq!(flour.item, "flour");
        assert_eq!(flour.entries.len(), 2);
        assert_eq!(flour.entries[0].recipe, "Cookies");
        assert_eq!(flour.entries[1].recipe, "Cake");
        assert_quantity(flour.entries[0].quantity, 2.0);
        assert_quantity(flour.entries[1].quantity, 1.5);
    }

    #[test]
    fn test_quantities_never_merged() {
        let recipes = vec![
            Recipe::new("A", ["1 cup milk", "1 cup milk"]),
            Recipe::new("B", ["250 ml milk"]),
        ];

        let list = generate_shopping_list(&recipes);
        assert_eq!(list.len(), 1);
        let milk = &list[0];
        assert_eq!(milk.entries.len(), 3);
        assert_quantity(milk.entries[0].quantity, 1.0);
        assert_quantity(milk.entries[1].quantity, 1.0);
        assert_eq!(milk.entries[1].unit.as_deref(), Some("cup"));
        assert_quantity(milk.entries[2].quantity, 250.0);
        assert_eq!(milk.entries[2].unit.as_deref(), Some("milliliters"));
    }

    #[test]
    fn test_output_sorted_case_insensitively() {
        let recipes = vec![Recipe::new(
            "Mixed",
            ["2 zucchini", "1 Apple", "3 eggs", "1 cup Basil", "pinch of salt", "1 banana"],
        )];

        let list = generate_shopping_list(&recipes);
        let items: Vec<&str> = list.iter().map(|i| i.item.as_str()).collect();
        assert_eq!(items, vec!["apple", "banana", "basil", "eggs", "salt", "zucchini"]);
        assert!(list
            .windows(2)
            .all(|w| w[0].item.to_lowercase() <= w[1].item.to_lowercase()));
    }

    #[test]
    fn test_absent_and_empty_lines_skipped() {
        let recipe = Recipe {
            name: "Sparse".to_string(),
            ingredients: vec![
                Some("valid ingredient".to_string()),
                None,
                Some(String::new()),
                None,
            ],
        };

        let list = generate_shopping_list(&[recipe]);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].item, "valid ingredient");
        assert_eq!(list[0].entries.len(), 1);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(generate_shopping_list(&[]).is_empty());
        assert!(generate_shopping_list(&[Recipe::new("Nothing", Vec::<String>::new())]).is_empty());
        assert_eq!(render_text(&[]), "No ingredients found in recipes\n");
    }

    #[test]
    fn test_punctuation_does_not_split_items() {
        let recipes = vec![
            Recipe::new("One", ["1 cup all-purpose flour"]),
            Recipe::new("Two", ["2 cups all purpose flour"]),
            Recipe::new("Three", ["3 cups allpurpose flour"]),
        ];

        let list = generate_shopping_list(&recipes);
        // "all-purpose" and "allpurpose" normalize alike, "all purpose" does not
        assert_eq!(list.len(), 2);
        let first_seen = list.iter().find(|i| i.item == "all-purpose flour").unwrap();
        assert_eq!(first_seen.entries.len(), 2);
        assert_eq!(first_seen.recipes(), vec!["One", "Three"]);
    }

    #[test]
    fn test_entry_count_matches_lines() {
        let recipes = baking_recipes();
        let line_count: usize = recipes.iter().map(|r| r.ingredient_lines().count()).sum();
        let list = generate_shopping_list(&recipes);
        let entry_count: usize = list.iter().map(|i| i.entries.len()).sum();
        assert_eq!(entry_count, line_count);
    }

    #[test]
    fn test_load_recipes_from_file() {
        let file = write_recipes_file(
            r#"[
                {"name": "Cookies", "ingredients": ["2 cups flour", 42, null, "1 cup butter"]},
                {"name": "Cake", "ingredients": null, "servings": 8}
            ]"#,
        );

        let recipes = load_recipes(file.path()).unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].ingredients.len(), 4);
        assert!(recipes[1].ingredients.is_empty());

        let list = generate_shopping_list(&recipes);
        let items: Vec<&str> = list.iter().map(|i| i.item.as_str()).collect();
        assert_eq!(items, vec!["butter", "flour"]);
    }

    #[test]
    fn test_load_wrapped_recipes_file() {
        let file = write_recipes_file(r#"{"recipes": [{"name": "Toast", "ingredients": ["2 slices bread"]}]}"#);
        let recipes = load_recipes(file.path()).unwrap();
        assert_eq!(recipes[0].name, "Toast");

        let list = generate_shopping_list(&recipes);
        assert_eq!(list[0].item, "bread");
    }

    #[test]
    fn test_load_recipes_errors() {
        let file = write_recipes_file("{ not json");
        assert!(matches!(load_recipes(file.path()), Err(AppError::Parse(_))));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_recipes(&missing), Err(AppError::FileSystem(_))));
    }

    #[test]
    fn test_json_output_shape() {
        let list = generate_shopping_list(&baking_recipes());
        let json = serde_json::to_value(&list).unwrap();
        let first = &json[0];
        assert_eq!(first["item"], "butter");
        assert_eq!(first["entries"][0]["recipe"], "Cake");
        assert_eq!(first["entries"][0]["unit"], "tablespoons");
        assert_eq!(first["entries"][0]["quantity"], 2.0);
    }
}
