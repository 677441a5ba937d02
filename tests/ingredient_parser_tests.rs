
#[cfg(test)]
mod tests {
    use crate::test_helpers::assert_quantity;
    use cookbook_core::ingredient_parser::items_match;
    use cookbook_core::parse_ingredient;

    #[test]
    fn test_simple_measure() {
        let parsed = parse_ingredient("2 cups flour");
        assert_quantity(parsed.quantity, 2.0);
        assert_eq!(parsed.unit.as_deref(), Some("cups"));
        assert_eq!(parsed.item, "flour");
        assert_eq!(parsed.raw_quantity.as_deref(), Some("2"));
        assert_eq!(parsed.original, "2 cups flour");
    }

    #[test]
    fn test_fraction_and_mixed_number() {
        let parsed = parse_ingredient("1/2 cup sugar");
        assert_quantity(parsed.quantity, 0.5);
        assert_eq!(parsed.unit.as_deref(), Some("cup"));
        assert_eq!(parsed.item, "sugar");

        let parsed = parse_ingredient("1 1/2 tablespoons butter");
        assert_quantity(parsed.quantity, 1.5);
        assert_eq!(parsed.unit.as_deref(), Some("tablespoons"));
        assert_eq!(parsed.item, "butter");
        assert_eq!(parsed.raw_quantity.as_deref(), Some("1 1/2"));
    }

    #[test]
    fn test_unicode_fractions() {
        let parsed = parse_ingredient("½ cup milk");
        assert_quantity(parsed.quantity, 0.5);
        assert_eq!(parsed.item, "milk");

        let parsed = parse_ingredient("1 1⁄4 teaspoons salt");
        assert_quantity(parsed.quantity, 1.25);
        assert_eq!(parsed.unit.as_deref(), Some("teaspoons"));
        assert_eq!(parsed.item, "salt");
    }

    #[test]
    fn test_ranges() {
        let parsed = parse_ingredient("2-3 cloves garlic");
        assert_quantity(parsed.quantity, 2.5);
        assert_eq!(parsed.unit.as_deref(), Some("cloves"));
        assert_eq!(parsed.item, "garlic");
        assert_eq!(parsed.raw_quantity.as_deref(), Some("2-3"));

        let parsed = parse_ingredient("1/2 to 3/4 cup flour");
        assert_quantity(parsed.quantity, 0.625);
        assert_eq!(parsed.item, "flour");
    }

    #[test]
    fn test_no_measure() {
        let parsed = parse_ingredient("fresh basil");
        assert!(parsed.quantity.is_none());
        assert!(parsed.unit.is_none());
        assert!(parsed.raw_quantity.is_none());
        assert_eq!(parsed.item, "fresh basil");

        let parsed = parse_ingredient("salt, to taste");
        assert!(parsed.quantity.is_none());
        assert_eq!(parsed.item, "salt");
    }

    #[test]
    fn test_hyphenated_unit_with_packaging() {
        let parsed = parse_ingredient("1 1/4 -ounce packet active dry yeast");
        assert_quantity(parsed.quantity, 1.25);
        assert_eq!(parsed.unit.as_deref(), Some("ounce"));
        assert_eq!(parsed.item, "active dry yeast");
    }

    #[test]
    fn test_descriptor_stripping() {
        assert_eq!(parse_ingredient("6 cups apples, peeled and thinly sliced").item, "apples");
        assert_eq!(parse_ingredient("1 cup flour (all-purpose)").item, "flour");
        assert_eq!(parse_ingredient("2 tbsp butter (melted)").item, "butter");
        assert_eq!(parse_ingredient("1 cup fresh basil").item, "basil");
        assert_eq!(parse_ingredient("2 garlic cloves").item, "garlic");
        assert_eq!(parse_ingredient("3 tbsp olive oil, plus more for drizzling").item, "olive oil");
    }

    #[test]
    fn test_unit_without_quantity() {
        let parsed = parse_ingredient("pinch of salt");
        assert!(parsed.quantity.is_none());
        assert_eq!(parsed.unit.as_deref(), Some("pinch"));
        assert_eq!(parsed.item, "salt");

        let parsed = parse_ingredient("clove of garlic");
        assert_eq!(parsed.unit.as_deref(), Some("clove"));
        assert_eq!(parsed.item, "garlic");
    }

    #[test]
    fn test_whole_number_with_fraction_glyph() {
        let parsed = parse_ingredient("1 ½ cups flour");
        assert_quantity(parsed.quantity, 1.5);
        assert_eq!(parsed.raw_quantity.as_deref(), Some("1 ½"));
        assert_eq!(parsed.unit.as_deref(), Some("cups"));
        assert_eq!(parsed.item, "flour");

        let parsed = parse_ingredient("2 ½-ounce cans tuna");
        assert_quantity(parsed.quantity, 2.5);
        assert_eq!(parsed.unit.as_deref(), Some("ounce"));
        assert_eq!(parsed.item, "tuna");
    }

    #[test]
    fn test_stacked_descriptors_group_together() {
        let parsed = parse_ingredient("1 cup chopped fresh basil");
        assert_eq!(parsed.item, "basil");
        assert!(items_match(&parsed.item, &parse_ingredient("2 cups fresh basil").item));
        assert_eq!(parse_ingredient("1 can tomatoes, diced (canned)").item, "tomatoes");
    }

    #[test]
    fn test_whitespace_only_line_keeps_item() {
        let parsed = parse_ingredient("   ");
        assert_eq!(parsed.original, "   ");
        assert!(!parsed.item.is_empty());
        assert!(parsed.quantity.is_none());
    }

    #[test]
    fn test_abbreviations_resolve_to_full_names() {
        assert_eq!(parse_ingredient("2 tbsp sugar").unit.as_deref(), Some("tablespoons"));
        assert_eq!(parse_ingredient("1 tsp vanilla").unit.as_deref(), Some("teaspoons"));
        assert_eq!(parse_ingredient("1 t. salt").unit.as_deref(), Some("teaspoons"));
        assert_eq!(parse_ingredient("8 oz cream cheese").unit.as_deref(), Some("ounces"));
        assert_eq!(parse_ingredient("2 lbs potatoes").unit.as_deref(), Some("pounds"));
        assert_eq!(parse_ingredient("1 c. milk").unit.as_deref(), Some("cups"));
    }

    #[test]
    fn test_case_insensitive() {
        let parsed = parse_ingredient("2 CUPS FLOUR");
        assert_quantity(parsed.quantity, 2.0);
        assert_eq!(parsed.unit.as_deref(), Some("cups"));
        assert_eq!(parsed.item, "flour");
    }

    #[test]
    fn test_count_without_unit() {
        let parsed = parse_ingredient("3 eggs");
        assert_quantity(parsed.quantity, 3.0);
        assert!(parsed.unit.is_none());
        assert_eq!(parsed.item, "eggs");
    }

    #[test]
    fn test_leading_qualifiers() {
        let parsed = parse_ingredient("about 2 cups stock");
        assert_quantity(parsed.quantity, 2.0);
        assert_eq!(parsed.item, "stock");

        let parsed = parse_ingredient("- 1 onion");
        assert_quantity(parsed.quantity, 1.0);
        assert_eq!(parsed.item, "onion");
    }

    #[test]
    fn test_unresolvable_quantity_keeps_raw_text() {
        let parsed = parse_ingredient("1/0 cup water");
        assert!(parsed.quantity.is_none());
        assert_eq!(parsed.raw_quantity.as_deref(), Some("1/0"));
        assert_eq!(parsed.unit.as_deref(), Some("cup"));
        assert_eq!(parsed.item, "water");
    }

    #[test]
    fn test_item_never_empty_for_non_empty_input() {
        for line in ["chopped", "2 cups", "(optional)", "1 cup (packed)", "to taste"] {
            let parsed = parse_ingredient(line);
            assert!(!parsed.item.is_empty(), "empty item for {:?}", line);
            assert_eq!(parsed.original, line);
        }

        let parsed = parse_ingredient("2 Cups");
        assert_eq!(parsed.item, "2 cups");
        assert_eq!(parsed.unit.as_deref(), Some("cups"));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let first = parse_ingredient("2-3 cloves garlic, minced");
        let second = parse_ingredient("2-3 cloves garlic, minced");
        assert_eq!(first, second);
    }

    #[test]
    fn test_items_match_normalization() {
        assert!(items_match("Brown Sugar", "brown sugar"));
        assert!(items_match("all-purpose flour", "allpurpose flour"));
        assert!(!items_match("tomato", "tomatoes"));
    }
}
