//! # Ingredient Parser Module
//!
//! Turns a single free-text recipe line into a [`ParsedIngredient`]:
//!
//! 1. Leading dashes and connective words ("about", "to") are dropped
//! 2. A quantity is recognized (fractions, mixed numbers, ranges, Unicode fractions)
//! 3. A unit is recognized from the static unit table
//! 4. Descriptors are stripped from what remains to leave the item name
//!
//! Parsing never fails; the worst case is an item with no quantity or unit.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptors::strip_descriptors;
use crate::observability::record_parse_metrics;
use crate::quantity::{extract_quantity, strip_leading_qualifiers};
use crate::units::{recognize_unit, UnitMatch};

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").expect("NON_WORD regex should be valid");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("WHITESPACE regex should be valid");
}

/// Structured view of one ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIngredient {
    /// The line exactly as given
    pub original: String,
    /// Lowercase item name, e.g. "flour"
    pub item: String,
    /// Numeric amount; ranges are averaged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Canonical unit name, e.g. "cups" or "tablespoons"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Quantity text as written, e.g. "1 1/2" or "2-3"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_quantity: Option<String>,
}

/// A line split into its measure and the text that follows it
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MeasureSplit<'a> {
    /// Text before the quantity that was dropped (dashes, "about", ...)
    pub lead: &'a str,
    pub quantity: Option<f64>,
    pub raw_quantity: Option<String>,
    pub unit: Option<UnitMatch>,
    /// Everything after the quantity and unit, trimmed
    pub remainder: &'a str,
}

/// Split the measure off the front of a line.
///
/// Shared by parsing and scaling so both agree on where the quantity and unit end.
pub(crate) fn split_measure(line: &str) -> MeasureSplit<'_> {
    let trimmed = line.trim();
    let body = strip_leading_qualifiers(trimmed);
    let lead = &trimmed[..trimmed.len() - body.len()];

    let (quantity, raw_quantity, after_quantity) = match extract_quantity(body) {
        Some(found) => (found.value, Some(found.raw), body[found.consumed..].trim()),
        None => (None, None, body),
    };

    let (unit, remainder) = match recognize_unit(after_quantity) {
        Some(unit) => {
            let rest = after_quantity[unit.consumed..].trim();
            (Some(unit), rest)
        }
        None => (None, after_quantity),
    };

    MeasureSplit {
        lead,
        quantity,
        raw_quantity,
        unit,
        remainder,
    }
}

/// Parse a single ingredient line
///
/// ```rust
/// use cookbook_core::parse_ingredient;
///
/// let parsed = parse_ingredient("2 cups flour");
/// assert_eq!(parsed.quantity, Some(2.0));
/// assert_eq!(parsed.unit.as_deref(), Some("cups"));
/// assert_eq!(parsed.item, "flour");
/// ```
pub fn parse_ingredient(line: &str) -> ParsedIngredient {
    let split = split_measure(line);
    let measured = split.quantity.is_some() || split.unit.is_some();
    let mut item = strip_descriptors(split.remainder, measured);
    if item.is_empty() {
        // nothing after the measure, e.g. "2 cups"
        item = line.trim().to_lowercase();
    }
    if item.is_empty() {
        // whitespace-only line
        item = line.to_lowercase();
    }

    record_parse_metrics(split.quantity.is_some(), split.unit.is_some());
    debug!(
        line = %line,
        item = %item,
        quantity = ?split.quantity,
        unit = ?split.unit.as_ref().map(|u| u.canonical.as_str()),
        "Parsed ingredient line"
    );

    ParsedIngredient {
        original: line.to_string(),
        item,
        quantity: split.quantity,
        unit: split.unit.map(|u| u.canonical),
        raw_quantity: split.raw_quantity,
    }
}

/// Normalize an item name for comparison: lowercase, punctuation removed, single spaces
pub fn normalize_item(item: &str) -> String {
    let lowered = item.to_lowercase();
    let without_punctuation = NON_WORD.replace_all(&lowered, "");
    WHITESPACE
        .replace_all(&without_punctuation, " ")
        .trim()
        .to_string()
}

/// Whether two item names refer to the same shopping-list item
pub fn items_match(a: &str, b: &str) -> bool {
    normalize_item(a) == normalize_item(b)
}
