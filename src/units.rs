//! # Unit Table Module
//!
//! Static registry of every unit spelling the parser recognizes. Each spelling maps to a
//! canonical display name, a category (volume, weight or count) and, for volume and weight,
//! a conversion factor into the category's base unit (milliliters or grams).
//!
//! The table is built once on first access and is read-only afterwards, so it can be shared
//! freely between threads.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Broad family a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Volume,
    Weight,
    Count,
}

impl UnitCategory {
    /// Base unit amounts of this category convert into, if any
    pub fn canonical_unit(&self) -> Option<&'static str> {
        match self {
            UnitCategory::Volume => Some("ml"),
            UnitCategory::Weight => Some("g"),
            UnitCategory::Count => None,
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitCategory::Volume => write!(f, "volume"),
            UnitCategory::Weight => write!(f, "weight"),
            UnitCategory::Count => write!(f, "count"),
        }
    }
}

/// One row of the unit table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitEntry {
    /// Volume, weight or count
    pub category: UnitCategory,
    /// Canonical spelling reported to callers (e.g. "tablespoons" for "tbsp")
    pub canonical: &'static str,
    /// 1 unit of this spelling equals `conversion_factor` ml (volume) or g (weight).
    /// Always `None` for count units.
    pub conversion_factor: Option<f64>,
}

use self::UnitCategory::{Count, Volume, Weight};

const CUP_ML: f64 = 236.588;
const TABLESPOON_ML: f64 = 14.787;
const TEASPOON_ML: f64 = 4.929;
const FLUID_OUNCE_ML: f64 = 29.574;
const PINT_ML: f64 = 473.176;
const QUART_ML: f64 = 946.353;
const GALLON_ML: f64 = 3785.41;
const OUNCE_G: f64 = 28.3495;
const POUND_G: f64 = 453.592;

/// Every known spelling: (spelling, category, canonical, factor)
const UNIT_DEFINITIONS: &[(&str, UnitCategory, &str, Option<f64>)] = &[
    // Volume
    ("cup", Volume, "cup", Some(CUP_ML)),
    ("cups", Volume, "cups", Some(CUP_ML)),
    ("c.", Volume, "cups", Some(CUP_ML)),
    ("c", Volume, "cups", Some(CUP_ML)),
    ("tbsp", Volume, "tablespoons", Some(TABLESPOON_ML)),
    ("tablespoon", Volume, "tablespoon", Some(TABLESPOON_ML)),
    ("tablespoons", Volume, "tablespoons", Some(TABLESPOON_ML)),
    ("tbs", Volume, "tablespoons", Some(TABLESPOON_ML)),
    ("t", Volume, "teaspoons", Some(TEASPOON_ML)),
    ("tsp", Volume, "teaspoons", Some(TEASPOON_ML)),
    ("teaspoon", Volume, "teaspoon", Some(TEASPOON_ML)),
    ("teaspoons", Volume, "teaspoons", Some(TEASPOON_ML)),
    ("fl oz", Volume, "fluid ounces", Some(FLUID_OUNCE_ML)),
    ("fl. oz", Volume, "fluid ounces", Some(FLUID_OUNCE_ML)),
    ("fluid ounce", Volume, "fluid ounce", Some(FLUID_OUNCE_ML)),
    ("fluid ounces", Volume, "fluid ounces", Some(FLUID_OUNCE_ML)),
    ("ml", Volume, "milliliters", Some(1.0)),
    ("milliliter", Volume, "milliliter", Some(1.0)),
    ("milliliters", Volume, "milliliters", Some(1.0)),
    ("l", Volume, "liters", Some(1000.0)),
    ("liter", Volume, "liter", Some(1000.0)),
    ("liters", Volume, "liters", Some(1000.0)),
    ("gal", Volume, "gallons", Some(GALLON_ML)),
    ("gallon", Volume, "gallon", Some(GALLON_ML)),
    ("gallons", Volume, "gallons", Some(GALLON_ML)),
    ("pt", Volume, "pints", Some(PINT_ML)),
    ("pint", Volume, "pint", Some(PINT_ML)),
    ("pints", Volume, "pints", Some(PINT_ML)),
    ("qt", Volume, "quarts", Some(QUART_ML)),
    ("quart", Volume, "quart", Some(QUART_ML)),
    ("quarts", Volume, "quarts", Some(QUART_ML)),
    // Weight
    ("g", Weight, "grams", Some(1.0)),
    ("gram", Weight, "gram", Some(1.0)),
    ("grams", Weight, "grams", Some(1.0)),
    ("kg", Weight, "kilograms", Some(1000.0)),
    ("kilogram", Weight, "kilogram", Some(1000.0)),
    ("kilograms", Weight, "kilograms", Some(1000.0)),
    ("oz", Weight, "ounces", Some(OUNCE_G)),
    ("ounce", Weight, "ounce", Some(OUNCE_G)),
    ("ounces", Weight, "ounces", Some(OUNCE_G)),
    ("lb", Weight, "pounds", Some(POUND_G)),
    ("lbs", Weight, "pounds", Some(POUND_G)),
    ("pound", Weight, "pound", Some(POUND_G)),
    ("pounds", Weight, "pounds", Some(POUND_G)),
    ("mg", Weight, "milligrams", Some(0.001)),
    ("milligram", Weight, "milligram", Some(0.001)),
    ("milligrams", Weight, "milligrams", Some(0.001)),
    // Count
    ("piece", Count, "piece", None),
    ("pieces", Count, "pieces", None),
    ("clove", Count, "clove", None),
    ("cloves", Count, "cloves", None),
    ("bulb", Count, "bulb", None),
    ("bulbs", Count, "bulbs", None),
    ("head", Count, "head", None),
    ("heads", Count, "heads", None),
    ("stalk", Count, "stalk", None),
    ("stalks", Count, "stalks", None),
    ("sprig", Count, "sprig", None),
    ("sprigs", Count, "sprigs", None),
    ("pinch", Count, "pinch", None),
    ("pinches", Count, "pinches", None),
    ("dash", Count, "dash", None),
    ("dashes", Count, "dashes", None),
    ("handful", Count, "handful", None),
    ("handfuls", Count, "handfuls", None),
    ("slice", Count, "slice", None),
    ("slices", Count, "slices", None),
    ("chunk", Count, "chunk", None),
    ("chunks", Count, "chunks", None),
    ("can", Count, "can", None),
    ("cans", Count, "cans", None),
    ("jar", Count, "jar", None),
    ("jars", Count, "jars", None),
    ("package", Count, "package", None),
    ("packages", Count, "packages", None),
    ("packet", Count, "packet", None),
    ("packets", Count, "packets", None),
    ("box", Count, "box", None),
    ("boxes", Count, "boxes", None),
    ("bunch", Count, "bunch", None),
    ("bunches", Count, "bunches", None),
    ("bottle", Count, "bottle", None),
    ("bottles", Count, "bottles", None),
    ("loaf", Count, "loaf", None),
    ("loaves", Count, "loaves", None),
];

/// Build the unit-recognition pattern from the table spellings
///
/// Spellings are sorted longest first so that "fl oz" wins over "fl" style prefixes, and any
/// literal period inside a spelling becomes optional ("c." also accepts "c"). The unit must sit
/// at the start of the text, may carry one leading hyphen ("-ounce"), and must be followed by a
/// period, whitespace or the end of the text.
fn build_unit_regex_pattern() -> String {
    let mut spellings: Vec<&str> = UNIT_DEFINITIONS.iter().map(|(s, ..)| *s).collect();
    spellings.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let alternation = spellings
        .iter()
        .map(|s| regex::escape(s).replace(r"\.", r"\.?"))
        .collect::<Vec<_>>()
        .join("|");

    format!(r"(?i)^-?({})(?:\.|\s|$)", alternation)
}

lazy_static! {
    static ref UNIT_TABLE: HashMap<&'static str, UnitEntry> = UNIT_DEFINITIONS
        .iter()
        .map(|&(spelling, category, canonical, conversion_factor)| {
            (
                spelling,
                UnitEntry {
                    category,
                    canonical,
                    conversion_factor,
                },
            )
        })
        .collect();
    static ref UNIT_REGEX: Regex =
        Regex::new(&build_unit_regex_pattern()).expect("Unit pattern should be valid");
}

/// Look up a spelling in the unit table (case-insensitive, surrounding whitespace ignored)
pub fn lookup_unit(spelling: &str) -> Option<&'static UnitEntry> {
    UNIT_TABLE.get(spelling.trim().to_lowercase().as_str())
}

/// All spellings known to the table, in declaration order
pub fn known_spellings() -> impl Iterator<Item = &'static str> {
    UNIT_DEFINITIONS.iter().map(|(s, ..)| *s)
}

/// A unit recognized at the start of some text
#[derive(Debug, Clone, PartialEq)]
pub struct UnitMatch {
    /// Canonical spelling from the unit table
    pub canonical: String,
    /// The spelling exactly as written, without the leading hyphen or terminator
    pub spelling: String,
    /// Bytes of the input consumed, including hyphen and terminator
    pub consumed: usize,
}

/// Recognize a unit at the very start of `text`
///
/// ```rust
/// use cookbook_core::units::recognize_unit;
///
/// let unit = recognize_unit("tbsp butter").unwrap();
/// assert_eq!(unit.canonical, "tablespoons");
/// assert_eq!(unit.consumed, 5);
/// assert!(recognize_unit("butter").is_none());
/// ```
pub fn recognize_unit(text: &str) -> Option<UnitMatch> {
    let captures = UNIT_REGEX.captures(text)?;
    let whole = captures.get(0)?;
    let spelling = captures.get(1)?.as_str();

    let lowered = spelling.to_lowercase();
    let canonical = match UNIT_TABLE.get(lowered.as_str()) {
        Some(entry) => entry.canonical.to_string(),
        None => lowered,
    };

    trace!(spelling = %spelling, canonical = %canonical, "Recognized unit");

    Some(UnitMatch {
        canonical,
        spelling: spelling.to_string(),
        consumed: whole.end(),
    })
}

/// Canonical name and category of a known unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedUnit {
    pub canonical: &'static str,
    pub category: UnitCategory,
}

/// Resolve a unit spelling to its canonical form and category
pub fn normalize_unit(unit: &str) -> Option<NormalizedUnit> {
    lookup_unit(unit).map(|entry| NormalizedUnit {
        canonical: entry.canonical,
        category: entry.category,
    })
}

/// A quantity expressed in its category's base unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalQuantity {
    pub quantity: f64,
    pub unit: String,
}

/// Convert a quantity into milliliters or grams
///
/// Count units and unknown spellings come back unconverted, labelled with the canonical
/// spelling when one is known. Nothing in the shopping list calls this; entries keep the
/// amounts their recipes wrote.
pub fn convert_to_canonical(quantity: Option<f64>, unit: Option<&str>) -> Option<CanonicalQuantity> {
    let quantity = quantity?;
    let unit = unit.filter(|u| !u.trim().is_empty())?;

    match lookup_unit(unit) {
        Some(UnitEntry {
            category,
            conversion_factor: Some(factor),
            ..
        }) => Some(CanonicalQuantity {
            quantity: quantity * factor,
            unit: category
                .canonical_unit()
                .unwrap_or_default()
                .to_string(),
        }),
        Some(entry) => Some(CanonicalQuantity {
            quantity,
            unit: entry.canonical.to_string(),
        }),
        None => Some(CanonicalQuantity {
            quantity,
            unit: unit.to_string(),
        }),
    }
}

/// Two units are compatible when both are known and share a category
pub fn are_units_compatible(unit1: Option<&str>, unit2: Option<&str>) -> bool {
    match (unit1.and_then(normalize_unit), unit2.and_then(normalize_unit)) {
        (Some(a), Some(b)) => a.category == b.category,
        _ => false,
    }
}
