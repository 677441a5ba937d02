//! # Recipe Scaling Module
//!
//! Multiplies the leading quantity of ingredient lines by a factor and rewrites the line.
//! Small or large spoon and cup amounts are moved to a more practical unit (1/8 cup becomes
//! 2 tbsp, 24 tbsp becomes 1 1/2 cups). Everything after the unit is kept as written.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

use crate::ingredient_parser::split_measure;
use crate::observability::{record_scaling_metrics, scaling_span};
use crate::shopping_list::Recipe;

const TABLESPOONS_PER_CUP: f64 = 16.0;
const TEASPOONS_PER_TABLESPOON: f64 = 3.0;
const FRACTION_TOLERANCE: f64 = 0.005;

lazy_static! {
    static ref OR_SEPARATOR: Regex = Regex::new(r"(?i)\s+or\s+").expect("OR_SEPARATOR regex should be valid");
}

/// A preset scale factor offered to users
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalingOption {
    pub value: f64,
    pub label: &'static str,
}

/// Preset scale factors, smallest first
pub const SCALING_OPTIONS: [ScalingOption; 7] = [
    ScalingOption { value: 0.5, label: "Half (0.5x)" },
    ScalingOption { value: 0.75, label: "Three-quarters (0.75x)" },
    ScalingOption { value: 1.0, label: "Original (1x)" },
    ScalingOption { value: 1.5, label: "One and a half (1.5x)" },
    ScalingOption { value: 2.0, label: "Double (2x)" },
    ScalingOption { value: 3.0, label: "Triple (3x)" },
    ScalingOption { value: 4.0, label: "Quadruple (4x)" },
];

/// Spoon and cup units eligible for practical conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KitchenMeasure {
    Cup,
    Tablespoon,
    Teaspoon,
}

impl KitchenMeasure {
    fn from_canonical(canonical: &str) -> Option<Self> {
        match canonical {
            "cup" | "cups" => Some(KitchenMeasure::Cup),
            "tablespoon" | "tablespoons" => Some(KitchenMeasure::Tablespoon),
            "teaspoon" | "teaspoons" => Some(KitchenMeasure::Teaspoon),
            _ => None,
        }
    }

    fn label(&self, amount: f64) -> &'static str {
        match self {
            KitchenMeasure::Cup if amount <= 1.0 => "cup",
            KitchenMeasure::Cup => "cups",
            KitchenMeasure::Tablespoon => "tbsp",
            KitchenMeasure::Teaspoon => "tsp",
        }
    }
}

fn round_to_quarter(amount: f64) -> f64 {
    (amount * 4.0).round() / 4.0
}

/// Move an amount to a more practical unit, if one applies
fn convert_to_practical(amount: f64, measure: KitchenMeasure) -> Option<(f64, KitchenMeasure)> {
    let (converted, target) = match measure {
        KitchenMeasure::Cup if amount <= 0.25 => {
            let tablespoons = amount * TABLESPOONS_PER_CUP;
            if tablespoons >= 1.0 {
                (tablespoons, KitchenMeasure::Tablespoon)
            } else {
                (tablespoons * TEASPOONS_PER_TABLESPOON, KitchenMeasure::Teaspoon)
            }
        }
        KitchenMeasure::Tablespoon if amount < 1.0 => {
            (amount * TEASPOONS_PER_TABLESPOON, KitchenMeasure::Teaspoon)
        }
        KitchenMeasure::Tablespoon if amount >= TABLESPOONS_PER_CUP => {
            (amount / TABLESPOONS_PER_CUP, KitchenMeasure::Cup)
        }
        KitchenMeasure::Teaspoon if amount >= TEASPOONS_PER_TABLESPOON => {
            (amount / TEASPOONS_PER_TABLESPOON, KitchenMeasure::Tablespoon)
        }
        _ => return None,
    };

    let rounded = round_to_quarter(converted);
    // too small to express in quarters of the target unit
    if rounded <= 0.0 {
        return None;
    }
    Some((rounded, target))
}

/// Format an amount for display, using kitchen fractions where they fit
///
/// ```rust
/// use cookbook_core::scaling::format_amount;
///
/// assert_eq!(format_amount(1.5), "1 1/2");
/// assert_eq!(format_amount(0.25), "1/4");
/// assert_eq!(format_amount(3.0), "3");
/// assert_eq!(format_amount(0.0), "");
/// ```
pub fn format_amount(amount: f64) -> String {
    if amount == 0.0 || !amount.is_finite() {
        return String::new();
    }

    let mut whole = amount.floor();
    let mut fractional = amount - whole;
    if fractional > 1.0 - FRACTION_TOLERANCE {
        whole += 1.0;
        fractional = 0.0;
    }

    if fractional < FRACTION_TOLERANCE {
        return format!("{}", whole as i64);
    }

    match kitchen_fraction(fractional) {
        Some((numerator, denominator)) if whole == 0.0 => format!("{}/{}", numerator, denominator),
        Some((numerator, denominator)) => format!("{} {}/{}", whole as i64, numerator, denominator),
        None => format_decimal(amount),
    }
}

/// Closest halves, thirds, quarters, sixths, eighths or sixteenths to `fractional`
fn kitchen_fraction(fractional: f64) -> Option<(u32, u32)> {
    for denominator in [2u32, 3, 4, 6, 8, 16] {
        let numerator = (fractional * denominator as f64).round();
        if numerator >= 1.0
            && numerator < denominator as f64
            && (numerator / denominator as f64 - fractional).abs() < FRACTION_TOLERANCE
        {
            return Some((numerator as u32, denominator));
        }
    }
    None
}

fn format_decimal(amount: f64) -> String {
    let formatted = format!("{:.2}", amount);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Scale a single ingredient line
///
/// Lines with a factor of 1 or without a resolvable quantity come back unchanged.
/// Alternatives joined with "or" are scaled separately.
pub fn scale_ingredient(line: &str, factor: f64) -> String {
    scale_line(line, factor).0
}

/// Scale a line and count how many of its measures moved to another unit
fn scale_line(line: &str, factor: f64) -> (String, usize) {
    if (factor - 1.0).abs() < f64::EPSILON {
        return (line.to_string(), 0);
    }

    if !OR_SEPARATOR.is_match(line) {
        let (text, converted) = scale_measure(line, factor);
        return (text, usize::from(converted));
    }

    let mut converted_count = 0;
    let parts: Vec<String> = OR_SEPARATOR
        .split(line)
        .map(|part| {
            let (text, converted) = scale_measure(part.trim(), factor);
            if converted {
                converted_count += 1;
            }
            text
        })
        .collect();
    (parts.join(" or "), converted_count)
}

/// Scale one line without "or" alternatives; the flag tells whether the unit was converted
fn scale_measure(line: &str, factor: f64) -> (String, bool) {
    let split = split_measure(line);
    let Some(quantity) = split.quantity else {
        trace!(line = %line, "No quantity to scale");
        return (line.to_string(), false);
    };

    let scaled = quantity * factor;
    let practical = split
        .unit
        .as_ref()
        .and_then(|unit| KitchenMeasure::from_canonical(&unit.canonical))
        .and_then(|measure| convert_to_practical(scaled, measure));

    let (amount, unit_label, converted) = match (practical, &split.unit) {
        (Some((amount, measure)), _) => (amount, Some(measure.label(amount).to_string()), true),
        (None, Some(unit)) => (scaled, Some(unit.spelling.clone()), false),
        (None, None) => (scaled, None, false),
    };

    let mut parts: Vec<String> = Vec::new();
    let lead = split.lead.trim();
    if !lead.is_empty() {
        parts.push(lead.to_string());
    }
    parts.push(format_amount(amount));
    if let Some(label) = unit_label {
        parts.push(label);
    }
    if !split.remainder.is_empty() {
        parts.push(split.remainder.to_string());
    }

    let scaled_line = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    trace!(line = %line, scaled = %scaled_line, converted, "Scaled ingredient");
    (scaled_line, converted)
}

/// Scale every line of an ingredient list
pub fn scale_ingredients<S: AsRef<str>>(lines: &[S], factor: f64) -> Vec<String> {
    let span = scaling_span(factor, lines.len());
    let _guard = span.enter();

    let mut converted_count = 0;
    let scaled: Vec<String> = lines
        .iter()
        .map(|line| {
            let (text, converted) = scale_line(line.as_ref(), factor);
            converted_count += converted;
            text
        })
        .collect();

    record_scaling_metrics(lines.len(), converted_count);
    debug!(factor, line_count = lines.len(), converted_count, "Scaled ingredient list");
    scaled
}

/// A copy of `recipe` with every present ingredient line scaled
pub fn scale_recipe(recipe: &Recipe, factor: f64) -> Recipe {
    let present: Vec<&str> = recipe.ingredients.iter().flatten().map(String::as_str).collect();
    let mut scaled = scale_ingredients(&present, factor).into_iter();

    Recipe {
        name: recipe.name.clone(),
        ingredients: recipe
            .ingredients
            .iter()
            .map(|line| line.as_ref().and_then(|_| scaled.next()))
            .collect(),
    }
}
