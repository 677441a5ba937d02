//! # Quantity Module
//!
//! Recognition and evaluation of the numeric prefix of an ingredient line.
//!
//! Supported forms:
//!
//! - Integers and decimals (`2`, `1.5`)
//! - Fractions and mixed numbers (`1/2`, `1 1/2`, `1 1⁄2`)
//! - Unicode vulgar fractions, optionally after a whole number (`½`, `1½`, `1 ½`)
//! - Ranges, evaluated to their midpoint (`2-3`, `1/2 to 3/4`)
//! - Compounds, evaluated to their sum (`1 and 1/2`)

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

lazy_static! {
    static ref LEADING_PUNCTUATION: Regex =
        Regex::new(r"^[\s\-–]+").expect("LEADING_PUNCTUATION regex should be valid");
    static ref LEADING_QUALIFIER: Regex =
        Regex::new(r"(?i)^(?:to|or|about|approximately|roughly|around)\s+")
            .expect("LEADING_QUALIFIER regex should be valid");

    /// `1 1/2 ` style prefix, tried before the general token
    static ref MIXED_NUMBER: Regex =
        Regex::new(r"^([0-9]+)\s+([0-9]+)[/⁄]([0-9]+)(?:\s+|$)").expect("MIXED_NUMBER regex should be valid");
    /// `1 ½` style prefix; a trailing hyphen is left for the unit ("2 ½-ounce")
    static ref MIXED_GLYPH: Regex = Regex::new(r"^([0-9]+)\s+([½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])(\s+|$|[-–])")
        .expect("MIXED_GLYPH regex should be valid");

    /// A run of quantity characters, optionally joined to a second run by to/and/or/dash
    static ref QUANTITY_TOKEN: Regex = Regex::new(
        r"^([0-9/⁄\-.½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞]+(?:\s+(?i:to|and|or|[-–])\s+[0-9/⁄\-.½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞]+)?)(?:\s+|$)"
    )
    .expect("QUANTITY_TOKEN regex should be valid");

    static ref TO_RANGE: Regex = Regex::new(
        r"^([0-9./\s½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞]+)\s+to\s+([0-9./\s½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞]+)$"
    )
    .expect("TO_RANGE regex should be valid");
    static ref DASH_RANGE: Regex = Regex::new(
        r"^([0-9./\s½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞]+)\s*[-–]\s*([0-9./\s½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞]+)$"
    )
    .expect("DASH_RANGE regex should be valid");
    static ref AND_COMPOUND: Regex = Regex::new(
        r"^([0-9./½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞]+)\s+and\s+([0-9./½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞]+)"
    )
    .expect("AND_COMPOUND regex should be valid");

    static ref FRACTION: Regex =
        Regex::new(r"^(?:([0-9]+)\s+)?([0-9]+)/([0-9]+)$").expect("FRACTION regex should be valid");
    static ref DECIMAL: Regex =
        Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").expect("DECIMAL regex should be valid");
    static ref VULGAR_FRACTION: Regex =
        Regex::new(r"^(?:([0-9]+)\s*)?([½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])$").expect("VULGAR_FRACTION regex should be valid");
}

/// Numeric value of a Unicode vulgar fraction glyph
pub fn vulgar_fraction_value(glyph: char) -> Option<f64> {
    let value = match glyph {
        '½' => 0.5,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '¼' => 0.25,
        '¾' => 0.75,
        '⅕' => 0.2,
        '⅖' => 0.4,
        '⅗' => 0.6,
        '⅘' => 0.8,
        '⅙' => 1.0 / 6.0,
        '⅚' => 5.0 / 6.0,
        '⅛' => 0.125,
        '⅜' => 0.375,
        '⅝' => 0.625,
        '⅞' => 0.875,
        _ => return None,
    };
    Some(value)
}

/// Quantity text found at the start of a line
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityMatch {
    /// Evaluated amount, `None` when the text could not be resolved to a number
    pub value: Option<f64>,
    /// The quantity text as written, trimmed
    pub raw: String,
    /// Bytes of the input consumed, including trailing whitespace
    pub consumed: usize,
}

/// Drop leading dashes, whitespace and one connective word ("about", "to", ...)
pub fn strip_leading_qualifiers(text: &str) -> &str {
    let text = match LEADING_PUNCTUATION.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    let text = match LEADING_QUALIFIER.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    text.trim_start()
}

/// Find the quantity at the very start of `text`
///
/// ```rust
/// use cookbook_core::quantity::extract_quantity;
///
/// let found = extract_quantity("1 1/2 cups flour").unwrap();
/// assert_eq!(found.value, Some(1.5));
/// assert_eq!(found.raw, "1 1/2");
/// assert!(extract_quantity("flour").is_none());
/// ```
pub fn extract_quantity(text: &str) -> Option<QuantityMatch> {
    if let Some(captures) = MIXED_NUMBER.captures(text) {
        let whole = captures[1].parse::<u64>().ok();
        let numerator = captures[2].parse::<u64>().ok();
        let denominator = captures[3].parse::<u64>().ok().filter(|d| *d != 0);

        let value = match (whole, numerator, denominator) {
            (Some(w), Some(n), Some(d)) => Some(w as f64 + n as f64 / d as f64),
            _ => None,
        };
        let matched = &captures[0];
        trace!(raw = %matched.trim(), ?value, "Matched mixed number");

        return Some(QuantityMatch {
            value,
            raw: matched.trim().to_string(),
            consumed: matched.len(),
        });
    }

    if let Some(found) = extract_mixed_glyph(text) {
        return Some(found);
    }

    let captures = QUANTITY_TOKEN.captures(text)?;
    let raw = captures[1].trim().to_string();
    let value = parse_quantity(&raw);
    trace!(raw = %raw, ?value, "Matched quantity token");

    Some(QuantityMatch {
        value,
        consumed: captures[0].len(),
        raw,
    })
}

fn extract_mixed_glyph(text: &str) -> Option<QuantityMatch> {
    let captures = MIXED_GLYPH.captures(text)?;
    let glyph_end = captures.get(2)?.end();
    let terminator = captures.get(3)?;

    let consumed = if terminator.as_str().trim().is_empty() {
        terminator.end()
    } else {
        // hyphen: only a hyphenated unit may follow, "2 ½-3" is left to the range parser
        let after = text[terminator.end()..].chars().next()?;
        if !after.is_alphabetic() {
            return None;
        }
        terminator.start()
    };

    let whole = captures[1].parse::<u64>().ok();
    let fraction = captures[2].chars().next().and_then(vulgar_fraction_value);
    let value = whole.zip(fraction).map(|(w, f)| w as f64 + f);
    let raw = text[..glyph_end].to_string();
    trace!(raw = %raw, ?value, "Matched whole number with fraction glyph");

    Some(QuantityMatch {
        value,
        raw,
        consumed,
    })
}

/// Evaluate quantity text to a number
///
/// Ranges ("A to B", "A-B") give their midpoint and "A and B" gives the sum.
/// Returns `None` for anything that does not resolve, including zero denominators.
pub fn parse_quantity(text: &str) -> Option<f64> {
    let normalized = text.trim().to_lowercase().replace('⁄', "/");
    if normalized.is_empty() {
        return None;
    }

    if let Some(captures) = TO_RANGE.captures(&normalized) {
        if let (Some(a), Some(b)) = (parse_single(&captures[1]), parse_single(&captures[2])) {
            return Some((a + b) / 2.0);
        }
    }

    if let Some(captures) = DASH_RANGE.captures(&normalized) {
        if let (Some(a), Some(b)) = (parse_single(&captures[1]), parse_single(&captures[2])) {
            return Some((a + b) / 2.0);
        }
    }

    if let Some(captures) = AND_COMPOUND.captures(&normalized) {
        if let (Some(a), Some(b)) = (parse_single(&captures[1]), parse_single(&captures[2])) {
            return Some(a + b);
        }
    }

    parse_single(&normalized)
}

fn parse_single(text: &str) -> Option<f64> {
    let text = text.trim();

    if let Some(captures) = VULGAR_FRACTION.captures(text) {
        let whole = match captures.get(1) {
            Some(w) => w.as_str().parse::<u64>().ok()? as f64,
            None => 0.0,
        };
        let glyph = captures[2].chars().next()?;
        return vulgar_fraction_value(glyph).map(|v| whole + v);
    }

    if let Some(captures) = FRACTION.captures(text) {
        let whole = match captures.get(1) {
            Some(w) => w.as_str().parse::<u64>().ok()? as f64,
            None => 0.0,
        };
        let numerator = captures[2].parse::<u64>().ok()? as f64;
        let denominator = captures[3].parse::<u64>().ok()?;
        if denominator == 0 {
            return None;
        }
        return Some(whole + numerator / denominator as f64);
    }

    if DECIMAL.is_match(text) {
        return text.parse::<f64>().ok();
    }

    None
}
