//! Removal of preparation words, packaging nouns and other descriptors from the
//! text left over after quantity and unit extraction, leaving the bare item name.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

/// Preparation and state words that may trail an item name
const PREPARATION_TERMS: &str = "diced|chopped|minced|sliced|grated|shredded|crushed|whole|fresh|dried|melted|softened|peeled|cooked|raw|ground|divided|packed|loosely packed|tightly packed|to taste|roughly|finely|coarsely|thinly|thickly";

lazy_static! {
    static ref OF_CONNECTOR: Regex = Regex::new(r"(?i)^of\s+").expect("OF_CONNECTOR regex should be valid");
    static ref PACKAGING_NOUN: Regex =
        Regex::new(r"(?i)^(?:packets?|packages?|cans?|jars?|box(?:es)?|bottles?)\s+")
            .expect("PACKAGING_NOUN regex should be valid");

    /// ", peeled and thinly sliced" style chains at the end of the text
    static ref PREPARATION_SUFFIX: Regex = Regex::new(&format!(
        r"(?i),?\s+((?:(?:roughly|finely|coarsely|thinly|thickly)\s+)?(?:{terms})(?:\s+and\s+(?:(?:roughly|finely|coarsely|thinly|thickly)\s+)?(?:{terms}))*)[\s,]*$",
        terms = PREPARATION_TERMS
    ))
    .expect("PREPARATION_SUFFIX regex should be valid");

    static ref MORE_FOR_CLAUSE: Regex =
        Regex::new(r"(?i),?\s*(?:plus|reserved)\s+more\s+for\s+\w+.*$")
            .expect("MORE_FOR_CLAUSE regex should be valid");
    static ref LEADING_PREPARATION: Regex = Regex::new(
        r"(?i)^(?:fresh|dried|ground|chopped|diced|minced|raw|cooked|roughly|finely|coarsely)\s+"
    )
    .expect("LEADING_PREPARATION regex should be valid");
    static ref PARENTHETICAL: Regex =
        Regex::new(r"\s*\([^)]*\)\s*").expect("PARENTHETICAL regex should be valid");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("WHITESPACE regex should be valid");
    static ref COUNT_NOUN_SUFFIX: Regex = Regex::new(
        r"(?i)\s+(?:cloves?|pieces?|chunks?|slices?|stalks?|sprigs?|bulbs?|heads?|bunch(?:es)?|handfuls?|leaf|leaves)$"
    )
    .expect("COUNT_NOUN_SUFFIX regex should be valid");
}

/// Upper bound on stripping passes; each productive pass only ever shortens the text
const MAX_PASSES: usize = 8;

/// Reduce `text` to a lowercase item name.
///
/// `measured` tells whether a quantity or unit was found in front of `text`; only then is a
/// leading adjective such as "fresh" dropped, so that "fresh basil" on its own stays intact.
/// Passes repeat until nothing more comes off, so stacked descriptors ("chopped fresh basil",
/// "tomatoes, diced (canned)") reduce fully and the result is stable under another call.
/// If every word turns out to be a descriptor, the text after the "of"/packaging step is
/// returned instead so the result is never emptier than the input allows.
pub fn strip_descriptors(text: &str, measured: bool) -> String {
    let without_of = OF_CONNECTOR.replace(text, "");
    let fallback = PACKAGING_NOUN.replace(&without_of, "").into_owned();

    let mut item = strip_pass(text, measured);
    for _ in 1..MAX_PASSES {
        if item.is_empty() {
            break;
        }
        let next = strip_pass(&item, measured);
        if next == item || next.is_empty() {
            break;
        }
        item = next;
    }

    if item.is_empty() {
        trace!(text = %text, "Descriptor stripping emptied item, using fallback");
        return fallback.trim().to_lowercase();
    }

    item
}

fn strip_pass(text: &str, measured: bool) -> String {
    let without_of = OF_CONNECTOR.replace(text, "");
    let mut item = PACKAGING_NOUN.replace(&without_of, "").into_owned();

    item = PREPARATION_SUFFIX.replace(&item, "").into_owned();
    item = MORE_FOR_CLAUSE.replace(&item, "").into_owned();
    if measured {
        item = LEADING_PREPARATION.replace(&item, "").into_owned();
    }
    item = PARENTHETICAL.replace_all(&item, " ").into_owned();
    item = WHITESPACE.replace_all(&item, " ").trim().to_string();
    COUNT_NOUN_SUFFIX.replace(&item, "").trim().to_lowercase()
}
