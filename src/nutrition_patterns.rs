//! # Nutrition Patterns Module
//!
//! This module contains the regex patterns and fixed vocabularies used by the
//! nutrition parsers: numeric validation, value/unit extraction, divider and
//! header detection, separators and nutrient keywords.

use lazy_static::lazy_static;
use regex::Regex;

/// Placeholder unit used when a line carries no recognizable unit
pub const DEFAULT_UNIT: &str = "unit";

/// Reasoning attached to every record produced by keyword extraction
pub const KEYWORD_REASONING: &str = "Best-effort extraction from unstructured text";

/// Separators tried by the flexible parser, in order (pipe, colon, hyphen, em dash, en dash)
pub const FLEXIBLE_SEPARATORS: [char; 5] = ['|', ':', '-', '\u{2014}', '\u{2013}'];

/// Nutrient keywords recognized by the keyword extractor, in scan order
pub const NUTRIENT_KEYWORDS: [&str; 12] = [
    "calories",
    "kcal",
    "protein",
    "carbohydrate",
    "carbs",
    "fat",
    "fiber",
    "sugar",
    "sodium",
    "vitamin",
    "calcium",
    "iron",
];

// Digits are ASCII `[0-9]`; matched values must parse as `f64`

// Integer or decimal, optionally signed: "450", "2.5", ".5", "-1"
const NUMERIC_PATTERN: &str = r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$";

// First number in a token, followed by an optional run of unit letters: "450kcal", "25 g"
const VALUE_UNIT_PATTERN: &str = r"(?P<value>[0-9]+(?:\.[0-9]+)?)\s*(?P<unit>[A-Za-zµμ]+)?";

// A number that is not glued to a preceding word character ("B12" does not count)
const STANDALONE_NUMBER_PATTERN: &str = r"\b[0-9]+(?:\.[0-9]+)?";

// Unit tokens attached to a number, used by keyword unit inference
const MG_TOKEN_PATTERN: &str = r"(?i)[0-9]\s*(?:mg|milligrams?)\b";
const G_TOKEN_PATTERN: &str = r"(?i)[0-9]\s*(?:g|grams?)\b";
const ML_TOKEN_PATTERN: &str = r"(?i)[0-9]\s*(?:ml|millilit(?:er|re)s?)\b";

// Column header rows such as "Ingredient | Quantity | Unit" or "Nutrient | Value | Unit"
const HEADER_PATTERN: &str = r"(?i)^\s*\|?\s*(?:ingredient|nutrient)s?\s*\|";

// Three or more dashes in a row
const DIVIDER_RUN_PATTERN: &str = r"-{3,}|[–—]{2,}";

lazy_static! {
    pub static ref NUMERIC_REGEX: Regex =
        Regex::new(NUMERIC_PATTERN).expect("Numeric pattern should be valid");
    pub static ref VALUE_UNIT_REGEX: Regex =
        Regex::new(VALUE_UNIT_PATTERN).expect("Value/unit pattern should be valid");
    pub static ref STANDALONE_NUMBER_REGEX: Regex =
        Regex::new(STANDALONE_NUMBER_PATTERN).expect("Standalone number pattern should be valid");
    pub static ref MG_TOKEN_REGEX: Regex =
        Regex::new(MG_TOKEN_PATTERN).expect("Milligram token pattern should be valid");
    pub static ref G_TOKEN_REGEX: Regex =
        Regex::new(G_TOKEN_PATTERN).expect("Gram token pattern should be valid");
    pub static ref ML_TOKEN_REGEX: Regex =
        Regex::new(ML_TOKEN_PATTERN).expect("Millilitre token pattern should be valid");
    pub static ref HEADER_REGEX: Regex =
        Regex::new(HEADER_PATTERN).expect("Header pattern should be valid");
    pub static ref DIVIDER_RUN_REGEX: Regex =
        Regex::new(DIVIDER_RUN_PATTERN).expect("Divider pattern should be valid");
}

/// Check whether a value is an integer or decimal number
pub fn is_numeric(value: &str) -> bool {
    NUMERIC_REGEX.is_match(value)
}

/// Check whether a string contains a divider artifact (a run of dashes)
pub fn has_divider_run(text: &str) -> bool {
    DIVIDER_RUN_REGEX.is_match(text)
}

/// Check whether a line is pure table decoration, e.g. `------` or `|---|---|`
///
/// The line must contain a run of dashes and nothing but dashes, pipes, colons,
/// plus/equals signs and whitespace.
pub fn is_divider_line(line: &str) -> bool {
    let trimmed = line.trim();
    has_divider_run(trimmed)
        && trimmed.chars().all(|c| {
            matches!(c, '-' | '|' | ':' | '+' | '=' | '\u{2013}' | '\u{2014}') || c.is_whitespace()
        })
}

/// Check whether a line is a column header row
pub fn is_header_line(line: &str) -> bool {
    HEADER_REGEX.is_match(line)
}

/// Check whether a name is the literal header token "ingredient"
pub fn is_header_name(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case("ingredient")
}
