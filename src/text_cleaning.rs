//! # Text Cleaning Module
//!
//! This module provides the text utilities that sit around nutrition parsing in
//! the analysis flow: normalizing a model response before it is stored, picking the
//! ingredient table out of an image description, and deriving the dish name.
//!
//! ## Features
//!
//! - Removal of markdown headings, bold lines and `------` dividers
//! - Re-assembly of pipe rows as `a | b | c [| d]`
//! - Extraction of four-field ingredient lines
//! - Dish name extraction with prefix stripping
//! - The placeholder nutrition text used when an analysis fails

use crate::nutrition_patterns::is_divider_line;
use log::{debug, trace};

/// Prefixes removed from the first line of a description when extracting dish names
const DISH_PREFIXES: [&str; 5] = ["dishes:", "food items:", "items:", "dish:", "food:"];

/// Hidden ingredients assumed when the model answered without a usable table
const DEFAULT_HIDDEN_INGREDIENTS: &str = "Cooking oil | 2 | tbsp | Used for cooking dishes\n\
                                          Salt | 1 | tsp | Basic seasoning for dishes\n\
                                          Water | 250 | ml | Used for cooking rice/grains";

/// Hidden ingredients assumed when the model gave no answer at all
const EMPTY_RESPONSE_HIDDEN_INGREDIENTS: &str = "Cooking oil | 2 | tbsp | Used for cooking dishes\n\
                                                 Salt | 1 | tsp | Basic seasoning for dishes";

/// Reasoning written into every row of the failed-analysis placeholder
pub const ANALYSIS_FAILED_REASONING: &str = "Analysis failed";

/// Nutrients listed, in order, in the placeholder text of a failed analysis
const PLACEHOLDER_NUTRIENTS: [(&str, &str); 7] = [
    ("Calories", "kcal"),
    ("Protein", "g"),
    ("Fat", "g"),
    ("Carbohydrates", "g"),
    ("Fiber", "g"),
    ("Sugar", "g"),
    ("Sodium", "mg"),
];

/// Clean a nutrition response from the analysis model
///
/// Drops blank lines, divider rows (`------`, `|---|---|`), markdown headings (`#`) and bold lines
/// (`**`). Of the remaining lines only pipe rows with at least three fields are
/// kept, rewritten as `name | value | unit` plus ` | reasoning` when a non-empty
/// fourth field exists. Outer pipes of markdown table rows are removed first.
///
/// # Examples
///
/// ```rust
/// use nutrients::text_cleaning::clean_nutrition_response;
///
/// let raw = "## Nutrition\n| Calories |  450 | kcal |  |\n------\nProtein|25|g|From chicken";
/// assert_eq!(
///     clean_nutrition_response(raw),
///     "Calories | 450 | kcal\nProtein | 25 | g | From chicken"
/// );
/// ```
pub fn clean_nutrition_response(text: &str) -> String {
    let mut cleaned_lines = Vec::new();

    for line in text.trim().lines() {
        let line = line.trim();
        if line.is_empty()
            || line.contains("------")
            || is_divider_line(line)
            || line.starts_with('#')
            || line.starts_with("**")
        {
            trace!("Dropping decoration line: '{}'", line);
            continue;
        }
        if !line.contains('|') {
            trace!("Dropping non-table line: '{}'", line);
            continue;
        }

        let row = line.strip_prefix('|').unwrap_or(line);
        let row = row.strip_suffix('|').unwrap_or(row);
        let parts: Vec<&str> = row.split('|').map(str::trim).collect();
        if parts.len() < 3 {
            continue;
        }

        let mut cleaned = format!("{} | {} | {}", parts[0], parts[1], parts[2]);
        if let Some(reasoning) = parts.get(3).filter(|reasoning| !reasoning.is_empty()) {
            cleaned.push_str(" | ");
            cleaned.push_str(reasoning);
        }
        cleaned_lines.push(cleaned);
    }

    debug!("Cleaned nutrition response down to {} lines", cleaned_lines.len());
    cleaned_lines.join("\n")
}

/// Keep only the ingredient rows of an image description
///
/// The first line holds the dish name and is never an ingredient row. An
/// ingredient row contains `|` and splits into exactly four fields
/// (`ingredient | quantity | unit | dish`).
pub fn extract_ingredient_lines(description: &str) -> String {
    description
        .lines()
        .skip(1)
        .filter(|line| line.contains('|') && line.split('|').count() == 4)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize the hidden ingredient table returned by the model
///
/// Pipe rows with at least four fields are kept, trimmed. When the response is
/// blank the oil and salt defaults are used; when it has no usable row, water is
/// assumed as well.
///
/// # Examples
///
/// ```rust
/// use nutrients::text_cleaning::clean_hidden_ingredients;
///
/// let cleaned = clean_hidden_ingredients("Hidden ingredients:\n  Ghee | 1 | tbsp | Naan  \nSalt | 1");
/// assert_eq!(cleaned, "Ghee | 1 | tbsp | Naan");
/// assert_eq!(clean_hidden_ingredients("I am not sure").lines().count(), 3);
/// assert_eq!(clean_hidden_ingredients("").lines().count(), 2);
/// ```
pub fn clean_hidden_ingredients(text: &str) -> String {
    if text.trim().is_empty() {
        debug!("Empty hidden ingredient response, using defaults");
        return EMPTY_RESPONSE_HIDDEN_INGREDIENTS.to_string();
    }

    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| line.contains('|') && line.split('|').count() >= 4)
        .collect();

    if rows.is_empty() {
        debug!("No formatted hidden ingredient rows, using defaults");
        return DEFAULT_HIDDEN_INGREDIENTS.to_string();
    }
    debug!("Kept {} hidden ingredient rows", rows.len());
    rows.join("\n")
}

/// Extract the dish name(s) from the first line of an image description
///
/// A leading label such as `Dishes:` is removed. A single dish is capitalized;
/// a list (containing `,` or ` and `) is returned as written.
///
/// # Examples
///
/// ```rust
/// use nutrients::text_cleaning::extract_dish_name;
///
/// assert_eq!(extract_dish_name("Dish: CHICKEN curry\nChicken | 150 | g | Curry"), "Chicken curry");
/// assert_eq!(extract_dish_name("Dishes: Chicken curry, Naan and Salad"), "Chicken curry, Naan and Salad");
/// ```
pub fn extract_dish_name(description: &str) -> String {
    let mut dish_names = description.trim().lines().next().unwrap_or("").trim();

    for prefix in DISH_PREFIXES {
        let has_prefix = dish_names
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if has_prefix {
            dish_names = dish_names[prefix.len()..].trim();
        }
    }

    if !dish_names.contains(',') && !dish_names.contains(" and ") {
        return capitalize_first(dish_names);
    }
    dish_names.to_string()
}

/// Uppercase the first character and lowercase the rest
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Placeholder nutrition text reported when an analysis fails
///
/// Every nutrient is zero and carries the given reasoning, so the text still
/// parses in the strict format. Analyses use [`ANALYSIS_FAILED_REASONING`].
pub fn failed_nutrition_text(reason: &str) -> String {
    let reason = reason.replace(['|', '\n'], " ");
    PLACEHOLDER_NUTRIENTS
        .iter()
        .map(|(name, unit)| format!("{name} | 0 | {unit} | {reason}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_drops_decoration() {
        let raw = "# Nutrition breakdown\n\
                   **Totals**\n\
                   \n\
                   Nutrient | Value | Unit | Reasoning\n\
                   ------|------|------|------\n\
                   Calories | 850 | kcal | Curry (400) + rice (300) + bread (150)\n\
                   Enjoy your meal!\n\
                   Fat | 25";

        assert_eq!(
            clean_nutrition_response(raw),
            "Nutrient | Value | Unit | Reasoning\n\
             Calories | 850 | kcal | Curry (400) + rice (300) + bread (150)"
        );
    }

    #[test]
    fn test_clean_drops_extra_fields() {
        assert_eq!(
            clean_nutrition_response("Fat|25|g|From oil|extra"),
            "Fat | 25 | g | From oil"
        );
    }

    #[test]
    fn test_clean_empty() {
        assert_eq!(clean_nutrition_response(""), "");
        assert_eq!(clean_nutrition_response("   \n  "), "");
    }

    #[test]
    fn test_extract_ingredient_lines() {
        let description = "Chicken curry, Rice\n\
                           Chicken pieces | 150 | g | Main curry dish\n\
                           Basmati rice | 200 | g\n\
                             Lettuce | 50 | g | Salad  \n\
                           Naan | 1 | piece | Bread | extra";

        assert_eq!(
            extract_ingredient_lines(description),
            "Chicken pieces | 150 | g | Main curry dish\nLettuce | 50 | g | Salad"
        );
        assert_eq!(extract_ingredient_lines("no table here"), "");
    }

    #[test]
    fn test_extract_ingredient_lines_skips_dish_line() {
        let description = "Soup | Bread | Salad | Dessert\nTomato | 200 | g | Soup";
        assert_eq!(extract_ingredient_lines(description), "Tomato | 200 | g | Soup");
        assert_eq!(extract_ingredient_lines("Rice | 200 | g | Side"), "");
    }

    #[test]
    fn test_clean_hidden_ingredients_keeps_rows() {
        let response = "Here are the hidden ingredients:\n\
                        Cooking oil | 3 | tbsp | Used for curry and rice preparation\n\
                        Salt | 2 | tsp\n\
                        Cumin powder | 1 | tsp | Spice for curry dish | optional";
        assert_eq!(
            clean_hidden_ingredients(response),
            "Cooking oil | 3 | tbsp | Used for curry and rice preparation\n\
             Cumin powder | 1 | tsp | Spice for curry dish | optional"
        );
    }

    #[test]
    fn test_clean_hidden_ingredients_defaults() {
        let unusable = clean_hidden_ingredients("No hidden ingredients found.");
        assert_eq!(unusable, DEFAULT_HIDDEN_INGREDIENTS);
        assert!(unusable.lines().last().unwrap().starts_with("Water | 250 | ml"));

        let blank = clean_hidden_ingredients("  \n ");
        assert_eq!(blank, EMPTY_RESPONSE_HIDDEN_INGREDIENTS);
        assert_eq!(blank.lines().count(), 2);
        assert!(!blank.contains("Water"));
    }

    #[test]
    fn test_extract_dish_name_prefixes() {
        assert_eq!(extract_dish_name("Food items: pasta"), "Pasta");
        assert_eq!(extract_dish_name("ITEMS: GREEN SALAD"), "Green salad");
        assert_eq!(extract_dish_name("  margherita pizza  \nmore"), "Margherita pizza");
        assert_eq!(extract_dish_name("Rice and beans"), "Rice and beans");
        assert_eq!(extract_dish_name(""), "");
    }

    #[test]
    fn test_extract_dish_name_non_ascii() {
        assert_eq!(extract_dish_name("é"), "É");
        assert_eq!(extract_dish_name("Dish:"), "");
    }

    #[test]
    fn test_failed_nutrition_text() {
        let text = failed_nutrition_text("Analysis failed");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Calories | 0 | kcal | Analysis failed");
        assert_eq!(lines[6], "Sodium | 0 | mg | Analysis failed");
    }

    #[test]
    fn test_failed_nutrition_text_sanitizes_reason() {
        let text = failed_nutrition_text("bad | input\nhere");
        assert!(text.lines().all(|line| line.split('|').count() == 4));
    }
}
