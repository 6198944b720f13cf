//! # Ingredient Table
//!
//! Parsing of the ingredient tables returned with a meal analysis. The visible and
//! hidden ingredient lists use the same four-column layout:
//!
//! ```text
//! Chicken pieces | 150 | g | Main curry dish
//! Cooking oil | 3 | tbsp | Used for curry and rice preparation
//! ```

use crate::nutrition_patterns::{is_divider_line, is_header_line, is_header_name};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of an ingredient table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientEntry {
    /// Ingredient name (e.g. "Basmati rice")
    pub name: String,
    /// Estimated quantity
    pub quantity: f64,
    /// Unit of the quantity (e.g. "g", "tbsp", "piece")
    pub unit: String,
    /// Which dish the ingredient belongs to, or what it is used for
    pub source: String,
}

impl fmt::Display for IngredientEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.quantity, self.unit, self.name)?;
        if !self.source.is_empty() {
            write!(f, " ({})", self.source)?;
        }
        Ok(())
    }
}

/// Parse one ingredient row; the row must have exactly four fields and a numeric quantity
pub fn parse_ingredient_row(line: &str) -> Option<IngredientEntry> {
    let line = line.trim();
    if line.is_empty() || is_divider_line(line) || is_header_line(line) {
        return None;
    }

    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    let [name, quantity, unit, source] = fields.as_slice() else {
        return None;
    };
    if name.is_empty() || is_header_name(name) {
        return None;
    }

    let quantity: f64 = quantity.parse().ok().filter(|q: &f64| q.is_finite())?;
    Some(IngredientEntry {
        name: name.to_string(),
        quantity,
        unit: unit.to_string(),
        source: source.to_string(),
    })
}

/// Parse every valid row of an ingredient table, in order
///
/// # Examples
///
/// ```rust
/// use nutrients::ingredient_table::parse_ingredient_table;
///
/// let table = "Chicken pieces | 150 | g | Main curry dish\nNaan bread | 1 | piece | Bread item";
/// let entries = parse_ingredient_table(table);
///
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[1].to_string(), "1 piece Naan bread (Bread item)");
/// ```
pub fn parse_ingredient_table(text: &str) -> Vec<IngredientEntry> {
    let entries: Vec<IngredientEntry> = text
        .lines()
        .enumerate()
        .filter_map(|(line_number, line)| {
            let entry = parse_ingredient_row(line);
            if entry.is_none() {
                trace!("Ingredient row {} skipped: '{}'", line_number, line);
            }
            entry
        })
        .collect();

    debug!("Parsed {} ingredient rows", entries.len());
    entries
}

/// Format ingredient entries as a numbered list for display
pub fn format_ingredient_table(entries: &[IngredientEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {}", i + 1, entry))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows() {
        let text = "Ingredient | Quantity Number | Unit | Which dish/item it's from\n\
                    Chicken pieces | 150 | g | Main curry dish\n\
                    Basmati rice | 200 | g | Side dish\n\
                    Salt | 0.5 | tsp | Seasoning";
        let entries = parse_ingredient_table(text);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "Chicken pieces");
        assert_eq!(entries[0].quantity, 150.0);
        assert_eq!(entries[2].quantity, 0.5);
        assert_eq!(entries[2].unit, "tsp");
        assert_eq!(entries[2].source, "Seasoning");
    }

    #[test]
    fn test_rows_need_four_fields_and_numbers() {
        assert!(parse_ingredient_row("Rice | 200 | g").is_none());
        assert!(parse_ingredient_row("Rice | a cup | g | Side").is_none());
        assert!(parse_ingredient_row("Rice | 200 | g | Side | extra").is_none());
        assert!(parse_ingredient_row("Rice | NaN | g | Side").is_none());
        assert!(parse_ingredient_row(" | 2 | g | Side").is_none());
        assert!(parse_ingredient_row("------").is_none());
    }

    #[test]
    fn test_duplicates_preserved() {
        let entries = parse_ingredient_table("Salt | 1 | tsp | Curry\nSalt | 1 | tsp | Rice");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].source, "Rice");
    }

    #[test]
    fn test_format_table() {
        let entries = parse_ingredient_table("Lettuce | 50 | g | Salad\nWater | 250 | ml | ");
        assert_eq!(
            format_ingredient_table(&entries),
            "1. 50 g Lettuce (Salad)\n2. 250 ml Water"
        );
    }
}
