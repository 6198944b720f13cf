//! # Keyword Extractor
//!
//! Last-resort extraction from free text. Every line is scanned for known nutrient
//! keywords (calories, protein, fat, ...); for each keyword found, the number closest
//! to it on the same line becomes the value and the unit is guessed from the line.
//!
//! Records produced here carry a fixed reasoning marker so that callers can tell a
//! best-effort guess from a value the backend reported explicitly.

use crate::nutrient_model::NutrientRecord;
use crate::nutrition_patterns::{
    is_divider_line, is_header_line, DEFAULT_UNIT, G_TOKEN_REGEX, KEYWORD_REASONING,
    MG_TOKEN_REGEX, ML_TOKEN_REGEX, NUTRIENT_KEYWORDS, STANDALONE_NUMBER_REGEX,
};
use crate::nutrition_pipeline::NutritionParser;
use crate::parse_options::ParseStage;
use log::{debug, trace};
use regex::Match;

/// Free-text scanner for nutrient keywords
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordExtractor;

impl KeywordExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract every keyword record found on one line
    ///
    /// A line may yield several records, one per keyword it contains, in keyword
    /// order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrients::keyword_extractor::KeywordExtractor;
    ///
    /// let records = KeywordExtractor::new().extract_line("about 300 calories, 12g fat");
    /// let summary: Vec<String> = records.iter().map(|r| r.to_string()).collect();
    /// assert_eq!(summary, vec!["Calories: 300 kcal", "Fat: 12 g"]);
    /// ```
    pub fn extract_line(&self, line: &str) -> Vec<NutrientRecord> {
        let line = line.trim();
        if line.is_empty() || is_divider_line(line) || is_header_line(line) {
            return Vec::new();
        }

        let lower = line.to_lowercase();
        let numbers: Vec<Match> = STANDALONE_NUMBER_REGEX.find_iter(&lower).collect();
        if numbers.is_empty() {
            return Vec::new();
        }

        let mut records = Vec::new();
        for keyword in NUTRIENT_KEYWORDS {
            let Some(start) = lower.find(keyword) else {
                continue;
            };
            let Some(number) = Self::nearest_number(&lower, &numbers, start, start + keyword.len()) else {
                continue;
            };

            let unit = Self::infer_unit(keyword, &lower);
            trace!("Keyword '{}' matched {} {}", keyword, number.as_str(), unit);

            match NutrientRecord::try_new(&capitalize(keyword), number.as_str(), unit) {
                Ok(record) => records.push(record.with_reasoning(KEYWORD_REASONING)),
                Err(err) => trace!("Keyword '{}' rejected: {}", keyword, err),
            }
        }
        records
    }

    /// Pick the number closest to the keyword span
    ///
    /// Numbers in the same clause (no `,` or `;` in between) win over numbers
    /// across a clause boundary; remaining ties go to the earlier number.
    fn nearest_number<'t>(
        line: &str,
        numbers: &[Match<'t>],
        start: usize,
        end: usize,
    ) -> Option<Match<'t>> {
        numbers.iter().copied().min_by_key(|number| {
            let gap = if number.end() <= start {
                &line[number.end()..start]
            } else if number.start() >= end {
                &line[end..number.start()]
            } else {
                ""
            };
            (gap.contains([',', ';']), gap.len())
        })
    }

    /// Guess the unit for a keyword from the (lower-cased) line
    ///
    /// Calorie keywords are always `kcal`. Other keywords take the first unit
    /// attached to a number anywhere on the line, checked as `mg`, then `g`, then
    /// `ml`. The guess is per line, so two nutrients with different units on one
    /// line share the first unit found.
    pub fn infer_unit(keyword: &str, line: &str) -> &'static str {
        if keyword == "calories" || keyword == "kcal" {
            "kcal"
        } else if MG_TOKEN_REGEX.is_match(line) {
            "mg"
        } else if G_TOKEN_REGEX.is_match(line) {
            "g"
        } else if ML_TOKEN_REGEX.is_match(line) {
            "ml"
        } else {
            DEFAULT_UNIT
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl NutritionParser for KeywordExtractor {
    fn stage(&self) -> ParseStage {
        ParseStage::Keyword
    }

    fn parse(&self, text: &str) -> Vec<NutrientRecord> {
        let records: Vec<NutrientRecord> =
            text.lines().flat_map(|line| self.extract_line(line)).collect();
        debug!("Keyword extractor produced {} records", records.len());
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<NutrientRecord> {
        KeywordExtractor::new().parse(text)
    }

    #[test]
    fn test_prose_sentence() {
        let records = parse("This meal has approximately 450 calories and 25g of protein.");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), "Calories");
        assert_eq!(records[0].value(), "450");
        assert_eq!(records[0].unit(), "kcal");
        assert_eq!(records[0].reasoning(), Some(KEYWORD_REASONING));
        assert_eq!(records[1].name(), "Protein");
        assert_eq!(records[1].value(), "25");
        assert_eq!(records[1].unit(), "g");
        assert_eq!(records[1].reasoning(), Some(KEYWORD_REASONING));
    }

    #[test]
    fn test_keyword_without_number_is_ignored() {
        assert!(parse("High in protein and fiber").is_empty());
    }

    #[test]
    fn test_multiple_lines() {
        let records = parse("Roughly 600 kcal in total\nSodium comes to 800mg");
        let summary: Vec<String> = records.iter().map(|r| r.to_string()).collect();
        assert_eq!(summary, vec!["Kcal: 600 kcal", "Sodium: 800 mg"]);
    }

    #[test]
    fn test_shared_unit_on_mixed_line() {
        // units are guessed per line, not per keyword
        let records = parse("230mg sodium, 5g sugar");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), "Sugar");
        assert_eq!(records[0].value(), "5");
        assert_eq!(records[0].unit(), "mg");
        assert_eq!(records[1].name(), "Sodium");
        assert_eq!(records[1].value(), "230");
        assert_eq!(records[1].unit(), "mg");
    }

    #[test]
    fn test_unit_inference() {
        assert_eq!(KeywordExtractor::infer_unit("kcal", "500"), "kcal");
        assert_eq!(KeywordExtractor::infer_unit("calories", "500 mg"), "kcal");
        assert_eq!(KeywordExtractor::infer_unit("sodium", "sodium 20 mg"), "mg");
        assert_eq!(KeywordExtractor::infer_unit("protein", "protein 20 grams"), "g");
        assert_eq!(KeywordExtractor::infer_unit("calcium", "calcium in 250ml milk"), "ml");
        assert_eq!(KeywordExtractor::infer_unit("sugar", "sugar 3 spoons"), "unit");
    }

    #[test]
    fn test_embedded_digits_are_not_values() {
        let records = parse("vitamin B12 around 2.4 mcg");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Vitamin");
        assert_eq!(records[0].value(), "2.4");
    }

    #[test]
    fn test_header_and_divider_lines_ignored() {
        assert!(parse("------\nIngredient | Quantity | Unit\n------").is_empty());
        assert!(parse("Nutrient | Value | Unit | Reasoning").is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("carbohydrate"), "Carbohydrate");
        assert_eq!(capitalize(""), "");
    }
}
