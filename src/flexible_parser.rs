//! # Flexible Line Parser
//!
//! Separator-tolerant parsing for nutrition text that does not follow the strict
//! pipe format, such as:
//!
//! ```text
//! Calories: 450kcal
//! Protein – 25 g
//! ```
//!
//! For each line the separators `|`, `:`, `-`, `—`, `–` are tried in that order and
//! the first one that splits the line into at least two non-empty fields is used.
//! The second field is scanned for a number with an optional trailing unit.

use crate::nutrient_model::{LineOutcome, NutrientRecord, SkipReason};
use crate::nutrition_patterns::{
    is_divider_line, is_header_line, DEFAULT_UNIT, FLEXIBLE_SEPARATORS, VALUE_UNIT_REGEX,
};
use crate::nutrition_pipeline::NutritionParser;
use crate::parse_options::ParseStage;
use log::{debug, trace};

/// Parser accepting several separators and fused value/unit tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct FlexibleLineParser;

impl FlexibleLineParser {
    pub fn new() -> Self {
        Self
    }

    /// Split a line on the first separator that yields at least two non-empty fields
    fn split_fields(line: &str) -> Option<(char, Vec<&str>)> {
        FLEXIBLE_SEPARATORS.iter().find_map(|&separator| {
            let fields: Vec<&str> = line
                .split(separator)
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .collect();
            (fields.len() >= 2).then_some((separator, fields))
        })
    }

    /// Extract the first number and the letters that follow it
    ///
    /// Returns `None` when the token holds no number. A missing unit becomes the
    /// `"unit"` placeholder.
    ///
    /// Thousands separators are not understood: in `"1,200 kcal"` the first number
    /// is `1` and the comma ends the unit, giving `("1", "unit")`.
    pub fn extract_value_and_unit(value_and_unit: &str) -> Option<(&str, &str)> {
        let captures = VALUE_UNIT_REGEX.captures(value_and_unit)?;
        let value = captures.name("value")?.as_str();
        let unit = captures.name("unit").map_or(DEFAULT_UNIT, |unit| unit.as_str());
        Some((value, unit))
    }

    /// Parse a single line
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrients::flexible_parser::FlexibleLineParser;
    /// use nutrients::nutrient_model::LineOutcome;
    ///
    /// let parser = FlexibleLineParser::new();
    /// if let LineOutcome::Record(record) = parser.parse_line("Protein: 25g") {
    ///     assert_eq!(record.value(), "25");
    ///     assert_eq!(record.unit(), "g");
    /// } else {
    ///     panic!("expected a record");
    /// }
    /// ```
    pub fn parse_line(&self, line: &str) -> LineOutcome {
        let line = line.trim();
        if line.is_empty() {
            return LineOutcome::Skipped(SkipReason::Blank);
        }
        if is_divider_line(line) {
            return LineOutcome::Skipped(SkipReason::Divider);
        }
        if is_header_line(line) {
            return LineOutcome::Skipped(SkipReason::Header);
        }

        let Some((separator, fields)) = Self::split_fields(line) else {
            return LineOutcome::Skipped(SkipReason::NoSeparator);
        };
        trace!("Split '{}' on '{}' into {} fields", line, separator, fields.len());

        let name = fields[0];
        let Some((value, unit)) = Self::extract_value_and_unit(fields[1]) else {
            return LineOutcome::Skipped(SkipReason::NoNumber);
        };

        let record = NutrientRecord::try_new(name, value, unit);
        match fields.get(2) {
            Some(reasoning) => record.map(|record| record.with_reasoning(reasoning)).into(),
            None => record.into(),
        }
    }
}

impl NutritionParser for FlexibleLineParser {
    fn stage(&self) -> ParseStage {
        ParseStage::Flexible
    }

    fn parse(&self, text: &str) -> Vec<NutrientRecord> {
        let mut records = Vec::new();

        for (line_number, line) in text.lines().enumerate() {
            match self.parse_line(line) {
                LineOutcome::Record(record) => {
                    trace!("Flexible record at line {}: {}", line_number, record);
                    records.push(record);
                }
                LineOutcome::Skipped(reason) => {
                    trace!("Flexible parser skipped line {}: {:?}", line_number, reason);
                }
            }
        }

        debug!("Flexible parser produced {} records", records.len());
        records
    }
}
