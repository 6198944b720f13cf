//! # Strict Line Parser
//!
//! Parses nutrition text in the primary format produced by the analysis backend:
//!
//! ```text
//! Calories | 450 | kcal | From rice and chicken
//! Protein | 25 | g | From chicken
//! ```
//!
//! Each line is split on `|` and must yield three or four fields
//! (`name | value | unit [| reasoning]`). Lines that do not qualify are skipped;
//! an empty result is what sends the pipeline on to the flexible parser.

use crate::nutrient_model::{LineOutcome, NutrientRecord, SkipReason};
use crate::nutrition_patterns::{is_divider_line, is_header_line};
use crate::nutrition_pipeline::NutritionParser;
use crate::parse_options::ParseStage;
use log::{debug, trace};

/// Parser for pipe-delimited lines with a fixed field count
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictLineParser;

impl StrictLineParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a single line
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrients::strict_parser::StrictLineParser;
    ///
    /// let parser = StrictLineParser::new();
    /// assert!(parser.parse_line("Fat | 12 | g").is_record());
    /// assert!(!parser.parse_line("Fat: 12g").is_record());
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

        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        match fields.as_slice() {
            [name, value, unit] => NutrientRecord::try_new(name, value, unit).into(),
            [name, value, unit, reasoning] => NutrientRecord::try_new(name, value, unit)
                .map(|record| record.with_reasoning(reasoning))
                .into(),
            _ => LineOutcome::Skipped(SkipReason::FieldCount(fields.len())),
        }
    }
}

impl NutritionParser for StrictLineParser {
    fn stage(&self) -> ParseStage {
        ParseStage::Strict
    }

    fn parse(&self, text: &str) -> Vec<NutrientRecord> {
        let mut records = Vec::new();

        for (line_number, line) in text.lines().enumerate() {
            match self.parse_line(line) {
                LineOutcome::Record(record) => {
                    trace!("Strict record at line {}: {}", line_number, record);
                    records.push(record);
                }
                LineOutcome::Skipped(reason) => {
                    trace!("Strict parser skipped line {}: {:?}", line_number, reason);
                }
            }
        }

        debug!("Strict parser produced {} records", records.len());
        records
    }
}
