//! # Nutrient Data Model
//!
//! This module defines the data structures produced by nutrition parsing: single
//! nutrient records, the per-line outcome of a parser, and the report returned by
//! the pipeline for one nutrition text.
//!
//! ## Core Concepts
//!
//! - **NutrientRecord**: one validated `(name, value, unit, reasoning)` tuple
//! - **LineOutcome**: either a record or the reason a line was skipped
//! - **NutritionReport**: the ordered records for one text plus the stage that produced them
//! - **Calories entry**: the first record whose name mentions "calorie"
//!
//! ## Usage
//!
//! ```rust
//! use nutrients::nutrient_model::NutrientRecord;
//!
//! let protein = NutrientRecord::try_new("Protein", "25", "g")?
//!     .with_reasoning("From chicken");
//!
//! assert_eq!(protein.to_string(), "Protein: 25 g");
//! assert_eq!(protein.to_strict_line(), "Protein | 25 | g | From chicken");
//! # Ok::<(), nutrients::nutrition_errors::RecordError>(())
//! ```

use crate::nutrition_errors::RecordError;
use crate::nutrition_patterns::{has_divider_run, is_header_name, is_numeric, DEFAULT_UNIT};
use crate::parse_options::ParseStage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed line of nutrition information
///
/// Fields are private so that every record in circulation satisfies the record
/// invariants: a non-empty name that is neither a header token nor table
/// decoration, a numeric value, and a non-empty unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RecordFields")]
pub struct NutrientRecord {
    name: String,
    value: String,
    unit: String,
    reasoning: Option<String>,
}

#[derive(Deserialize)]
struct RecordFields {
    name: String,
    value: String,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    reasoning: Option<String>,
}

impl TryFrom<RecordFields> for NutrientRecord {
    type Error = RecordError;

    fn try_from(fields: RecordFields) -> Result<Self, Self::Error> {
        let record = NutrientRecord::try_new(&fields.name, &fields.value, &fields.unit)?;
        Ok(match fields.reasoning {
            Some(reasoning) => record.with_reasoning(&reasoning),
            None => record,
        })
    }
}

impl NutrientRecord {
    /// Build a record from raw fields, trimming each one
    ///
    /// An empty unit becomes the `"unit"` placeholder.
    pub fn try_new(name: &str, value: &str, unit: &str) -> Result<Self, RecordError> {
        let name = name.trim();
        let value = value.trim();
        let unit = unit.trim();

        if name.is_empty() {
            return Err(RecordError::EmptyName);
        }
        if is_header_name(name) {
            return Err(RecordError::HeaderName);
        }
        if has_divider_run(name) {
            return Err(RecordError::DividerArtifact);
        }
        if !is_numeric(value) {
            return Err(RecordError::NonNumericValue(value.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
            unit: if unit.is_empty() { DEFAULT_UNIT } else { unit }.to_string(),
            reasoning: None,
        })
    }

    /// Attach a reasoning note; blank notes are dropped
    pub fn with_reasoning(mut self, reasoning: &str) -> Self {
        let reasoning = reasoning.trim();
        self.reasoning = (!reasoning.is_empty()).then(|| reasoning.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value as written in the source text
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning.as_deref()
    }

    /// The value as a number
    pub fn numeric_value(&self) -> f64 {
        self.value.parse().unwrap_or_default()
    }

    /// Check whether this record carries the calorie count
    pub fn is_calories(&self) -> bool {
        self.name.to_lowercase().contains("calorie")
    }

    /// Render the record in the strict `name | value | unit | reasoning` format
    pub fn to_strict_line(&self) -> String {
        match &self.reasoning {
            Some(reasoning) => format!("{} | {} | {} | {}", self.name, self.value, self.unit, reasoning),
            None => format!("{} | {} | {}", self.name, self.value, self.unit),
        }
    }
}

impl fmt::Display for NutrientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.name, self.value, self.unit)
    }
}

/// Find the calories entry: the first record whose name contains "calorie"
pub fn calories_entry(records: &[NutrientRecord]) -> Option<&NutrientRecord> {
    records.iter().find(|record| record.is_calories())
}

/// Why a parser did not produce a record for a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty or whitespace-only line
    Blank,
    /// Table decoration such as `------`
    Divider,
    /// Column header row
    Header,
    /// Pipe-split line with a field count other than three or four
    FieldCount(usize),
    /// No separator produced at least two fields
    NoSeparator,
    /// No number found where a value was expected
    NoNumber,
    /// Fields were found but do not form a valid record
    Rejected(RecordError),
}

/// Result of parsing a single line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Record(NutrientRecord),
    Skipped(SkipReason),
}

impl LineOutcome {
    /// Convert the outcome into an optional record
    pub fn into_record(self) -> Option<NutrientRecord> {
        match self {
            LineOutcome::Record(record) => Some(record),
            LineOutcome::Skipped(_) => None,
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, LineOutcome::Record(_))
    }
}

impl From<Result<NutrientRecord, RecordError>> for LineOutcome {
    fn from(result: Result<NutrientRecord, RecordError>) -> Self {
        match result {
            Ok(record) => LineOutcome::Record(record),
            Err(err) => LineOutcome::Skipped(SkipReason::Rejected(err)),
        }
    }
}

/// The parsed nutrient breakdown of one nutrition text
///
/// A report is immutable once produced. An empty report means "no nutrition
/// data available", which is a normal outcome rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionReport {
    records: Vec<NutrientRecord>,
    stage: Option<ParseStage>,
    attempted: Vec<ParseStage>,
}

impl NutritionReport {
    pub(crate) fn new(
        records: Vec<NutrientRecord>,
        stage: Option<ParseStage>,
        attempted: Vec<ParseStage>,
    ) -> Self {
        Self {
            records,
            stage,
            attempted,
        }
    }

    /// Records in the order they appear in the source text
    pub fn records(&self) -> &[NutrientRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<NutrientRecord> {
        self.records
    }

    /// The stage that produced the records, `None` when every stage came up empty
    pub fn stage(&self) -> Option<ParseStage> {
        self.stage
    }

    /// Stages that ran, in order
    pub fn attempted(&self) -> &[ParseStage] {
        &self.attempted
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// The calories entry of this report
    pub fn calories(&self) -> Option<&NutrientRecord> {
        calories_entry(&self.records)
    }

    /// Every record except the calories entry, in order
    pub fn other_records(&self) -> impl Iterator<Item = &NutrientRecord> {
        let calories_index = self.records.iter().position(NutrientRecord::is_calories);
        self.records
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != calories_index)
            .map(|(_, record)| record)
    }

    /// Render the report as strict-format text, one record per line
    pub fn to_strict_text(&self) -> String {
        self.records
            .iter()
            .map(NutrientRecord::to_strict_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
