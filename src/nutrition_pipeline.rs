//! # Nutrition Parsing Pipeline
//!
//! The single entry point for turning nutrition text into nutrient records.
//! Three strategies run as a fallback chain, stopping at the first one that
//! produces records:
//!
//! ```text
//! text ── StrictLineParser ──(empty)── FlexibleLineParser ──(empty)── KeywordExtractor
//!              │                              │                             │
//!              └──────────────┬───────────────┴─────────────────────────────┘
//!                             v
//!                      NutritionReport
//! ```
//!
//! Parsing is a pure function of the text: no I/O, no shared state, and the same
//! text always yields the same records. It never fails; when no stage finds
//! anything the report is simply empty.
//!
//! ## Usage
//!
//! ```rust
//! use nutrients::nutrition_pipeline::parse_nutrition;
//!
//! let records = parse_nutrition("Calories: 450kcal\nProtein: 25g");
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].unit(), "kcal");
//! ```

use crate::flexible_parser::FlexibleLineParser;
use crate::keyword_extractor::KeywordExtractor;
use crate::nutrient_model::{NutrientRecord, NutritionReport};
use crate::parse_options::{ParseOptions, ParseStage};
use crate::strict_parser::StrictLineParser;
use tracing::{debug, info};

/// A strategy that extracts nutrient records from nutrition text
///
/// Implementations must not panic and must preserve the order in which records
/// appear in the text.
pub trait NutritionParser {
    /// The pipeline stage this parser implements
    fn stage(&self) -> ParseStage;

    /// Extract every record this strategy recognizes
    fn parse(&self, text: &str) -> Vec<NutrientRecord>;
}

/// Fallback chain of strict, flexible and keyword parsing
#[derive(Debug, Clone, Copy, Default)]
pub struct NutritionParsingPipeline {
    options: ParseOptions,
    strict: StrictLineParser,
    flexible: FlexibleLineParser,
    keyword: KeywordExtractor,
}

impl NutritionParsingPipeline {
    /// Create a pipeline with every stage enabled
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a pipeline with explicit options
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrients::nutrition_pipeline::NutritionParsingPipeline;
    /// use nutrients::parse_options::ParseOptions;
    ///
    /// let pipeline = NutritionParsingPipeline::with_options(ParseOptions::strict_only());
    /// assert!(pipeline.parse("Calories: 450kcal").is_empty());
    /// ```
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            strict: StrictLineParser::new(),
            flexible: FlexibleLineParser::new(),
            keyword: KeywordExtractor::new(),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    fn parser_for(&self, stage: ParseStage) -> &dyn NutritionParser {
        match stage {
            ParseStage::Strict => &self.strict,
            ParseStage::Flexible => &self.flexible,
            ParseStage::Keyword => &self.keyword,
        }
    }

    /// Run the fallback chain and report which stage produced the records
    ///
    /// Each enabled stage runs at most once, in order, and the first non-empty
    /// result is returned unchanged.
    pub fn run(&self, text: &str) -> NutritionReport {
        let mut attempted = Vec::with_capacity(ParseStage::ORDER.len());

        for stage in ParseStage::ORDER {
            if !self.options.allows(stage) {
                debug!(%stage, "Stage disabled, skipping");
                continue;
            }

            attempted.push(stage);
            let records = self.parser_for(stage).parse(text);
            if !records.is_empty() {
                info!(%stage, records = records.len(), "Nutrition text parsed");
                return NutritionReport::new(records, Some(stage), attempted);
            }
            debug!(%stage, "Stage produced no records");
        }

        info!(stages = attempted.len(), "No nutrition data found");
        NutritionReport::new(Vec::new(), None, attempted)
    }

    /// Run the fallback chain and return only the records
    pub fn parse(&self, text: &str) -> Vec<NutrientRecord> {
        self.run(text).into_records()
    }
}

/// Parse nutrition text with every stage enabled
pub fn parse_nutrition(text: &str) -> Vec<NutrientRecord> {
    NutritionParsingPipeline::new().parse(text)
}

/// Parse nutrition text with explicit options
pub fn parse_nutrition_with(text: &str, options: ParseOptions) -> NutritionReport {
    NutritionParsingPipeline::with_options(options).run(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_stage_wins() {
        let report = NutritionParsingPipeline::new()
            .run("Calories | 450 | kcal | From rice\nProtein: 25g");

        assert_eq!(report.stage(), Some(ParseStage::Strict));
        assert_eq!(report.attempted(), &[ParseStage::Strict]);
        // the colon line is not re-tried once strict parsing succeeded
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_flexible_fallback() {
        let report = NutritionParsingPipeline::new().run("Calories: 450kcal\nProtein: 25g");
        assert_eq!(report.stage(), Some(ParseStage::Flexible));
        assert_eq!(report.attempted(), &[ParseStage::Strict, ParseStage::Flexible]);
        assert_eq!(report.records(), FlexibleLineParser::new().parse("Calories: 450kcal\nProtein: 25g").as_slice());
    }

    #[test]
    fn test_keyword_fallback() {
        let report = NutritionParsingPipeline::new()
            .run("This meal has approximately 450 calories and 25g of protein.");
        assert_eq!(report.stage(), Some(ParseStage::Keyword));
        assert_eq!(report.attempted(), &ParseStage::ORDER);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_empty_report() {
        let report = NutritionParsingPipeline::new().run("");
        assert!(report.is_empty());
        assert_eq!(report.stage(), None);
        assert_eq!(report.attempted(), &ParseStage::ORDER);
    }

    #[test]
    fn test_keyword_fallback_can_be_disabled() {
        let options = ParseOptions {
            enable_keyword_fallback: false,
            ..Default::default()
        };
        let report = parse_nutrition_with("About 450 calories", options);
        assert!(report.is_empty());
        assert_eq!(report.attempted(), &[ParseStage::Strict, ParseStage::Flexible]);
    }

    #[test]
    fn test_flexible_fallback_can_be_disabled() {
        let options = ParseOptions {
            enable_flexible_fallback: false,
            ..Default::default()
        };
        let report = parse_nutrition_with("Calories: 450 kcal", options);
        assert_eq!(report.stage(), Some(ParseStage::Keyword));
        assert_eq!(report.records()[0].name(), "Calories");
        assert_eq!(report.attempted(), &[ParseStage::Strict, ParseStage::Keyword]);
    }
}
