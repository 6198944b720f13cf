//! # Nutrients
//!
//! Extraction of structured nutrient records from the free-form nutrition text
//! produced by a meal analysis model.
//!
//! Text is parsed by a pipeline of three stages, tried in order until one of
//! them yields records: strict pipe-delimited rows, flexible `name: value unit`
//! lines, and a keyword scan over unstructured prose.
//!
//! ```rust
//! use nutrients::parse_nutrition;
//!
//! let records = parse_nutrition("Calories | 450 | kcal | Estimated\nProtein | 25 | g");
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].reasoning(), Some("Estimated"));
//! ```

pub mod config;
pub mod flexible_parser;
pub mod ingredient_table;
pub mod keyword_extractor;
pub mod meal_analysis;
pub mod nutrient_model;
pub mod nutrition_errors;
pub mod nutrition_patterns;
pub mod nutrition_pipeline;
pub mod nutrition_summary;
pub mod parse_options;
pub mod strict_parser;
pub mod text_cleaning;

pub use nutrient_model::{calories_entry, LineOutcome, NutrientRecord, NutritionReport, SkipReason};
pub use nutrition_pipeline::{parse_nutrition, parse_nutrition_with, NutritionParser, NutritionParsingPipeline};
pub use parse_options::{ParseOptions, ParseStage};
