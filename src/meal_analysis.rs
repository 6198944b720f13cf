//! # Meal Analysis Integration
//!
//! This module connects nutrition parsing to the payload returned by the meal
//! analysis service. The service answers with JSON such as:
//!
//! ```json
//! {
//!   "dish_prediction": "Chicken curry, Rice",
//!   "image_description": "Chicken pieces | 150 | g | Main curry dish",
//!   "hidden_ingredients": "Cooking oil | 2 | tbsp | Used for cooking dishes",
//!   "nutrition_info": "Calories | 850 | kcal | Curry (400) + rice (300) + bread (150)",
//!   "analysis_time": 4.2,
//!   "user_id": "u-42",
//!   "debug_info": {"visible_count": 1, "hidden_count": 1, "has_hidden": true}
//! }
//! ```
//!
//! The `nutrition_info` text is the durable value; nutrient records and totals
//! are derived from it on demand.

use crate::ingredient_table::{parse_ingredient_table, IngredientEntry};
use crate::nutrient_model::NutritionReport;
use crate::nutrition_errors::AnalysisError;
use crate::nutrition_pipeline::NutritionParsingPipeline;
use crate::nutrition_summary::MacroTotals;
use crate::parse_options::ParseOptions;
use crate::text_cleaning::{clean_hidden_ingredients, failed_nutrition_text, ANALYSIS_FAILED_REASONING};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Field of the analysis payload that carries the nutrition text
pub const NUTRITION_INFO_FIELD: &str = "nutrition_info";

/// Ingredient counts the service reports next to an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DebugInfo {
    pub visible_count: usize,
    pub hidden_count: usize,
    pub has_hidden: bool,
}

/// Analysis result for one meal photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealAnalysis {
    /// Predicted dish name(s)
    #[serde(default)]
    pub dish_prediction: String,
    /// Visible ingredients as a four-column table
    #[serde(default)]
    pub image_description: String,
    /// Hidden ingredients (oil, salt, ...) as a four-column table
    #[serde(default)]
    pub hidden_ingredients: String,
    /// Nutrition report text
    pub nutrition_info: String,
    /// Seconds the analysis took
    #[serde(default)]
    pub analysis_time: f64,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Set when the analysis failed; the other fields then hold placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Absent on failed analyses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
}

impl MealAnalysis {
    /// Decode an analysis payload
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrients::meal_analysis::MealAnalysis;
    /// use nutrients::parse_options::ParseOptions;
    ///
    /// let analysis = MealAnalysis::from_json(r#"{"nutrition_info": "Calories | 450 | kcal"}"#)?;
    /// let report = analysis.nutrition(&ParseOptions::default());
    /// assert_eq!(report.calories().map(|c| c.value()), Some("450"));
    /// # Ok::<(), nutrients::nutrition_errors::AnalysisError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get(NUTRITION_INFO_FIELD).is_none() {
            return Err(AnalysisError::MissingField(NUTRITION_INFO_FIELD));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Read and decode an analysis payload from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading analysis payload");
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The payload the service reports when an analysis fails
    pub fn failed(user_id: &str, reason: &str) -> Self {
        Self {
            dish_prediction: format!("Analysis failed: {reason}"),
            image_description: format!("Could not identify ingredients | 0 | g | {reason}"),
            hidden_ingredients: format!("Could not identify | 0 | g | {reason}"),
            nutrition_info: failed_nutrition_text(ANALYSIS_FAILED_REASONING),
            analysis_time: 0.0,
            user_id: Some(user_id.to_string()),
            error: Some(reason.to_string()),
            debug_info: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Parse the nutrition text of this analysis
    pub fn nutrition(&self, options: &ParseOptions) -> NutritionReport {
        if let Some(error) = &self.error {
            warn!(user_id = ?self.user_id, %error, "Parsing nutrition of a failed analysis");
        }
        let report = NutritionParsingPipeline::with_options(*options).run(&self.nutrition_info);
        info!(
            user_id = ?self.user_id,
            records = report.len(),
            stage = ?report.stage(),
            "Parsed meal nutrition"
        );
        report
    }

    /// Macro totals of this meal
    pub fn totals(&self, options: &ParseOptions) -> MacroTotals {
        MacroTotals::from_records(self.nutrition(options).records())
    }

    /// Visible ingredients listed in the image description
    pub fn visible_ingredients(&self) -> Vec<IngredientEntry> {
        parse_ingredient_table(&self.image_description)
    }

    /// Hidden ingredients (cooking oil, salt, ...) inferred by the service
    ///
    /// Falls back to the default oil/salt/water rows when the table is blank or unusable.
    pub fn hidden_ingredient_entries(&self) -> Vec<IngredientEntry> {
        parse_ingredient_table(&clean_hidden_ingredients(&self.hidden_ingredients))
    }

    /// Ingredient counts derived from the tables of this analysis
    pub fn derived_debug_info(&self) -> DebugInfo {
        DebugInfo {
            visible_count: self.visible_ingredients().len(),
            hidden_count: self.hidden_ingredient_entries().len(),
            has_hidden: !self.hidden_ingredients.trim().is_empty(),
        }
    }

    /// Reported ingredient counts, or counts derived from the tables when the payload has none
    pub fn debug_info(&self) -> DebugInfo {
        self.debug_info.unwrap_or_else(|| self.derived_debug_info())
    }

    /// Render the meal for display: dish, calories and the remaining nutrients
    pub fn format_for_display(&self, options: &ParseOptions) -> String {
        let report = self.nutrition(options);
        let mut output = format!("🍽️ {}\n", self.dish_prediction);

        if report.is_empty() {
            output.push_str("Nutrition data unavailable\n");
            return output;
        }

        if let Some(calories) = report.calories() {
            output.push_str(&format!("🔥 {} {}\n", calories.value(), calories.unit()));
        }
        for record in report.other_records() {
            output.push_str(&format!("• {}\n", record));
        }
        output
    }
}

/// A meal analysis logged at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealLog {
    pub analysis: MealAnalysis,
    pub logged_at: DateTime<Utc>,
}

impl MealLog {
    pub fn new(analysis: MealAnalysis, logged_at: DateTime<Utc>) -> Self {
        Self {
            analysis,
            logged_at,
        }
    }
}

/// Sum the macro totals of every meal logged on a given UTC day
///
/// Failed analyses are skipped so that their zero placeholders do not count as meals.
pub fn daily_totals(logs: &[MealLog], day: NaiveDate) -> MacroTotals {
    let options = ParseOptions::default();
    let totals: MacroTotals = logs
        .iter()
        .filter(|log| log.logged_at.date_naive() == day)
        .filter(|log| !log.analysis.is_failed())
        .map(|log| log.analysis.totals(&options))
        .sum();

    debug!(%day, calories = totals.calories, "Computed daily totals");
    totals
}
