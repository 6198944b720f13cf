use anyhow::{Context, Result};
use nutrients::config::{init_tracing, AppConfig};
use nutrients::meal_analysis::{MealAnalysis, NUTRITION_INFO_FIELD};
use nutrients::nutrition_pipeline::NutritionParsingPipeline;
use nutrients::NutritionReport;
use std::env;
use std::fs;
use std::io::{self, Read};
use tracing::{debug, info};

fn main() -> Result<()> {
    // Load configuration and initialize logging
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format)?;

    info!("Starting nutrients");

    let input = read_input(env::args().nth(1))?;
    let report = match as_analysis_payload(&input)? {
        Some(analysis) => {
            info!(dish = %analysis.dish_prediction, "Parsing analysis payload");
            analysis.nutrition(&config.parse)
        }
        None => NutritionParsingPipeline::with_options(config.parse).run(&input),
    };

    print!("{}", render(&report));
    Ok(())
}

/// Read the whole input from a file, or from stdin when no path is given
fn read_input(path: Option<String>) -> Result<String> {
    match path {
        Some(path) => {
            debug!(%path, "Reading input file");
            fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Decode the input as an analysis payload when it is a JSON object carrying nutrition text
fn as_analysis_payload(input: &str) -> Result<Option<MealAnalysis>> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(input) else {
        return Ok(None);
    };
    if value.get(NUTRITION_INFO_FIELD).is_none() {
        return Ok(None);
    }
    let analysis = MealAnalysis::from_json(input).context("Invalid analysis payload")?;
    Ok(Some(analysis))
}

fn render(report: &NutritionReport) -> String {
    if report.is_empty() {
        return "Nutrition data unavailable\n".to_string();
    }

    let mut output = String::new();
    if let Some(calories) = report.calories() {
        output.push_str(&format!("{}\n", calories));
    }
    for record in report.other_records() {
        output.push_str(&format!("{}\n", record));
    }
    if let Some(stage) = report.stage() {
        output.push_str(&format!("(parsed by the {stage} stage)\n"));
    }
    output
}
