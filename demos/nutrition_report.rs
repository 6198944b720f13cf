//! # Nutrition Report Example
//!
//! This example runs the nutrition parsing pipeline over the kinds of text a meal
//! analysis model returns: clean pipe tables, loosely formatted lists and plain
//! prose. It also shows how the fallback stages can be switched off, and how a
//! full analysis payload turns into a display card and daily totals.

use chrono::Utc;
use nutrients::meal_analysis::{daily_totals, MealAnalysis, MealLog};
use nutrients::nutrition_pipeline::NutritionParsingPipeline;
use nutrients::nutrition_summary::MacroTotals;
use nutrients::parse_options::ParseOptions;
use nutrients::text_cleaning::clean_nutrition_response;
use nutrients::NutritionReport;

fn print_report(report: &NutritionReport) {
    match report.stage() {
        Some(stage) => println!("Parsed by the {} stage:", stage),
        None => println!("No nutrition data (tried {:?})", report.attempted()),
    }
    for (i, record) in report.records().iter().enumerate() {
        match record.reasoning() {
            Some(reasoning) => println!("  {}. {} ({})", i + 1, record, reasoning),
            None => println!("  {}. {}", i + 1, record),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🥗 Nutrition Report Example");
    println!("===========================\n");

    let pipeline = NutritionParsingPipeline::new();

    // Example 1: Strict pipe-delimited rows
    println!("📋 Example 1: Strict Table");
    println!("--------------------------");

    let strict_text = r#"
    Nutrient | Value | Unit | Reasoning
    ------|------|------|------
    Calories | 850 | kcal | Curry (400) + rice (300) + bread (150)
    Protein | 45 | g | Chicken and lentils
    Fat | 25 | g | Cooking oil and ghee
    Carbohydrates | 90 | g | Rice and naan
    "#;

    print_report(&pipeline.run(strict_text));
    println!("\n");

    // Example 2: Loose formatting handled by the flexible stage
    println!("✏️  Example 2: Loose List");
    println!("-------------------------");

    let loose_text = r#"
    Calories: 450kcal
    Protein - 25g
    Fiber — 6 g
    Sodium: 800mg
    "#;

    print_report(&pipeline.run(loose_text));
    println!("\n");

    // Example 3: Prose handled by the keyword stage
    println!("🔍 Example 3: Plain Prose");
    println!("-------------------------");

    let prose = "This meal has about 450 calories, 25g protein and 12g fat.";
    print_report(&pipeline.run(prose));
    println!("\n");

    // Example 4: Fallback stages disabled
    println!("⚙️  Example 4: Strict Only");
    println!("--------------------------");

    let strict_only = NutritionParsingPipeline::with_options(ParseOptions::strict_only());
    print_report(&strict_only.run(prose));
    println!("\n");

    // Example 5: Cleaning a markdown response before storing it
    println!("🧹 Example 5: Cleaning a Model Response");
    println!("---------------------------------------");

    let markdown = "## Nutrition\n| Calories | 620 | kcal | |\n|------|------|------|------|\n| Protein | 32 | g | Salmon |";
    let cleaned = clean_nutrition_response(markdown);
    println!("{}\n", cleaned);
    print_report(&pipeline.run(&cleaned));
    println!("\n");

    // Example 6: Analysis payloads and daily totals
    println!("📊 Example 6: Meal Card and Daily Totals");
    println!("----------------------------------------");

    let lunch = MealAnalysis::from_json(
        r#"{
            "dish_prediction": "Chicken curry, Rice",
            "image_description": "Chicken pieces | 150 | g | Main curry dish\nBasmati rice | 200 | g | Side dish",
            "hidden_ingredients": "Cooking oil | 2 | tbsp | Used for cooking dishes",
            "nutrition_info": "Calories | 850 | kcal\nProtein | 45 | g\nFat | 25 | g\nCarbohydrates | 90 | g",
            "analysis_time": 4.2,
            "user_id": "demo"
        }"#,
    )?;
    let snack = MealAnalysis::from_json(r#"{"dish_prediction": "Apple", "nutrition_info": "Calories: 95kcal\nFiber: 4g"}"#)?;

    let options = ParseOptions::default();
    print!("{}", lunch.format_for_display(&options));
    for entry in lunch.visible_ingredients().iter().chain(&lunch.hidden_ingredient_entries()) {
        println!("  - {}", entry);
    }
    println!();

    let now = Utc::now();
    let logs = vec![MealLog::new(lunch, now), MealLog::new(snack, now)];
    let totals: MacroTotals = daily_totals(&logs, now.date_naive());

    println!(
        "Today: {} kcal, {} g protein, {} g fat, {} g carbohydrates, {} g fiber",
        totals.calories, totals.protein_g, totals.fat_g, totals.carbohydrates_g, totals.fiber_g
    );
    if let Some((protein, carbohydrates, fat)) = totals.calorie_split() {
        println!(
            "Energy split: {:.0}% protein, {:.0}% carbohydrates, {:.0}% fat",
            protein, carbohydrates, fat
        );
    }

    Ok(())
}
