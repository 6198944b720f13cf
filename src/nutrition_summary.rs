//! # Nutrition Summary Module
//!
//! Aggregation of parsed nutrient records into macro totals, the numbers a meal
//! log or daily dashboard shows (calories, protein, carbohydrates, fat, fiber,
//! sugar and sodium).
//!
//! ## Usage
//!
//! ```rust
//! use nutrients::nutrition_pipeline::parse_nutrition;
//! use nutrients::nutrition_summary::MacroTotals;
//!
//! let lunch = MacroTotals::from_records(&parse_nutrition("Calories | 600 | kcal\nProtein | 30 | g"));
//! let dinner = MacroTotals::from_records(&parse_nutrition("Calories | 800 | kcal\nSodium | 1.5 | g"));
//! let day: MacroTotals = [lunch, dinner].into_iter().sum();
//!
//! assert_eq!(day.calories, 1400.0);
//! assert_eq!(day.protein_g, 30.0);
//! assert_eq!(day.sodium_mg, 1500.0);
//! ```

use crate::nutrient_model::NutrientRecord;
use log::trace;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBOHYDRATE: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;
const KJ_PER_KCAL: f64 = 4.184;

/// Nutrients tracked by macro totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nutrient {
    Calories,
    Protein,
    Carbohydrates,
    Fat,
    Fiber,
    Sugar,
    Sodium,
}

impl Nutrient {
    pub const ALL: [Nutrient; 7] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbohydrates,
        Nutrient::Fat,
        Nutrient::Fiber,
        Nutrient::Sugar,
        Nutrient::Sodium,
    ];

    /// Classify a free-form nutrient name
    ///
    /// Calorie names are checked first so that "Calories from fat" counts as
    /// calories, not fat.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        if name.contains("calorie") || name.contains("kcal") || name.contains("energy") {
            Some(Nutrient::Calories)
        } else if name.contains("protein") {
            Some(Nutrient::Protein)
        } else if name.contains("carb") {
            Some(Nutrient::Carbohydrates)
        } else if name.contains("fib") {
            Some(Nutrient::Fiber)
        } else if name.contains("sugar") {
            Some(Nutrient::Sugar)
        } else if name.contains("sodium") {
            Some(Nutrient::Sodium)
        } else if name.contains("fat") {
            Some(Nutrient::Fat)
        } else {
            None
        }
    }

    /// The unit totals are expressed in
    pub fn target_unit(&self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            Nutrient::Sodium => "mg",
            _ => "g",
        }
    }
}

/// Convert an amount to the target unit of a nutrient
///
/// Mass units (`kg`, `g`, `mg`, `mcg`/`µg`) and energy units (`kcal`, `kJ`) are
/// converted; anything else is taken as already being in the target unit.
pub fn convert_amount(amount: f64, unit: &str, nutrient: Nutrient) -> f64 {
    let unit = unit.trim().to_lowercase();
    if unit == nutrient.target_unit() {
        return amount;
    }

    if nutrient == Nutrient::Calories {
        return match unit.as_str() {
            "kj" => amount / KJ_PER_KCAL,
            _ => amount,
        };
    }

    let grams = match unit.as_str() {
        "kg" => amount * 1000.0,
        "g" | "gram" | "grams" => amount,
        "mg" | "milligram" | "milligrams" => amount / 1000.0,
        "mcg" | "µg" | "μg" | "ug" => amount / 1_000_000.0,
        _ => {
            trace!("Unknown unit '{}' for {:?}, keeping amount as-is", unit, nutrient);
            return amount;
        }
    };

    match nutrient.target_unit() {
        "mg" => grams * 1000.0,
        _ => grams,
    }
}

/// Macro totals for one meal or a set of meals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbohydrates_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub sugar_g: f64,
    pub sodium_mg: f64,
}

impl MacroTotals {
    /// Build totals from the records of one nutrition report
    ///
    /// The first record of each nutrient is used; repeated names are ignored.
    pub fn from_records(records: &[NutrientRecord]) -> Self {
        let mut totals = Self::default();
        let mut seen = Vec::with_capacity(Nutrient::ALL.len());

        for record in records {
            let Some(nutrient) = Nutrient::from_name(record.name()) else {
                continue;
            };
            if seen.contains(&nutrient) {
                continue;
            }
            seen.push(nutrient);

            let amount = convert_amount(record.numeric_value(), record.unit(), nutrient);
            *totals.slot_mut(nutrient) = amount;
        }

        totals
    }

    /// Amount recorded for a nutrient, in its target unit
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein_g,
            Nutrient::Carbohydrates => self.carbohydrates_g,
            Nutrient::Fat => self.fat_g,
            Nutrient::Fiber => self.fiber_g,
            Nutrient::Sugar => self.sugar_g,
            Nutrient::Sodium => self.sodium_mg,
        }
    }

    fn slot_mut(&mut self, nutrient: Nutrient) -> &mut f64 {
        match nutrient {
            Nutrient::Calories => &mut self.calories,
            Nutrient::Protein => &mut self.protein_g,
            Nutrient::Carbohydrates => &mut self.carbohydrates_g,
            Nutrient::Fat => &mut self.fat_g,
            Nutrient::Fiber => &mut self.fiber_g,
            Nutrient::Sugar => &mut self.sugar_g,
            Nutrient::Sodium => &mut self.sodium_mg,
        }
    }

    /// Share of macro energy from protein, carbohydrates and fat, in percent
    ///
    /// Returns `None` when no macro energy is recorded.
    pub fn calorie_split(&self) -> Option<(f64, f64, f64)> {
        let protein = self.protein_g * KCAL_PER_GRAM_PROTEIN;
        let carbohydrates = self.carbohydrates_g * KCAL_PER_GRAM_CARBOHYDRATE;
        let fat = self.fat_g * KCAL_PER_GRAM_FAT;
        let total = protein + carbohydrates + fat;
        if total <= 0.0 {
            return None;
        }
        Some((
            protein / total * 100.0,
            carbohydrates / total * 100.0,
            fat / total * 100.0,
        ))
    }
}

impl Add for MacroTotals {
    type Output = MacroTotals;

    fn add(mut self, other: MacroTotals) -> MacroTotals {
        self += other;
        self
    }
}

impl AddAssign for MacroTotals {
    fn add_assign(&mut self, other: MacroTotals) {
        for nutrient in Nutrient::ALL {
            *self.slot_mut(nutrient) += other.get(nutrient);
        }
    }
}

impl Sum for MacroTotals {
    fn sum<I: Iterator<Item = MacroTotals>>(iter: I) -> Self {
        iter.fold(MacroTotals::default(), |total, meal| total + meal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, value: &str, unit: &str) -> NutrientRecord {
        NutrientRecord::try_new(name, value, unit).unwrap()
    }

    #[test]
    fn test_classify_names() {
        assert_eq!(Nutrient::from_name("Total Calories"), Some(Nutrient::Calories));
        assert_eq!(Nutrient::from_name("Calories from fat"), Some(Nutrient::Calories));
        assert_eq!(Nutrient::from_name("Carbohydrates"), Some(Nutrient::Carbohydrates));
        assert_eq!(Nutrient::from_name("Dietary Fibre"), Some(Nutrient::Fiber));
        assert_eq!(Nutrient::from_name("Saturated Fat"), Some(Nutrient::Fat));
        assert_eq!(Nutrient::from_name("Vitamin C"), None);
    }

    #[test]
    fn test_from_records() {
        let records = vec![
            record("Calories", "850", "kcal"),
            record("Protein", "45", "g"),
            record("Fat", "25", "g"),
            record("Carbohydrates", "90", "g"),
            record("Sodium", "1.5", "g"),
            record("Fat", "99", "g"),
            record("Vitamin C", "30", "mg"),
        ];
        let totals = MacroTotals::from_records(&records);

        assert_eq!(totals.calories, 850.0);
        assert_eq!(totals.protein_g, 45.0);
        assert_eq!(totals.fat_g, 25.0);
        assert_eq!(totals.carbohydrates_g, 90.0);
        assert_eq!(totals.sodium_mg, 1500.0);
        assert_eq!(totals.fiber_g, 0.0);
    }

    #[test]
    fn test_convert_amount() {
        assert_eq!(convert_amount(500.0, "mg", Nutrient::Protein), 0.5);
        assert_eq!(convert_amount(2.0, "g", Nutrient::Sodium), 2000.0);
        assert_eq!(convert_amount(0.1, "kg", Nutrient::Sugar), 100.0);
        assert!((convert_amount(4184.0, "kJ", Nutrient::Calories) - 1000.0).abs() < 1e-9);
        assert_eq!(convert_amount(12.0, "unit", Nutrient::Fiber), 12.0);
    }

    #[test]
    fn test_sum_and_add() {
        let a = MacroTotals {
            calories: 500.0,
            protein_g: 20.0,
            ..Default::default()
        };
        let b = MacroTotals {
            calories: 300.0,
            fat_g: 10.0,
            ..Default::default()
        };

        let total = a + b;
        assert_eq!(total.calories, 800.0);
        assert_eq!(total.protein_g, 20.0);
        assert_eq!(total.fat_g, 10.0);

        let summed: MacroTotals = vec![a, b, b].into_iter().sum();
        assert_eq!(summed.calories, 1100.0);
        assert_eq!(MacroTotals::default(), Vec::<MacroTotals>::new().into_iter().sum());
    }

    #[test]
    fn test_calorie_split() {
        let totals = MacroTotals {
            protein_g: 25.0,
            carbohydrates_g: 50.0,
            fat_g: 0.0,
            ..Default::default()
        };
        let (protein, carbohydrates, fat) = totals.calorie_split().unwrap();
        assert!((protein - 33.333).abs() < 0.01);
        assert!((carbohydrates - 66.666).abs() < 0.01);
        assert_eq!(fat, 0.0);

        assert!(MacroTotals::default().calorie_split().is_none());
    }
}
