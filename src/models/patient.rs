//! Patient record model
//!
//! One row of the obesity survey dataset: the 17 raw attributes plus the
//! eagerly derived Portuguese display labels. Raw values are never mutated
//! by derivation.

use serde::Serialize;

use super::weight_category::WeightCategory;

/// A single survey row
#[derive(Debug, Clone, Serialize)]
pub struct PatientRecord {
    // Raw attributes, in source column order
    pub gender: String,
    pub age: f64,
    pub height: f64,
    pub weight: f64,
    pub family_history: String,
    /// Frequent consumption of high-caloric food (yes/no)
    pub favc: String,
    /// Vegetable-consumption scale (1-3)
    pub fcvc: f64,
    /// Number of main meals per day
    pub ncp: f64,
    /// Food between meals (no/Sometimes/Frequently/Always)
    pub caec: String,
    pub smoke: String,
    /// Daily water-consumption scale (1-3)
    pub ch2o: f64,
    /// Monitors calorie consumption (yes/no)
    pub scc: String,
    /// Physical-activity frequency scale (0-3)
    pub faf: f64,
    /// Time using technology devices (hours/day)
    pub tue: f64,
    /// Alcohol consumption (no/Sometimes/Frequently/Always)
    pub calc: String,
    /// Primary transportation mode
    pub mtrans: String,
    /// Raw weight-category outcome label
    pub category_raw: String,

    // Derived display columns
    pub category_pt: String,
    pub gender_pt: String,
    pub family_history_pt: String,
    pub smoke_pt: String,
    pub caec_pt: String,
    pub calc_pt: String,
}

impl PatientRecord {
    /// Body-mass index, always recomputed from height and weight
    pub fn bmi(&self) -> f64 {
        self.weight / (self.height * self.height)
    }

    /// Canonical category, when the raw outcome label is one of the 7 known
    /// labels. Rows carrying an unrecognized label have no category and are
    /// excluded from per-category aggregates.
    pub fn category(&self) -> Option<WeightCategory> {
        WeightCategory::from_raw(&self.category_raw)
    }
}

// Translation tables. All of them are fail-open: a value outside the mapped
// domain passes through unchanged instead of erroring.

/// yes/no -> Sim/Não
pub fn translate_yes_no(value: &str) -> String {
    match value {
        "yes" => "Sim".to_string(),
        "no" => "Não".to_string(),
        other => other.to_string(),
    }
}

/// Male/Female -> Masculino/Feminino
pub fn translate_gender(value: &str) -> String {
    match value {
        "Male" => "Masculino".to_string(),
        "Female" => "Feminino".to_string(),
        other => other.to_string(),
    }
}

/// Ordinal frequency scale (snacking, alcohol) -> Portuguese
pub fn translate_frequency(value: &str) -> String {
    match value {
        "no" => "Não".to_string(),
        "Sometimes" => "Às vezes".to_string(),
        "Frequently" => "Frequentemente".to_string(),
        "Always" => "Sempre".to_string(),
        other => other.to_string(),
    }
}

/// Raw weight-category label -> Portuguese display label
pub fn translate_category(value: &str) -> String {
    match WeightCategory::from_raw(value) {
        Some(category) => category.display_pt().to_string(),
        None => value.to_string(),
    }
}
