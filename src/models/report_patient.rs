//! Ad-hoc patient input for the report pipeline
//!
//! Mirrors the key/value mapping handed over by the prediction front end:
//! every field is optional, already translated to its Portuguese display
//! value, and resolves through an explicit per-field default when absent.
//! A missing field is never an error.

use serde::{Deserialize, Serialize};

/// Patient attributes supplied with a prediction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPatient {
    /// Display label ("Masculino"/"Feminino")
    pub gender: Option<String>,
    pub age: Option<f64>,
    /// Meters
    pub height: Option<f64>,
    /// Kilograms
    pub weight: Option<f64>,
    /// "Sim"/"Não"
    pub family_history: Option<String>,
    /// High-caloric food consumption, "Sim"/"Não"
    pub favc: Option<String>,
    /// Vegetable-consumption scale (1-3)
    pub fcvc: Option<f64>,
    /// Meals per day
    pub ncp: Option<f64>,
    /// Snacking frequency ("Não"/"Às vezes"/"Frequentemente"/"Sempre")
    pub caec: Option<String>,
    /// Monitors calories, "Sim"/"Não"
    pub scc: Option<String>,
    /// Water-consumption scale (1-3)
    pub ch2o: Option<f64>,
    /// Physical-activity scale (0-3)
    pub faf: Option<f64>,
    /// Screen time (hours/day)
    pub tue: Option<f64>,
    /// "Sim"/"Não"
    pub smoke: Option<String>,
    /// Alcohol frequency, same domain as `caec`
    pub calc: Option<String>,
    /// Primary transportation mode (e.g. "Automóvel")
    pub mtrans: Option<String>,
}

impl ReportPatient {
    /// Body-mass index from height and weight, when both are known
    pub fn bmi(&self) -> Option<f64> {
        match (self.height, self.weight) {
            (Some(height), Some(weight)) if height > 0.0 => {
                Some(weight / (height * height))
            }
            _ => None,
        }
    }

    // Default substitutions for the risk predicates. Scales default to their
    // no-risk end so an absent value never flags a factor.

    /// BMI for risk screening; unknown height/weight screens as 0
    pub fn bmi_or_default(&self) -> f64 {
        self.bmi().unwrap_or(0.0)
    }

    /// Vegetable scale; absent defaults to 3 (assume no risk)
    pub fn fcvc_or_default(&self) -> f64 {
        self.fcvc.unwrap_or(3.0)
    }

    /// Activity scale; absent defaults to 3 (assume no risk)
    pub fn faf_or_default(&self) -> f64 {
        self.faf.unwrap_or(3.0)
    }

    /// Water scale; absent defaults to 3 (assume no risk)
    pub fn ch2o_or_default(&self) -> f64 {
        self.ch2o.unwrap_or(3.0)
    }

    /// Screen time; absent defaults to 0 (assume no risk)
    pub fn tue_or_default(&self) -> f64 {
        self.tue.unwrap_or(0.0)
    }
}
