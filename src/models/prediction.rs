//! Prediction result model
//!
//! A classification outcome produced by an external model: predicted
//! category, confidence percentage, and the per-class probability
//! distribution.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::weight_category::WeightCategory;

/// One class probability, as a percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub label: String,
    pub pct: f64,
}

/// Externally produced prediction for one patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted weight category (one of the 7 canonical labels)
    pub category: WeightCategory,
    /// Confidence percentage (0-100)
    pub confidence: f64,
    /// Per-class probability distribution, in insertion order. Not required
    /// to sum to exactly 100 (rounding tolerance is assumed, not enforced).
    pub probabilities: Vec<ClassProbability>,
}

impl PredictionResult {
    /// Probabilities sorted by descending percentage. The sort is stable, so
    /// equal percentages keep their original insertion order.
    pub fn ranked_probabilities(&self) -> Vec<ClassProbability> {
        let mut ranked = self.probabilities.clone();
        ranked.sort_by(|a, b| b.pct.partial_cmp(&a.pct).unwrap_or(Ordering::Equal));
        ranked
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_pct(self.confidence)
    }
}

/// Confidence interpretation band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Moderate,
    Low,
}

impl ConfidenceLevel {
    /// Band thresholds are inclusive lower bounds: 80 is high, 60 is
    /// moderate.
    pub fn from_pct(pct: f64) -> Self {
        if pct >= 80.0 {
            ConfidenceLevel::High
        } else if pct >= 60.0 {
            ConfidenceLevel::Moderate
        } else {
            ConfidenceLevel::Low
        }
    }

    /// Fixed interpretation sentence shown in the report
    pub fn interpretation_pt(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => {
                "Alta confiança - O modelo está muito seguro desta predição."
            }
            ConfidenceLevel::Moderate => {
                "Confiança moderada - Considere avaliação clínica adicional."
            }
            ConfidenceLevel::Low => {
                "Baixa confiança - Recomenda-se avaliação médica detalhada."
            }
        }
    }
}
