//! Data models
//!
//! Shared vocabulary for the analytics and report pipelines.

mod patient;
mod prediction;
mod report_patient;
mod weight_category;

pub use patient::{
    translate_category, translate_frequency, translate_gender, translate_yes_no, PatientRecord,
};
pub use prediction::{ClassProbability, ConfidenceLevel, PredictionResult};
pub use report_patient::ReportPatient;
pub use weight_category::{SeverityBand, WeightCategory};
