//! Patient report pipeline
//!
//! Risk derivation, page content assembly, and PDF rendering for a single
//! patient plus one externally produced prediction.

pub mod content;
pub mod document;
pub mod risk;

pub use content::{Block, ReportPage, FOOTER_LINES, LEGAL_NOTICE, MISSING_VALUE, MODEL_NAME};
pub use document::{build_report, ReportError, ReportOptions, ReportResult, DEFAULT_OUTPUT};
pub use risk::{identify_risk_factors, recommendations, NO_RISK_FACTORS_MSG};
