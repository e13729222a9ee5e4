//! Obesity Panel & Analytics (OPA) Library
//!
//! Aggregate statistics and charts over the obesity survey dataset, plus
//! per-patient prediction report generation.

pub mod build_info;
pub mod charts;
pub mod dataset;
pub mod models;
pub mod report;
