//! Utility to generate a patient prediction report PDF from JSON inputs

use std::path::PathBuf;

use opa::models::{PredictionResult, ReportPatient};
use opa::report::{build_report, ReportOptions, DEFAULT_OUTPUT};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: generate_report <patient.json> <prediction.json> [output.pdf]");
        std::process::exit(1);
    }

    let patient: ReportPatient = serde_json::from_str(&std::fs::read_to_string(&args[1])?)?;
    let prediction: PredictionResult = serde_json::from_str(&std::fs::read_to_string(&args[2])?)?;

    let options = ReportOptions {
        output_path: args
            .get(3)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        generated_at: None,
    };

    let path = build_report(&patient, &prediction, &options)?;
    println!("Relatório gerado: {}", path.display());

    Ok(())
}
