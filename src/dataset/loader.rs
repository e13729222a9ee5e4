//! Dataset loading and column derivation
//!
//! Reads the 17-column obesity survey CSV by position, derives the display
//! columns and keeps loaded datasets in an explicit memoization cache keyed
//! by source path. Loading is all-or-nothing: a malformed source fails
//! fatally with no partial result.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::StringRecord;
use thiserror::Error;
use tracing::info;

use crate::models::{
    translate_category, translate_frequency, translate_gender, translate_yes_no, PatientRecord,
};

/// Number of raw columns in the survey source
pub const RAW_COLUMN_COUNT: usize = 17;

/// Dataset loading error types
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read dataset source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("expected {RAW_COLUMN_COUNT} columns, found {found} (record {record})")]
    ColumnCount { record: usize, found: usize },

    #[error("invalid numeric value {value:?} for {column} (record {record})")]
    InvalidNumber {
        record: usize,
        column: &'static str,
        value: String,
    },
}

/// Result type for dataset operations
pub type DataResult<T> = Result<T, DataError>;

/// The loaded, derived survey table
#[derive(Debug)]
pub struct Dataset {
    rows: Vec<PatientRecord>,
    source: PathBuf,
}

impl Dataset {
    /// Load and derive the dataset from a CSV source.
    ///
    /// Columns are remapped by position, not by header name: the source
    /// header row does not match the semantic grouping and is only checked
    /// for column count.
    pub fn load<P: AsRef<Path>>(path: P) -> DataResult<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;

        let headers = reader.headers()?;
        if headers.len() != RAW_COLUMN_COUNT {
            return Err(DataError::ColumnCount {
                record: 0,
                found: headers.len(),
            });
        }

        let mut rows = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result?;
            // Header is record 0
            rows.push(parse_record(&record, i + 1)?);
        }

        Ok(Self {
            rows,
            source: path.to_path_buf(),
        })
    }

    /// Build a dataset directly from rows (test fixtures)
    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<PatientRecord>) -> Self {
        Self {
            rows,
            source: PathBuf::from("in-memory"),
        }
    }

    pub fn rows(&self) -> &[PatientRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

fn parse_record(record: &StringRecord, index: usize) -> DataResult<PatientRecord> {
    if record.len() != RAW_COLUMN_COUNT {
        return Err(DataError::ColumnCount {
            record: index,
            found: record.len(),
        });
    }

    let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();
    let number = |idx: usize, column: &'static str| -> DataResult<f64> {
        let raw = record.get(idx).unwrap_or_default();
        raw.trim().parse().map_err(|_| DataError::InvalidNumber {
            record: index,
            column,
            value: raw.to_string(),
        })
    };

    // Source column order: gender, age, height, weight, family history,
    // FAVC, FCVC, NCP, CAEC, SMOKE, CH2O, SCC, FAF, TUE, CALC, MTRANS, label
    let gender = field(0);
    let family_history = field(4);
    let caec = field(8);
    let smoke = field(9);
    let calc = field(14);
    let category_raw = field(16);

    Ok(PatientRecord {
        age: number(1, "age")?,
        height: number(2, "height")?,
        weight: number(3, "weight")?,
        favc: field(5),
        fcvc: number(6, "vegetable scale")?,
        ncp: number(7, "meals per day")?,
        ch2o: number(10, "water scale")?,
        scc: field(11),
        faf: number(12, "activity scale")?,
        tue: number(13, "screen time")?,
        mtrans: field(15),
        category_pt: translate_category(&category_raw),
        gender_pt: translate_gender(&gender),
        family_history_pt: translate_yes_no(&family_history),
        smoke_pt: translate_yes_no(&smoke),
        caec_pt: translate_frequency(&caec),
        calc_pt: translate_frequency(&calc),
        gender,
        family_history,
        caec,
        smoke,
        calc,
        category_raw,
    })
}

/// Explicit memoization for the load-and-derive step, keyed by canonical
/// source path. The source is static for the process lifetime, so entries
/// are never invalidated; repeated loads of the same source return the same
/// `Arc` without re-reading the file.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> DataResult<Arc<Dataset>> {
        let path = path.as_ref();
        // A missing file cannot be canonicalized; fall through and let the
        // load surface the I/O error.
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Some(dataset) = self.entries.get(&key) {
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(Dataset::load(path)?);
        info!(
            rows = dataset.len(),
            path = %path.display(),
            "dataset loaded and derived"
        );
        self.entries.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }
}
