//! Filter engine
//!
//! Applies the interactive criteria (gender subset, inclusive age range,
//! family-history subset) to the loaded dataset, producing a borrowed view.
//! A row is kept only when all three predicates hold; each subset predicate
//! is a disjunction over its selections, so an empty selection set yields an
//! empty view rather than "no filter applied".

use serde::{Deserialize, Serialize};

use super::loader::Dataset;
use crate::models::PatientRecord;

/// Interactive filter criteria over display labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Selected gender display labels ("Masculino"/"Feminino")
    pub genders: Vec<String>,
    /// Inclusive age range
    pub age_min: f64,
    pub age_max: f64,
    /// Selected family-history display labels ("Sim"/"Não")
    pub family_history: Vec<String>,
}

impl FilterCriteria {
    /// Criteria selecting every row of the dataset: all gender and
    /// family-history labels present in the data, full age range.
    pub fn full_domain(dataset: &Dataset) -> Self {
        let mut genders: Vec<String> = Vec::new();
        let mut family_history: Vec<String> = Vec::new();
        let mut age_min = f64::INFINITY;
        let mut age_max = f64::NEG_INFINITY;

        for row in dataset.rows() {
            if !genders.contains(&row.gender_pt) {
                genders.push(row.gender_pt.clone());
            }
            if !family_history.contains(&row.family_history_pt) {
                family_history.push(row.family_history_pt.clone());
            }
            age_min = age_min.min(row.age);
            age_max = age_max.max(row.age);
        }

        Self {
            genders,
            age_min,
            age_max,
            family_history,
        }
    }

    /// Strict conjunction of the three predicates
    pub fn matches(&self, row: &PatientRecord) -> bool {
        self.genders.iter().any(|g| *g == row.gender_pt)
            && row.age >= self.age_min
            && row.age <= self.age_max
            && self
                .family_history
                .iter()
                .any(|h| *h == row.family_history_pt)
    }
}

/// A read-only row subset of the dataset. Recomputed on every criteria
/// change; never mutates the underlying table. The empty view is a valid,
/// first-class state that aggregate consumers must check for.
#[derive(Debug)]
pub struct DatasetView<'a> {
    rows: Vec<&'a PatientRecord>,
}

impl<'a> DatasetView<'a> {
    pub fn rows(&self) -> &[&'a PatientRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Dataset {
    /// All rows, unfiltered
    pub fn view(&self) -> DatasetView<'_> {
        DatasetView {
            rows: self.rows().iter().collect(),
        }
    }

    /// Rows matching the criteria
    pub fn apply(&self, criteria: &FilterCriteria) -> DatasetView<'_> {
        DatasetView {
            rows: self.rows().iter().filter(|r| criteria.matches(r)).collect(),
        }
    }
}
