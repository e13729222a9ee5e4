//! Aggregate statistics engine
//!
//! Pure functions over a filtered view. Every aggregate refuses the empty
//! view by returning `None`, so no consumer can divide by zero; callers
//! short-circuit to a "no data" notice instead.

use serde::Serialize;

use super::filter::DatasetView;
use crate::models::{PatientRecord, WeightCategory};

/// Key metrics for the filtered view
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub total: usize,
    pub mean_age: f64,
    pub mean_bmi: f64,
    /// Share of rows in the three Obesity severities, as a percentage
    pub obesity_pct: f64,
}

/// One bar of the distribution chart
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: WeightCategory,
    pub label: &'static str,
    pub count: usize,
}

/// Per-category mean of a numeric attribute
#[derive(Debug, Clone, Serialize)]
pub struct CategoryMean {
    pub category: WeightCategory,
    pub label: &'static str,
    pub mean: f64,
}

/// Obesity share within one family-history group
#[derive(Debug, Clone, Serialize)]
pub struct ObesityShare {
    pub family_history: String,
    pub group_size: usize,
    /// Percentage of the group in an Obesity severity
    pub obesity_pct: f64,
}

/// Numeric attribute selectable for per-category group means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericAttr {
    Age,
    Bmi,
    VegetableScale,
    MealsPerDay,
    WaterScale,
    ActivityScale,
    ScreenTime,
}

impl NumericAttr {
    pub fn of(&self, row: &PatientRecord) -> f64 {
        match self {
            NumericAttr::Age => row.age,
            NumericAttr::Bmi => row.bmi(),
            NumericAttr::VegetableScale => row.fcvc,
            NumericAttr::MealsPerDay => row.ncp,
            NumericAttr::WaterScale => row.ch2o,
            NumericAttr::ActivityScale => row.faf,
            NumericAttr::ScreenTime => row.tue,
        }
    }

    pub fn label_pt(&self) -> &'static str {
        match self {
            NumericAttr::Age => "Idade",
            NumericAttr::Bmi => "IMC",
            NumericAttr::VegetableScale => "Consumo de Vegetais (1-3)",
            NumericAttr::MealsPerDay => "Refeições por Dia",
            NumericAttr::WaterScale => "Consumo de Água (1-3)",
            NumericAttr::ActivityScale => "Atividade Física (0-3)",
            NumericAttr::ScreenTime => "Tempo em Telas (h/dia)",
        }
    }
}

fn is_obesity(row: &PatientRecord) -> bool {
    row.category().map(|c| c.band().is_obesity()).unwrap_or(false)
}

/// Row count, mean age, mean BMI and obesity percentage
pub fn summarize(view: &DatasetView) -> Option<SummaryStats> {
    if view.is_empty() {
        return None;
    }

    let total = view.len();
    let mean_age = view.rows().iter().map(|r| r.age).sum::<f64>() / total as f64;
    let mean_bmi = view.rows().iter().map(|r| r.bmi()).sum::<f64>() / total as f64;
    let obese = view.rows().iter().filter(|r| is_obesity(r)).count();

    Some(SummaryStats {
        total,
        mean_age,
        mean_bmi,
        obesity_pct: obese as f64 / total as f64 * 100.0,
    })
}

/// Row count per category, in severity order. The label domain is closed, so
/// zero-count categories are included.
pub fn category_distribution(view: &DatasetView) -> Option<Vec<CategoryCount>> {
    if view.is_empty() {
        return None;
    }

    Some(
        WeightCategory::ALL
            .iter()
            .map(|&category| CategoryCount {
                category,
                label: category.display_pt(),
                count: view
                    .rows()
                    .iter()
                    .filter(|r| r.category() == Some(category))
                    .count(),
            })
            .collect(),
    )
}

/// Mean of `attr` within each category, in severity order. Categories with
/// no rows have no mean and are skipped.
pub fn category_means(view: &DatasetView, attr: NumericAttr) -> Option<Vec<CategoryMean>> {
    if view.is_empty() {
        return None;
    }

    let mut means = Vec::new();
    for &category in WeightCategory::ALL.iter() {
        let values: Vec<f64> = view
            .rows()
            .iter()
            .filter(|r| r.category() == Some(category))
            .map(|r| attr.of(r))
            .collect();
        if values.is_empty() {
            continue;
        }
        means.push(CategoryMean {
            category,
            label: category.display_pt(),
            mean: values.iter().sum::<f64>() / values.len() as f64,
        });
    }
    Some(means)
}

/// Of the rows with each family-history label, the percentage in an Obesity
/// severity. Groups appear in first-seen row order.
pub fn obesity_share_by_family_history(view: &DatasetView) -> Option<Vec<ObesityShare>> {
    if view.is_empty() {
        return None;
    }

    let mut groups: Vec<(String, usize, usize)> = Vec::new();
    for row in view.rows() {
        let idx = match groups
            .iter()
            .position(|(h, _, _)| *h == row.family_history_pt)
        {
            Some(idx) => idx,
            None => {
                groups.push((row.family_history_pt.clone(), 0, 0));
                groups.len() - 1
            }
        };
        groups[idx].1 += 1;
        if is_obesity(row) {
            groups[idx].2 += 1;
        }
    }

    Some(
        groups
            .into_iter()
            .map(|(family_history, size, obese)| ObesityShare {
                family_history,
                group_size: size,
                obesity_pct: obese as f64 / size as f64 * 100.0,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FilterCriteria;
    use crate::models::{
        translate_category, translate_frequency, translate_gender, translate_yes_no,
    };

    fn record(
        gender: &str,
        age: f64,
        weight: f64,
        family_history: &str,
        category_raw: &str,
    ) -> PatientRecord {
        PatientRecord {
            gender: gender.to_string(),
            age,
            height: 1.70,
            weight,
            family_history: family_history.to_string(),
            favc: "no".to_string(),
            fcvc: 2.0,
            ncp: 3.0,
            caec: "Sometimes".to_string(),
            smoke: "no".to_string(),
            ch2o: 2.0,
            scc: "no".to_string(),
            faf: 1.0,
            tue: 1.0,
            calc: "no".to_string(),
            mtrans: "Walking".to_string(),
            category_raw: category_raw.to_string(),
            category_pt: translate_category(category_raw),
            gender_pt: translate_gender(gender),
            family_history_pt: translate_yes_no(family_history),
            smoke_pt: translate_yes_no("no"),
            caec_pt: translate_frequency("Sometimes"),
            calc_pt: translate_frequency("no"),
        }
    }

    fn dataset_from(rows: Vec<PatientRecord>) -> crate::dataset::Dataset {
        crate::dataset::Dataset::from_rows(rows)
    }

    #[test]
    fn test_summarize_refuses_empty_view() {
        let dataset = dataset_from(vec![record("Female", 21.0, 64.0, "yes", "Normal_Weight")]);
        let empty = dataset.apply(&FilterCriteria {
            genders: vec![],
            age_min: 0.0,
            age_max: 100.0,
            family_history: vec!["Sim".to_string()],
        });

        assert!(empty.is_empty());
        assert!(summarize(&empty).is_none());
        assert!(category_distribution(&empty).is_none());
        assert!(category_means(&empty, NumericAttr::WaterScale).is_none());
        assert!(obesity_share_by_family_history(&empty).is_none());
    }

    #[test]
    fn test_summarize_kpis() {
        let dataset = dataset_from(vec![
            record("Female", 20.0, 55.0, "yes", "Normal_Weight"),
            record("Male", 30.0, 100.0, "yes", "Obesity_Type_I"),
            record("Male", 40.0, 120.0, "yes", "Obesity_Type_III"),
            record("Female", 30.0, 75.0, "no", "Overweight_Level_I"),
        ]);
        let stats = summarize(&dataset.view()).unwrap();

        assert_eq!(stats.total, 4);
        assert!((stats.mean_age - 30.0).abs() < 1e-9);
        assert!((stats.obesity_pct - 50.0).abs() < 1e-9);

        let expected_bmi =
            (55.0 + 100.0 + 120.0 + 75.0) / (1.70_f64 * 1.70) / 4.0;
        assert!((stats.mean_bmi - expected_bmi).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_in_severity_order_regardless_of_row_order() {
        // Rows deliberately out of severity order
        let dataset = dataset_from(vec![
            record("Male", 40.0, 120.0, "yes", "Obesity_Type_III"),
            record("Female", 20.0, 50.0, "no", "Insufficient_Weight"),
            record("Male", 30.0, 100.0, "yes", "Obesity_Type_III"),
            record("Female", 30.0, 75.0, "no", "Overweight_Level_I"),
        ]);
        let dist = category_distribution(&dataset.view()).unwrap();

        let labels: Vec<&str> = dist.iter().map(|d| d.label).collect();
        assert_eq!(
            labels,
            vec![
                "Baixo Peso",
                "Peso Normal",
                "Sobrepeso I",
                "Sobrepeso II",
                "Obesidade I",
                "Obesidade II",
                "Obesidade III"
            ]
        );

        let counts: Vec<usize> = dist.iter().map(|d| d.count).collect();
        // Zero-count categories are included
        assert_eq!(counts, vec![1, 0, 1, 0, 0, 0, 2]);
    }

    #[test]
    fn test_category_means_skip_empty_groups_keep_order() {
        let mut a = record("Female", 20.0, 50.0, "no", "Insufficient_Weight");
        a.ch2o = 1.0;
        let mut b = record("Male", 30.0, 100.0, "yes", "Obesity_Type_I");
        b.ch2o = 3.0;
        let mut c = record("Male", 35.0, 105.0, "yes", "Obesity_Type_I");
        c.ch2o = 2.0;

        let dataset = dataset_from(vec![b, a, c]);
        let means = category_means(&dataset.view(), NumericAttr::WaterScale).unwrap();

        assert_eq!(means.len(), 2);
        assert_eq!(means[0].label, "Baixo Peso");
        assert!((means[0].mean - 1.0).abs() < 1e-9);
        assert_eq!(means[1].label, "Obesidade I");
        assert!((means[1].mean - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_obesity_share_by_family_history() {
        let dataset = dataset_from(vec![
            record("Male", 30.0, 100.0, "yes", "Obesity_Type_I"),
            record("Male", 31.0, 98.0, "yes", "Obesity_Type_II"),
            record("Female", 25.0, 60.0, "yes", "Normal_Weight"),
            record("Female", 26.0, 58.0, "no", "Normal_Weight"),
        ]);
        let shares = obesity_share_by_family_history(&dataset.view()).unwrap();

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].family_history, "Sim");
        assert_eq!(shares[0].group_size, 3);
        assert!((shares[0].obesity_pct - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(shares[1].family_history, "Não");
        assert!((shares[1].obesity_pct - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_bmi_identical_between_table_and_view() {
        let dataset = dataset_from(vec![
            record("Female", 20.0, 55.0, "yes", "Normal_Weight"),
            record("Male", 30.0, 100.0, "yes", "Obesity_Type_I"),
        ]);
        let criteria = FilterCriteria::full_domain(&dataset);
        let view = dataset.apply(&criteria);

        assert_eq!(view.len(), dataset.len());
        for (row, viewed) in dataset.rows().iter().zip(view.rows()) {
            assert_eq!(row.bmi(), viewed.bmi());
        }
    }
}
