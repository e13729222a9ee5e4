//! Report content assembly
//!
//! Builds the document as structured pages before any PDF work happens, so
//! the assembly is a pure function of its inputs and the determinism
//! contract is testable without parsing a PDF. Page boundaries are fixed by
//! content type: report info + patient data, prediction result, and
//! recommendations each start a fresh page.

use chrono::{DateTime, Local};

use super::risk;
use crate::models::{PredictionResult, ReportPatient};

/// Fixed model-name label on the metadata page
pub const MODEL_NAME: &str = "Gradient Boosting Classifier";

/// Fallback literal for any missing patient field
pub const MISSING_VALUE: &str = "N/A";

/// Legal notice appended unconditionally at the end of the document
pub const LEGAL_NOTICE: &str = "AVISO LEGAL: Este relatório é gerado por um sistema de apoio \
à decisão clínica e não substitui a avaliação de um profissional de saúde qualificado. Os \
resultados devem ser interpretados por um médico no contexto clínico completo do paciente.";

/// Fixed closing footer lines
pub const FOOTER_LINES: [&str; 2] = [
    "POSTECH - Data Analytics | Tech Challenge - Fase 04",
    "Sistema Inteligente de Predição de Obesidade",
];

const COLOR_TEXT: (u8, u8, u8) = (80, 80, 80);
const COLOR_OK: (u8, u8, u8) = (76, 175, 80);

/// One renderable unit of a report page
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    SectionTitle(String),
    Subheading(String),
    Field { label: String, value: String },
    ResultBox { heading: String, value: String, color: (u8, u8, u8) },
    Text { text: String, color: (u8, u8, u8) },
    Bullets(Vec<String>),
    ProbabilityRow { label: String, pct: f64 },
    WarningBox(String),
    FooterNote(String),
}

/// One logical page of the report
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportPage {
    pub blocks: Vec<Block>,
}

impl ReportPage {
    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

fn field(label: &str, value: String) -> Block {
    Block::Field {
        label: label.to_string(),
        value,
    }
}

fn text_or_missing(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| MISSING_VALUE.to_string())
}

fn number_or_missing(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => {
            if unit.is_empty() {
                format!("{}", v)
            } else {
                format!("{} {}", v, unit)
            }
        }
        None => MISSING_VALUE.to_string(),
    }
}

/// Assemble the full page sequence. Deterministic: identical inputs and
/// timestamp produce identical pages.
pub fn build_content(
    patient: &ReportPatient,
    prediction: &PredictionResult,
    generated_at: DateTime<Local>,
) -> Vec<ReportPage> {
    vec![
        patient_page(patient, generated_at),
        prediction_page(prediction),
        recommendations_page(patient, prediction),
    ]
}

fn patient_page(patient: &ReportPatient, generated_at: DateTime<Local>) -> ReportPage {
    let mut page = ReportPage::default();

    page.push(Block::SectionTitle("Informações do Relatório".to_string()));
    page.push(field(
        "Data de Geração",
        generated_at.format("%d/%m/%Y %H:%M").to_string(),
    ));
    page.push(field("Modelo Utilizado", MODEL_NAME.to_string()));

    page.push(Block::SectionTitle("Dados do Paciente".to_string()));

    page.push(Block::Subheading("Dados Demográficos".to_string()));
    page.push(field("Gênero", text_or_missing(&patient.gender)));
    page.push(field("Idade", number_or_missing(patient.age, "anos")));
    page.push(field("Altura", number_or_missing(patient.height, "m")));
    page.push(field("Peso", number_or_missing(patient.weight, "kg")));
    page.push(field(
        "IMC Calculado",
        patient
            .bmi()
            .map(|bmi| format!("{:.2}", bmi))
            .unwrap_or_else(|| MISSING_VALUE.to_string()),
    ));
    page.push(field(
        "Histórico Familiar de Obesidade",
        text_or_missing(&patient.family_history),
    ));

    page.push(Block::Subheading("Hábitos Alimentares".to_string()));
    page.push(field(
        "Consumo de Alimentos Calóricos",
        text_or_missing(&patient.favc),
    ));
    page.push(field(
        "Consumo de Vegetais (escala 1-3)",
        number_or_missing(patient.fcvc, ""),
    ));
    page.push(field(
        "Número de Refeições por Dia",
        number_or_missing(patient.ncp, ""),
    ));
    page.push(field(
        "Consumo de Água (escala 1-3)",
        number_or_missing(patient.ch2o, ""),
    ));
    page.push(field(
        "Alimentos entre Refeições",
        text_or_missing(&patient.caec),
    ));
    page.push(field("Monitora Calorias", text_or_missing(&patient.scc)));
    page.push(field("Consumo de Álcool", text_or_missing(&patient.calc)));

    page.push(Block::Subheading("Estilo de Vida".to_string()));
    page.push(field(
        "Atividade Física (escala 0-3)",
        number_or_missing(patient.faf, ""),
    ));
    page.push(field(
        "Tempo em Telas (horas/dia)",
        number_or_missing(patient.tue, ""),
    ));
    page.push(field("Fumante", text_or_missing(&patient.smoke)));
    page.push(field(
        "Principal Meio de Transporte",
        text_or_missing(&patient.mtrans),
    ));

    page
}

fn prediction_page(prediction: &PredictionResult) -> ReportPage {
    let mut page = ReportPage::default();

    page.push(Block::SectionTitle("Resultado da Predição".to_string()));
    page.push(Block::ResultBox {
        heading: "RESULTADO DA PREDIÇÃO".to_string(),
        value: prediction.category.display_pt().to_string(),
        color: prediction.category.band().color(),
    });

    page.push(Block::Subheading("Confiança do Modelo".to_string()));
    page.push(Block::Text {
        text: format!("Nível de confiança: {:.1}%", prediction.confidence),
        color: COLOR_TEXT,
    });
    page.push(Block::Text {
        text: format!(
            "Interpretação: {}",
            prediction.confidence_level().interpretation_pt()
        ),
        color: COLOR_TEXT,
    });

    page.push(Block::Subheading("Distribuição de Probabilidades".to_string()));
    for entry in prediction.ranked_probabilities() {
        page.push(Block::ProbabilityRow {
            label: entry.label,
            pct: entry.pct,
        });
    }

    page
}

fn recommendations_page(patient: &ReportPatient, prediction: &PredictionResult) -> ReportPage {
    let mut page = ReportPage::default();

    page.push(Block::SectionTitle(
        "Recomendações e Orientações".to_string(),
    ));

    page.push(Block::Subheading("Ações Recomendadas".to_string()));
    page.push(Block::Bullets(
        risk::recommendations(prediction.category)
            .iter()
            .map(|s| s.to_string())
            .collect(),
    ));

    page.push(Block::Subheading(
        "Fatores de Risco Identificados".to_string(),
    ));
    let factors = risk::identify_risk_factors(patient);
    if factors.is_empty() {
        // Explicit notice, never an empty bulleted section
        page.push(Block::Text {
            text: risk::NO_RISK_FACTORS_MSG.to_string(),
            color: COLOR_OK,
        });
    } else {
        page.push(Block::Bullets(
            factors.iter().map(|s| s.to_string()).collect(),
        ));
    }

    page.push(Block::WarningBox(LEGAL_NOTICE.to_string()));
    for line in FOOTER_LINES {
        page.push(Block::FooterNote(line.to_string()));
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassProbability, WeightCategory};
    use chrono::TimeZone;

    fn sample_prediction() -> PredictionResult {
        PredictionResult {
            category: WeightCategory::ObesityTypeII,
            confidence: 85.0,
            probabilities: vec![
                ClassProbability { label: "Obesidade II".to_string(), pct: 85.0 },
                ClassProbability { label: "Obesidade I".to_string(), pct: 10.0 },
                ClassProbability { label: "Obesidade III".to_string(), pct: 5.0 },
            ],
        }
    }

    fn timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let patient = ReportPatient {
            gender: Some("Masculino".to_string()),
            age: Some(40.0),
            height: Some(1.75),
            weight: Some(110.0),
            family_history: Some("Sim".to_string()),
            ..Default::default()
        };
        let prediction = sample_prediction();

        let first = build_content(&patient, &prediction, timestamp());
        let second = build_content(&patient, &prediction, timestamp());
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_missing_fields_fall_back_to_literal() {
        let pages = build_content(&ReportPatient::default(), &sample_prediction(), timestamp());
        let fields: Vec<(&str, &str)> = pages[0]
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Field { label, value } => Some((label.as_str(), value.as_str())),
                _ => None,
            })
            .collect();

        assert!(fields.contains(&("Gênero", "N/A")));
        assert!(fields.contains(&("IMC Calculado", "N/A")));
        assert!(fields.contains(&("Principal Meio de Transporte", "N/A")));
        // Fixed metadata is always present
        assert!(fields.contains(&("Modelo Utilizado", MODEL_NAME)));
    }

    #[test]
    fn test_prediction_page_layout() {
        let pages = build_content(&ReportPatient::default(), &sample_prediction(), timestamp());
        let page = &pages[1];

        assert!(matches!(
            &page.blocks[1],
            Block::ResultBox { value, color, .. }
                if value == "Obesidade II" && *color == (244, 67, 54)
        ));

        let rows: Vec<&str> = page
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::ProbabilityRow { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(rows, vec!["Obesidade II", "Obesidade I", "Obesidade III"]);
    }

    #[test]
    fn test_no_risk_factors_yields_notice_not_empty_bullets() {
        let pages = build_content(&ReportPatient::default(), &sample_prediction(), timestamp());
        let page = &pages[2];

        let has_notice = page.blocks.iter().any(|b| {
            matches!(b, Block::Text { text, color }
                if text == risk::NO_RISK_FACTORS_MSG && *color == (76, 175, 80))
        });
        assert!(has_notice);

        // Exactly one bullet list on the page: the recommendations
        let bullet_lists = page
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Bullets(_)))
            .count();
        assert_eq!(bullet_lists, 1);
        assert!(page
            .blocks
            .iter()
            .all(|b| !matches!(b, Block::Bullets(items) if items.is_empty())));
    }

    #[test]
    fn test_legal_notice_and_footer_always_close_the_document() {
        let pages = build_content(&ReportPatient::default(), &sample_prediction(), timestamp());
        let blocks = &pages[2].blocks;
        let n = blocks.len();

        assert!(matches!(&blocks[n - 3], Block::WarningBox(text) if text == LEGAL_NOTICE));
        assert!(matches!(&blocks[n - 2], Block::FooterNote(text) if text == FOOTER_LINES[0]));
        assert!(matches!(&blocks[n - 1], Block::FooterNote(text) if text == FOOTER_LINES[1]));
    }
}
