//! Risk factor and recommendation derivation
//!
//! Fixed threshold predicates over the patient attributes and the
//! band-keyed recommendation lists. Order matters in both: the report
//! renders factors in predicate order and recommendations verbatim.

use crate::models::{ReportPatient, SeverityBand, WeightCategory};

/// Message rendered when no risk factor holds; the section is never left
/// empty.
pub const NO_RISK_FACTORS_MSG: &str = "Nenhum fator de risco significativo identificado!";

/// Evaluate the fixed predicate list against the patient, in order. Each
/// predicate that holds contributes exactly one description. Absent fields
/// resolve through the `ReportPatient` per-field defaults and never flag a
/// factor on their own.
pub fn identify_risk_factors(patient: &ReportPatient) -> Vec<&'static str> {
    let mut factors = Vec::new();

    if patient.bmi_or_default() >= 30.0 {
        factors.push("IMC elevado (≥30)");
    }
    if patient.family_history.as_deref() == Some("Sim") {
        factors.push("Histórico familiar de obesidade");
    }
    if patient.favc.as_deref() == Some("Sim") {
        factors.push("Consumo frequente de alimentos hipercalóricos");
    }
    if patient.fcvc_or_default() < 2.0 {
        factors.push("Baixo consumo de vegetais");
    }
    if patient.faf_or_default() < 1.0 {
        factors.push("Sedentarismo (atividade física insuficiente)");
    }
    if patient.ch2o_or_default() < 2.0 {
        factors.push("Hidratação inadequada");
    }
    if patient.tue_or_default() >= 1.5 {
        factors.push("Tempo excessivo em telas");
    }
    if patient.smoke.as_deref() == Some("Sim") {
        factors.push("Tabagismo");
    }
    if matches!(
        patient.calc.as_deref(),
        Some("Frequentemente") | Some("Sempre")
    ) {
        factors.push("Consumo frequente de álcool");
    }
    if patient.mtrans.as_deref() == Some("Automóvel") {
        factors.push("Baixa atividade física no transporte");
    }

    factors
}

/// Fixed recommendation list for the predicted category's severity band.
/// Total over the 7-label domain via the explicit band table.
pub fn recommendations(category: WeightCategory) -> &'static [&'static str] {
    match category.band() {
        SeverityBand::Insufficient => &[
            "Consultar nutricionista para plano alimentar adequado",
            "Avaliar necessidade de suplementação nutricional",
            "Investigar possíveis causas médicas",
            "Monitorar ganho de peso saudável",
        ],
        SeverityBand::Normal => &[
            "Manter hábitos alimentares saudáveis",
            "Continuar prática regular de atividade física",
            "Manter hidratação adequada",
            "Realizar check-ups preventivos regulares",
        ],
        SeverityBand::Overweight => &[
            "Adotar dieta balanceada com déficit calórico moderado",
            "Aumentar frequência de atividade física (150min/semana)",
            "Aumentar consumo de água",
            "Monitorar peso e medidas regularmente",
            "Considerar acompanhamento nutricional",
        ],
        SeverityBand::Obesity => &[
            "CONSULTA MÉDICA PRIORITÁRIA para avaliação completa",
            "Acompanhamento multidisciplinar (médico, nutricionista, educador físico)",
            "Plano alimentar individualizado e supervisionado",
            "Programa de exercícios adaptado e progressivo",
            "Avaliar necessidade de tratamento medicamentoso",
            "Considerar suporte psicológico",
            "Monitoramento frequente de saúde metabólica",
        ],
    }
}
