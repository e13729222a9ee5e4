//! Obesity Panel & Analytics (OPA)
//!
//! Command-line analytics panel: loads the survey dataset, applies the
//! full-domain filter, prints the key metrics and aggregate tables, and
//! writes the chart PNGs for the presentation layer.

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use opa::build_info;
use opa::charts;
use opa::dataset::{self, DatasetCache, FilterCriteria, NumericAttr};

/// Get the dataset path from args/environment or use default
fn get_dataset_path(args: &[String]) -> PathBuf {
    args.get(1)
        .cloned()
        .or_else(|| std::env::var("OPA_DATASET_PATH").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Obesity.csv"))
}

fn write_chart(dir: &Path, name: &str, png: Result<Vec<u8>, String>) -> std::io::Result<()> {
    match png {
        Ok(bytes) => {
            let path = dir.join(name);
            std::fs::write(&path, bytes)?;
            println!("Gráfico salvo: {}", path.display());
        }
        Err(e) => eprintln!("Falha ao gerar gráfico {}: {}", name, e),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("opa=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let args: Vec<String> = std::env::args().collect();
    let dataset_path = get_dataset_path(&args);
    let charts_dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("charts"));

    eprintln!("Dataset: {}", dataset_path.display());

    let mut cache = DatasetCache::new();
    let dataset = cache.load(&dataset_path)?;

    let criteria = FilterCriteria::full_domain(&dataset);
    let view = dataset.apply(&criteria);

    // Empty views short-circuit to a notice; aggregates are never computed
    // over zero rows.
    let summary = match dataset::summarize(&view) {
        Some(summary) => summary,
        None => {
            println!("Nenhum dado encontrado com os filtros selecionados.");
            return Ok(());
        }
    };

    println!();
    println!("=== Métricas Chave ===");
    println!("Total de Pacientes: {}", summary.total);
    println!("Média de Idade: {:.1} anos", summary.mean_age);
    println!("Média de IMC: {:.2}", summary.mean_bmi);
    println!("% Obesidade (Tipo I, II, III): {:.1}%", summary.obesity_pct);

    println!();
    println!("=== Distribuição dos Níveis de Peso ===");
    let distribution = dataset::category_distribution(&view).unwrap_or_default();
    for entry in &distribution {
        println!("{:<14} {}", entry.label, entry.count);
    }

    println!();
    println!("=== Médias por Nível de Peso ===");
    for attr in [NumericAttr::WaterScale, NumericAttr::ActivityScale] {
        println!("{}:", attr.label_pt());
        for entry in dataset::category_means(&view, attr).unwrap_or_default() {
            println!("  {:<14} {:.2}", entry.label, entry.mean);
        }
    }

    println!();
    println!("=== Obesidade por Histórico Familiar ===");
    let shares = dataset::obesity_share_by_family_history(&view).unwrap_or_default();
    for share in &shares {
        println!(
            "{:<5} {:.1}% ({} pacientes)",
            share.family_history, share.obesity_pct, share.group_size
        );
    }

    std::fs::create_dir_all(&charts_dir)?;
    write_chart(
        &charts_dir,
        "distribuicao_niveis_peso.png",
        charts::distribution_chart(&distribution, 1000, 500),
    )?;
    if let Some(means) = dataset::category_means(&view, NumericAttr::WaterScale) {
        write_chart(
            &charts_dir,
            "media_consumo_agua.png",
            charts::category_mean_chart(&means, "Média de Consumo de Água (Escala 1-3)", 1000, 500),
        )?;
    }
    if let Some(means) = dataset::category_means(&view, NumericAttr::ActivityScale) {
        write_chart(
            &charts_dir,
            "media_atividade_fisica.png",
            charts::category_mean_chart(&means, "Média de Atividade Física (Escala 0-3)", 1000, 500),
        )?;
    }
    write_chart(
        &charts_dir,
        "obesidade_historico_familiar.png",
        charts::family_history_pie(&shares, 700, 500),
    )?;

    Ok(())
}
