//! Chart generation
//!
//! Renders the dashboard series as PNG bytes with plotters: the weight-level
//! distribution bars, per-category mean bars, and the family-history obesity
//! pie. Chart axes follow the severity order of the input series; the series
//! builders in `dataset::stats` own that ordering.

use image::{DynamicImage, ImageFormat, RgbImage};

use crate::dataset::{CategoryCount, CategoryMean, ObesityShare};

/// Pie slice palette (family-history groups)
const PIE_COLORS: [(u8, u8, u8); 4] = [
    (103, 169, 207),
    (239, 138, 98),
    (178, 24, 43),
    (33, 102, 172),
];

fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, String> {
    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or("Failed to create image from buffer")?;

    let mut png_bytes = Vec::new();
    let dyn_img = DynamicImage::ImageRgb8(img);
    dyn_img
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok(png_bytes)
}

/// Horizontal bar chart of patients per weight level, severity-ordered from
/// top to bottom, as PNG bytes
pub fn distribution_chart(
    dist: &[CategoryCount],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    use plotters::prelude::*;

    if dist.is_empty() {
        return Err("No data to chart".to_string());
    }

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;
        let root = root
            .titled("Contagem de Pacientes por Nível de Peso", ("sans-serif", 24))
            .map_err(|e| e.to_string())?;

        let n = dist.len();
        let max_count = dist.iter().map(|d| d.count).max().unwrap_or(0).max(1);

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(20)
            .build_cartesian_2d(0f64..(max_count as f64 * 1.15), 0f64..n as f64)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(0)
            .x_desc("Número de Pacientes")
            .draw()
            .map_err(|e| e.to_string())?;

        // First series entry (lowest severity) at the top
        chart
            .draw_series(dist.iter().enumerate().map(|(i, d)| {
                let (r, g, b) = d.category.chart_color();
                let y0 = n as f64 - i as f64 - 0.85;
                let y1 = n as f64 - i as f64 - 0.15;
                Rectangle::new([(0.0, y0), (d.count as f64, y1)], RGBColor(r, g, b).filled())
            }))
            .map_err(|e| e.to_string())?;

        // Category names drawn inside the plot area
        chart
            .draw_series(dist.iter().enumerate().map(|(i, d)| {
                let y = n as f64 - i as f64 - 0.55;
                Text::new(
                    format!("{} ({})", d.label, d.count),
                    (max_count as f64 * 0.02, y),
                    ("sans-serif", 16).into_font().color(&BLACK),
                )
            }))
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }

    encode_png(buffer, width, height)
}

/// Vertical bar chart of a per-category mean, severity-ordered left to
/// right, as PNG bytes
pub fn category_mean_chart(
    means: &[CategoryMean],
    title: &str,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    use plotters::prelude::*;

    if means.is_empty() {
        return Err("No data to chart".to_string());
    }

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;
        let root = root
            .titled(title, ("sans-serif", 24))
            .map_err(|e| e.to_string())?;

        let n = means.len();
        let max_mean = means
            .iter()
            .map(|m| m.mean)
            .fold(f64::NEG_INFINITY, f64::max)
            .max(f64::MIN_POSITIVE);

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(50)
            .build_cartesian_2d(0f64..n as f64, 0f64..(max_mean * 1.2))
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_desc("Média")
            .draw()
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(means.iter().enumerate().map(|(i, m)| {
                let (r, g, b) = m.category.chart_color();
                Rectangle::new(
                    [(i as f64 + 0.15, 0.0), (i as f64 + 0.85, m.mean)],
                    RGBColor(r, g, b).filled(),
                )
            }))
            .map_err(|e| e.to_string())?;

        // Value on top of each bar, category name at its base
        chart
            .draw_series(means.iter().enumerate().map(|(i, m)| {
                Text::new(
                    format!("{:.2}", m.mean),
                    (i as f64 + 0.2, m.mean + max_mean * 0.04),
                    ("sans-serif", 15).into_font().color(&BLACK),
                )
            }))
            .map_err(|e| e.to_string())?;
        chart
            .draw_series(means.iter().enumerate().map(|(i, m)| {
                Text::new(
                    m.label.to_string(),
                    (i as f64 + 0.1, max_mean * 0.02),
                    ("sans-serif", 13).into_font().color(&BLACK),
                )
            }))
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }

    encode_png(buffer, width, height)
}

/// Pie chart of the obesity share per family-history group, as PNG bytes
pub fn family_history_pie(
    shares: &[ObesityShare],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    use plotters::prelude::*;

    if shares.is_empty() {
        return Err("No data to chart".to_string());
    }

    let mut buffer = vec![0u8; (width * height * 3) as usize];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;
        let root = root
            .titled(
                "Proporção de Obesidade por Histórico Familiar",
                ("sans-serif", 24),
            )
            .map_err(|e| e.to_string())?;

        let sizes: Vec<f64> = shares.iter().map(|s| s.obesity_pct.max(0.001)).collect();
        let labels: Vec<String> = shares
            .iter()
            .map(|s| format!("{} ({:.1}%)", s.family_history, s.obesity_pct))
            .collect();
        let colors: Vec<RGBColor> = shares
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let (r, g, b) = PIE_COLORS[i % PIE_COLORS.len()];
                RGBColor(r, g, b)
            })
            .collect();

        let center = (width as i32 / 2, height as i32 / 2 + 10);
        let radius = (width.min(height) as f64) * 0.3;
        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
        root.draw(&pie).map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }

    encode_png(buffer, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeightCategory;

    fn sample_distribution() -> Vec<CategoryCount> {
        WeightCategory::ALL
            .iter()
            .enumerate()
            .map(|(i, &category)| CategoryCount {
                category,
                label: category.display_pt(),
                count: i + 1,
            })
            .collect()
    }

    #[test]
    fn test_distribution_chart_produces_png() {
        let png = distribution_chart(&sample_distribution(), 640, 480).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_mean_chart_produces_png() {
        let means = vec![
            CategoryMean {
                category: WeightCategory::NormalWeight,
                label: WeightCategory::NormalWeight.display_pt(),
                mean: 2.1,
            },
            CategoryMean {
                category: WeightCategory::ObesityTypeI,
                label: WeightCategory::ObesityTypeI.display_pt(),
                mean: 1.4,
            },
        ];
        let png = category_mean_chart(&means, "Média de Atividade Física", 640, 480).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_pie_chart_produces_png() {
        let shares = vec![
            ObesityShare {
                family_history: "Sim".to_string(),
                group_size: 10,
                obesity_pct: 70.0,
            },
            ObesityShare {
                family_history: "Não".to_string(),
                group_size: 5,
                obesity_pct: 20.0,
            },
        ];
        let png = family_history_pie(&shares, 640, 480).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_empty_series_is_an_error() {
        assert!(distribution_chart(&[], 640, 480).is_err());
        assert!(category_mean_chart(&[], "t", 640, 480).is_err());
        assert!(family_history_pie(&[], 640, 480).is_err());
    }
}
