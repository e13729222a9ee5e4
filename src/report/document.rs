//! PDF document assembly
//!
//! Renders the assembled report pages with printpdf: builtin Helvetica
//! fonts, A4 millimeter layout, one PDF page per logical report page. Page
//! chrome (header banner, page-number footer) is applied through plain
//! function pointers so the renderer stays a generic page-sequence writer.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use thiserror::Error;
use tracing::info;

use super::content::{self, Block, ReportPage};
use crate::models::{PredictionResult, ReportPatient};

/// Default report destination, overridable through `ReportOptions`
pub const DEFAULT_OUTPUT: &str = "relatorio_obesidade.pdf";

// A4 portrait
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 15.0;
const MARGIN_RIGHT: f32 = 195.0;
const CONTENT_TOP: f32 = PAGE_HEIGHT - 38.0;

const COLOR_THEME: (u8, u8, u8) = (102, 126, 234);
const COLOR_HEADING: (u8, u8, u8) = (70, 70, 70);
const COLOR_LABEL: (u8, u8, u8) = (50, 50, 50);
const COLOR_VALUE: (u8, u8, u8) = (80, 80, 80);
const COLOR_BULLET: (u8, u8, u8) = (60, 60, 60);
const COLOR_GRAY: (u8, u8, u8) = (128, 128, 128);
const COLOR_WHITE: (u8, u8, u8) = (255, 255, 255);
const COLOR_WARNING_FILL: (u8, u8, u8) = (255, 243, 224);
const COLOR_WARNING_BORDER: (u8, u8, u8) = (255, 152, 0);
const COLOR_WARNING_TEXT: (u8, u8, u8) = (230, 81, 0);

/// Report rendering error types
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Rendering options
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub output_path: PathBuf,
    /// Generation timestamp; `None` means now. Injectable so identical
    /// inputs produce identical documents.
    pub generated_at: Option<DateTime<Local>>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            generated_at: None,
        }
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

type HeaderFn = fn(&PdfLayerReference, &Fonts);
type FooterFn = fn(&PdfLayerReference, &Fonts, usize);

fn rgb_color(color: (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        None,
    ))
}

fn add_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    x: Mm,
    y: Mm,
    size: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb_color(color));
    layer.use_text(text, size, x, y, font);
}

fn add_line(
    layer: &PdfLayerReference,
    x1: Mm,
    y1: Mm,
    x2: Mm,
    y2: Mm,
    color: (u8, u8, u8),
    width: f32,
) {
    layer.set_outline_color(rgb_color(color));
    layer.set_outline_thickness(width);

    let line = Line {
        points: vec![(Point::new(x1, y1), false), (Point::new(x2, y2), false)],
        is_closed: false,
    };
    layer.add_line(line);
}

fn add_rect(
    layer: &PdfLayerReference,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    fill: (u8, u8, u8),
    border: Option<(u8, u8, u8)>,
) {
    layer.set_fill_color(rgb_color(fill));
    let mode = match border {
        Some(color) => {
            layer.set_outline_color(rgb_color(color));
            layer.set_outline_thickness(1.0);
            PaintMode::FillStroke
        }
        None => PaintMode::Fill,
    };

    let polygon = Polygon {
        rings: vec![vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y + h)), false),
            (Point::new(Mm(x), Mm(y + h)), false),
        ]],
        mode,
        winding_order: WindingOrder::NonZero,
    };
    layer.add_polygon(polygon);
}

/// Approximate x for horizontally centered text. Average Helvetica glyph
/// width taken as half the font size.
fn centered_x(text: &str, size: f32) -> Mm {
    let width_mm = text.chars().count() as f32 * size * 0.5 * 0.352_778;
    Mm(((PAGE_WIDTH - width_mm) / 2.0).max(MARGIN_LEFT))
}

/// Word-wrap for box and bullet text
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + word.chars().count() + 1 > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn draw_header(layer: &PdfLayerReference, fonts: &Fonts) {
    let title = "Sistema de Predição de Obesidade";
    let subtitle = "Relatório Individual de Avaliação";
    add_text(
        layer,
        &fonts.bold,
        title,
        centered_x(title, 16.0),
        Mm(PAGE_HEIGHT - 18.0),
        16.0,
        COLOR_THEME,
    );
    add_text(
        layer,
        &fonts.italic,
        subtitle,
        centered_x(subtitle, 10.0),
        Mm(PAGE_HEIGHT - 25.0),
        10.0,
        (100, 100, 100),
    );
}

fn draw_footer(layer: &PdfLayerReference, fonts: &Fonts, page_no: usize) {
    let text = format!("Página {}", page_no);
    add_text(
        layer,
        &fonts.italic,
        &text,
        centered_x(&text, 8.0),
        Mm(10.0),
        8.0,
        COLOR_GRAY,
    );
}

/// Sequential page writer: owns the y cursor and applies the chrome to each
/// page it opens.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    fonts: &'a Fonts,
    header: HeaderFn,
    footer: FooterFn,
    layer: PdfLayerReference,
    page_no: usize,
    y: f32,
}

impl<'a> PageWriter<'a> {
    fn new(
        doc: &'a PdfDocumentReference,
        fonts: &'a Fonts,
        header: HeaderFn,
        footer: FooterFn,
        first_layer: PdfLayerReference,
    ) -> Self {
        let writer = Self {
            doc,
            fonts,
            header,
            footer,
            layer: first_layer,
            page_no: 1,
            y: CONTENT_TOP,
        };
        (writer.header)(&writer.layer, writer.fonts);
        (writer.footer)(&writer.layer, writer.fonts, writer.page_no);
        writer
    }

    fn new_page(&mut self) {
        let (page, layer) =
            self.doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Page {}", self.page_no + 1));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.page_no += 1;
        self.y = CONTENT_TOP;
        (self.header)(&self.layer, self.fonts);
        (self.footer)(&self.layer, self.fonts, self.page_no);
    }

    fn render(&mut self, block: &Block) {
        match block {
            Block::SectionTitle(title) => {
                self.y -= 4.0;
                add_text(
                    &self.layer,
                    &self.fonts.bold,
                    title,
                    Mm(MARGIN_LEFT),
                    Mm(self.y),
                    14.0,
                    COLOR_THEME,
                );
                add_line(
                    &self.layer,
                    Mm(MARGIN_LEFT),
                    Mm(self.y - 2.0),
                    Mm(MARGIN_RIGHT),
                    Mm(self.y - 2.0),
                    COLOR_THEME,
                    0.7,
                );
                self.y -= 10.0;
            }
            Block::Subheading(heading) => {
                self.y -= 2.0;
                add_text(
                    &self.layer,
                    &self.fonts.bold,
                    heading,
                    Mm(MARGIN_LEFT),
                    Mm(self.y),
                    11.0,
                    COLOR_HEADING,
                );
                self.y -= 7.0;
            }
            Block::Field { label, value } => {
                add_text(
                    &self.layer,
                    &self.fonts.bold,
                    &format!("{}:", label),
                    Mm(MARGIN_LEFT),
                    Mm(self.y),
                    10.0,
                    COLOR_LABEL,
                );
                add_text(
                    &self.layer,
                    &self.fonts.regular,
                    value,
                    Mm(MARGIN_LEFT + 62.0),
                    Mm(self.y),
                    10.0,
                    COLOR_VALUE,
                );
                self.y -= 6.0;
            }
            Block::ResultBox { heading, value, color } => {
                self.y -= 4.0;
                add_rect(&self.layer, 10.0, self.y - 25.0, 190.0, 25.0, *color, None);
                add_text(
                    &self.layer,
                    &self.fonts.bold,
                    heading,
                    centered_x(heading, 12.0),
                    Mm(self.y - 9.0),
                    12.0,
                    COLOR_WHITE,
                );
                add_text(
                    &self.layer,
                    &self.fonts.bold,
                    value,
                    centered_x(value, 14.0),
                    Mm(self.y - 19.0),
                    14.0,
                    COLOR_WHITE,
                );
                self.y -= 33.0;
            }
            Block::Text { text, color } => {
                add_text(
                    &self.layer,
                    &self.fonts.regular,
                    text,
                    Mm(MARGIN_LEFT),
                    Mm(self.y),
                    10.0,
                    *color,
                );
                self.y -= 6.0;
            }
            Block::Bullets(items) => {
                for item in items {
                    for (i, line) in wrap_text(item, 88).iter().enumerate() {
                        let text = if i == 0 {
                            format!("- {}", line)
                        } else {
                            format!("  {}", line)
                        };
                        add_text(
                            &self.layer,
                            &self.fonts.regular,
                            &text,
                            Mm(MARGIN_LEFT + 3.0),
                            Mm(self.y),
                            10.0,
                            COLOR_BULLET,
                        );
                        self.y -= 6.0;
                    }
                }
            }
            Block::ProbabilityRow { label, pct } => {
                add_text(
                    &self.layer,
                    &self.fonts.regular,
                    label,
                    Mm(MARGIN_LEFT),
                    Mm(self.y),
                    9.0,
                    COLOR_VALUE,
                );
                add_text(
                    &self.layer,
                    &self.fonts.regular,
                    &format!("{:.2}%", pct),
                    Mm(165.0),
                    Mm(self.y),
                    9.0,
                    COLOR_VALUE,
                );
                self.y -= 5.0;
            }
            Block::WarningBox(text) => {
                self.y -= 6.0;
                let lines = wrap_text(text, 95);
                let box_height = lines.len() as f32 * 5.0 + 8.0;
                add_rect(
                    &self.layer,
                    10.0,
                    self.y - box_height,
                    190.0,
                    box_height,
                    COLOR_WARNING_FILL,
                    Some(COLOR_WARNING_BORDER),
                );
                let mut line_y = self.y - 7.0;
                for line in &lines {
                    add_text(
                        &self.layer,
                        &self.fonts.italic,
                        line,
                        Mm(MARGIN_LEFT),
                        Mm(line_y),
                        9.0,
                        COLOR_WARNING_TEXT,
                    );
                    line_y -= 5.0;
                }
                self.y -= box_height + 6.0;
            }
            Block::FooterNote(text) => {
                add_text(
                    &self.layer,
                    &self.fonts.italic,
                    text,
                    centered_x(text, 8.0),
                    Mm(self.y),
                    8.0,
                    COLOR_GRAY,
                );
                self.y -= 5.0;
            }
        }
    }
}

/// Assemble the report and write it to `options.output_path`. Returns the
/// destination path. Deterministic for identical inputs and an injected
/// timestamp; `build_report` has no observable side effect besides the
/// written file.
pub fn build_report(
    patient: &ReportPatient,
    prediction: &PredictionResult,
    options: &ReportOptions,
) -> ReportResult<PathBuf> {
    let generated_at = options.generated_at.unwrap_or_else(Local::now);
    let pages = content::build_content(patient, prediction, generated_at);

    let (doc, page1, layer1) = PdfDocument::new(
        "Relatório de Predição de Obesidade",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Page 1",
    );

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(e.to_string()))?,
        italic: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| ReportError::Pdf(e.to_string()))?,
    };

    {
        let first_layer = doc.get_page(page1).get_layer(layer1);
        let mut writer = PageWriter::new(&doc, &fonts, draw_header, draw_footer, first_layer);

        for (i, page) in pages.iter().enumerate() {
            if i > 0 {
                writer.new_page();
            }
            render_page(&mut writer, page);
        }
    }

    if let Some(parent) = options.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(&options.output_path)?;
    let mut buf_writer = BufWriter::new(file);
    doc.save(&mut buf_writer)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;

    info!(
        path = %options.output_path.display(),
        pages = pages.len(),
        "report written"
    );
    Ok(options.output_path.clone())
}

fn render_page(writer: &mut PageWriter, page: &ReportPage) {
    for block in &page.blocks {
        writer.render(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassProbability, WeightCategory};
    use chrono::TimeZone;

    fn sample_inputs() -> (ReportPatient, PredictionResult) {
        let patient = ReportPatient {
            gender: Some("Feminino".to_string()),
            age: Some(24.0),
            height: Some(1.65),
            weight: Some(111.0),
            family_history: Some("Sim".to_string()),
            favc: Some("Sim".to_string()),
            fcvc: Some(3.0),
            ncp: Some(3.0),
            caec: Some("Às vezes".to_string()),
            scc: Some("Não".to_string()),
            ch2o: Some(2.0),
            faf: Some(0.0),
            tue: Some(1.0),
            smoke: Some("Não".to_string()),
            calc: Some("Às vezes".to_string()),
            mtrans: Some("Transporte Público".to_string()),
        };
        let prediction = PredictionResult {
            category: WeightCategory::ObesityTypeIII,
            confidence: 92.3,
            probabilities: vec![
                ClassProbability { label: "Obesidade III".to_string(), pct: 92.3 },
                ClassProbability { label: "Obesidade II".to_string(), pct: 6.1 },
                ClassProbability { label: "Obesidade I".to_string(), pct: 1.6 },
            ],
        };
        (patient, prediction)
    }

    #[test]
    fn test_build_report_writes_pdf_to_destination() {
        let dir = tempfile::tempdir().unwrap();
        let (patient, prediction) = sample_inputs();
        let options = ReportOptions {
            output_path: dir.path().join("reports").join("paciente.pdf"),
            generated_at: Some(Local.with_ymd_and_hms(2026, 3, 14, 10, 30, 0).unwrap()),
        };

        let path = build_report(&patient, &prediction, &options).unwrap();
        assert_eq!(path, options.output_path);

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_default_options_use_default_destination() {
        let options = ReportOptions::default();
        assert_eq!(options.output_path, PathBuf::from(DEFAULT_OUTPUT));
        assert!(options.generated_at.is_none());
    }

    #[test]
    fn test_wrap_text_respects_word_boundaries() {
        let lines = wrap_text("um dois tres quatro cinco", 12);
        assert_eq!(lines, vec!["um dois tres", "quatro cinco"]);
        assert!(wrap_text("", 10).is_empty());
    }
}
