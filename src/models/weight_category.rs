//! Weight category vocabulary
//!
//! The 7 canonical obesity-scale labels in severity order, plus the 4 coarse
//! severity bands used for report color-coding and recommendation lookup.

use serde::{Deserialize, Serialize};

/// Canonical weight category, from lowest to highest severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightCategory {
    InsufficientWeight,
    NormalWeight,
    OverweightLevelI,
    #[serde(rename = "overweight_level_ii")]
    OverweightLevelII,
    ObesityTypeI,
    #[serde(rename = "obesity_type_ii")]
    ObesityTypeII,
    #[serde(rename = "obesity_type_iii")]
    ObesityTypeIII,
}

impl WeightCategory {
    /// All categories in severity order. Chart axes, distribution tables and
    /// group means iterate this table; the order is never re-derived by
    /// sorting labels.
    pub const ALL: [WeightCategory; 7] = [
        WeightCategory::InsufficientWeight,
        WeightCategory::NormalWeight,
        WeightCategory::OverweightLevelI,
        WeightCategory::OverweightLevelII,
        WeightCategory::ObesityTypeI,
        WeightCategory::ObesityTypeII,
        WeightCategory::ObesityTypeIII,
    ];

    /// Raw label as it appears in the dataset's outcome column
    pub fn raw_label(&self) -> &'static str {
        match self {
            WeightCategory::InsufficientWeight => "Insufficient_Weight",
            WeightCategory::NormalWeight => "Normal_Weight",
            WeightCategory::OverweightLevelI => "Overweight_Level_I",
            WeightCategory::OverweightLevelII => "Overweight_Level_II",
            WeightCategory::ObesityTypeI => "Obesity_Type_I",
            WeightCategory::ObesityTypeII => "Obesity_Type_II",
            WeightCategory::ObesityTypeIII => "Obesity_Type_III",
        }
    }

    /// Portuguese display label used in tables, charts, and reports
    pub fn display_pt(&self) -> &'static str {
        match self {
            WeightCategory::InsufficientWeight => "Baixo Peso",
            WeightCategory::NormalWeight => "Peso Normal",
            WeightCategory::OverweightLevelI => "Sobrepeso I",
            WeightCategory::OverweightLevelII => "Sobrepeso II",
            WeightCategory::ObesityTypeI => "Obesidade I",
            WeightCategory::ObesityTypeII => "Obesidade II",
            WeightCategory::ObesityTypeIII => "Obesidade III",
        }
    }

    pub fn from_raw(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.raw_label() == s)
    }

    pub fn from_display_pt(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.display_pt() == s)
    }

    /// Position in the severity order (0 = Baixo Peso, 6 = Obesidade III)
    pub fn severity_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or(Self::ALL.len())
    }

    /// Coarse severity band. Explicit total mapping: every label belongs to
    /// exactly one band, so a renamed label can never match two bands the way
    /// a substring test could.
    pub fn band(&self) -> SeverityBand {
        match self {
            WeightCategory::InsufficientWeight => SeverityBand::Insufficient,
            WeightCategory::NormalWeight => SeverityBand::Normal,
            WeightCategory::OverweightLevelI | WeightCategory::OverweightLevelII => {
                SeverityBand::Overweight
            }
            WeightCategory::ObesityTypeI
            | WeightCategory::ObesityTypeII
            | WeightCategory::ObesityTypeIII => SeverityBand::Obesity,
        }
    }

    /// Fixed chart color for this category (distribution bar chart ramp)
    pub fn chart_color(&self) -> (u8, u8, u8) {
        match self {
            WeightCategory::InsufficientWeight => (0x21, 0x96, 0xf3),
            WeightCategory::NormalWeight => (0x4c, 0xaf, 0x50),
            WeightCategory::OverweightLevelI => (0xff, 0xc1, 0x07),
            WeightCategory::OverweightLevelII => (0xff, 0x98, 0x00),
            WeightCategory::ObesityTypeI => (0xff, 0x57, 0x22),
            WeightCategory::ObesityTypeII => (0xf4, 0x43, 0x36),
            WeightCategory::ObesityTypeIII => (0xb7, 0x1c, 0x1c),
        }
    }
}

/// Coarse severity band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    Insufficient,
    Normal,
    Overweight,
    Obesity,
}

impl SeverityBand {
    pub fn is_obesity(&self) -> bool {
        matches!(self, SeverityBand::Obesity)
    }

    /// Result-box fill color in the report: low severities share green,
    /// overweight is orange, obesity is red.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            SeverityBand::Insufficient | SeverityBand::Normal => (76, 175, 80),
            SeverityBand::Overweight => (255, 152, 0),
            SeverityBand::Obesity => (244, 67, 54),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order_is_fixed() {
        let labels: Vec<&str> = WeightCategory::ALL.iter().map(|c| c.display_pt()).collect();
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
    }

    #[test]
    fn test_label_roundtrip() {
        for category in WeightCategory::ALL {
            assert_eq!(WeightCategory::from_raw(category.raw_label()), Some(category));
            assert_eq!(
                WeightCategory::from_display_pt(category.display_pt()),
                Some(category)
            );
        }
        assert_eq!(WeightCategory::from_raw("Unknown_Label"), None);
    }

    #[test]
    fn band_table_is_total_and_exact() {
        // Every label maps to exactly one band; in particular the two
        // Sobrepeso labels never land in the obesity band.
        assert_eq!(
            WeightCategory::InsufficientWeight.band(),
            SeverityBand::Insufficient
        );
        assert_eq!(WeightCategory::NormalWeight.band(), SeverityBand::Normal);
        assert_eq!(
            WeightCategory::OverweightLevelI.band(),
            SeverityBand::Overweight
        );
        assert_eq!(
            WeightCategory::OverweightLevelII.band(),
            SeverityBand::Overweight
        );
        assert!(!WeightCategory::OverweightLevelII.band().is_obesity());
        assert!(WeightCategory::ObesityTypeI.band().is_obesity());
        assert!(WeightCategory::ObesityTypeII.band().is_obesity());
        assert!(WeightCategory::ObesityTypeIII.band().is_obesity());
    }

    #[test]
    fn test_band_colors() {
        assert_eq!(SeverityBand::Insufficient.color(), (76, 175, 80));
        assert_eq!(SeverityBand::Normal.color(), (76, 175, 80));
        assert_eq!(SeverityBand::Overweight.color(), (255, 152, 0));
        assert_eq!(SeverityBand::Obesity.color(), (244, 67, 54));
    }
}
