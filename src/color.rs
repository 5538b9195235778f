use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: sector label → Color32
// ---------------------------------------------------------------------------

/// Maps the sector labels of a loaded dataset to distinct colours so every
/// chart colours a given sector consistently.
#[derive(Debug, Clone, Default)]
pub struct SectorColors {
    mapping: BTreeMap<String, Color32>,
}

impl SectorColors {
    /// Build the colour map from the dataset's sorted sector labels.
    pub fn new(sectors: &[String]) -> Self {
        let palette = generate_palette(sectors.len());
        let mapping = sectors
            .iter()
            .cloned()
            .zip(palette)
            .collect();
        SectorColors { mapping }
    }

    /// Look up the colour for a sector label.
    pub fn color_for(&self, sector: &str) -> Color32 {
        self.mapping.get(sector).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colors_are_distinct() {
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_sector_falls_back_to_gray() {
        let colors = SectorColors::new(&["Energy".to_string()]);
        assert_eq!(colors.color_for("Transport"), Color32::GRAY);
        assert_ne!(colors.color_for("Energy"), Color32::GRAY);
    }
}
