use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

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
            let hsl = Hsl::new(hue, 0.70, 0.50);
            hsl_to_color32(hsl)
        })
        .collect()
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: county → Color32
// ---------------------------------------------------------------------------

/// Maps county names to distinct colours, shared by the bar and scatter
/// charts and the filter panel swatches.
#[derive(Debug, Clone)]
pub struct CountyColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CountyColors {
    /// Build a colour map from the sorted unique county list.
    pub fn new(counties: &[String]) -> Self {
        let palette = generate_palette(counties.len());
        let mapping: BTreeMap<String, Color32> = counties
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        CountyColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a county.
    pub fn color_for(&self, county: &str) -> Color32 {
        self.mapping
            .get(county)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Heat gradient for the coverage heatmap
// ---------------------------------------------------------------------------

/// Colour for a normalized heatmap cell value in `0.0..=1.0`
/// (deep blue → warm yellow).
pub fn heat_color(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let cold = Hsl::new(235.0, 0.55, 0.25);
    let warm = Hsl::new(48.0, 0.95, 0.55);
    hsl_to_color32(cold.mix(warm, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        let p = generate_palette(8);
        assert_eq!(p.len(), 8);
        for pair in p.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_county_gets_default_color() {
        let colors = CountyColors::new(&["Siaya".to_string()]);
        assert_eq!(colors.color_for("Nowhere"), Color32::GRAY);
        assert_ne!(colors.color_for("Siaya"), Color32::GRAY);
    }

    #[test]
    fn heat_color_clamps_out_of_range_values() {
        assert_eq!(heat_color(-1.0), heat_color(0.0));
        assert_eq!(heat_color(2.0), heat_color(1.0));
        assert_ne!(heat_color(0.0), heat_color(1.0));
    }
}
