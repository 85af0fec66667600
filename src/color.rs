use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Colour of the raw monthly line.
pub const MONTHLY_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

/// Colour of the smoothed line.
pub const SMOOTHED_COLOR: Color32 = Color32::from_rgb(239, 85, 59);

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
// Cycle colours for the folded scatter
// ---------------------------------------------------------------------------

/// Assigns each repetition of the folding period a colour from a fixed ring,
/// so neighbouring cycles are told apart.
#[derive(Debug, Clone)]
pub struct CyclePalette {
    ring: Vec<Color32>,
}

impl CyclePalette {
    pub fn new(size: usize) -> Self {
        CyclePalette {
            ring: generate_palette(size.max(1)),
        }
    }

    /// Colour for cycle index `cycle` (may be negative).
    pub fn color_for(&self, cycle: i64) -> Color32 {
        let idx = cycle.rem_euclid(self.ring.len() as i64) as usize;
        self.ring[idx]
    }
}

impl Default for CyclePalette {
    fn default() -> Self {
        Self::new(12)
    }
}
