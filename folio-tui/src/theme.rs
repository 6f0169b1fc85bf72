//! Theme tokens for the Folio chart deck
//!
//! Dark background with neon line colors, plus the yellow-green-blue ramp
//! used by the correlation heatmap.
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (borders, focus)
//! - **Warning**: Neon orange (synthetic data, undefined cells)
//! - **Muted**: Steel blue (axes, secondary text)
//! - **Series**: Eight line colors, cycled by column index

use ratatui::style::Color;

/// Line colors for symbol series, cycled by column index.
pub const SERIES_COLORS: [Color; 8] = [
    Color::Rgb(0, 255, 255),   // electric cyan
    Color::Rgb(255, 140, 0),   // neon orange
    Color::Rgb(0, 255, 128),   // neon green
    Color::Rgb(255, 20, 147),  // hot pink
    Color::Rgb(147, 112, 219), // cool purple
    Color::Rgb(255, 215, 0),   // gold
    Color::Rgb(100, 149, 237), // steel blue
    Color::Rgb(230, 230, 230), // off-white
];

/// Nine-stop yellow → green → blue ramp (light to dark).
const YLGNBU: [(u8, u8, u8); 9] = [
    (255, 255, 217),
    (237, 248, 177),
    (199, 233, 180),
    (127, 205, 187),
    (65, 182, 196),
    (29, 145, 192),
    (34, 94, 168),
    (37, 52, 148),
    (8, 29, 88),
];

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (borders, titles)
    pub accent: Color,
    /// Neon orange (warnings)
    pub warning: Color,
    /// Steel blue (axes, muted text)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
    /// Light gray (secondary text)
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    pub fn neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            warning: Color::Rgb(255, 140, 0),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Line color for the `index`-th symbol column.
    pub fn series_color(&self, index: usize) -> Color {
        SERIES_COLORS[index % SERIES_COLORS.len()]
    }

    /// Heatmap fill for a position in `[0, 1]` (0 = lightest).
    ///
    /// Out-of-range positions are clamped; NaN gets the muted color.
    pub fn heatmap_color(&self, t: f64) -> Color {
        if t.is_nan() {
            return self.muted;
        }
        let t = t.clamp(0.0, 1.0);
        let scaled = t * (YLGNBU.len() - 1) as f64;
        let lo = scaled.floor() as usize;
        let hi = (lo + 1).min(YLGNBU.len() - 1);
        let frac = scaled - lo as f64;

        let lerp = |a: u8, b: u8| -> u8 { (a as f64 + (b as f64 - a as f64) * frac).round() as u8 };
        let (a, b) = (YLGNBU[lo], YLGNBU[hi]);
        Color::Rgb(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
    }

    /// Readable annotation color on top of `heatmap_color(t)`.
    pub fn heatmap_text_color(&self, t: f64) -> Color {
        if t.is_nan() || t >= 0.5 {
            Color::White
        } else {
            Color::Black
        }
    }
}
