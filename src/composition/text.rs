//! Font resolution and center-anchored text drawing.
//!
//! Fonts are looked up through a fallback chain of file paths. When none of
//! them can be loaded the built-in 8x8 bitmap face is used, so text always
//! renders.

use std::fmt;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::RgbImage;
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::{debug, info};

use crate::composition::types::Color;
use crate::error::FontError;

const BUILTIN_CELL: u32 = 8;

/// A resolved font face, shared read-only between compositing calls
#[derive(Clone)]
pub enum Typeface {
    /// Outline font loaded from disk
    Outline { font: FontArc, source: PathBuf },

    /// Built-in bitmap font
    Builtin,
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outline { source, .. } => f.debug_struct("Outline").field("source", source).finish(),
            Self::Builtin => f.write_str("Builtin"),
        }
    }
}

impl Typeface {
    /// Walk the candidate list and keep the first font that loads
    pub fn resolve<P: AsRef<Path>>(candidates: &[P]) -> Self {
        for candidate in candidates {
            let path = candidate.as_ref();
            match Self::load(path) {
                Ok(font) => {
                    info!("Using font {:?}", path);
                    return Self::Outline {
                        font,
                        source: path.to_path_buf(),
                    };
                }
                Err(e) => debug!("Font unavailable, trying next: {}", e),
            }
        }

        info!("No font file available, using built-in bitmap font");
        Self::Builtin
    }

    /// Load a single font file
    pub fn load(path: &Path) -> Result<FontArc, FontError> {
        let data = std::fs::read(path).map_err(|_| FontError::NotFound {
            path: path.display().to_string(),
        })?;

        FontArc::try_from_vec(data).map_err(|e| FontError::Invalid {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }

    /// Size of the rendered text box in pixels
    ///
    /// For outline fonts this is the advance width by the line height
    /// (ascent to descent), so it does not depend on which glyphs are drawn.
    pub fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        if text.is_empty() {
            return (0, 0);
        }

        match self {
            Self::Outline { font, .. } => {
                let scale = px_scale(font, size);
                let (width, _) = text_size(scale, font, text);
                (width, line_height(font, scale).ceil() as u32)
            }
            Self::Builtin => {
                let cell = BUILTIN_CELL * builtin_factor(size);
                (cell * text.chars().count() as u32, cell)
            }
        }
    }

    /// Draw `text` so that the middle of its box sits on `center`
    ///
    /// Glyphs falling outside the canvas are clipped.
    pub fn draw_centered(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        size: f32,
        center: (i32, i32),
        color: Color,
    ) {
        if text.is_empty() {
            return;
        }

        let (w, h) = self.measure(text, size);
        let x = center.0 - (w / 2) as i32;

        match self {
            Self::Outline { font, .. } => {
                // draw_text_mut takes the top of the line; the baseline lands at y + ascent
                let scale = px_scale(font, size);
                let y = (center.1 as f32 - line_height(font, scale) / 2.0).round() as i32;
                draw_text_mut(canvas, color.to_rgb(), x, y, scale, font, text);
            }
            Self::Builtin => {
                let y = center.1 - (h / 2) as i32;
                draw_builtin(canvas, text, builtin_factor(size), (x, y), color);
            }
        }
    }
}

fn line_height(font: &FontArc, scale: PxScale) -> f32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent()).max(1.0)
}

/// Convert a point size (em height) into the pixel scale ab_glyph expects
fn px_scale(font: &FontArc, size: f32) -> PxScale {
    let height = font.height_unscaled();
    let units_per_em = font.units_per_em().unwrap_or(height);
    PxScale::from(size * height / units_per_em)
}

fn builtin_factor(size: f32) -> u32 {
    ((size / 16.0).round() as u32).max(1)
}

fn draw_builtin(canvas: &mut RgbImage, text: &str, factor: u32, origin: (i32, i32), color: Color) {
    let advance = (BUILTIN_CELL * factor) as i32;
    let pixel = color.to_rgb();
    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);

    for (i, c) in text.chars().enumerate() {
        let Some(rows) = BASIC_FONTS.get(c).or_else(|| BASIC_FONTS.get('?')) else {
            continue;
        };
        let gx = origin.0 + i as i32 * advance;

        for (row, bits) in rows.iter().enumerate() {
            for col in 0..BUILTIN_CELL {
                if bits & (1 << col) == 0 {
                    continue;
                }
                let bx = gx + (col * factor) as i32;
                let by = origin.1 + (row as u32 * factor) as i32;

                for dy in 0..factor as i32 {
                    for dx in 0..factor as i32 {
                        let (px, py) = (bx + dx, by + dy);
                        if px >= 0 && py >= 0 && px < cw && py < ch {
                            canvas.put_pixel(px as u32, py as u32, pixel);
                        }
                    }
                }
            }
        }
    }
}
