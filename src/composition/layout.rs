use serde::{Deserialize, Serialize};

use crate::composition::types::CanvasSize;
use crate::error::{ConfigError, Result};

/// Canvas the built-in profile offsets were authored against
pub const REFERENCE_CANVAS: CanvasSize = CanvasSize::new(800, 800);

/// Rectangle with inclusive corners, as used for the value tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl TileRect {
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Zero when `right` is left of `left`
    pub fn width(&self) -> u32 {
        self.right.checked_sub(self.left).map_or(0, |d| d.saturating_add(1))
    }

    pub fn height(&self) -> u32 {
        self.bottom.checked_sub(self.top).map_or(0, |d| d.saturating_add(1))
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Anchor point for the tile label
    pub fn center(&self) -> (i32, i32) {
        (
            ((self.left + self.right) / 2) as i32,
            ((self.top + self.bottom) / 2) as i32,
        )
    }
}

/// Named set of layout parameters
///
/// The same compositor serves the full-size render and the quick preview;
/// only these numbers differ between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutProfile {
    /// Profile name used in logs
    pub name: String,

    /// Largest allowed product size (width, height)
    pub max_product: (u32, u32),

    /// Font size in points for every text element
    pub font_size: f32,

    /// Vertical anchor of the headline
    pub headline_y: u32,

    /// Vertical anchor of the subhead
    pub subhead_y: u32,

    /// Vertical anchor of the retailer tag line
    pub tag_y: u32,

    /// Value tile border thickness in pixels
    pub border_width: u32,

    /// Value tile rectangle
    pub value_tile: TileRect,
}

impl LayoutProfile {
    /// Profile for the downloadable creative
    pub fn final_render() -> Self {
        Self {
            name: "final".to_string(),
            max_product: (400, 400),
            font_size: 40.0,
            headline_y: 100,
            subhead_y: 150,
            tag_y: 700,
            value_tile: TileRect::new(50, 50, 250, 130),
            border_width: 2,
        }
    }

    /// Profile for the live preview
    pub fn preview() -> Self {
        Self {
            name: "preview".to_string(),
            max_product: (300, 300),
            font_size: 30.0,
            headline_y: 80,
            subhead_y: 120,
            tag_y: 750,
            value_tile: TileRect::new(30, 30, 200, 100),
            border_width: 2,
        }
    }

    /// Rescale a profile authored for [`REFERENCE_CANVAS`] to another canvas
    ///
    /// Vertical offsets follow the canvas height, the product bound follows
    /// each axis, and the tile and font follow the smaller of the two ratios
    /// so they keep their proportions.
    pub fn fit_to(&self, canvas: CanvasSize) -> Self {
        if canvas == REFERENCE_CANVAS {
            return self.clone();
        }

        let sx = canvas.width as f32 / REFERENCE_CANVAS.width as f32;
        let sy = canvas.height as f32 / REFERENCE_CANVAS.height as f32;
        let s = sx.min(sy);
        let scale = |v: u32, f: f32| ((v as f32 * f).round() as u32).max(1);

        let tile = self.value_tile;
        let left = scale(tile.left, s);
        let top = scale(tile.top, s);
        let right = scale(tile.right, s).max(left);
        let bottom = scale(tile.bottom, s).max(top);

        Self {
            name: self.name.clone(),
            max_product: (scale(self.max_product.0, sx), scale(self.max_product.1, sy)),
            font_size: (self.font_size * s).max(1.0),
            headline_y: scale(self.headline_y, sy),
            subhead_y: scale(self.subhead_y, sy),
            tag_y: scale(self.tag_y, sy),
            value_tile: TileRect::new(left, top, right, bottom),
            border_width: self.border_width,
        }
    }

    pub(crate) fn validate(&self, key: &str) -> Result<()> {
        let invalid = |field: &str, value: String| ConfigError::InvalidValue {
            key: format!("{}.{}", key, field),
            value,
        };

        if self.max_product.0 == 0 || self.max_product.1 == 0 {
            return Err(invalid(
                "max_product",
                format!("{}x{}", self.max_product.0, self.max_product.1),
            )
            .into());
        }

        if !(self.font_size > 0.0) {
            return Err(invalid("font_size", self.font_size.to_string()).into());
        }

        let tile = self.value_tile;
        if tile.right < tile.left || tile.bottom < tile.top {
            return Err(invalid(
                "value_tile",
                format!("({},{})-({},{})", tile.left, tile.top, tile.right, tile.bottom),
            )
            .into());
        }

        if self.border_width * 2 >= tile.width().min(tile.height()) {
            return Err(invalid("border_width", self.border_width.to_string()).into());
        }

        Ok(())
    }
}

/// Size of an image after shrinking it to fit `bound`
///
/// Images already inside the bound keep their size. Otherwise the axis that
/// overflows the most is pinned to the bound and the other one is rounded to
/// whichever neighbour keeps the aspect ratio closest.
pub fn fit_within(width: u32, height: u32, bound: (u32, u32)) -> (u32, u32) {
    let (max_w, max_h) = bound;
    if width == 0 || height == 0 || (width <= max_w && height <= max_h) {
        return (width, height);
    }

    let aspect = width as f64 / height as f64;
    let (bw, bh) = (max_w as f64, max_h as f64);

    if bw / bh >= aspect {
        let w = round_aspect(bh * aspect, |n| (aspect - n / bh).abs());
        (w, max_h)
    } else {
        let h = round_aspect(bw / aspect, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - bw / n).abs()
            }
        });
        (max_w, h)
    }
}

fn round_aspect(value: f64, error: impl Fn(f64) -> f64) -> u32 {
    let (floor, ceil) = (value.floor(), value.ceil());
    let best = if error(ceil) < error(floor) { ceil } else { floor };
    (best as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_within_landscape() {
        assert_eq!(fit_within(1200, 900, (400, 400)), (400, 300));
    }

    #[test]
    fn test_fit_within_portrait() {
        assert_eq!(fit_within(300, 500, (400, 400)), (240, 400));
        assert_eq!(fit_within(900, 1200, (300, 300)), (225, 300));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        assert_eq!(fit_within(120, 80, (400, 400)), (120, 80));
        assert_eq!(fit_within(400, 400, (400, 400)), (400, 400));
    }

    #[test]
    fn test_fit_within_extreme_aspect_keeps_one_pixel() {
        assert_eq!(fit_within(4000, 2, (400, 400)), (400, 1));
    }

    #[test]
    fn test_fit_within_preserves_aspect() {
        for &(w, h) in &[(1000, 333), (777, 1500), (2048, 1536), (401, 400)] {
            let (sw, sh) = fit_within(w, h, (400, 400));
            assert!(sw <= 400 && sh <= 400);
            let original = w as f64 / h as f64;
            let scaled = sw as f64 / sh as f64;
            // one pixel of rounding on the short side
            let tolerance = original / sw.min(sh) as f64 + 1e-9;
            assert!((original - scaled).abs() <= tolerance, "{}x{} -> {}x{}", w, h, sw, sh);
        }
    }

    #[test]
    fn test_tile_center_matches_label_anchor() {
        assert_eq!(LayoutProfile::final_render().value_tile.center(), (150, 90));
        assert_eq!(LayoutProfile::preview().value_tile.center(), (115, 65));
    }

    #[test]
    fn test_inverted_tile_is_empty() {
        let tile = TileRect::new(250, 130, 50, 50);
        assert_eq!((tile.width(), tile.height()), (0, 0));
        assert!(tile.is_empty());

        let tile = TileRect::new(50, 50, 250, 130);
        assert_eq!((tile.width(), tile.height()), (201, 81));
        assert!(!tile.is_empty());
    }

    #[test]
    fn test_fit_to_reference_is_identity() {
        let profile = LayoutProfile::final_render();
        assert_eq!(profile.fit_to(REFERENCE_CANVAS), profile);
    }

    #[test]
    fn test_fit_to_wide_banner() {
        let profile = LayoutProfile::final_render().fit_to(CanvasSize::new(970, 250));
        assert!(profile.tag_y < 250);
        assert!(profile.max_product.1 <= 250);
        assert!(profile.value_tile.bottom < 250);
        assert!(profile.validate("profiles.final").is_ok());
    }

    #[test]
    fn test_builtin_profiles_validate() {
        assert!(LayoutProfile::final_render().validate("profiles.final").is_ok());
        assert!(LayoutProfile::preview().validate("profiles.preview").is_ok());
    }

    #[test]
    fn test_thick_border_rejected() {
        let mut profile = LayoutProfile::preview();
        profile.border_width = 40;
        assert!(profile.validate("profiles.preview").is_err());
    }
}
