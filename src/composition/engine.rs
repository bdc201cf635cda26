use image::imageops::{self, FilterType};
use image::RgbImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use crate::composition::layout::{fit_within, TileRect};
use crate::composition::text::Typeface;
use crate::composition::types::{Color, Creative, CreativeRequest, Placement};
use crate::config::{Config, PaletteConfig};

/// Lays out a product image, value tile and promotional copy on a canvas
///
/// The compositor holds only read-only data: the resolved font face and the
/// text palette. Every call to [`compose`](Self::compose) allocates its own
/// canvas, so one compositor can serve any number of requests.
///
/// Drawing order:
/// 1. Background fill
/// 2. Product image, shrunk to the profile bound and centered
/// 3. Value tile with its label
/// 4. Headline, subhead and tag line
#[derive(Debug, Clone)]
pub struct Compositor {
    typeface: Typeface,
    palette: PaletteConfig,
}

impl Compositor {
    pub fn new(typeface: Typeface, palette: PaletteConfig) -> Self {
        Self { typeface, palette }
    }

    /// Build a compositor from configuration, resolving the font chain once
    pub fn from_config(config: &Config) -> Self {
        Self::new(Typeface::resolve(&config.fonts.candidates), config.palette.clone())
    }

    pub fn typeface(&self) -> &Typeface {
        &self.typeface
    }

    /// Produce a new creative for `request`
    pub fn compose(&self, request: &CreativeRequest<'_>) -> Creative {
        let canvas_size = request.canvas_size;
        let profile = request.profile;

        debug!(
            "Composing {} creative on {} canvas, background {}",
            profile.name, canvas_size, request.background_color
        );

        let mut canvas = RgbImage::from_pixel(
            canvas_size.width,
            canvas_size.height,
            request.background_color.to_rgb(),
        );

        let product = self.place_product(&mut canvas, request.product_image, profile.max_product);
        debug!(
            "Product {}x{} placed at ({}, {})",
            product.width, product.height, product.x, product.y
        );

        self.draw_value_tile(&mut canvas, profile.value_tile, profile.border_width, request.value_tile, profile.font_size);

        let center_x = (canvas_size.width / 2) as i32;
        let lines = [
            (request.headline, profile.headline_y, self.palette.headline),
            (request.subhead, profile.subhead_y, self.palette.subhead),
            (request.tag_line, profile.tag_y, self.palette.tag_line),
        ];
        for (text, y, color) in lines {
            self.typeface
                .draw_centered(&mut canvas, text, profile.font_size, (center_x, y as i32), color);
        }

        Creative::new(canvas, product)
    }

    /// Shrink the product to the bound and paste it over the canvas center
    fn place_product(&self, canvas: &mut RgbImage, product: &RgbImage, bound: (u32, u32)) -> Placement {
        let (width, height) = fit_within(product.width(), product.height(), bound);

        let x = (canvas.width() as i64 - width as i64).div_euclid(2);
        let y = (canvas.height() as i64 - height as i64).div_euclid(2);

        if (width, height) == product.dimensions() {
            imageops::replace(canvas, product, x, y);
        } else {
            let scaled = imageops::resize(product, width, height, FilterType::Lanczos3);
            imageops::replace(canvas, &scaled, x, y);
        }

        Placement { x, y, width, height }
    }

    fn draw_value_tile(&self, canvas: &mut RgbImage, tile: TileRect, border: u32, label: &str, font_size: f32) {
        fill_rect(canvas, tile, self.palette.tile_outline);

        let inner = TileRect::new(
            tile.left + border,
            tile.top + border,
            tile.right.saturating_sub(border),
            tile.bottom.saturating_sub(border),
        );
        fill_rect(canvas, inner, self.palette.tile_fill);

        self.typeface
            .draw_centered(canvas, label, font_size, tile.center(), self.palette.tile_text);
    }
}

fn fill_rect(canvas: &mut RgbImage, rect: TileRect, color: Color) {
    if rect.is_empty() {
        return;
    }
    let area = Rect::at(rect.left as i32, rect.top as i32).of_size(rect.width(), rect.height());
    draw_filled_rect_mut(canvas, area, color.to_rgb());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::layout::LayoutProfile;
    use crate::composition::types::CanvasSize;
    use image::Rgb;

    const BACKGROUND: Color = Color::rgb(0xFF, 0xEB, 0xEE);
    const PRODUCT: Rgb<u8> = Rgb([10, 200, 30]);

    fn builtin_compositor() -> Compositor {
        Compositor::new(Typeface::Builtin, PaletteConfig::default())
    }

    fn request<'a>(
        product: &'a RgbImage,
        profile: &'a LayoutProfile,
        texts: [&'a str; 4],
    ) -> CreativeRequest<'a> {
        CreativeRequest {
            product_image: product,
            background_color: BACKGROUND,
            headline: texts[0],
            subhead: texts[1],
            tag_line: texts[2],
            value_tile: texts[3],
            canvas_size: CanvasSize::default(),
            profile,
        }
    }

    fn photo(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 3 % 256) as u8, ((x ^ y) % 256) as u8])
        })
    }

    /// Look for `color` on row `y`, right of the value tile
    fn row_has(img: &RgbImage, y: u32, color: Color) -> bool {
        (260..img.width()).any(|x| *img.get_pixel(x, y) == color.to_rgb())
    }

    #[test]
    fn test_landscape_product_is_scaled_and_centered() {
        let product = RgbImage::from_pixel(1200, 900, PRODUCT);
        let profile = LayoutProfile::final_render();
        let creative = builtin_compositor().compose(&request(&product, &profile, ["", "", "", ""]));

        assert_eq!((creative.width(), creative.height()), (800, 800));
        assert_eq!(
            creative.product_placement(),
            Placement { x: 200, y: 250, width: 400, height: 300 }
        );

        let img = creative.as_image();
        assert_eq!(*img.get_pixel(400, 400), PRODUCT);
        assert_eq!(*img.get_pixel(200, 250), PRODUCT);
        assert_eq!(*img.get_pixel(599, 549), PRODUCT);
        assert_eq!(*img.get_pixel(199, 400), BACKGROUND.to_rgb());
        assert_eq!(*img.get_pixel(400, 249), BACKGROUND.to_rgb());
        assert_eq!(*img.get_pixel(600, 400), BACKGROUND.to_rgb());
        assert_eq!(*img.get_pixel(400, 550), BACKGROUND.to_rgb());
    }

    #[test]
    fn test_preview_profile_uses_smaller_bound() {
        let product = photo(1200, 900);
        let profile = LayoutProfile::preview();
        let creative = builtin_compositor().compose(&request(&product, &profile, ["", "", "", ""]));

        assert_eq!(
            creative.product_placement(),
            Placement { x: 250, y: 287, width: 300, height: 225 }
        );
    }

    #[test]
    fn test_small_product_is_not_upscaled() {
        let product = photo(120, 75);
        let profile = LayoutProfile::final_render();
        let creative = builtin_compositor().compose(&request(&product, &profile, ["", "", "", ""]));

        let placed = creative.product_placement();
        assert_eq!((placed.width, placed.height), (120, 75));
        assert_eq!((placed.x, placed.y), (340, 362));
        // pasted byte-for-byte
        for (x, y, p) in product.enumerate_pixels() {
            assert_eq!(creative.as_image().get_pixel(x + 340, y + 362), p);
        }
    }

    #[test]
    fn test_output_size_is_canvas_size_for_any_product() {
        let compositor = builtin_compositor();
        let profile = LayoutProfile::final_render();
        for &(w, h) in &[(1, 1), (3000, 40), (40, 3000), (800, 800), (401, 399)] {
            let product = photo(w, h);
            let creative = compositor.compose(&request(&product, &profile, ["A", "B", "C", "D"]));
            assert_eq!(creative.size(), CanvasSize::new(800, 800));

            let placed = creative.product_placement();
            assert!(placed.width <= 400 && placed.height <= 400);
            assert!((((800 - placed.width as i64) / 2) - placed.x).abs() <= 1);
            assert!((((800 - placed.height as i64) / 2) - placed.y).abs() <= 1);
        }
    }

    #[test]
    fn test_non_square_canvas() {
        let product = photo(1000, 1000);
        let profile = LayoutProfile::final_render().fit_to(CanvasSize::new(970, 250));
        let mut req = request(&product, &profile, ["Headline", "Sub", "Tag", "New"]);
        req.canvas_size = CanvasSize::new(970, 250);

        let creative = builtin_compositor().compose(&req);
        assert_eq!(creative.size(), CanvasSize::new(970, 250));
        assert!(creative.product_placement().height <= 250);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let product = photo(640, 480);
        let profile = LayoutProfile::final_render();
        let texts = ["SUMMER SALE - 50% OFF", "Clubcard members save even more", "Available at Tesco", "Clubcard Price"];
        let compositor = builtin_compositor();

        let first = compositor.compose(&request(&product, &profile, texts));
        let second = compositor.compose(&request(&product, &profile, texts));
        assert_eq!(first.as_image().as_raw(), second.as_image().as_raw());
    }

    #[test]
    fn test_value_tile_is_drawn_with_border() {
        let product = photo(100, 100);
        let profile = LayoutProfile::final_render();
        let creative = builtin_compositor().compose(&request(&product, &profile, ["", "", "", ""]));
        let img = creative.as_image();
        let palette = PaletteConfig::default();

        assert_eq!(*img.get_pixel(50, 50), palette.tile_outline.to_rgb());
        assert_eq!(*img.get_pixel(51, 90), palette.tile_outline.to_rgb());
        assert_eq!(*img.get_pixel(250, 130), palette.tile_outline.to_rgb());
        assert_eq!(*img.get_pixel(52, 52), palette.tile_fill.to_rgb());
        assert_eq!(*img.get_pixel(248, 128), palette.tile_fill.to_rgb());
        assert_eq!(*img.get_pixel(251, 90), BACKGROUND.to_rgb());
        assert_eq!(*img.get_pixel(49, 90), BACKGROUND.to_rgb());
    }

    #[test]
    fn test_text_lines_use_brand_colors_at_their_offsets() {
        let product = photo(100, 100);
        let profile = LayoutProfile::final_render();
        let creative = builtin_compositor().compose(&request(
            &product,
            &profile,
            ["HEADLINE", "SUBHEAD", "TAG", "PRICE"],
        ));
        let img = creative.as_image();
        let palette = PaletteConfig::default();

        assert!((88..112).any(|y| row_has(img, y, palette.headline)));
        assert!((138..162).any(|y| row_has(img, y, palette.subhead)));
        assert!((688..712).any(|y| row_has(img, y, palette.tag_line)));
        assert!((78..102).any(|y| (50..=250).any(|x| *img.get_pixel(x, y) == palette.tile_text.to_rgb())));
    }

    #[test]
    fn test_empty_strings_leave_only_background_tile_and_product() {
        let product = RgbImage::from_pixel(100, 100, PRODUCT);
        let profile = LayoutProfile::final_render();
        let creative = builtin_compositor().compose(&request(&product, &profile, ["", "", "", ""]));
        let palette = PaletteConfig::default();

        for p in creative.as_image().pixels() {
            assert!(
                *p == BACKGROUND.to_rgb()
                    || *p == PRODUCT
                    || *p == palette.tile_fill.to_rgb()
                    || *p == palette.tile_outline.to_rgb(),
                "unexpected pixel {:?}",
                p
            );
        }
    }

    #[test]
    fn test_missing_font_still_renders_text() {
        let config = {
            let mut config = Config::default();
            config.fonts.candidates = vec!["/nope/arial.ttf".into()];
            config
        };
        let compositor = Compositor::from_config(&config);
        assert!(compositor.typeface().is_builtin());

        let product = photo(100, 100);
        let profile = LayoutProfile::final_render();
        let creative = compositor.compose(&request(&product, &profile, ["SALE", "", "", ""]));
        assert!((88..112).any(|y| row_has(creative.as_image(), y, config.palette.headline)));
    }

    #[test]
    fn test_headline_is_centered_with_outline_font() {
        let compositor = Compositor::from_config(&Config::default());
        if compositor.typeface().is_builtin() {
            eprintln!("no system font found, skipping");
            return;
        }

        let product = RgbImage::from_pixel(100, 100, PRODUCT);
        let profile = LayoutProfile::final_render();
        let creative = compositor.compose(&request(&product, &profile, ["SUMMER SALE", "", "", ""]));
        let img = creative.as_image();

        // only the headline is drawn right of the tile and above the product
        let (mut top, mut bottom, mut left, mut right) = (u32::MAX, 0, u32::MAX, 0);
        for y in 0..300 {
            for x in 260..800 {
                if *img.get_pixel(x, y) != BACKGROUND.to_rgb() {
                    top = top.min(y);
                    bottom = bottom.max(y);
                    left = left.min(x);
                    right = right.max(x);
                }
            }
        }
        assert!(top <= bottom, "headline not drawn");

        let cy = (top + bottom) as f32 / 2.0;
        let cx = (left + right) as f32 / 2.0;
        assert!((cy - profile.headline_y as f32).abs() <= 2.0, "headline centered at y {}", cy);
        assert!((cx - 400.0).abs() <= 2.0, "headline centered at x {}", cx);
    }

    #[test]
    fn test_inverted_value_tile_is_skipped() {
        let product = RgbImage::from_pixel(100, 100, PRODUCT);
        let mut profile = LayoutProfile::final_render();
        profile.value_tile = TileRect::new(250, 130, 50, 50);
        let creative = builtin_compositor().compose(&request(&product, &profile, ["", "", "", ""]));

        let img = creative.as_image();
        assert_eq!(*img.get_pixel(150, 90), BACKGROUND.to_rgb());
        assert_eq!(*img.get_pixel(250, 130), BACKGROUND.to_rgb());
    }

    #[test]
    fn test_compose_does_not_touch_product() {
        let product = photo(900, 600);
        let before = product.clone();
        let profile = LayoutProfile::final_render();
        builtin_compositor().compose(&request(&product, &profile, ["A", "B", "C", "D"]));
        assert_eq!(product, before);
    }
}
