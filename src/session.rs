//! # Session
//!
//! The in-progress edit of one user. The shell owns a [`SessionState`] and
//! passes it the compositor; the compositor itself never sees the session.

use std::time::Duration;

use image::imageops::{self, FilterType};
use image::RgbImage;
use tracing::{debug, info};

use crate::assistant::{self, ComplianceAuditor, ComplianceReport};
use crate::composition::{fit_within, CanvasSize, Color, Compositor, Creative, CreativeRequest, LayoutProfile};
use crate::error::{Result, SessionError};
use crate::export::{self, EncodedCreative, ExportSettings};
use crate::templates::TemplateRegistry;

pub const DEFAULT_HEADLINE: &str = "SUMMER SALE - 50% OFF";
pub const DEFAULT_SUBHEAD: &str = "Clubcard members save even more";
pub const DEFAULT_TAG_LINE: &str = "Available at Tesco";
pub const DEFAULT_VALUE_TILE: &str = "Clubcard Price";

/// Bound used by the "resize product" tool
pub const RESIZE_TOOL_BOUND: (u32, u32) = (300, 300);

#[derive(Debug, Clone)]
pub struct SessionState {
    product_image: Option<RgbImage>,

    pub background_color: Color,

    /// Slug of the template the background came from, if any
    pub template: Option<String>,

    pub headline: String,
    pub subhead: String,
    pub tag_line: String,
    pub value_tile: String,

    pub canvas_size: CanvasSize,

    current_creative: Option<Creative>,
    compliance: Option<ComplianceReport>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            product_image: None,
            background_color: Color::WHITE,
            template: None,
            headline: DEFAULT_HEADLINE.to_string(),
            subhead: DEFAULT_SUBHEAD.to_string(),
            tag_line: DEFAULT_TAG_LINE.to_string(),
            value_tile: DEFAULT_VALUE_TILE.to_string(),
            canvas_size: CanvasSize::default(),
            current_creative: None,
            compliance: None,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_product(&mut self, image: RgbImage) {
        info!("Product image set: {}x{}", image.width(), image.height());
        self.product_image = Some(image);
    }

    pub fn product(&self) -> Option<&RgbImage> {
        self.product_image.as_ref()
    }

    /// Use a template's background color
    pub fn select_template(&mut self, registry: &TemplateRegistry, slug: &str) -> Result<()> {
        let template = registry
            .get_template(slug)
            .ok_or_else(|| SessionError::UnknownTemplate { name: slug.to_string() })?;

        info!("Selected template: {}", template.label);
        self.background_color = template.background;
        self.template = Some(template.slug.clone());
        Ok(())
    }

    /// Pick a background color directly, detaching from any template
    pub fn set_background(&mut self, color: Color) {
        self.background_color = color;
        self.template = None;
    }

    /// Shrink the stored product image in place
    pub fn resize_product(&mut self, bound: (u32, u32)) -> Result<()> {
        let product = self.product_image.as_mut().ok_or(SessionError::NoProductImage)?;
        let (width, height) = fit_within(product.width(), product.height(), bound);
        if (width, height) != product.dimensions() {
            *product = imageops::resize(&*product, width, height, FilterType::Lanczos3);
            debug!("Product resized to {}x{}", width, height);
        }
        Ok(())
    }

    /// Rotate the stored product a quarter turn counter-clockwise
    pub fn rotate_product(&mut self) -> Result<()> {
        let product = self.product_image.as_mut().ok_or(SessionError::NoProductImage)?;
        *product = imageops::rotate270(&*product);
        Ok(())
    }

    /// Placeholder background removal
    pub fn remove_background(&mut self, latency: Duration) -> Result<()> {
        let product = self.product_image.take().ok_or(SessionError::NoProductImage)?;
        self.product_image = Some(assistant::remove_background(product, latency));
        Ok(())
    }

    fn request<'a>(&'a self, profile: &'a LayoutProfile) -> Result<CreativeRequest<'a>> {
        let product_image = self.product_image.as_ref().ok_or(SessionError::NoProductImage)?;

        Ok(CreativeRequest {
            product_image,
            background_color: self.background_color,
            headline: &self.headline,
            subhead: &self.subhead,
            tag_line: &self.tag_line,
            value_tile: &self.value_tile,
            canvas_size: self.canvas_size,
            profile,
        })
    }

    /// Render the creative with the full-size profile and keep it
    pub fn generate(
        &mut self,
        compositor: &Compositor,
        profile: &LayoutProfile,
        auditor: &mut ComplianceAuditor,
    ) -> Result<&Creative> {
        let fitted = profile.fit_to(self.canvas_size);
        let creative = compositor.compose(&self.request(&fitted)?);
        info!("Creative generated ({})", creative.size());

        self.compliance = Some(auditor.audit());
        Ok(self.current_creative.insert(creative))
    }

    /// Render a preview of the current edits
    ///
    /// Only available once a creative has been generated; the preview does
    /// not replace it.
    pub fn preview(&self, compositor: &Compositor, profile: &LayoutProfile) -> Result<Creative> {
        if self.current_creative.is_none() {
            return Err(SessionError::NoCreative.into());
        }

        let fitted = profile.fit_to(self.canvas_size);
        Ok(compositor.compose(&self.request(&fitted)?))
    }

    pub fn current_creative(&self) -> Option<&Creative> {
        self.current_creative.as_ref()
    }

    /// Placeholder compliance report from the last generation
    pub fn compliance(&self) -> Option<&ComplianceReport> {
        self.compliance.as_ref()
    }

    pub fn export(&self, settings: ExportSettings) -> Result<EncodedCreative> {
        let creative = self.current_creative.as_ref().ok_or(SessionError::NoCreative)?;
        export::encode(creative, settings)
    }

    /// Forget everything and start over
    pub fn reset(&mut self) {
        info!("Session reset");
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Typeface;
    use crate::config::PaletteConfig;
    use crate::error::CompositorError;
    use crate::export::ExportFormat;

    fn compositor() -> Compositor {
        Compositor::new(Typeface::Builtin, PaletteConfig::default())
    }

    fn auditor() -> ComplianceAuditor {
        ComplianceAuditor::with_seed(1, Duration::ZERO)
    }

    fn product(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| image::Rgb([x as u8, y as u8, 128]))
    }

    #[test]
    fn test_generate_without_product() {
        let mut session = SessionState::new();
        let err = session
            .generate(&compositor(), &LayoutProfile::final_render(), &mut auditor())
            .unwrap_err();
        assert!(matches!(err, CompositorError::Session(SessionError::NoProductImage)));
        assert!(session.current_creative().is_none());
    }

    #[test]
    fn test_preview_requires_generated_creative() {
        let mut session = SessionState::new();
        session.set_product(product(50, 50));

        let err = session.preview(&compositor(), &LayoutProfile::preview()).unwrap_err();
        assert!(matches!(err, CompositorError::Session(SessionError::NoCreative)));
    }

    #[test]
    fn test_generate_then_preview_and_export() {
        let registry = TemplateRegistry::new();
        let mut session = SessionState::new();
        session.set_product(product(1200, 900));
        session.select_template(&registry, "seasonal-offer").unwrap();

        let compositor = compositor();
        let creative = session
            .generate(&compositor, &LayoutProfile::final_render(), &mut auditor())
            .unwrap();
        assert_eq!(creative.product_placement().width, 400);
        assert_eq!(*creative.as_image().get_pixel(5, 5), Color::rgb(0xE8, 0xF5, 0xE9).to_rgb());

        let score = session.compliance().unwrap().score;
        assert!((85..=95).contains(&score));

        session.headline = "NEW HEADLINE".to_string();
        let preview = session.preview(&compositor, &LayoutProfile::preview()).unwrap();
        assert_eq!(preview.product_placement().width, 300);
        // preview leaves the generated creative alone
        assert_eq!(session.current_creative().unwrap().product_placement().width, 400);

        let encoded = session.export(ExportSettings::new(ExportFormat::Png, 85)).unwrap();
        assert!(!encoded.bytes.is_empty());
    }

    #[test]
    fn test_generate_keeps_original_product() {
        let mut session = SessionState::new();
        session.set_product(product(1200, 900));
        session
            .generate(&compositor(), &LayoutProfile::final_render(), &mut auditor())
            .unwrap();
        assert_eq!(session.product().unwrap().dimensions(), (1200, 900));
    }

    #[test]
    fn test_export_requires_creative() {
        let session = SessionState::new();
        assert!(session.export(ExportSettings::default()).is_err());
    }

    #[test]
    fn test_unknown_template() {
        let mut session = SessionState::new();
        let err = session
            .select_template(&TemplateRegistry::new(), "halloween")
            .unwrap_err();
        assert!(err.user_message().contains("halloween"));
        assert_eq!(session.background_color, Color::WHITE);
    }

    #[test]
    fn test_set_background_detaches_template() {
        let mut session = SessionState::new();
        session.select_template(&TemplateRegistry::new(), "new-product").unwrap();
        session.set_background(Color::BLACK);
        assert!(session.template.is_none());
        assert_eq!(session.background_color, Color::BLACK);
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let mut session = SessionState::new();
        session.set_product(product(40, 10));
        let top_left = *session.product().unwrap().get_pixel(0, 0);

        session.rotate_product().unwrap();
        let rotated = session.product().unwrap();
        assert_eq!(rotated.dimensions(), (10, 40));
        // counter-clockwise: the old top-left corner ends up bottom-left
        assert_eq!(*rotated.get_pixel(0, 39), top_left);
    }

    #[test]
    fn test_resize_tool() {
        let mut session = SessionState::new();
        session.set_product(product(900, 600));
        session.resize_product(RESIZE_TOOL_BOUND).unwrap();
        assert_eq!(session.product().unwrap().dimensions(), (300, 200));

        session.resize_product(RESIZE_TOOL_BOUND).unwrap();
        assert_eq!(session.product().unwrap().dimensions(), (300, 200));
    }

    #[test]
    fn test_tools_require_product() {
        let mut session = SessionState::new();
        assert!(session.rotate_product().is_err());
        assert!(session.resize_product(RESIZE_TOOL_BOUND).is_err());
        assert!(session.remove_background(Duration::ZERO).is_err());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut session = SessionState::new();
        session.set_product(product(10, 10));
        session.headline = "changed".to_string();
        session.set_background(Color::BLACK);
        session
            .generate(&compositor(), &LayoutProfile::final_render(), &mut auditor())
            .unwrap();

        session.reset();
        assert!(session.product().is_none());
        assert!(session.current_creative().is_none());
        assert!(session.compliance().is_none());
        assert_eq!(session.headline, DEFAULT_HEADLINE);
        assert_eq!(session.background_color, Color::WHITE);
    }

    #[test]
    fn test_non_square_canvas_fits_profile() {
        let mut session = SessionState::new();
        session.set_product(product(1000, 1000));
        session.canvas_size = CanvasSize::new(970, 250);
        let creative = session
            .generate(&compositor(), &LayoutProfile::final_render(), &mut auditor())
            .unwrap();
        assert_eq!(creative.size(), CanvasSize::new(970, 250));
        assert!(creative.product_placement().height <= 250);
    }
}
