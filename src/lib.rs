//! # Creative Compositor
//!
//! Composite a product photo, an offer badge and promotional copy into a
//! retail media banner, then export it as JPEG or PNG.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use creative_compositor::{
//!     composition::{CanvasSize, Compositor, CreativeRequest, LayoutProfile},
//!     config::Config,
//!     export::{self, ExportFormat, ExportSettings},
//!     input,
//!     templates::TemplateRegistry,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let compositor = Compositor::from_config(&config);
//! let product = input::load_product("product.jpg")?;
//! let registry = TemplateRegistry::new();
//! let background = registry.get_template("promotional-sale").unwrap().background;
//!
//! let creative = compositor.compose(&CreativeRequest {
//!     product_image: &product,
//!     background_color: background,
//!     headline: "SUMMER SALE - 50% OFF",
//!     subhead: "Clubcard members save even more",
//!     tag_line: "Available at Tesco",
//!     value_tile: "Clubcard Price",
//!     canvas_size: CanvasSize::default(),
//!     profile: &LayoutProfile::final_render(),
//! });
//!
//! let encoded = export::encode(&creative, ExportSettings::new(ExportFormat::Jpeg, 85))?;
//! std::fs::write("creative.jpg", &encoded.bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`composition`] - The compositor, layout profiles and text rendering
//! - [`templates`] - Background presets and copy catalogues
//! - [`input`] - Product image decoding
//! - [`export`] - JPEG / PNG encoding
//! - [`session`] - Caller-owned state of an in-progress edit
//! - [`assistant`] - Non-functional placeholders for the assistant actions
//! - [`config`] - Configuration management

pub mod assistant;
pub mod composition;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod session;
pub mod templates;

// Re-export commonly used types for convenience
pub use crate::{
    composition::{Compositor, Creative, CreativeRequest, LayoutProfile},
    config::Config,
    error::{CompositorError, Result},
    session::SessionState,
    templates::TemplateRegistry,
};
