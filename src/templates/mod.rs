//! # Templates
//!
//! Built-in creative presets and the catalogues the shell offers for the
//! value tile, the retailer tag line and the canvas format.
//!
//! ## Built-in Templates
//!
//! - **Promotional Sale**: soft red background
//! - **New Product**: soft blue background
//! - **Seasonal Offer**: soft green background
//! - **Clubcard Exclusive**: soft orange background
//!
//! ## Usage
//!
//! ```rust
//! use creative_compositor::templates::TemplateRegistry;
//!
//! let registry = TemplateRegistry::new();
//! let template = registry.get_template("new-product").unwrap();
//! assert_eq!(template.background.to_string(), "#E3F2FD");
//! ```

pub mod catalog;
pub mod registry;

pub use catalog::{FormatPreset, FORMAT_PRESETS, TAG_LINES, VALUE_TILES};
pub use registry::{Template, TemplateRegistry};
