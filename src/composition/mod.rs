//! # Composition Module
//!
//! The creative compositor and everything it draws with: layout profiles,
//! font resolution and the request/response types.

pub mod engine;
pub mod layout;
pub mod text;
pub mod types;

pub use engine::Compositor;
pub use layout::{fit_within, LayoutProfile, TileRect, REFERENCE_CANVAS};
pub use text::Typeface;
pub use types::{CanvasSize, Color, Creative, CreativeRequest, Placement};
