use crate::composition::CanvasSize;

/// Offer badges the value tile may carry
pub const VALUE_TILES: [&str; 4] = ["Clubcard Price", "Price Lock", "New", "Reduced"];

/// Retailer tag lines shown at the bottom of the creative
pub const TAG_LINES: [&str; 3] = ["Available at Tesco", "Only at Tesco", "Clubcard/app required"];

/// A named canvas size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatPreset {
    pub slug: &'static str,
    pub label: &'static str,
    pub size: CanvasSize,
}

pub const FORMAT_PRESETS: [FormatPreset; 5] = [
    FormatPreset { slug: "square", label: "Square (800x800)", size: CanvasSize::new(800, 800) },
    FormatPreset { slug: "instagram-square", label: "Instagram Square (1080x1080)", size: CanvasSize::new(1080, 1080) },
    FormatPreset { slug: "instagram-story", label: "Instagram Story (1080x1920)", size: CanvasSize::new(1080, 1920) },
    FormatPreset { slug: "facebook-post", label: "Facebook Post (1200x630)", size: CanvasSize::new(1200, 630) },
    FormatPreset { slug: "display-banner", label: "Display Banner (970x250)", size: CanvasSize::new(970, 250) },
];

impl FormatPreset {
    pub fn find(slug: &str) -> Option<FormatPreset> {
        FORMAT_PRESETS.iter().copied().find(|f| f.slug == slug)
    }
}
