use std::fmt;
use std::str::FromStr;

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::composition::layout::LayoutProfile;
use crate::error::ConfigError;

/// An opaque RGB color, written as `#RRGGBB` in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const WHITE: Color = Color([0xFF, 0xFF, 0xFF]);
    pub const BLACK: Color = Color([0x00, 0x00, 0x00]);
    pub const BRAND_RED: Color = Color([0xDA, 0x29, 0x1C]);
    pub const BRAND_BLUE: Color = Color([0x00, 0x53, 0x9F]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb(self.0)
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_digits = s.trim().trim_start_matches('#');
        let invalid = || ConfigError::InvalidValue {
            key: "color".to_string(),
            value: s.to_string(),
        };
        if hex_digits.len() != 6 {
            return Err(invalid());
        }
        let bytes = hex::decode(hex_digits).map_err(|_| invalid())?;
        Ok(Self([bytes[0], bytes[1], bytes[2]]))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode_upper(self.0))
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Width and height of a canvas in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(800, 800)
    }
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Everything the compositor needs for one creative
///
/// The request borrows the product image so the caller keeps ownership of
/// the original upload.
#[derive(Debug, Clone)]
pub struct CreativeRequest<'a> {
    pub product_image: &'a RgbImage,
    pub background_color: Color,
    pub headline: &'a str,
    pub subhead: &'a str,
    pub tag_line: &'a str,
    pub value_tile: &'a str,
    pub canvas_size: CanvasSize,
    pub profile: &'a LayoutProfile,
}

/// Where the product landed on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// A finished composited image
#[derive(Debug, Clone)]
pub struct Creative {
    image: RgbImage,
    product: Placement,
}

impl Creative {
    pub(crate) fn new(image: RgbImage, product: Placement) -> Self {
        Self { image, product }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width(), self.height())
    }

    /// Placement of the scaled product image
    pub fn product_placement(&self) -> Placement {
        self.product
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}
