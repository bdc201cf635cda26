//! # Export
//!
//! Encodes finished creatives for download.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use chrono::NaiveDate;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::composition::Creative;
use crate::error::{ExportError, Result};

pub const MIN_QUALITY: u8 = 50;
pub const MAX_QUALITY: u8 = 100;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Jpeg,
    Png,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jpeg => f.write_str("JPEG"),
            Self::Png => f.write_str("PNG"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            other => Err(format!("unsupported export format: {}", other)),
        }
    }
}

/// Format and quality chosen for one export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    pub format: ExportFormat,

    /// JPEG quality, 50-100. Ignored for PNG.
    pub quality: u8,
}

impl ExportSettings {
    pub fn new(format: ExportFormat, quality: u8) -> Self {
        Self { format, quality }
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&self.quality) {
            return Err(ExportError::QualityOutOfRange { quality: self.quality }.into());
        }
        Ok(())
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::new(ExportFormat::Jpeg, 85)
    }
}

/// Encoded bytes ready to be written or downloaded
#[derive(Debug, Clone)]
pub struct EncodedCreative {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
}

impl EncodedCreative {
    pub fn size_kb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0
    }

    /// Whether the file fits under a delivery size limit
    pub fn within_limit(&self, limit_kb: u64) -> bool {
        self.size_kb() < limit_kb as f64
    }

    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Encode a creative with the given settings
pub fn encode(creative: &Creative, settings: ExportSettings) -> Result<EncodedCreative> {
    settings.validate()?;

    let mut buf = Cursor::new(Vec::new());
    let failed = |e: image::ImageError| ExportError::EncodingFailed {
        format: settings.format.to_string(),
        reason: e.to_string(),
    };

    match settings.format {
        ExportFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, settings.quality);
            creative.as_image().write_with_encoder(encoder).map_err(failed)?;
        }
        ExportFormat::Png => {
            let encoder = PngEncoder::new_with_quality(&mut buf, CompressionType::Best, PngFilter::Adaptive);
            creative.as_image().write_with_encoder(encoder).map_err(failed)?;
        }
    }

    let bytes = buf.into_inner();
    debug!("Encoded {} creative: {} bytes", settings.format, bytes.len());

    Ok(EncodedCreative { bytes, format: settings.format })
}

/// Default download name for a creative made on `date`
pub fn default_file_stem(date: NaiveDate) -> String {
    format!("tesco_creative_{}", date.format("%Y%m%d"))
}
