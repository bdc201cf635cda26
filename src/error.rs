use thiserror::Error;

/// Main error type for the Creative Compositor library
#[derive(Error, Debug)]
pub enum CompositorError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning uploaded bytes into a product image
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read product image: {path}")]
    ReadFailed { path: String },

    #[error("Failed to decode product image: {source}")]
    Decode {
        #[source]
        source: image::ImageError,
    },
}

/// Font lookup failures
///
/// These never leave the text module: the renderer logs them and falls back
/// to the built-in face.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("Font file not found: {path}")]
    NotFound { path: String },

    #[error("Font file is not a usable font: {path} - {reason}")]
    Invalid { path: String, reason: String },
}

/// Encoding errors for finished creatives
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode {format}: {reason}")]
    EncodingFailed { format: String, reason: String },

    #[error("Export quality {quality} is outside 50-100")]
    QualityOutOfRange { quality: u8 },
}

/// Precondition failures in the interactive session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No product image has been uploaded")]
    NoProductImage,

    #[error("No creative has been generated yet")]
    NoCreative,

    #[error("Template not found: {name}")]
    UnknownTemplate { name: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using CompositorError
pub type Result<T> = std::result::Result<T, CompositorError>;

impl CompositorError {
    /// Whether the session can carry on after this error
    ///
    /// Everything the user can fix by picking another file or pressing
    /// another button is recoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Input(_) | Self::Session(_) => true,
            Self::Export(ExportError::QualityOutOfRange { .. }) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(InputError::Decode { source }) => {
                format!("Could not read the uploaded image ({}). Please upload a JPEG or PNG file.", source)
            }
            Self::Input(InputError::ReadFailed { path }) => {
                format!("Could not open '{}'. Please check the file exists.", path)
            }
            Self::Session(SessionError::NoProductImage) => {
                "Please upload a product image first!".to_string()
            }
            Self::Session(SessionError::NoCreative) => {
                "Generate a creative first.".to_string()
            }
            Self::Session(SessionError::UnknownTemplate { name }) => {
                format!(
                    "Template '{}' not found. Available templates: promotional-sale, new-product, seasonal-offer, clubcard-exclusive",
                    name
                )
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_errors_are_recoverable() {
        let err: CompositorError = SessionError::NoProductImage.into();
        assert!(err.is_recoverable());
        assert_eq!(err.user_message(), "Please upload a product image first!");
    }

    #[test]
    fn test_io_errors_are_not_recoverable() {
        let err: CompositorError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, CompositorError::Io(_)));
        assert!(!err.is_recoverable());
        assert_eq!(err.user_message(), "IO error: denied");
    }

    #[test]
    fn test_config_errors_are_not_recoverable() {
        let err: CompositorError = ConfigError::FileNotFound { path: "x.toml".to_string() }.into();
        assert!(!err.is_recoverable());
        assert!(err.user_message().contains("x.toml"));
    }
}
