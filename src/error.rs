//! Error types for resume export.

use std::io;
use thiserror::Error;

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Message shown to the user when an export fails without a more specific cause.
pub const GENERIC_FAILURE: &str = "Failed to generate PDF. Please try again.";

/// Error types that can occur while exporting a resume.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Another export is already running on this exporter.
    #[error("A PDF export is already in progress")]
    Busy,

    /// The generated markup has no element carrying the content anchor id.
    #[error("Content element not found: #{0}")]
    MissingRenderTarget(String),

    /// The rendered content has no area to capture.
    #[error("Rendered content is empty ({width}x{height}px)")]
    EmptyDocument { width: u32, height: u32 },

    /// The rasterizer failed to capture the document.
    #[error("Rasterization failed: {0}")]
    Rasterization(String),

    /// A page image could not be encoded.
    #[error("Image encoding failed: {0}")]
    Encoding(String),

    /// The PDF could not be assembled.
    #[error("PDF serialization failed: {0}")]
    Serialization(String),

    /// Export settings are inconsistent.
    #[error("Invalid export configuration: {0}")]
    InvalidConfig(String),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The resume JSON could not be parsed.
    #[error("Invalid resume data: {0}")]
    Resume(#[from] serde_json::Error),
}

impl ExportError {
    /// Text suitable for a transient user notification.
    pub fn user_message(&self) -> String {
        match self {
            ExportError::Busy => self.to_string(),
            ExportError::MissingRenderTarget(_) => "Content element not found".to_string(),
            ExportError::InvalidConfig(_) | ExportError::Resume(_) => self.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        ExportError::Encoding(err.to_string())
    }
}
