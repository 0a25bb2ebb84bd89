//! Error types for the render crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while producing the output document.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The PDF library rejected an operation.
    #[error("Failed to write PDF: {0}")]
    Pdf(String),

    /// QR symbol generation failed (data too long for the symbology).
    #[error("Failed to generate QR code: {0}")]
    Qr(String),

    /// Code 128 symbol generation failed (unencodable characters).
    #[error("Failed to generate barcode: {0}")]
    Barcode(String),

    /// I/O error writing the output file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
