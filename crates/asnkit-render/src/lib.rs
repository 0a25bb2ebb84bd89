//! # ASNKit Render
//!
//! Turns a computed [`asnkit_core::SheetPlan`] into a multi-page A4
//! PDF: one QR or Code 128 symbol plus human-readable text per label,
//! with an optional bounding rectangle for printer calibration.

pub mod barcode;
pub mod error;
pub mod pdf;
pub mod preview;
pub mod qr;

pub use error::{RenderError, RenderResult};
pub use pdf::{PdfRenderer, RenderOptions};
pub use preview::render_preview;
