//! QR symbol generation

use image::{DynamicImage, Luma};
use qrcode::{EcLevel, QrCode};

use crate::error::{RenderError, RenderResult};

/// Render `data` as a QR symbol bitmap (error correction level M,
/// black on white, with the standard quiet zone). The physical size
/// is decided later, when the bitmap is embedded at a computed DPI.
pub fn qr_image(data: &str) -> RenderResult<DynamicImage> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)
        .map_err(|e| RenderError::Qr(e.to_string()))?;
    let image = code.render::<Luma<u8>>().build();
    Ok(DynamicImage::ImageLuma8(image))
}
