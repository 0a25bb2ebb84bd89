//! Code 128 symbol generation
//!
//! Encodes label text as a Code 128 module pattern. The modules are
//! drawn as filled vector rectangles by the PDF writer, so this
//! module only produces the bit pattern.

use barcoders::sym::code128::Code128;

use crate::error::{RenderError, RenderResult};

/// Character-set selector required by the encoder; set B covers
/// mixed-case ASCII, which is what label prefixes use.
const CHARSET_B: char = '\u{0181}';

/// Encode `data` in Code 128 (character set B). Each returned element
/// is one module: 1 for a bar, 0 for a space.
pub fn code128_modules(data: &str) -> RenderResult<Vec<u8>> {
    let barcode = Code128::new(format!("{}{}", CHARSET_B, data))
        .map_err(|e| RenderError::Barcode(e.to_string()))?;
    Ok(barcode.encode())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modules_are_bits() {
        let modules = code128_modules("ASN0000001").unwrap();
        assert!(!modules.is_empty());
        assert!(modules.iter().all(|&m| m == 0 || m == 1));
        // A Code 128 symbol starts and ends with a bar.
        assert_eq!(modules[0], 1);
        assert_eq!(*modules.last().unwrap(), 1);
    }

    #[test]
    fn test_longer_data_longer_symbol() {
        let short = code128_modules("ASN1").unwrap();
        let long = code128_modules("ASN0000001").unwrap();
        assert!(long.len() > short.len());
    }
}
