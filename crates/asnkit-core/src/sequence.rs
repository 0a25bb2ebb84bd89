//! Archive serial number sequence
//!
//! Produces the text printed on each label: a literal prefix followed
//! by a fixed-width, zero-padded decimal number. Formatting is
//! "at least N digits" - a number wider than the padding simply
//! lengthens the text, it is never truncated.

use serde::{Deserialize, Serialize};

/// A run of consecutive label texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSequence {
    /// Literal prefix, e.g. "ASN". Must match the consumer's
    /// barcode prefix configuration on the paperless-ngx side.
    pub prefix: String,
    /// First number emitted
    pub start: u64,
    /// Minimum number of digits; shorter numbers are zero-padded
    pub leading_zeros: u32,
}

impl LabelSequence {
    pub fn new(prefix: impl Into<String>, start: u64, leading_zeros: u32) -> Self {
        Self {
            prefix: prefix.into(),
            start,
            leading_zeros,
        }
    }

    /// Format the text for one number.
    pub fn text_for(&self, number: u64) -> String {
        format!(
            "{}{:0width$}",
            self.prefix,
            number,
            width = self.leading_zeros as usize
        )
    }

    /// Iterator over `count` consecutive texts beginning at `start`.
    pub fn texts(&self, count: u32) -> impl Iterator<Item = String> + '_ {
        (self.start..self.start + count as u64).map(|n| self.text_for(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padding() {
        let seq = LabelSequence::new("ASN", 1, 7);
        assert_eq!(seq.text_for(1), "ASN0000001");
        assert_eq!(seq.text_for(42), "ASN0000042");
    }

    #[test]
    fn test_padding_never_truncates() {
        let seq = LabelSequence::new("ASN", 1, 5);
        assert_eq!(seq.text_for(123456), "ASN123456");
    }

    #[test]
    fn test_no_padding() {
        let seq = LabelSequence::new("DOC", 9, 0);
        assert_eq!(seq.text_for(9), "DOC9");
    }

    #[test]
    fn test_consecutive_texts() {
        let seq = LabelSequence::new("ASN", 998, 4);
        let texts: Vec<String> = seq.texts(3).collect();
        assert_eq!(texts, vec!["ASN0998", "ASN0999", "ASN1000"]);
    }
}
