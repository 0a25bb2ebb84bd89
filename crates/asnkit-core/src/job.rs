//! Label generation job parameters
//!
//! A [`LabelJob`] bundles the validated primitive inputs for one
//! generation run. The placement core has no opinion on how these
//! are collected (CLI flags, config file); it only requires them as
//! typed, range-checked values.

use crate::error::{Error, Result};
use crate::sheet::SheetLayout;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scannable code variant printed on each label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    /// 2D matrix code
    Qr,
    /// 1D linear code (Code 128)
    Code128,
}

impl Default for CodeKind {
    fn default() -> Self {
        Self::Qr
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Qr => write!(f, "QR"),
            Self::Code128 => write!(f, "CODE128"),
        }
    }
}

impl FromStr for CodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "QR" => Ok(Self::Qr),
            "CODE128" | "C128" => Ok(Self::Code128),
            _ => Err(Error::invalid_field(
                "kind",
                format!("unknown code kind: {}", s),
            )),
        }
    }
}

/// How the user expressed the amount to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    /// An exact number of labels
    Labels(u32),
    /// Whole A4 sheets, each holding `labels_per_page` labels
    Pages(u32),
}

impl Quantity {
    /// Resolve to a label count for the given layout.
    pub fn resolve(&self, layout: &SheetLayout) -> Result<u32> {
        match *self {
            Quantity::Labels(count) => {
                if count == 0 {
                    return Err(Error::invalid_field("count", "must be > 0"));
                }
                Ok(count)
            }
            Quantity::Pages(pages) => {
                if pages == 0 {
                    return Err(Error::invalid_field("pages", "must be > 0"));
                }
                pages
                    .checked_mul(layout.labels_per_page())
                    .ok_or_else(|| Error::invalid_field("pages", "label count overflows"))
            }
        }
    }
}

/// Validated inputs for one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelJob {
    /// First serial number emitted; strictly positive
    pub start: u64,
    /// Amount of labels to generate
    pub quantity: Quantity,
    /// Literal prefix printed before each number
    pub prefix: String,
    /// Minimum number of digits in the formatted number
    pub leading_zeros: u32,
    /// Code symbol variant
    pub kind: CodeKind,
    /// Draw a bounding rectangle around each label, as a calibration
    /// aid against a printed sheet
    pub draw_border: bool,
}

impl LabelJob {
    /// Validate all fields against the given layout, returning the
    /// resolved label count. Runs before any page is produced.
    pub fn validate(&self, layout: &SheetLayout) -> Result<u32> {
        layout.validate()?;
        if self.start == 0 {
            return Err(Error::invalid_field("start", "must be > 0"));
        }
        if self.prefix.is_empty() {
            return Err(Error::invalid_field("prefix", "must not be empty"));
        }
        self.quantity.resolve(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::avery_l4731;

    fn job(start: u64, quantity: Quantity, prefix: &str) -> LabelJob {
        LabelJob {
            start,
            quantity,
            prefix: prefix.to_string(),
            leading_zeros: 7,
            kind: CodeKind::Qr,
            draw_border: false,
        }
    }

    #[test]
    fn test_valid_job() {
        let layout = avery_l4731();
        let count = job(1, Quantity::Labels(189), "ASN").validate(&layout).unwrap();
        assert_eq!(count, 189);
    }

    #[test]
    fn test_pages_resolve_to_full_sheets() {
        let layout = avery_l4731();
        let count = job(1, Quantity::Pages(3), "ASN").validate(&layout).unwrap();
        assert_eq!(count, 3 * 189);
    }

    #[test]
    fn test_zero_count_rejected() {
        let layout = avery_l4731();
        let err = job(1, Quantity::Labels(0), "ASN").validate(&layout).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "count", .. }));
    }

    #[test]
    fn test_zero_pages_rejected() {
        let layout = avery_l4731();
        let err = job(1, Quantity::Pages(0), "ASN").validate(&layout).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "pages", .. }));
    }

    #[test]
    fn test_zero_start_rejected() {
        let layout = avery_l4731();
        let err = job(0, Quantity::Labels(1), "ASN").validate(&layout).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "start", .. }));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let layout = avery_l4731();
        let err = job(1, Quantity::Labels(1), "").validate(&layout).unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "prefix", .. }));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("qr".parse::<CodeKind>().unwrap(), CodeKind::Qr);
        assert_eq!("CODE128".parse::<CodeKind>().unwrap(), CodeKind::Code128);
        assert!("aztec".parse::<CodeKind>().is_err());
    }
}
