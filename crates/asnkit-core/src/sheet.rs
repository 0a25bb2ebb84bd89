//! Label sheet geometry
//!
//! A [`SheetLayout`] is a constant fixture describing one physical
//! label sheet product: grid dimensions, label size, gaps, and page
//! margins, all in points.

use crate::error::{Error, Result};
use crate::units::mm_to_pt;
use serde::{Deserialize, Serialize};

/// Immutable geometry of one label sheet product.
///
/// All dimensions are in points. Rows are numbered from the top of
/// the page downward; the rendering coordinate system is bottom-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// Product name, for display and error messages
    pub name: String,
    /// Number of label columns per page
    pub cols: u32,
    /// Number of label rows per page
    pub rows: u32,
    /// Label width in points
    pub label_w: f64,
    /// Label height in points
    pub label_h: f64,
    /// Base horizontal gap between adjacent labels, in points
    pub gap_x: f64,
    /// Base vertical gap between adjacent labels, in points
    pub gap_y: f64,
    /// Left page margin in points
    pub margin_left: f64,
    /// Top page margin in points
    pub margin_top: f64,
}

impl SheetLayout {
    /// Labels per page (cols x rows).
    pub fn labels_per_page(&self) -> u32 {
        self.cols * self.rows
    }

    /// Base horizontal pitch: label width plus gap.
    pub fn pitch_x(&self) -> f64 {
        self.label_w + self.gap_x
    }

    /// Base vertical pitch: label height plus gap.
    pub fn pitch_y(&self) -> f64 {
        self.label_h + self.gap_y
    }

    /// Check the layout invariants: at least one row and column,
    /// strictly positive label dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.cols < 1 {
            return Err(self.layout_error("cols must be >= 1"));
        }
        if self.rows < 1 {
            return Err(self.layout_error("rows must be >= 1"));
        }
        if self.label_w <= 0.0 || self.label_h <= 0.0 {
            return Err(self.layout_error("label dimensions must be > 0"));
        }
        if self.gap_x < 0.0 || self.gap_y < 0.0 {
            return Err(self.layout_error("gaps must be >= 0"));
        }
        if self.margin_left < 0.0 || self.margin_top < 0.0 {
            return Err(self.layout_error("margins must be >= 0"));
        }
        Ok(())
    }

    fn layout_error(&self, reason: &str) -> Error {
        Error::InvalidLayout {
            name: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Avery Zweckform L4731 / L4731REV: 7 x 27 grid of 25.4 mm x 10 mm
/// labels on A4, 189 labels per sheet. Base gaps and margins are the
/// nominal template values; real sheets drift, which is what the
/// calibration deltas are for.
pub fn avery_l4731() -> SheetLayout {
    SheetLayout {
        name: "Avery Zweckform L4731 / L4731REV (7x27, 25.4mm x 10mm)".to_string(),
        cols: 7,
        rows: 27,
        label_w: mm_to_pt(25.4),
        label_h: mm_to_pt(10.0),
        gap_x: mm_to_pt(2.5),
        gap_y: 0.0,
        margin_left: mm_to_pt(8.5),
        margin_top: mm_to_pt(13.5),
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        avery_l4731()
    }
}
