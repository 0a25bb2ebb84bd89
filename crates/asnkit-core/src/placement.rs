//! Label grid placement and pagination
//!
//! The one nontrivial algorithm in the system: map a linear sequence
//! of N labels onto fixed rows/columns across paginated A4 sheets,
//! applying calibration deltas, and produce deterministic coordinates
//! for each label's content region.
//!
//! Pure, stateless batch computation: re-run in full on every
//! invocation, no shared state between runs.

use crate::calibration::CalibrationDelta;
use crate::error::Result;
use crate::job::LabelJob;
use crate::sequence::LabelSequence;
use crate::sheet::SheetLayout;
use crate::units::{mm_to_pt, A4_HEIGHT_PT};

/// Resolved rectangle origin for one label's content region.
///
/// Coordinates are in points with a bottom-left origin (y grows
/// upward), matching the PDF coordinate system. The rectangle extends
/// `label_w` right and `label_h` up from `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Zero-based page index
    pub page: u32,
    /// Left edge of the label rectangle, points
    pub x: f64,
    /// Bottom edge of the label rectangle, points
    pub y: f64,
    /// Text printed on the label (prefix + padded number)
    pub text: String,
}

/// All placements for one page, in row-major fill order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PagePlan {
    pub placements: Vec<Placement>,
}

/// The full, ordered output of a planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    /// One entry per generated page
    pub pages: Vec<PagePlan>,
    /// Total number of pages, ceil(count / labels_per_page)
    pub page_count: u32,
    /// The number the next run should start at: start + count
    pub next_number: u64,
}

impl SheetPlan {
    /// Total number of placed labels across all pages.
    pub fn label_count(&self) -> usize {
        self.pages.iter().map(|p| p.placements.len()).sum()
    }
}

/// Computes a [`SheetPlan`] from a job, a sheet layout, and an
/// effective calibration.
///
/// The calibration passed here is applied as-is; callers that work
/// with user deltas convert through [`CalibrationDelta::effective`]
/// first.
pub struct SheetPlanner {
    job: LabelJob,
    layout: SheetLayout,
    calibration: CalibrationDelta,
}

impl SheetPlanner {
    pub fn new(job: LabelJob, layout: SheetLayout, calibration: CalibrationDelta) -> Self {
        Self {
            job,
            layout,
            calibration,
        }
    }

    /// Validate inputs and compute every placement.
    ///
    /// Fill order is row-major: top row first, left to right. The
    /// running number advances by one per placement, across page
    /// boundaries, with no per-page reset.
    pub fn plan(&self) -> Result<SheetPlan> {
        let count = self.job.validate(&self.layout)?;

        let layout = &self.layout;
        let labels_per_page = layout.labels_per_page();
        let page_count = count.div_ceil(labels_per_page);

        // Effective geometry in points: base pitch plus mm delta.
        let pitch_x = layout.pitch_x() + mm_to_pt(self.calibration.pitch_dx_mm);
        let pitch_y = layout.pitch_y() + mm_to_pt(self.calibration.pitch_dy_mm);
        let off_x = mm_to_pt(self.calibration.offset_x_mm);
        let off_y = mm_to_pt(self.calibration.offset_y_mm);

        let sequence = LabelSequence::new(
            self.job.prefix.clone(),
            self.job.start,
            self.job.leading_zeros,
        );

        let mut pages = Vec::with_capacity(page_count as usize);
        let mut current = self.job.start;
        let mut remaining = count;

        for page in 0..page_count {
            let on_this_page = remaining.min(labels_per_page);
            let mut placements = Vec::with_capacity(on_this_page as usize);

            for i in 0..on_this_page {
                let row = i / layout.cols;
                let col = i % layout.cols;

                let x = layout.margin_left + col as f64 * pitch_x + off_x;
                // Rows count downward from the top of the page while
                // the y axis grows upward, hence the subtraction from
                // page height.
                let y = A4_HEIGHT_PT
                    - layout.margin_top
                    - layout.label_h
                    - row as f64 * pitch_y
                    + off_y;

                placements.push(Placement {
                    page,
                    x,
                    y,
                    text: sequence.text_for(current),
                });
                current += 1;
            }

            pages.push(PagePlan { placements });
            remaining -= on_this_page;
        }

        Ok(SheetPlan {
            pages,
            page_count,
            next_number: self.job.start + count as u64,
        })
    }
}
