//! # ASNKit Core
//!
//! Core types and the label grid placement engine.
//! Maps a linear sequence of archive serial numbers onto fixed
//! rows/columns across paginated A4 sheets, applying geometric
//! calibration deltas, and produces deterministic coordinates for
//! each label's content region.

pub mod calibration;
pub mod error;
pub mod job;
pub mod placement;
pub mod sequence;
pub mod sheet;
pub mod units;

pub use calibration::{CalibrationDelta, BASE_CALIBRATION_MM};
pub use error::{Error, Result};
pub use job::{CodeKind, LabelJob, Quantity};
pub use placement::{PagePlan, Placement, SheetPlan, SheetPlanner};
pub use sequence::LabelSequence;
pub use sheet::{avery_l4731, SheetLayout};
pub use units::{mm_to_pt, pt_to_mm, A4_HEIGHT_PT, A4_WIDTH_PT};
