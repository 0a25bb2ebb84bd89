//! Single-label preview
//!
//! Renders one label at its exact physical size on a page of its own,
//! so the symbol placement and text fit can be checked without
//! printing a whole sheet.

use asnkit_core::{SheetLayout, SheetPlan};
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use crate::error::{RenderError, RenderResult};
use crate::pdf::{draw_label, RenderOptions};

/// Write a one-page PDF containing the first label of `plan` on a
/// page sized to the label itself. The border is always drawn so the
/// label edges are visible.
pub fn render_preview(
    plan: &SheetPlan,
    layout: &SheetLayout,
    options: &RenderOptions,
    path: &Path,
) -> RenderResult<()> {
    let placement = plan
        .pages
        .first()
        .and_then(|page| page.placements.first())
        .ok_or_else(|| RenderError::Pdf("nothing to preview: plan is empty".into()))?;

    let (doc, page, layer) = PdfDocument::new(
        "ASN Label Preview",
        Mm(asnkit_core::pt_to_mm(layout.label_w) as f32),
        Mm(asnkit_core::pt_to_mm(layout.label_h) as f32),
        "preview",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let layer = doc.get_page(page).get_layer(layer);
    let preview_options = RenderOptions {
        draw_border: true,
        ..*options
    };
    draw_label(
        &layer,
        &font,
        layout,
        &preview_options,
        0.0,
        0.0,
        &placement.text,
    )?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    info!(path = %path.display(), text = %placement.text, "preview written");
    Ok(())
}
