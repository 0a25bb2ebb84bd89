//! PDF document writer
//!
//! Renders a [`SheetPlan`] onto A4 pages: per label an optional
//! calibration border, a code symbol at 90% of the label height, and
//! the label text to the right of the symbol.

use asnkit_core::{pt_to_mm, CodeKind, SheetLayout, SheetPlan, A4_HEIGHT_PT, A4_WIDTH_PT};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use crate::barcode::code128_modules;
use crate::error::{RenderError, RenderResult};
use crate::qr::qr_image;

/// Inner padding between the label edge, the symbol, and the text,
/// in points (1 mm).
const PAD_PT: f64 = 72.0 / 25.4;

/// Nominal Code 128 module width: 0.0075 in. The symbol is scaled
/// down from this when it would not fit the label, never up.
const NOMINAL_MODULE_PT: f64 = 0.54;

/// Per-run rendering options not already captured by the plan.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Code symbol variant
    pub kind: CodeKind,
    /// Stroke each label's bounding rectangle, as a calibration aid
    pub draw_border: bool,
}

/// Writes a sheet plan to a multi-page A4 PDF.
pub struct PdfRenderer {
    layout: SheetLayout,
    options: RenderOptions,
}

impl PdfRenderer {
    pub fn new(layout: SheetLayout, options: RenderOptions) -> Self {
        Self { layout, options }
    }

    /// Write the whole plan to `path`. The file is created, fully
    /// written, and closed within this call.
    pub fn render_to_file(&self, plan: &SheetPlan, path: &Path) -> RenderResult<()> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            "ASN Labels",
            mm(A4_WIDTH_PT),
            mm(A4_HEIGHT_PT),
            "labels",
        );

        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        for (index, page) in plan.pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (p, l) = doc.add_page(mm(A4_WIDTH_PT), mm(A4_HEIGHT_PT), "labels");
                doc.get_page(p).get_layer(l)
            };

            for placement in &page.placements {
                draw_label(
                    &layer,
                    &font,
                    &self.layout,
                    &self.options,
                    placement.x,
                    placement.y,
                    &placement.text,
                )?;
            }
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        doc.save(&mut writer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        info!(
            path = %path.display(),
            pages = plan.page_count,
            labels = plan.label_count(),
            "label sheet written"
        );
        Ok(())
    }
}

/// Font size in points for a given label height: an affine clamp,
/// no fitting search.
pub fn label_font_size(label_h_pt: f64) -> f64 {
    (pt_to_mm(label_h_pt) * 0.55).clamp(5.5, 8.0)
}

/// Draw one label whose rectangle has its bottom-left corner at
/// `(x, y)` points on the current page.
pub(crate) fn draw_label(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    layout: &SheetLayout,
    options: &RenderOptions,
    x: f64,
    y: f64,
    text: &str,
) -> RenderResult<()> {
    if options.draw_border {
        stroke_rect(layer, x, y, layout.label_w, layout.label_h);
    }

    let code_size = layout.label_h * 0.90;
    let code_x = x + PAD_PT;
    let code_y = y + (layout.label_h - code_size) / 2.0;

    match options.kind {
        CodeKind::Qr => embed_qr(layer, text, code_x, code_y, code_size)?,
        CodeKind::Code128 => draw_code128(layer, text, code_x, code_y, code_size)?,
    }

    let font_size = label_font_size(layout.label_h);
    let text_x = code_x + code_size + PAD_PT;
    let text_y = y + (layout.label_h - font_size) / 2.0;
    layer.use_text(text, font_size as f32, mm(text_x), mm(text_y), font);

    Ok(())
}

fn embed_qr(
    layer: &PdfLayerReference,
    text: &str,
    x: f64,
    y: f64,
    size: f64,
) -> RenderResult<()> {
    let rgb_image = qr_image(text)?.to_rgb8();
    let (width, height) = rgb_image.dimensions();
    let raw_pixels = rgb_image.into_raw();

    let image = Image::from(ImageXObject {
        width: Px(width as usize),
        height: Px(height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: raw_pixels,
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // DPI chosen so the bitmap lands at exactly `size` points.
    let size_mm = pt_to_mm(size);
    let dpi = (width as f64 / (size_mm / 25.4)) as f32;

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(mm(x)),
            translate_y: Some(mm(y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    Ok(())
}

fn draw_code128(
    layer: &PdfLayerReference,
    text: &str,
    x: f64,
    y: f64,
    size: f64,
) -> RenderResult<()> {
    let modules = code128_modules(text)?;

    let natural_w = modules.len() as f64 * NOMINAL_MODULE_PT;
    let scale = (size / natural_w).min(1.0);
    let module_w = NOMINAL_MODULE_PT * scale;

    let bar_h = size * 0.85;
    let bar_y = y + (size - bar_h) / 2.0;

    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));

    // Merge consecutive bar modules into single rectangles.
    let mut i = 0;
    while i < modules.len() {
        if modules[i] == 1 {
            let run_start = i;
            while i < modules.len() && modules[i] == 1 {
                i += 1;
            }
            let bar_x = x + run_start as f64 * module_w;
            let bar_w = (i - run_start) as f64 * module_w;
            layer.add_polygon(filled_rect(bar_x, bar_y, bar_w, bar_h));
        } else {
            i += 1;
        }
    }

    Ok(())
}

fn stroke_rect(layer: &PdfLayerReference, x: f64, y: f64, w: f64, h: f64) {
    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(0.5);
    let outline = Line {
        points: vec![
            (Point::new(mm(x), mm(y)), false),
            (Point::new(mm(x + w), mm(y)), false),
            (Point::new(mm(x + w), mm(y + h)), false),
            (Point::new(mm(x), mm(y + h)), false),
        ],
        is_closed: true,
    };
    layer.add_line(outline);
}

fn filled_rect(x: f64, y: f64, w: f64, h: f64) -> Polygon {
    Polygon {
        rings: vec![vec![
            (Point::new(mm(x), mm(y)), false),
            (Point::new(mm(x + w), mm(y)), false),
            (Point::new(mm(x + w), mm(y + h)), false),
            (Point::new(mm(x), mm(y + h)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    }
}

/// Convert points to the millimeter unit the PDF library expects.
fn mm(pt: f64) -> Mm {
    Mm(pt_to_mm(pt) as f32)
}
