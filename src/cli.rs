//! Command line interface
//!
//! Commands operate on the persisted settings record: flags override
//! individual fields for the run, and a successful generation writes
//! the updated record back (with `start` advanced past the generated
//! range) so consecutive runs continue the sequence.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use asnkit_core::{avery_l4731, CalibrationDelta, CodeKind, SheetPlanner};
use asnkit_render::{render_preview, PdfRenderer, RenderOptions};
use asnkit_settings::{Autosaver, QuantityMode, Settings, SettingsStore};

#[derive(Parser)]
#[command(
    name = "asnkit",
    version,
    about = "Generate archive serial number label sheets as printable A4 PDFs"
)]
pub struct Cli {
    /// Settings file to use instead of the platform default
    #[arg(long, global = true, value_name = "FILE", env = "ASNKIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a label sheet PDF and advance the saved sequence
    Generate(GenerateArgs),
    /// Render a single label at its physical size for inspection
    Preview(PreviewArgs),
    /// Inspect or reset the persisted settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Per-run overrides of the persisted settings. Unset flags leave the
/// saved value in effect.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// First serial number (defaults to the saved position)
    #[arg(long)]
    pub start: Option<u64>,

    /// Number of labels to generate
    #[arg(long, conflicts_with = "pages")]
    pub count: Option<u32>,

    /// Number of whole A4 sheets to generate
    #[arg(long)]
    pub pages: Option<u32>,

    /// Text printed before the serial number
    #[arg(long)]
    pub prefix: Option<String>,

    /// Minimum digit count of the serial number
    #[arg(long)]
    pub zeros: Option<u32>,

    /// Code symbol: qr or code128
    #[arg(long)]
    pub kind: Option<CodeKind>,

    /// Draw a rectangle around each label, as a calibration aid
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub border: Option<bool>,

    /// Calibration: shift the whole grid right, millimeters
    #[arg(long, value_name = "MM", allow_hyphen_values = true)]
    pub off_x: Option<f64>,

    /// Calibration: shift the whole grid up, millimeters
    #[arg(long, value_name = "MM", allow_hyphen_values = true)]
    pub off_y: Option<f64>,

    /// Calibration: widen the column pitch, millimeters
    #[arg(long, value_name = "MM", allow_hyphen_values = true)]
    pub pitch_dx: Option<f64>,

    /// Calibration: widen the row pitch, millimeters
    #[arg(long, value_name = "MM", allow_hyphen_values = true)]
    pub pitch_dy: Option<f64>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub overrides: Overrides,

    /// Output file (default: asn_labels_<start>_<count>.pdf)
    #[arg(long, short = 'o', value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub overrides: Overrides,

    /// Output file
    #[arg(long, short = 'o', value_name = "FILE", default_value = "asn_label_preview.pdf")]
    pub out: PathBuf,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the settings file location
    Path,
    /// Print the effective settings as JSON
    Show,
    /// Delete the settings file and write fresh defaults
    Reset,
}

pub fn run(cli: Cli) -> Result<()> {
    let store = match &cli.config {
        Some(path) => SettingsStore::with_path(path.clone()),
        None => SettingsStore::open_default().context("resolving the settings location")?,
    };

    match cli.command {
        Command::Generate(args) => generate(&store, args),
        Command::Preview(args) => preview(&store, args),
        Command::Config { action } => config(&store, action),
    }
}

fn generate(store: &SettingsStore, args: GenerateArgs) -> Result<()> {
    let mut settings = store.load();
    apply_overrides(&mut settings, &args.overrides);
    settings.validate()?;

    let layout = avery_l4731();
    let plan = SheetPlanner::new(
        settings.job(),
        layout.clone(),
        settings.calibration().effective(),
    )
    .plan()?;

    let out = args
        .out
        .unwrap_or_else(|| default_output_name(settings.start, plan.label_count()));

    let renderer = PdfRenderer::new(
        layout,
        RenderOptions {
            kind: settings.kind,
            draw_border: settings.draw_border,
        },
    );
    renderer.render_to_file(&plan, &out)?;

    // Persist the run's settings with the sequence position advanced,
    // so the next run continues where this one stopped.
    settings.start = plan.next_number;
    let saver = Autosaver::new(store.clone());
    saver.schedule(settings);
    drop(saver);

    info!(next_start = plan.next_number, "sequence position saved");
    println!(
        "wrote {} ({} labels on {} pages); next start {}",
        out.display(),
        plan.label_count(),
        plan.page_count,
        plan.next_number
    );
    Ok(())
}

fn preview(store: &SettingsStore, args: PreviewArgs) -> Result<()> {
    let mut settings = store.load();
    apply_overrides(&mut settings, &args.overrides);
    settings.validate()?;

    let layout = avery_l4731();
    // The preview only shows the first label; calibration shifts the
    // grid on the sheet and has no effect on a label-sized page.
    let plan = SheetPlanner::new(settings.job(), layout.clone(), CalibrationDelta::ZERO).plan()?;

    let options = RenderOptions {
        kind: settings.kind,
        draw_border: settings.draw_border,
    };
    render_preview(&plan, &layout, &options, &args.out)?;

    println!("{}", args.out.display());
    Ok(())
}

fn config(store: &SettingsStore, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", store.path().display());
        }
        ConfigAction::Show => {
            let settings = store.load();
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        ConfigAction::Reset => {
            store.reset()?;
            println!("settings reset: {}", store.path().display());
        }
    }
    Ok(())
}

fn apply_overrides(settings: &mut Settings, overrides: &Overrides) {
    if let Some(start) = overrides.start {
        settings.start = start;
    }
    if let Some(count) = overrides.count {
        settings.quantity_mode = QuantityMode::Labels;
        settings.count = count;
    }
    if let Some(pages) = overrides.pages {
        settings.quantity_mode = QuantityMode::Pages;
        settings.pages = pages;
    }
    if let Some(ref prefix) = overrides.prefix {
        settings.prefix = prefix.clone();
    }
    if let Some(zeros) = overrides.zeros {
        settings.leading_zeros = zeros;
    }
    if let Some(kind) = overrides.kind {
        settings.kind = kind;
    }
    if let Some(border) = overrides.border {
        settings.draw_border = border;
    }
    if let Some(off_x) = overrides.off_x {
        settings.off_x = off_x;
    }
    if let Some(off_y) = overrides.off_y {
        settings.off_y = off_y;
    }
    if let Some(pitch_dx) = overrides.pitch_dx {
        settings.pitch_dx = pitch_dx;
    }
    if let Some(pitch_dy) = overrides.pitch_dy {
        settings.pitch_dy = pitch_dy;
    }
}

fn default_output_name(start: u64, count: usize) -> PathBuf {
    PathBuf::from(format!("asn_labels_{}_{}.pdf", start, count))
}
