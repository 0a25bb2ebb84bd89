//! # ASNKit
//!
//! Label sheet generator for paperless-ngx archive serial numbers:
//! sequential QR or Code 128 labels placed on paginated A4 PDF sheets
//! matching Avery L4731 label stock, with printer calibration.
//!
//! ## Architecture
//!
//! ASNKit is organized as a workspace with multiple crates:
//!
//! 1. **asnkit-core** - Sheet layouts, label jobs, grid placement
//! 2. **asnkit-settings** - Config persistence, migration, autosave
//! 3. **asnkit-render** - PDF output, QR and Code 128 symbols
//! 4. **asnkit** - The command line binary that ties them together

pub mod cli;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr (stdout carries command output)
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
