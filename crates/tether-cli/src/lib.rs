//! CLI logic for rendering Tether connector scenes.
//!
//! A scene file declares a page, its element boxes and the connectors
//! between them. [`run`] lays the scene out headlessly and writes it as SVG.

pub mod error;
pub mod scene;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use crate::{error::CliError, scene::SceneFile};

/// Run the Tether CLI application
///
/// Reads the scene named by `args.input`, draws every connector and writes
/// the resulting SVG to `args.output`.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene parsing errors
/// - Unknown elements or attachment names
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let scene = SceneFile::parse(&source)?;

    let connectors = scene.build(&app_config, args.lenient_attachments)?;
    info!(connectors = connectors.len(); "Scene laid out");

    let svg = connectors.host().render_svg();
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
