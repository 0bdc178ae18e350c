//! Errors reported by the CLI.
//!
//! [`CliError`] implements [`miette::Diagnostic`] so `main` can render it with
//! help text through miette's graphical report handler.

use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use tether::TetherError;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("I/O error: {0}")]
    #[diagnostic(code(tether::io))]
    Io(#[from] io::Error),

    #[error("Failed to parse TOML configuration: {0}")]
    #[diagnostic(code(tether::config::parse))]
    ConfigParse(String),

    #[error("Missing configuration file: {}", .0.display())]
    #[diagnostic(
        code(tether::config::missing),
        help("pass an existing file to --config or drop the flag to use defaults")
    )]
    MissingConfig(PathBuf),

    #[error("Invalid scene file: {0}")]
    #[diagnostic(code(tether::scene::parse))]
    SceneParse(String),

    #[error("Connector {index} references unknown element `{element}`")]
    #[diagnostic(
        code(tether::scene::unknown_element),
        help("declare the element in an [[element]] table")
    )]
    UnknownElement { index: usize, element: String },

    #[error("Connector {index}: {message}")]
    #[diagnostic(
        code(tether::scene::attachment),
        help("use `<top|middle|bottom>-<left|middle|right>` or pass --lenient-attachments")
    )]
    Attachment { index: usize, message: String },

    #[error("Connector {index}: {message}")]
    #[diagnostic(code(tether::scene::stroke))]
    Stroke { index: usize, message: String },

    #[error(transparent)]
    #[diagnostic(code(tether::render))]
    Render(#[from] TetherError),
}
