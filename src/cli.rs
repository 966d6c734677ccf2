//! Command-line handling and build metadata.

use crate::skill_tree::{LayoutError, TreeLayout};
use std::path::PathBuf;
use thiserror::Error;

mod build {
    include!(concat!(env!("OUT_DIR"), "/build_info.rs"));
}

pub use build::{BUILD_COMMIT, BUILD_DATE};

// ── Configuration ────────────────────────────────────────────────────

/// Startup configuration for an interactive session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// JSON layout to load instead of the built-in tree
    pub layout_path: Option<PathBuf>,
    /// Overrides the layout's starting budget
    pub points: Option<u32>,
}

impl Config {
    /// Resolve the layout this session should start from.
    pub fn load_layout(&self) -> Result<TreeLayout, LayoutError> {
        let mut layout = match &self.layout_path {
            Some(path) => TreeLayout::load(path)?,
            None => TreeLayout::default(),
        };
        if let Some(points) = self.points {
            layout.initial_points = points;
        }
        Ok(layout)
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Config),
    DumpLayout,
    Version,
    Help,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("{0} requires a value")]
    MissingValue(&'static str),

    #[error("{flag} expects a non-negative number, got '{value}'")]
    InvalidNumber { flag: &'static str, value: String },
}

/// Parse arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let mut config = Config::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--layout" => {
                i += 1;
                let value = args.get(i).ok_or(CliError::MissingValue("--layout"))?;
                config.layout_path = Some(PathBuf::from(value));
            }
            "--points" => {
                i += 1;
                let value = args.get(i).ok_or(CliError::MissingValue("--points"))?;
                let points = value.parse().map_err(|_| CliError::InvalidNumber {
                    flag: "--points",
                    value: value.clone(),
                })?;
                config.points = Some(points);
            }
            "--dump-layout" => return Ok(Command::DumpLayout),
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(CliError::UnknownArgument(other.to_string())),
        }
        i += 1;
    }
    Ok(Command::Run(config))
}

pub fn version_string() -> String {
    format!("skilltree {} ({})", BUILD_DATE, BUILD_COMMIT)
}

pub fn usage() -> &'static str {
    "Skill Tree - terminal skill tree planner\n\
     \n\
     Usage: skilltree [OPTIONS]\n\
     \n\
     Options:\n\
     \x20 --layout FILE   Load the tree layout from a JSON file\n\
     \x20 --points N      Starting skill points (default: from layout, 20 built-in)\n\
     \x20 --dump-layout   Print the built-in layout as JSON and exit\n\
     \x20 --version, -v   Show version information\n\
     \x20 --help, -h      Show this help\n\
     \n\
     Set SKILLTREE_LOG (e.g. debug) to control the log written to ~/.skilltree/skilltree.log"
}
