//! CLI module for reencoder
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::Parser;

pub mod args;
pub mod commands;

/// Re-encode a media file according to its `Orig.` file name
///
/// Movies are named `Title (Year) Orig.ext` and episodes
/// `Title - Marker - Episode (Year) Orig.ext`. The audio is re-encoded
/// according to its channel layout and the result is muxed into
/// `Title (Year).mkv` (or the episode equivalent).
#[derive(Parser, Debug)]
#[command(name = "reencoder")]
#[command(about = "Rename and re-encode media files from their naming convention")]
#[command(version)]
pub struct Cli {
    /// Input media file
    pub input: PathBuf,

    /// Settings that override the configuration file
    #[command(flatten)]
    pub overrides: args::ConfigArgs,

    /// What to do with the input
    #[command(flatten)]
    pub run: args::RunArgs,
}
