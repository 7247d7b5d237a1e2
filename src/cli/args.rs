//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::config::ProbeBackend;
use crate::domain::model::VolumeBoost;
use crate::utils::logging::{LogFormat, LogLevel};

/// Configuration overrides, also readable from the environment
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// TOML configuration file (default: ./reencoder.toml if present)
    #[arg(short, long, env = "REENCODER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level
    #[arg(long, value_enum, env = "REENCODER_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Log output format
    #[arg(long, value_enum, env = "REENCODER_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Directory for the encoded and muxed files
    #[arg(short, long, env = "REENCODER_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Volume multiplier applied to re-encoded audio (1.0 disables the filter)
    #[arg(long, env = "REENCODER_VOLUME")]
    pub volume: Option<VolumeBoost>,

    /// ffmpeg audio encoder
    #[arg(long, env = "REENCODER_AUDIO_CODEC")]
    pub audio_codec: Option<String>,

    /// Track probing backend
    #[arg(long, value_enum, env = "REENCODER_PROBE")]
    pub probe: Option<ProbeBackend>,
}

/// Run mode switches
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Stream-copy every track into "<name> Copy.mkv" instead of encoding
    #[arg(long)]
    pub copy: bool,

    /// Print the commands that would run without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Delete the encode output after a successful mux
    #[arg(long)]
    pub remove_intermediate: bool,
}
