//! Run configuration threaded through the application

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::model::ProfileSettings;
use crate::error::{ReencodeError, ReencodeResult};
use crate::utils::logging::LoggingConfig;

/// Extensions mkvmerge output may carry; the mux always writes Matroska
pub const MATROSKA_EXTENSIONS: &[&str] = &["mkv", "mka", "mk3d", "mks"];

/// Probe backend used to read track layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProbeBackend {
    /// `mediainfo --Output=JSON`
    Mediainfo,
    /// `ffprobe -print_format json -show_streams`
    Ffprobe,
}

/// External tool locations and limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg: Option<PathBuf>,
    pub ffprobe: Option<PathBuf>,
    pub mediainfo: Option<PathBuf>,
    pub mkvmerge: Option<PathBuf>,
    pub probe: ProbeBackend,
    /// Per-invocation limit in seconds; unset means wait indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: None,
            ffprobe: None,
            mediainfo: None,
            mkvmerge: None,
            probe: ProbeBackend::Mediainfo,
            timeout_secs: None,
        }
    }
}

impl ToolsConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Complete configuration for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub logging: LoggingConfig,
    pub audio: ProfileSettings,
    pub tools: ToolsConfig,
    /// Directory receiving the encode and mux outputs
    pub output_dir: PathBuf,
    /// Final container extension
    pub container: String,
    /// Delete the encode output once the mux succeeds
    pub remove_intermediate: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            audio: ProfileSettings::default(),
            tools: ToolsConfig::default(),
            output_dir: PathBuf::from("."),
            container: "mkv".to_string(),
            remove_intermediate: false,
        }
    }
}

impl EncoderConfig {
    /// Reject values the encode step cannot use
    pub fn validate(&self) -> ReencodeResult<()> {
        let bitrates = [
            ("stereo_bitrate", self.audio.stereo_bitrate),
            ("surround_bitrates.six_channel", self.audio.surround_bitrates.six_channel),
            ("surround_bitrates.eight_channel", self.audio.surround_bitrates.eight_channel),
        ];
        for (key, bitrate) in bitrates {
            if bitrate.kbps() == 0 {
                return Err(config_error(format!("{} cannot be zero", key)));
            }
        }

        if self.audio.codec.trim().is_empty() {
            return Err(config_error("audio codec cannot be empty"));
        }

        if !MATROSKA_EXTENSIONS.contains(&self.container.as_str()) {
            return Err(config_error(format!(
                "container must be one of {}, got \"{}\"",
                MATROSKA_EXTENSIONS.join(", "),
                self.container
            )));
        }

        if self.tools.timeout_secs == Some(0) {
            return Err(config_error("timeout_secs cannot be zero"));
        }

        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> ReencodeError {
    ReencodeError::ConfigError {
        message: message.into(),
    }
}
