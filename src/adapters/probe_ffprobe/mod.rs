//! FFprobe adapter for track probing
//!
//! Alternative to the mediainfo backend for hosts without MediaInfo.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::adapters::process::ToolCommand;
use crate::adapters::tools::ToolPath;
use crate::domain::model::*;
use crate::error::{ReencodeError, ReencodeResult};
use crate::ports::ProbePort;

/// Probe backed by the `ffprobe` CLI
#[derive(Debug, Clone)]
pub struct FFprobeAdapter {
    tool: ToolPath,
    timeout: Option<Duration>,
}

impl FFprobeAdapter {
    pub fn new(tool: ToolPath, timeout: Option<Duration>) -> Self {
        Self { tool, timeout }
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    fn name(&self) -> &'static str {
        "ffprobe"
    }

    async fn probe_tracks(&self, file_path: &Path) -> ReencodeResult<Vec<TrackInfo>> {
        info!("Probing streams of \"{}\"", file_path.display());

        let mut cmd = ToolCommand::new(self.tool.require()?);
        cmd.args(["-v", "quiet", "-print_format", "json", "-show_streams"])
            .arg(file_path.to_string_lossy())
            .timeout(self.timeout);

        let output = cmd.execute().await?;
        parse_ffprobe_json(&output.stdout)
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    channels: Option<u32>,
}

/// Map `ffprobe -show_streams` JSON output to tracks in stream order
pub fn parse_ffprobe_json(json: &str) -> ReencodeResult<Vec<TrackInfo>> {
    let ff: FfprobeOutput = serde_json::from_str(json).map_err(|e| ReencodeError::ProbeError {
        message: format!("ffprobe JSON parse error: {e}"),
    })?;

    Ok(ff
        .streams
        .into_iter()
        .map(|s| {
            let kind = match s.codec_type.as_deref() {
                Some("audio") => TrackKind::Audio,
                Some("video") => TrackKind::Video,
                Some("subtitle") => TrackKind::Subtitle,
                _ => TrackKind::Other,
            };
            TrackInfo::new(kind, s.channels.unwrap_or(0))
        })
        .collect())
}
