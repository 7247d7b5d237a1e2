//! MediaInfo adapter for track probing
//!
//! Shells out to `mediainfo --Output=JSON <file>` and maps each track's
//! `@type` and `Channels` fields into [`TrackInfo`].

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::adapters::process::ToolCommand;
use crate::adapters::tools::ToolPath;
use crate::domain::model::*;
use crate::error::{ReencodeError, ReencodeResult};
use crate::ports::ProbePort;

/// Probe backed by the `mediainfo` CLI
#[derive(Debug, Clone)]
pub struct MediaInfoProbeAdapter {
    tool: ToolPath,
    timeout: Option<Duration>,
}

impl MediaInfoProbeAdapter {
    pub fn new(tool: ToolPath, timeout: Option<Duration>) -> Self {
        Self { tool, timeout }
    }
}

#[async_trait]
impl ProbePort for MediaInfoProbeAdapter {
    fn name(&self) -> &'static str {
        "mediainfo"
    }

    async fn probe_tracks(&self, file_path: &Path) -> ReencodeResult<Vec<TrackInfo>> {
        info!("Parsing media info for \"{}\"", file_path.display());

        let mut cmd = ToolCommand::new(self.tool.require()?);
        cmd.arg("--Output=JSON")
            .arg(file_path.to_string_lossy())
            .timeout(self.timeout);

        let output = cmd.execute().await?;
        parse_mediainfo_json(&output.stdout)
    }
}

#[derive(Debug, Deserialize)]
struct MiOutput {
    media: Option<MiMedia>,
}

#[derive(Debug, Deserialize)]
struct MiMedia {
    #[serde(default)]
    track: Vec<MiTrack>,
}

#[derive(Debug, Deserialize)]
struct MiTrack {
    #[serde(rename = "@type")]
    track_type: String,

    #[serde(rename = "Channels")]
    channels: Option<String>,
}

/// Map `mediainfo --Output=JSON` output to tracks in stream order.
///
/// The `General` entry describes the container, not a stream, and is skipped.
pub fn parse_mediainfo_json(json: &str) -> ReencodeResult<Vec<TrackInfo>> {
    let mi: MiOutput = serde_json::from_str(json).map_err(|e| ReencodeError::ProbeError {
        message: format!("mediainfo JSON parse error: {e}"),
    })?;

    let media = mi.media.ok_or_else(|| ReencodeError::ProbeError {
        message: "mediainfo did not recognize the file".to_string(),
    })?;

    let tracks = media
        .track
        .into_iter()
        .filter(|t| t.track_type != "General")
        .map(|t| {
            let kind = match t.track_type.as_str() {
                "Audio" => TrackKind::Audio,
                "Video" => TrackKind::Video,
                "Text" => TrackKind::Subtitle,
                _ => TrackKind::Other,
            };
            let channel_count = match (kind, t.channels.as_deref()) {
                (_, Some(raw)) => parse_channels(raw),
                (TrackKind::Audio, None) => {
                    warn!("Audio track without a channel count, treating as 0");
                    0
                }
                _ => 0,
            };
            TrackInfo::new(kind, channel_count)
        })
        .collect();

    Ok(tracks)
}

/// First number in values such as `"6"` or `"8 / 6"`
fn parse_channels(raw: &str) -> u32 {
    raw.split(|c: char| c == '/' || c.is_whitespace())
        .find_map(|token| token.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "creatingLibrary": {"name": "MediaInfoLib", "version": "23.04"},
        "media": {
            "@ref": "Example Show - S01 - Pilot (2020) Orig.mkv",
            "track": [
                {"@type": "General", "Format": "Matroska", "AudioCount": "2"},
                {"@type": "Video", "Format": "AVC", "Width": "1920"},
                {"@type": "Audio", "Format": "E-AC-3", "Channels": "6"},
                {"@type": "Audio", "Format": "AAC", "Channels": "2"},
                {"@type": "Text", "Format": "UTF-8"},
                {"@type": "Menu"}
            ]
        }
    }"#;

    #[test]
    fn maps_track_types_and_channels() {
        let tracks = parse_mediainfo_json(SAMPLE).unwrap();
        assert_eq!(
            tracks,
            vec![
                TrackInfo::video(),
                TrackInfo::audio(6),
                TrackInfo::audio(2),
                TrackInfo::subtitle(),
                TrackInfo::new(TrackKind::Other, 0),
            ]
        );
    }

    #[test]
    fn multi_value_channels_take_the_first() {
        assert_eq!(parse_channels("8 / 6"), 8);
        assert_eq!(parse_channels("6"), 6);
        assert_eq!(parse_channels("Object Based"), 0);
    }

    #[test]
    fn unrecognized_file_is_a_probe_error() {
        let err = parse_mediainfo_json(r#"{"media": null}"#).unwrap_err();
        assert!(matches!(err, ReencodeError::ProbeError { .. }));

        let err = parse_mediainfo_json("not json").unwrap_err();
        assert!(err.to_string().contains("mediainfo JSON parse error"));
    }
}
