// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Naming shape detected from the file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilenameShape {
    /// `Title (Year) Orig.ext`
    Movie,
    /// `Title - Marker - Episode (Year) Orig.ext`
    Episode,
}

impl fmt::Display for FilenameShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilenameShape::Movie => write!(f, "movie"),
            FilenameShape::Episode => write!(f, "episode"),
        }
    }
}

/// Season marker and episode name of a TV episode.
///
/// Kept together so a descriptor can never hold only one of the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeMarker {
    pub season: String,
    pub episode: String,
}

/// Structured fields parsed from an input file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDescriptor {
    input: PathBuf,
    title: String,
    year: String,
    #[serde(flatten)]
    marker: Option<EpisodeMarker>,
    extension: String,
    output_base: String,
}

impl SourceDescriptor {
    /// Create a descriptor for a movie
    pub fn movie(
        input: impl Into<PathBuf>,
        title: impl Into<String>,
        year: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let year = year.into();
        let output_base = format!("{} ({})", title, year);
        Self {
            input: input.into(),
            title,
            year,
            marker: None,
            extension: extension.into(),
            output_base,
        }
    }

    /// Create a descriptor for a TV episode
    pub fn tv_episode(
        input: impl Into<PathBuf>,
        title: impl Into<String>,
        season: impl Into<String>,
        episode: impl Into<String>,
        year: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let year = year.into();
        let marker = EpisodeMarker {
            season: season.into(),
            episode: episode.into(),
        };
        let output_base = format!(
            "{} - {} - {} ({})",
            title, marker.season, marker.episode, year
        );
        Self {
            input: input.into(),
            title,
            year,
            marker: Some(marker),
            extension: extension.into(),
            output_base,
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn shape(&self) -> FilenameShape {
        if self.marker.is_some() {
            FilenameShape::Episode
        } else {
            FilenameShape::Movie
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Year token as written in the file name (not validated as a date)
    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn season(&self) -> Option<&str> {
        self.marker.as_ref().map(|m| m.season.as_str())
    }

    pub fn episode(&self) -> Option<&str> {
        self.marker.as_ref().map(|m| m.episode.as_str())
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Canonical base name, e.g. `Title (1999)`
    pub fn output_base(&self) -> &str {
        &self.output_base
    }

    /// Output file name with an optional suffix: `"{base} {suffix}.{container}"`
    pub fn output_file_name(&self, suffix: Option<&str>, container: &str) -> String {
        match suffix {
            Some(suffix) => format!("{} {}.{}", self.output_base, suffix, container),
            None => format!("{}.{}", self.output_base, container),
        }
    }
}

/// Track type as reported by the probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Audio,
    Video,
    Subtitle,
    Other,
}

/// Probed track: type and channel count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackInfo {
    pub kind: TrackKind,
    pub channel_count: u32,
}

impl TrackInfo {
    pub fn new(kind: TrackKind, channel_count: u32) -> Self {
        Self {
            kind,
            channel_count,
        }
    }

    pub fn audio(channel_count: u32) -> Self {
        Self::new(TrackKind::Audio, channel_count)
    }

    pub fn video() -> Self {
        Self::new(TrackKind::Video, 0)
    }

    pub fn subtitle() -> Self {
        Self::new(TrackKind::Subtitle, 0)
    }

    pub fn is_audio(&self) -> bool {
        self.kind == TrackKind::Audio
    }
}

/// Audio bitrate in kilobits per second
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bitrate(u32);

impl Bitrate {
    pub const fn from_kbps(kbps: u32) -> Self {
        Self(kbps)
    }

    pub fn kbps(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.0)
    }
}

/// Source channel layouts that have an encoding profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelLayout {
    Stereo,
    Surround51,
    Surround71,
}

impl ChannelLayout {
    /// Map a channel count to a layout; only 2, 6 and 8 are recognized
    pub fn from_channel_count(channels: u32) -> Option<Self> {
        match channels {
            2 => Some(ChannelLayout::Stereo),
            6 => Some(ChannelLayout::Surround51),
            8 => Some(ChannelLayout::Surround71),
            _ => None,
        }
    }

    pub fn channel_count(&self) -> u32 {
        match self {
            ChannelLayout::Stereo => 2,
            ChannelLayout::Surround51 => 6,
            ChannelLayout::Surround71 => 8,
        }
    }

    pub fn is_surround(&self) -> bool {
        !matches!(self, ChannelLayout::Stereo)
    }

    /// Label used for the intermediate encode file
    pub fn label(&self) -> &'static str {
        if self.is_surround() {
            "Surround"
        } else {
            "Stereo"
        }
    }
}

/// Channel mixing applied to an output audio stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum ChannelMix {
    /// Keep the source channel layout
    Passthrough,
    /// Mix down to the given channel count
    Downmix { channels: u32 },
}

impl ChannelMix {
    pub fn target_channels(&self) -> Option<u32> {
        match self {
            ChannelMix::Passthrough => None,
            ChannelMix::Downmix { channels } => Some(*channels),
        }
    }
}

/// Volume multiplier applied to every re-encoded audio stream.
///
/// Always positive and finite; deserializing or parsing anything else fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct VolumeBoost(f64);

impl VolumeBoost {
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;

    /// Returns `None` unless the multiplier is positive and finite
    pub fn new(multiplier: f64) -> Option<Self> {
        if multiplier.is_finite() && multiplier > 0.0 {
            Some(Self(multiplier))
        } else {
            None
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.0
    }

    /// A multiplier of 1.0 leaves the audio untouched
    pub fn is_identity(&self) -> bool {
        self.0 == 1.0
    }

    /// ffmpeg audio filter expression, e.g. `volume=2.0`
    pub fn filter(&self) -> String {
        if self.0.fract() == 0.0 {
            format!("volume={:.1}", self.0)
        } else {
            format!("volume={}", self.0)
        }
    }
}

impl Default for VolumeBoost {
    fn default() -> Self {
        Self(Self::DEFAULT_MULTIPLIER)
    }
}

impl TryFrom<f64> for VolumeBoost {
    type Error = String;

    fn try_from(multiplier: f64) -> Result<Self, Self::Error> {
        Self::new(multiplier)
            .ok_or_else(|| format!("volume boost must be a positive number, got {}", multiplier))
    }
}

impl From<VolumeBoost> for f64 {
    fn from(volume: VolumeBoost) -> Self {
        volume.0
    }
}

impl FromStr for VolumeBoost {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let multiplier: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid volume boost: {}", s))?;
        Self::try_from(multiplier)
    }
}

impl fmt::Display for VolumeBoost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bitrates of the native surround stream, by source layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurroundBitrates {
    pub six_channel: Bitrate,
    pub eight_channel: Bitrate,
}

impl Default for SurroundBitrates {
    fn default() -> Self {
        Self {
            six_channel: Bitrate::from_kbps(448),
            eight_channel: Bitrate::from_kbps(640),
        }
    }
}

/// Profile-level knobs supplied by configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    /// ffmpeg audio encoder name
    pub codec: String,
    pub stereo_bitrate: Bitrate,
    pub surround_bitrates: SurroundBitrates,
    /// Multiplier for the `volume` filter; 1.0 disables it
    pub volume_boost: VolumeBoost,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            codec: "libfdk_aac".to_string(),
            stereo_bitrate: Bitrate::from_kbps(192),
            surround_bitrates: SurroundBitrates::default(),
            volume_boost: VolumeBoost::default(),
        }
    }
}

/// One output audio stream of a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioStreamProfile {
    pub bitrate: Bitrate,
    pub channel_mix: ChannelMix,
    pub title: String,
}

/// Encoding parameters chosen for a source channel layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodingProfile {
    layout: ChannelLayout,
    source_audio_index: usize,
    audio_codec: String,
    streams: Vec<AudioStreamProfile>,
    volume: VolumeBoost,
}

impl EncodingProfile {
    pub fn new(
        layout: ChannelLayout,
        source_audio_index: usize,
        audio_codec: impl Into<String>,
        streams: Vec<AudioStreamProfile>,
        volume: VolumeBoost,
    ) -> Self {
        Self {
            layout,
            source_audio_index,
            audio_codec: audio_codec.into(),
            streams,
            volume,
        }
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn source_channels(&self) -> u32 {
        self.layout.channel_count()
    }

    /// Audio-relative index of the source stream every output is encoded from
    pub fn source_audio_index(&self) -> usize {
        self.source_audio_index
    }

    pub fn audio_codec(&self) -> &str {
        &self.audio_codec
    }

    pub fn streams(&self) -> &[AudioStreamProfile] {
        &self.streams
    }

    pub fn volume(&self) -> VolumeBoost {
        self.volume
    }

    pub fn bitrates(&self) -> Vec<Bitrate> {
        self.streams.iter().map(|s| s.bitrate).collect()
    }

    /// (output stream index, title) pairs in output order
    pub fn stream_titles(&self) -> Vec<(usize, &str)> {
        self.streams
            .iter()
            .enumerate()
            .map(|(i, s)| (i, s.title.as_str()))
            .collect()
    }
}

/// A re-encoded audio stream in the output container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioOutputStream {
    /// Audio-relative index of the input stream
    pub source_index: usize,
    pub codec: String,
    pub bitrate: Bitrate,
    /// Output channel count when downmixing
    pub channels: Option<u32>,
    pub title: String,
}

/// How input streams are carried into the output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StreamLayout {
    /// Every input stream copied verbatim
    StreamCopy,
    /// Video copied, subtitles copied if present, audio re-encoded
    Profile {
        audio: Vec<AudioOutputStream>,
        volume: Option<VolumeBoost>,
    },
}

/// Declarative description of one encode invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputStreamSpec {
    input: PathBuf,
    output: PathBuf,
    layout: StreamLayout,
    title: Option<String>,
}

impl OutputStreamSpec {
    /// Copy every stream without re-encoding
    pub fn stream_copy(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            layout: StreamLayout::StreamCopy,
            title: None,
        }
    }

    /// Re-encode audio according to a profile
    pub fn from_profile(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        profile: &EncodingProfile,
        title: impl Into<String>,
    ) -> Self {
        let audio = profile
            .streams()
            .iter()
            .map(|stream| AudioOutputStream {
                source_index: profile.source_audio_index(),
                codec: profile.audio_codec().to_string(),
                bitrate: stream.bitrate,
                channels: stream.channel_mix.target_channels(),
                title: stream.title.clone(),
            })
            .collect();
        let volume = Some(profile.volume()).filter(|v| !v.is_identity());

        Self {
            input: input.into(),
            output: output.into(),
            layout: StreamLayout::Profile { audio, volume },
            title: Some(title.into()),
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn layout(&self) -> &StreamLayout {
        &self.layout
    }

    /// Global container title
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn audio_streams(&self) -> &[AudioOutputStream] {
        match &self.layout {
            StreamLayout::StreamCopy => &[],
            StreamLayout::Profile { audio, .. } => audio,
        }
    }
}
