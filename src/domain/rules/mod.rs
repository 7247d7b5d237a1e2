// Domain rules - Filename grammar, profile selection and output layout

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Separator between title, season marker and episode name
const SEPARATOR: &str = " - ";

/// Movie shape: `Title (Year) Orig.ext`
const MOVIE_PATTERN: &str = r"(?x)
    ^([a-zA-Z0-9\s\-]+)     # Title
    \s\(([0-9]+)\)          # Year
    \sOrig\.([mpkv4]+)      # Extension
";

/// Episode shape: `Title - Marker - Episode (Year) Orig.ext`
const EPISODE_PATTERN: &str = r"(?x)
    ^([a-zA-Z0-9\s]+)       # Title
    \s-\s                   # Separator
    (\w+)                   # Season/Episode marker
    \s-\s                   # Separator
    ([a-zA-Z0-9\s]+)        # Episode
    \s\(([0-9]+)\)          # Year
    \sOrig\.([mpkv4]+)      # Extension
";

fn movie_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MOVIE_PATTERN).expect("movie pattern is valid"))
}

fn episode_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EPISODE_PATTERN).expect("episode pattern is valid"))
}

/// Parser for the `Orig.` naming convention
pub struct FilenameParser;

impl FilenameParser {
    /// Guess the naming shape from the number of `" - "` separators.
    ///
    /// Two or more separators select the episode grammar. A movie title
    /// with two hyphenated sub-phrases is misclassified; existing libraries
    /// are named against this rule, so it is kept as is.
    pub fn classify(file_name: &str) -> FilenameShape {
        if file_name.matches(SEPARATOR).count() >= 2 {
            FilenameShape::Episode
        } else {
            FilenameShape::Movie
        }
    }

    /// Parse the file name of `input` into a descriptor.
    ///
    /// Only the last path component is matched. The grammar picked by
    /// [`FilenameParser::classify`] is the only one tried.
    pub fn parse(input: impl AsRef<Path>) -> Result<SourceDescriptor, DomainError> {
        let input = input.as_ref();
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                DomainError::invalid_filename_format(format!(
                    "Path has no file name: {}",
                    input.display()
                ))
            })?;

        info!("Parsing filename: {}", file_name);

        let descriptor = match Self::classify(&file_name) {
            FilenameShape::Episode => {
                info!("{} appears to be a TV show", file_name);
                let caps = episode_regex()
                    .captures(&file_name)
                    .ok_or_else(|| Self::no_match(&file_name, FilenameShape::Episode))?;
                SourceDescriptor::tv_episode(
                    input,
                    &caps[1],
                    &caps[2],
                    &caps[3],
                    &caps[4],
                    &caps[5],
                )
            }
            FilenameShape::Movie => {
                info!("{} appears to be a movie", file_name);
                let caps = movie_regex()
                    .captures(&file_name)
                    .ok_or_else(|| Self::no_match(&file_name, FilenameShape::Movie))?;
                SourceDescriptor::movie(input, &caps[1], &caps[2], &caps[3])
            }
        };

        info!("Setting output field to \"{}\"", descriptor.output_base());
        Ok(descriptor)
    }

    fn no_match(file_name: &str, shape: FilenameShape) -> DomainError {
        DomainError::invalid_filename_format(format!(
            "\"{}\" does not match the {} naming format",
            file_name, shape
        ))
    }
}

/// Business rules for audio profile selection
pub struct ProfileSelector;

impl ProfileSelector {
    /// Pick the profile for the highest audio channel count in `tracks`.
    ///
    /// Non-audio tracks are ignored whatever channel count they report.
    pub fn select_profile(
        tracks: &[TrackInfo],
        settings: &ProfileSettings,
    ) -> Result<EncodingProfile, DomainError> {
        let mut max_channels = 0;
        let mut source_index = 0;
        for (audio_index, track) in tracks.iter().filter(|t| t.is_audio()).enumerate() {
            if track.channel_count > max_channels {
                max_channels = track.channel_count;
                source_index = audio_index;
            }
        }

        info!("Channel Max: {}", max_channels);

        let layout = ChannelLayout::from_channel_count(max_channels).ok_or_else(|| {
            DomainError::invalid_channel_count(format!(
                "Unexpected channel count: {}",
                max_channels
            ))
        })?;

        let stereo = AudioStreamProfile {
            bitrate: settings.stereo_bitrate,
            channel_mix: ChannelMix::Passthrough,
            title: "Stereo".to_string(),
        };

        let streams = match layout {
            ChannelLayout::Stereo => vec![stereo],
            ChannelLayout::Surround51 | ChannelLayout::Surround71 => {
                let surround_bitrate = if layout == ChannelLayout::Surround51 {
                    settings.surround_bitrates.six_channel
                } else {
                    settings.surround_bitrates.eight_channel
                };
                vec![
                    AudioStreamProfile {
                        bitrate: surround_bitrate,
                        channel_mix: ChannelMix::Passthrough,
                        title: "Surround".to_string(),
                    },
                    AudioStreamProfile {
                        channel_mix: ChannelMix::Downmix { channels: 2 },
                        ..stereo
                    },
                ]
            }
        };

        let profile = EncodingProfile::new(
            layout,
            source_index,
            &settings.codec,
            streams,
            settings.volume_boost,
        );
        info!(
            "Setting audio bitrate to {}",
            profile
                .bitrates()
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>()
                .join("/")
        );
        Ok(profile)
    }
}

/// Builds the encode description for a parsed source
pub struct OutputSpecBuilder;

impl OutputSpecBuilder {
    /// Profile-based encode into `"{base} {Stereo|Surround}.{container}"`
    pub fn build(
        descriptor: &SourceDescriptor,
        profile: &EncodingProfile,
        output_dir: &Path,
        container: &str,
    ) -> OutputStreamSpec {
        let file_name = descriptor.output_file_name(Some(profile.layout().label()), container);
        let spec = OutputStreamSpec::from_profile(
            descriptor.input(),
            output_dir.join(file_name),
            profile,
            descriptor.output_base(),
        );
        debug!("Built output stream spec: {:?}", spec);
        spec
    }

    /// Verbatim stream copy into `"{base} Copy.{container}"`
    pub fn build_copy(
        descriptor: &SourceDescriptor,
        output_dir: &Path,
        container: &str,
    ) -> OutputStreamSpec {
        let file_name = descriptor.output_file_name(Some("Copy"), container);
        OutputStreamSpec::stream_copy(descriptor.input(), output_dir.join(file_name))
    }

    /// Final muxed file `"{base}.{container}"`
    pub fn final_output(
        descriptor: &SourceDescriptor,
        output_dir: &Path,
        container: &str,
    ) -> std::path::PathBuf {
        output_dir.join(descriptor.output_file_name(None, container))
    }
}

#[cfg(test)]
mod tests;
