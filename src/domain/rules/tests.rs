// Unit tests for business rules

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::domain::errors::*;
    use crate::domain::model::*;
    use crate::domain::rules::*;

    fn settings() -> ProfileSettings {
        ProfileSettings::default()
    }

    #[test]
    fn test_parse_movie() {
        let d = FilenameParser::parse("Sample Movie (1999) Orig.mp4").unwrap();
        assert_eq!(d.shape(), FilenameShape::Movie);
        assert_eq!(d.title(), "Sample Movie");
        assert_eq!(d.year(), "1999");
        assert_eq!(d.extension(), "mp4");
        assert_eq!(d.season(), None);
        assert_eq!(d.episode(), None);
        assert_eq!(d.output_base(), "Sample Movie (1999)");
    }

    #[test]
    fn test_parse_movie_with_single_separator_in_title() {
        let d = FilenameParser::parse("Alien - Directors Cut (1979) Orig.mkv").unwrap();
        assert_eq!(d.shape(), FilenameShape::Movie);
        assert_eq!(d.title(), "Alien - Directors Cut");
        assert_eq!(d.output_base(), "Alien - Directors Cut (1979)");
    }

    #[test]
    fn test_parse_episode() {
        let d = FilenameParser::parse("Example Show - S01 - Pilot (2020) Orig.mkv").unwrap();
        assert_eq!(d.shape(), FilenameShape::Episode);
        assert_eq!(d.title(), "Example Show");
        assert_eq!(d.season(), Some("S01"));
        assert_eq!(d.episode(), Some("Pilot"));
        assert_eq!(d.year(), "2020");
        assert_eq!(d.extension(), "mkv");
        assert_eq!(d.output_base(), "Example Show - S01 - Pilot (2020)");
    }

    #[test]
    fn test_parse_uses_only_the_file_name_component() {
        let d = FilenameParser::parse(Path::new("/media/in/Sample Movie (1999) Orig.mp4")).unwrap();
        assert_eq!(d.output_base(), "Sample Movie (1999)");
        assert_eq!(d.input(), Path::new("/media/in/Sample Movie (1999) Orig.mp4"));
    }

    #[test]
    fn test_classify_separator_boundary() {
        assert_eq!(FilenameParser::classify("A (2000) Orig.mkv"), FilenameShape::Movie);
        assert_eq!(FilenameParser::classify("A - B (2000) Orig.mkv"), FilenameShape::Movie);
        assert_eq!(FilenameParser::classify("A - B - C (2000) Orig.mkv"), FilenameShape::Episode);
        assert_eq!(
            FilenameParser::classify("A - B - C - D (2000) Orig.mkv"),
            FilenameShape::Episode
        );
    }

    #[test]
    fn test_three_separators_never_fall_back_to_movie_grammar() {
        // Matches the movie grammar, but the separator count selects the episode one.
        let err = FilenameParser::parse("A - B - C - D (2000) Orig.mkv").unwrap_err();
        assert_eq!(err.kind(), DomainErrorKind::InvalidFilenameFormat);
    }

    #[test]
    fn test_invalid_filenames() {
        for name in [
            "Sample Movie (1999).mp4",
            "Sample Movie 1999 Orig.mp4",
            "Sample Movie (1999) orig.mp4",
            "Sample Movie (19a9) Orig.mp4",
            "Sample_Movie (1999) Orig.mp4",
            "Show - S01 - Pilot 2020 Orig.mkv",
            "Show - S-01 - Pilot (2020) Orig.mkv",
            "",
        ] {
            let err = FilenameParser::parse(name).unwrap_err();
            assert_eq!(err.kind(), DomainErrorKind::InvalidFilenameFormat, "{:?}", name);
        }
    }

    #[test]
    fn test_extension_alphabet_is_permissive() {
        let d = FilenameParser::parse("Film (2001) Orig.kv").unwrap();
        assert_eq!(d.extension(), "kv");

        let d = FilenameParser::parse("Film (2001) Orig.m4v").unwrap();
        assert_eq!(d.extension(), "m4v");

        // Trailing text after the extension is not checked.
        let d = FilenameParser::parse("Film (2001) Orig.mkv.part").unwrap();
        assert_eq!(d.extension(), "mkv");
    }

    #[test]
    fn test_year_is_a_raw_token() {
        let d = FilenameParser::parse("Film (20011) Orig.mkv").unwrap();
        assert_eq!(d.year(), "20011");
    }

    #[test]
    fn test_select_stereo_profile() {
        let profile = ProfileSelector::select_profile(&[TrackInfo::audio(2)], &settings()).unwrap();
        assert_eq!(profile.layout(), ChannelLayout::Stereo);
        assert_eq!(profile.bitrates(), vec![Bitrate::from_kbps(192)]);
        assert_eq!(profile.stream_titles(), vec![(0, "Stereo")]);
        assert_eq!(profile.streams()[0].channel_mix, ChannelMix::Passthrough);
        assert_eq!(profile.audio_codec(), "libfdk_aac");
        assert_eq!(profile.volume().multiplier(), 2.0);
    }

    #[test]
    fn test_select_six_channel_profile() {
        let profile = ProfileSelector::select_profile(&[TrackInfo::audio(6)], &settings()).unwrap();
        assert_eq!(profile.layout(), ChannelLayout::Surround51);
        assert_eq!(
            profile.bitrates(),
            vec![Bitrate::from_kbps(448), Bitrate::from_kbps(192)]
        );
        assert_eq!(profile.stream_titles(), vec![(0, "Surround"), (1, "Stereo")]);
        assert_eq!(profile.streams()[1].channel_mix, ChannelMix::Downmix { channels: 2 });
    }

    #[test]
    fn test_select_eight_channel_profile() {
        let profile = ProfileSelector::select_profile(&[TrackInfo::audio(8)], &settings()).unwrap();
        assert_eq!(profile.layout(), ChannelLayout::Surround71);
        assert_eq!(
            profile.bitrates(),
            vec![Bitrate::from_kbps(640), Bitrate::from_kbps(192)]
        );
    }

    #[test]
    fn test_select_profile_rejects_missing_or_unknown_layouts() {
        for tracks in [vec![], vec![TrackInfo::audio(3)], vec![TrackInfo::video()]] {
            let err = ProfileSelector::select_profile(&tracks, &settings()).unwrap_err();
            assert_eq!(err.kind(), DomainErrorKind::InvalidChannelCount);
        }

        let err = ProfileSelector::select_profile(&[TrackInfo::audio(3)], &settings()).unwrap_err();
        assert_eq!(err.message(), "Unexpected channel count: 3");
    }

    #[test]
    fn test_select_profile_uses_global_maximum() {
        let tracks = [
            TrackInfo::video(),
            TrackInfo::audio(2),
            TrackInfo::audio(6),
            TrackInfo::subtitle(),
            TrackInfo::audio(2),
        ];
        let profile = ProfileSelector::select_profile(&tracks, &settings()).unwrap();
        assert_eq!(profile.layout(), ChannelLayout::Surround51);
        assert_eq!(profile.source_audio_index(), 1);
    }

    #[test]
    fn test_select_profile_ignores_non_audio_channels() {
        let tracks = [TrackInfo::new(TrackKind::Video, 8), TrackInfo::audio(2)];
        let profile = ProfileSelector::select_profile(&tracks, &settings()).unwrap();
        assert_eq!(profile.layout(), ChannelLayout::Stereo);

        let tracks = [TrackInfo::new(TrackKind::Other, 6)];
        assert!(ProfileSelector::select_profile(&tracks, &settings()).is_err());
    }

    #[test]
    fn test_select_profile_honors_settings() {
        let custom = ProfileSettings {
            codec: "aac".to_string(),
            stereo_bitrate: Bitrate::from_kbps(160),
            surround_bitrates: SurroundBitrates {
                six_channel: Bitrate::from_kbps(384),
                eight_channel: Bitrate::from_kbps(512),
            },
            volume_boost: VolumeBoost::new(1.0).unwrap(),
        };
        let profile = ProfileSelector::select_profile(&[TrackInfo::audio(6)], &custom).unwrap();
        assert_eq!(profile.audio_codec(), "aac");
        assert_eq!(
            profile.bitrates(),
            vec![Bitrate::from_kbps(384), Bitrate::from_kbps(160)]
        );
        assert!(profile.volume().is_identity());
    }

    #[test]
    fn test_build_surround_spec() {
        let d = FilenameParser::parse("Example Show - S01 - Pilot (2020) Orig.mkv").unwrap();
        let profile = ProfileSelector::select_profile(&[TrackInfo::audio(6)], &settings()).unwrap();
        let spec = OutputSpecBuilder::build(&d, &profile, Path::new("out"), "mkv");

        assert_eq!(
            spec.output(),
            Path::new("out/Example Show - S01 - Pilot (2020) Surround.mkv")
        );
        assert_eq!(spec.title(), Some("Example Show - S01 - Pilot (2020)"));

        let audio = spec.audio_streams();
        assert_eq!(audio.len(), 2);
        assert_eq!(audio[0].bitrate, Bitrate::from_kbps(448));
        assert_eq!(audio[0].channels, None);
        assert_eq!(audio[0].title, "Surround");
        assert_eq!(audio[1].bitrate, Bitrate::from_kbps(192));
        assert_eq!(audio[1].channels, Some(2));
        assert_eq!(audio[1].title, "Stereo");
        assert!(audio.iter().all(|a| a.source_index == 0));
    }

    #[test]
    fn test_build_copy_and_final_paths() {
        let d = FilenameParser::parse("Sample Movie (1999) Orig.mp4").unwrap();
        let copy = OutputSpecBuilder::build_copy(&d, Path::new("."), "mkv");
        assert_eq!(copy.output(), Path::new("./Sample Movie (1999) Copy.mkv"));
        assert_eq!(copy.layout(), &StreamLayout::StreamCopy);

        let fin = OutputSpecBuilder::final_output(&d, Path::new("."), "mkv");
        assert_eq!(fin, Path::new("./Sample Movie (1999).mkv"));
    }
}
