//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use tracing::info;

use crate::adapters::TomlConfigAdapter;
use crate::cli::Cli;
use crate::config::EncoderConfig;
use crate::error::ReencodeResult;

/// Resolved configuration and where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfiguration {
    pub config: EncoderConfig,
    /// TOML file the values were read from, if any
    pub source: Option<PathBuf>,
    /// Number of settings taken from flags or the environment
    pub cli_overrides: usize,
}

impl LoadedConfiguration {
    /// Report the configuration origin. Called once logging is installed.
    pub fn log_origin(&self) {
        match &self.source {
            Some(path) => info!("Loaded configuration from: {}", path.display()),
            None => info!("No configuration file, using defaults"),
        }
        if self.cli_overrides > 0 {
            info!("Applied {} command-line configuration overrides", self.cli_overrides);
        }
    }
}

/// Build the run configuration following precedence: CLI > Env > File > Defaults.
///
/// Environment variables are read by clap into the same fields as their
/// flags, so both are applied in one step.
pub fn initialize_configuration_hierarchy(cli: &Cli) -> ReencodeResult<LoadedConfiguration> {
    let adapter = match &cli.overrides.config {
        Some(path) => TomlConfigAdapter::new(path),
        None => TomlConfigAdapter::discover(),
    };

    let mut config = adapter.load()?;
    let cli_overrides = apply_cli_configuration_overrides(&mut config, cli);
    config.validate()?;

    Ok(LoadedConfiguration {
        config,
        source: adapter.config_file_path().map(PathBuf::from),
        cli_overrides,
    })
}

/// Apply CLI argument overrides to configuration, returning how many were set
fn apply_cli_configuration_overrides(config: &mut EncoderConfig, cli: &Cli) -> usize {
    let args = &cli.overrides;
    let mut cli_overrides = 0;

    if let Some(level) = args.log_level {
        config.logging.level = level;
        cli_overrides += 1;
    }
    if let Some(format) = args.log_format {
        config.logging.format = format;
        cli_overrides += 1;
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
        cli_overrides += 1;
    }
    if let Some(volume) = args.volume {
        config.audio.volume_boost = volume;
        cli_overrides += 1;
    }
    if let Some(codec) = &args.audio_codec {
        config.audio.codec = codec.clone();
        cli_overrides += 1;
    }
    if let Some(probe) = args.probe {
        config.tools.probe = probe;
        cli_overrides += 1;
    }
    if cli.run.remove_intermediate {
        config.remove_intermediate = true;
        cli_overrides += 1;
    }

    cli_overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{ConfigArgs, RunArgs};
    use crate::config::ProbeBackend;
    use crate::utils::logging::LogLevel;
    use crate::domain::model::VolumeBoost;

    fn cli_with(overrides: ConfigArgs) -> Cli {
        Cli {
            input: PathBuf::from("Film (2001) Orig.mkv"),
            overrides,
            run: RunArgs::default(),
        }
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "output_dir = \"/from/file\"\n[audio]\nvolume_boost = 3.0\ncodec = \"aac\"\n",
        )
        .unwrap();

        let cli = cli_with(ConfigArgs {
            config: Some(path),
            volume: VolumeBoost::new(1.0),
            log_level: Some(LogLevel::Debug),
            probe: Some(ProbeBackend::Ffprobe),
            ..ConfigArgs::default()
        });

        let loaded = initialize_configuration_hierarchy(&cli).unwrap();
        assert_eq!(loaded.source.as_deref(), cli.overrides.config.as_deref());
        assert_eq!(loaded.cli_overrides, 3);

        let config = loaded.config;
        assert_eq!(config.output_dir, PathBuf::from("/from/file"));
        assert_eq!(config.audio.codec, "aac");
        assert_eq!(config.audio.volume_boost.multiplier(), 1.0);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.tools.probe, ProbeBackend::Ffprobe);
    }

    #[test]
    fn invalid_file_value_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mp4.toml");
        std::fs::write(&path, "container = \"mp4\"\n").unwrap();

        let cli = cli_with(ConfigArgs {
            config: Some(path),
            ..ConfigArgs::default()
        });
        assert!(initialize_configuration_hierarchy(&cli).is_err());
    }
}
