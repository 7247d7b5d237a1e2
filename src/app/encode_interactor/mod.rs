// Encode interactor - Orchestrates parse, probe, profile selection, encode and mux

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::app::report::{RunMode, RunReport};
use crate::app::{ensure_input_exists, prepare_output_dir, RunOptions};
use crate::config::EncoderConfig;
use crate::domain::rules::*;
use crate::error::ReencodeResult;
use crate::ports::*;

/// Interactor for the default profile-based run
pub struct EncodeInteractor {
    probe_port: Arc<dyn ProbePort>,
    encode_port: Arc<dyn EncodePort>,
    mux_port: Arc<dyn MuxPort>,
    config: Arc<EncoderConfig>,
}

impl EncodeInteractor {
    /// Create new encode interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        encode_port: Arc<dyn EncodePort>,
        mux_port: Arc<dyn MuxPort>,
        config: Arc<EncoderConfig>,
    ) -> Self {
        Self {
            probe_port,
            encode_port,
            mux_port,
            config,
        }
    }

    /// Run the full pipeline on `input`.
    ///
    /// Steps run in a fixed order and the first failure aborts the run.
    /// Partially written outputs are left in place; a rerun overwrites them.
    pub async fn run(&self, input: &Path, options: RunOptions) -> ReencodeResult<RunReport> {
        ensure_input_exists(input)?;

        let descriptor = FilenameParser::parse(input)?;

        let tracks = self.probe_port.probe_tracks(input).await?;
        info!(
            "{} reported {} tracks ({} audio)",
            self.probe_port.name(),
            tracks.len(),
            tracks.iter().filter(|t| t.is_audio()).count()
        );

        let profile = ProfileSelector::select_profile(&tracks, &self.config.audio)?;

        let output_dir = &self.config.output_dir;
        let container = &self.config.container;
        let spec = OutputSpecBuilder::build(&descriptor, &profile, output_dir, container);
        let final_output = OutputSpecBuilder::final_output(&descriptor, output_dir, container);

        let report = RunReport {
            mode: RunMode::Encode,
            commands: vec![
                self.encode_port.describe(&spec),
                self.mux_port.describe(spec.output(), &final_output),
            ],
            source: descriptor,
            profile: Some(profile),
            encoded: spec.output().to_path_buf(),
            output: final_output,
            spec,
            dry_run: options.dry_run,
        };

        if options.dry_run {
            info!("Dry run, skipping encode and mux");
            return Ok(report);
        }

        prepare_output_dir(output_dir).await?;

        info!(
            "Encoding {} audio stream(s) into \"{}\"",
            report.spec.audio_streams().len(),
            report.encoded.display()
        );
        self.encode_port.encode(&report.spec).await?;
        info!("Encode complete");

        info!("Starting mux of \"{}\"", report.encoded.display());
        self.mux_port.mux(&report.encoded, &report.output).await?;
        info!("Muxing complete for \"{}\"", report.output.display());

        if self.config.remove_intermediate && report.encoded != report.output {
            info!("Removing intermediate \"{}\"", report.encoded.display());
            tokio::fs::remove_file(&report.encoded).await?;
        }

        Ok(report)
    }
}
