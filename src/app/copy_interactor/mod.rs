// Copy interactor - Lossless stream copy into a renamed container

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::app::report::{RunMode, RunReport};
use crate::app::{ensure_input_exists, prepare_output_dir, RunOptions};
use crate::config::EncoderConfig;
use crate::domain::rules::*;
use crate::error::ReencodeResult;
use crate::ports::*;

/// Interactor for the stream-copy operation
pub struct CopyInteractor {
    encode_port: Arc<dyn EncodePort>,
    config: Arc<EncoderConfig>,
}

impl CopyInteractor {
    pub fn new(encode_port: Arc<dyn EncodePort>, config: Arc<EncoderConfig>) -> Self {
        Self {
            encode_port,
            config,
        }
    }

    /// Copy every track of `input` into `"{base} Copy.{container}"`
    pub async fn copy(&self, input: &Path, options: RunOptions) -> ReencodeResult<RunReport> {
        ensure_input_exists(input)?;

        let descriptor = FilenameParser::parse(input)?;
        let output_dir = &self.config.output_dir;
        let spec = OutputSpecBuilder::build_copy(&descriptor, output_dir, &self.config.container);

        let report = RunReport {
            mode: RunMode::Copy,
            commands: vec![self.encode_port.describe(&spec)],
            source: descriptor,
            profile: None,
            encoded: spec.output().to_path_buf(),
            output: spec.output().to_path_buf(),
            spec,
            dry_run: options.dry_run,
        };

        if options.dry_run {
            info!("Dry run, skipping copy");
            return Ok(report);
        }

        prepare_output_dir(output_dir).await?;

        info!(
            "Starting copy of \"{}\" to \"{}\"",
            input.display(),
            report.output.display()
        );
        self.encode_port.encode(&report.spec).await?;
        info!("Copy completed");

        Ok(report)
    }
}
