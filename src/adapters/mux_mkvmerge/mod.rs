//! mkvmerge mux adapter
//!
//! Repackages the encode output into the final Matroska file.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::adapters::process::ToolCommand;
use crate::adapters::tools::ToolPath;
use crate::error::ReencodeResult;
use crate::ports::MuxPort;

/// mkvmerge exits with 1 when it finished with warnings
const MKVMERGE_SUCCESS_CODES: &[i32] = &[0, 1];

/// Mux adapter backed by `mkvmerge`
#[derive(Debug, Clone)]
pub struct MkvMergeAdapter {
    tool: ToolPath,
    timeout: Option<Duration>,
}

impl MkvMergeAdapter {
    pub fn new(tool: ToolPath, timeout: Option<Duration>) -> Self {
        Self { tool, timeout }
    }

    fn command(&self, input: &Path, output: &Path) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.tool.program());
        cmd.arg("-o")
            .arg(output.to_string_lossy())
            .arg(input.to_string_lossy())
            .success_codes(MKVMERGE_SUCCESS_CODES)
            .timeout(self.timeout);
        cmd
    }
}

#[async_trait]
impl MuxPort for MkvMergeAdapter {
    fn describe(&self, input: &Path, output: &Path) -> Vec<String> {
        self.command(input, output).command_line()
    }

    async fn mux(&self, input: &Path, output: &Path) -> ReencodeResult<()> {
        self.tool.require()?;
        let cmd = self.command(input, output);
        debug!("{:?}", cmd.command_line());

        let result = cmd.execute().await?;
        if result.status.code() == Some(1) {
            warn!("mkvmerge finished with warnings: {}", result.stdout.trim());
        }

        info!("Muxed \"{}\" into \"{}\"", input.display(), output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReencodeError;

    #[test]
    fn describe_builds_output_then_input() {
        let adapter = MkvMergeAdapter::new(ToolPath::at("mkvmerge", "mkvmerge"), None);
        let line = adapter.describe(
            Path::new("Film (2001) Stereo.mkv"),
            Path::new("Film (2001).mkv"),
        );
        assert_eq!(line, vec!["mkvmerge", "-o", "Film (2001).mkv", "Film (2001) Stereo.mkv"]);
    }

    #[tokio::test]
    async fn missing_tool_fails_before_spawning() {
        let adapter = MkvMergeAdapter::new(ToolPath::discover("nonexistent_tool_xyz_12345", None), None);
        let err = adapter
            .mux(Path::new("a.mkv"), Path::new("b.mkv"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReencodeError::ToolNotFound { .. }));
    }
}
