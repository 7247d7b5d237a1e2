//! FFmpeg execution adapter
//!
//! Translates an [`OutputStreamSpec`] into an ffmpeg command line and runs it.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::adapters::process::ToolCommand;
use crate::adapters::tools::ToolPath;
use crate::domain::model::*;
use crate::error::ReencodeResult;
use crate::ports::EncodePort;

/// FFmpeg-based encode adapter
#[derive(Debug, Clone)]
pub struct FFmpegAdapter {
    tool: ToolPath,
    timeout: Option<Duration>,
}

impl FFmpegAdapter {
    pub fn new(tool: ToolPath, timeout: Option<Duration>) -> Self {
        Self { tool, timeout }
    }

    /// ffmpeg arguments (without the program) for `spec`
    pub fn build_args(spec: &OutputStreamSpec) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-hide_banner".into(),
            "-y".into(),
            "-i".into(),
            spec.input().to_string_lossy().into_owned(),
        ];

        match spec.layout() {
            StreamLayout::StreamCopy => {
                args.extend(["-map", "0", "-c", "copy"].map(String::from));
            }
            StreamLayout::Profile { audio, volume } => {
                args.extend(["-map".to_string(), "0:v".to_string()]);
                for stream in audio {
                    args.push("-map".into());
                    args.push(format!("0:a:{}", stream.source_index));
                }
                args.extend(["-map", "0:s?", "-c:v", "copy", "-c:s", "copy"].map(String::from));

                if let Some(volume) = volume {
                    args.push("-filter:a".into());
                    args.push(volume.filter());
                }

                for (i, stream) in audio.iter().enumerate() {
                    args.push(format!("-c:a:{i}"));
                    args.push(stream.codec.clone());
                    args.push(format!("-b:a:{i}"));
                    args.push(stream.bitrate.to_string());
                    if let Some(channels) = stream.channels {
                        args.push(format!("-ac:a:{i}"));
                        args.push(channels.to_string());
                    }
                    args.push(format!("-metadata:s:a:{i}"));
                    args.push(format!("title={}", stream.title));
                }
            }
        }

        if let Some(title) = spec.title() {
            args.push("-metadata".into());
            args.push(format!("title={title}"));
        }

        args.push(spec.output().to_string_lossy().into_owned());
        args
    }

    fn command(&self, spec: &OutputStreamSpec) -> ToolCommand {
        let mut cmd = ToolCommand::new(self.tool.program());
        cmd.args(Self::build_args(spec)).timeout(self.timeout);
        cmd
    }
}

#[async_trait]
impl EncodePort for FFmpegAdapter {
    fn describe(&self, spec: &OutputStreamSpec) -> Vec<String> {
        self.command(spec).command_line()
    }

    async fn encode(&self, spec: &OutputStreamSpec) -> ReencodeResult<()> {
        self.tool.require()?;
        let cmd = self.command(spec);
        debug!("{:?}", cmd.command_line());

        info!("Writing \"{}\"", spec.output().display());
        cmd.execute().await?;
        Ok(())
    }
}
