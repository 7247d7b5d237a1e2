//! Builder for executing external tool commands

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::error::{ReencodeError, ReencodeResult};

/// Output captured from a tool execution
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8)
    pub stdout: String,
    /// Captured standard error (lossy UTF-8)
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// Runs without a time limit unless [`ToolCommand::timeout`] is set.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
    success_codes: Vec<i32>,
}

impl ToolCommand {
    /// Create a new command for the given program path
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
            success_codes: vec![0],
        }
    }

    /// Append a single argument
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Set the maximum execution time
    pub fn timeout(&mut self, d: Option<Duration>) -> &mut Self {
        self.timeout = d;
        self
    }

    /// Exit codes accepted as success (default `[0]`)
    pub fn success_codes(&mut self, codes: &[i32]) -> &mut Self {
        self.success_codes = codes.to_vec();
        self
    }

    /// Program followed by its arguments
    pub fn command_line(&self) -> Vec<String> {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.args.iter().cloned())
            .collect()
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// Fails with [`ReencodeError::Tool`] if the process cannot be spawned,
    /// times out, or exits with a code outside the accepted set.
    pub async fn execute(&self) -> ReencodeResult<ToolOutput> {
        let program_name = self.program_name();
        debug!("Running {:?}", self.command_line());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(|e| ReencodeError::Tool {
            tool: program_name.clone(),
            message: format!("failed to spawn: {e}"),
        })?;

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| ReencodeError::Tool {
                    tool: program_name.clone(),
                    message: format!("timed out after {:?}", limit),
                })?,
            None => child.wait_with_output().await,
        }
        .map_err(|e| ReencodeError::Tool {
            tool: program_name.clone(),
            message: format!("I/O error waiting for process: {e}"),
        })?;

        let tool_output = ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        let accepted = output
            .status
            .code()
            .is_some_and(|code| self.success_codes.contains(&code));
        if !accepted {
            return Err(ReencodeError::Tool {
                tool: program_name,
                message: format!(
                    "exited with status {}: {}",
                    output.status,
                    tool_output.stderr.trim()
                ),
            });
        }

        Ok(tool_output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_starts_with_program() {
        let mut cmd = ToolCommand::new("ffmpeg");
        cmd.args(["-y", "-i"]).arg("in.mkv");
        assert_eq!(cmd.command_line(), vec!["ffmpeg", "-y", "-i", "in.mkv"]);
    }

    #[tokio::test]
    async fn execute_nonexistent_tool() {
        let result = ToolCommand::new("nonexistent_tool_xyz_12345").execute().await;
        match result {
            Err(ReencodeError::Tool { tool, message }) => {
                assert_eq!(tool, "nonexistent_tool_xyz_12345");
                assert!(message.contains("failed to spawn"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn execute_reports_nonzero_exit() {
        let result = ToolCommand::new("false").execute().await;
        assert!(result.is_err());

        let result = ToolCommand::new("false").success_codes(&[0, 1]).execute().await;
        assert!(result.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn timeout_fires() {
        let result = ToolCommand::new("sleep")
            .arg("10")
            .timeout(Some(Duration::from_millis(100)))
            .execute()
            .await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("timed out"), "unexpected error: {err}");
    }
}
