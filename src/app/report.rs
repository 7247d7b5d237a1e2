//! Summary of a completed (or planned) run

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::model::*;

/// Which operation produced the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Profile-based encode followed by a mux
    Encode,
    /// Verbatim stream copy
    Copy,
}

/// Outcome of one run, printed by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub mode: RunMode,
    pub source: SourceDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<EncodingProfile>,
    pub spec: OutputStreamSpec,
    /// File written by the encode step
    pub encoded: PathBuf,
    /// Final file handed to the user
    pub output: PathBuf,
    /// External command lines, in execution order
    pub commands: Vec<Vec<String>>,
    pub dry_run: bool,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input:   {}", self.source.input().display())?;
        writeln!(f, "Shape:   {}", self.source.shape())?;
        writeln!(f, "Title:   {}", self.source.title())?;
        writeln!(f, "Year:    {}", self.source.year())?;
        if let (Some(season), Some(episode)) = (self.source.season(), self.source.episode()) {
            writeln!(f, "Season:  {}", season)?;
            writeln!(f, "Episode: {}", episode)?;
        }
        if let Some(profile) = &self.profile {
            let streams: Vec<String> = profile
                .streams()
                .iter()
                .map(|s| format!("{} {}", s.title, s.bitrate))
                .collect();
            writeln!(
                f,
                "Profile: {} ch -> {} ({})",
                profile.source_channels(),
                streams.join(", "),
                profile.audio_codec()
            )?;
        }
        if self.dry_run {
            for command in &self.commands {
                writeln!(f, "Would run: {}", shell_line(command))?;
            }
        }
        write!(f, "Output:  {}", self.output.display())
    }
}

/// Join a command line, quoting arguments that contain spaces
fn shell_line(command: &[String]) -> String {
    command
        .iter()
        .map(|arg| {
            if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains('\'') {
                format!("'{}'", arg.replace('\'', r"'\''"))
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
