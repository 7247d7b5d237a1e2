// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod mux_mkvmerge;
pub mod probe_ffprobe;
pub mod probe_mediainfo;
pub mod process;
pub mod toml_config;
pub mod tools;

// Re-export adapters
pub use exec_ffmpeg::FFmpegAdapter;
pub use mux_mkvmerge::MkvMergeAdapter;
pub use probe_ffprobe::FFprobeAdapter;
pub use probe_mediainfo::MediaInfoProbeAdapter;
pub use process::{ToolCommand, ToolOutput};
pub use toml_config::TomlConfigAdapter;
pub use tools::ToolPath;
