//! reencoder library
//!
//! Parses the `Orig.` naming convention of a media file, picks an audio
//! encoding profile from its channel layout and drives ffmpeg, mediainfo
//! and mkvmerge to produce the renamed, re-encoded result.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{AppContainer, DefaultAppContainer, RunMode, RunOptions, RunReport};
pub use config::EncoderConfig;
pub use domain::errors::{DomainError, DomainErrorKind};
pub use domain::model::{EncodingProfile, OutputStreamSpec, SourceDescriptor, TrackInfo};
pub use error::{ReencodeError, ReencodeResult};
