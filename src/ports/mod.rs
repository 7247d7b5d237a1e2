// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::model::*;
use crate::error::ReencodeResult;

/// Port for media metadata probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &'static str;

    /// Probe a media file and return its tracks in stream order
    async fn probe_tracks(&self, file_path: &Path) -> ReencodeResult<Vec<TrackInfo>>;
}

/// Port for the encode step
#[async_trait]
pub trait EncodePort: Send + Sync {
    /// Command line that would run `spec`, for logging and dry runs
    fn describe(&self, spec: &OutputStreamSpec) -> Vec<String>;

    /// Run the encode, overwriting `spec.output()` if it exists
    async fn encode(&self, spec: &OutputStreamSpec) -> ReencodeResult<()>;
}

/// Port for the final repackaging step
#[async_trait]
pub trait MuxPort: Send + Sync {
    /// Command line that would mux `input` into `output`
    fn describe(&self, input: &Path, output: &Path) -> Vec<String>;

    /// Repackage `input` into `output`
    async fn mux(&self, input: &Path, output: &Path) -> ReencodeResult<()>;
}
