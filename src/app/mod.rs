// Application layer - Use case interactors

use std::path::Path;

use crate::error::{ReencodeError, ReencodeResult};

pub mod container;
pub mod copy_interactor;
pub mod encode_interactor;
pub mod report;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use copy_interactor::CopyInteractor;
pub use encode_interactor::EncodeInteractor;
pub use report::{RunMode, RunReport};

/// Per-invocation switches that are not part of the configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Build and report the commands without running them
    pub dry_run: bool,
}

pub(crate) fn ensure_input_exists(input: &Path) -> ReencodeResult<()> {
    if input.is_file() {
        Ok(())
    } else {
        Err(ReencodeError::InputFileNotFound {
            path: input.display().to_string(),
        })
    }
}

pub(crate) async fn prepare_output_dir(dir: &Path) -> ReencodeResult<()> {
    tokio::fs::create_dir_all(dir).await?;
    Ok(())
}
