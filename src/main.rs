//! reencoder
//!
//! Re-encodes the audio of a media file named after the `Orig.` convention
//! and muxes the result into a file named after the parsed title.
//!
//! # Usage
//!
//! ```bash
//! reencoder "Blade Runner (1982) Orig.mkv"
//! reencoder --dry-run "Show - S01E02 - Pilot (2010) Orig.mp4"
//! reencoder --copy "Blade Runner (1982) Orig.mkv"
//! ```

use std::process::ExitCode;

use clap::Parser;

use reencoder::cli::{commands, Cli};
use reencoder::error::ReencodeError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match commands::execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<ReencodeError>()
                .map(ReencodeError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}
