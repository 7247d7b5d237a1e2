use std::sync::Arc;

use tracing::debug;

use crate::adapters::{FFmpegAdapter, FFprobeAdapter, MediaInfoProbeAdapter, MkvMergeAdapter, ToolPath};
use crate::app::{copy_interactor::CopyInteractor, encode_interactor::EncodeInteractor};
use crate::config::{EncoderConfig, ProbeBackend};
use crate::ports::{EncodePort, MuxPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn encode_interactor(&self) -> Arc<EncodeInteractor>;
    fn copy_interactor(&self) -> Arc<CopyInteractor>;
}

/// Wires the external-tool adapters into the interactors
pub struct DefaultAppContainer {
    encode_interactor: Arc<EncodeInteractor>,
    copy_interactor: Arc<CopyInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: Arc<EncoderConfig>) -> Self {
        let tools = &config.tools;
        let timeout = tools.timeout();

        let probe_port: Arc<dyn ProbePort> = match tools.probe {
            ProbeBackend::Mediainfo => Arc::new(MediaInfoProbeAdapter::new(
                ToolPath::discover("mediainfo", tools.mediainfo.as_deref()),
                timeout,
            )),
            ProbeBackend::Ffprobe => Arc::new(FFprobeAdapter::new(
                ToolPath::discover("ffprobe", tools.ffprobe.as_deref()),
                timeout,
            )),
        };
        let encode_port: Arc<dyn EncodePort> = Arc::new(FFmpegAdapter::new(
            ToolPath::discover("ffmpeg", tools.ffmpeg.as_deref()),
            timeout,
        ));
        let mux_port: Arc<dyn MuxPort> = Arc::new(MkvMergeAdapter::new(
            ToolPath::discover("mkvmerge", tools.mkvmerge.as_deref()),
            timeout,
        ));
        debug!("Using {} probe backend", probe_port.name());

        Self::with_ports(probe_port, encode_port, mux_port, config)
    }

    /// Build the container around arbitrary port implementations
    pub fn with_ports(
        probe_port: Arc<dyn ProbePort>,
        encode_port: Arc<dyn EncodePort>,
        mux_port: Arc<dyn MuxPort>,
        config: Arc<EncoderConfig>,
    ) -> Self {
        let encode_interactor = Arc::new(EncodeInteractor::new(
            probe_port,
            Arc::clone(&encode_port),
            mux_port,
            Arc::clone(&config),
        ));
        let copy_interactor = Arc::new(CopyInteractor::new(encode_port, config));

        Self {
            encode_interactor,
            copy_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn encode_interactor(&self) -> Arc<EncodeInteractor> {
        Arc::clone(&self.encode_interactor)
    }

    fn copy_interactor(&self) -> Arc<CopyInteractor> {
        Arc::clone(&self.copy_interactor)
    }
}
