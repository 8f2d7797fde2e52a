use std::sync::Arc;

use crate::adapters::{FFmpegAdapter, FFprobeAdapter};
use crate::app::{
    concat_interactor::ConcatInteractor, inspect_interactor::InspectInteractor,
    render_interactor::RenderInteractor,
};
use crate::config::SplicerConfig;
use crate::ports::{ExecutePort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn render_interactor(&self) -> Arc<RenderInteractor>;
    fn concat_interactor(&self) -> Arc<ConcatInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
    fn probe_port(&self) -> Arc<dyn ProbePort>;
}

pub struct DefaultAppContainer {
    probe_port: Arc<dyn ProbePort>,
    render_interactor: Arc<RenderInteractor>,
    concat_interactor: Arc<ConcatInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
}

impl DefaultAppContainer {
    /// Wire the ffmpeg/ffprobe adapters
    pub fn new(config: &SplicerConfig) -> Self {
        let probe_port: Arc<dyn ProbePort> =
            Arc::new(FFprobeAdapter::new(config.engine.ffprobe_path.as_str()));
        let execute_port: Arc<dyn ExecutePort> = Arc::new(FFmpegAdapter::new());
        Self::with_ports(config, probe_port, execute_port)
    }

    /// Wire arbitrary port implementations
    pub fn with_ports(
        config: &SplicerConfig,
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
    ) -> Self {
        let render_interactor = Arc::new(RenderInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&execute_port),
            config.engine.clone(),
            config.rules.clone(),
        ));

        let concat_interactor = Arc::new(ConcatInteractor::new(
            Arc::clone(&execute_port),
            config.engine.clone(),
        ));

        let inspect_interactor = Arc::new(InspectInteractor::new(Arc::clone(&probe_port)));

        Self {
            probe_port,
            render_interactor,
            concat_interactor,
            inspect_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn render_interactor(&self) -> Arc<RenderInteractor> {
        Arc::clone(&self.render_interactor)
    }

    fn concat_interactor(&self) -> Arc<ConcatInteractor> {
        Arc::clone(&self.concat_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }

    fn probe_port(&self) -> Arc<dyn ProbePort> {
        Arc::clone(&self.probe_port)
    }
}
