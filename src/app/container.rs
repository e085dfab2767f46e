use std::sync::Arc;

use tracing::info;

use crate::adapters::{ClientConfig, HeadlessMediaEngine, HttpAnalysisAdapter, LocalPreviewStore};
use crate::app::{PlaybackInteractor, Session, SubmissionInteractor};
use crate::error::ClientResult;
use crate::ports::{AnalysisPort, MediaEnginePort, PreviewPort};

/// Wires ports into sessions.
///
/// Sessions own single-threaded engine and preview ports; only the analysis
/// port is shared across threads.
pub trait AppContainer {
    fn analysis_port(&self) -> Arc<dyn AnalysisPort>;
    fn session(&self, engine: Box<dyn MediaEnginePort>, previews: Box<dyn PreviewPort>) -> Session;
}

pub struct DefaultAppContainer {
    config: ClientConfig,
    analysis_port: Arc<dyn AnalysisPort>,
}

impl DefaultAppContainer {
    /// Wire the HTTP analysis adapter described by `config`
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let endpoint = config.endpoint_url()?;
        let adapter = HttpAnalysisAdapter::new(&endpoint, config.contract)?;
        info!("Analysis service: {}", adapter.describe());

        Ok(Self::with_analysis_port(config, Arc::new(adapter)))
    }

    pub fn with_analysis_port(config: ClientConfig, analysis_port: Arc<dyn AnalysisPort>) -> Self {
        Self {
            config,
            analysis_port,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session backed by the headless engine and an in-memory preview store.
    ///
    /// The returned engine and store observe the session's player and previews.
    pub fn headless_session(&self) -> (Session, HeadlessMediaEngine, LocalPreviewStore) {
        let engine = HeadlessMediaEngine::new();
        let previews = LocalPreviewStore::new();
        let session = self.session(Box::new(engine.clone()), Box::new(previews.clone()));
        (session, engine, previews)
    }
}

impl AppContainer for DefaultAppContainer {
    fn analysis_port(&self) -> Arc<dyn AnalysisPort> {
        Arc::clone(&self.analysis_port)
    }

    fn session(&self, engine: Box<dyn MediaEnginePort>, previews: Box<dyn PreviewPort>) -> Session {
        Session::new(
            SubmissionInteractor::new(self.analysis_port()),
            PlaybackInteractor::new(engine, previews),
        )
    }
}
