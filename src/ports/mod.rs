// Ports - Interface definitions (contracts)

use crate::domain::errors::*;
use crate::domain::model::*;
use async_trait::async_trait;

/// Port for the remote analysis service
///
/// Implementations own the wire contract (field name, path, response shape);
/// callers only ever see a `Verdict` or a `WorkflowError`.
#[async_trait]
pub trait AnalysisPort: Send + Sync {
    /// Submit the media for analysis. Issues exactly one request per call.
    async fn analyze(&self, media: &SelectedMedia) -> Result<Verdict, WorkflowError>;

    /// Human-readable description of the target, used in logs
    fn describe(&self) -> String;
}

/// Port for the media playback engine
///
/// Minimal control surface over the player element.
pub trait MediaEnginePort {
    /// Point the player at a preview source
    fn load(&mut self, source: &PreviewUrl) -> Result<(), EngineError>;

    /// Start or resume playback
    fn play(&mut self) -> Result<(), EngineError>;

    /// Pause playback
    fn pause(&mut self) -> Result<(), EngineError>;

    /// Detach the current source, if any
    fn unload(&mut self);
}

/// Port for locally created preview resources
pub trait PreviewPort {
    /// Create a preview URL for the given media
    fn acquire(&mut self, media: &SelectedMedia) -> PreviewUrl;

    /// Release a preview URL previously returned by `acquire`
    fn release(&mut self, url: &PreviewUrl);
}
