//! Deepfake Analysis Client Library
//!
//! Client-side workflow for submitting a video file to a remote deepfake
//! analysis service and presenting the verdict with a synchronized preview.
//!
//! The workflow is driven through [`Session`]: file selection goes through the
//! validation gate, submission through the analysis port, and the verdict
//! feeds both the result presenter and the playback synchronizer.

pub mod adapters;
pub mod app;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use adapters::{ClientConfig, LogFormat, ServiceContract};
pub use app::container::{AppContainer, DefaultAppContainer};
pub use app::{Event, Session, ViewModel};
pub use domain::errors::{EngineError, InputError, TransportError, WorkflowError};
pub use domain::model::{Classification, Confidence, DisplayModel, FileHandle, SelectedMedia, Verdict, WorkflowState};
pub use error::{ClientError, ClientResult};

/// Install logging for the configured format
pub fn init(config: &ClientConfig) -> ClientResult<()> {
    config.validate()?;
    adapters::TracingLogAdapter::install(config.log_format);
    Ok(())
}
