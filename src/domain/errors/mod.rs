// Domain errors - Failure taxonomy for the submission workflow

use std::fmt;

/// Failures detected before any network activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Picker was cancelled or nothing is selected
    NoFileSelected,
    /// Declared media type is not in the video category
    NotAVideo { mime_type: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NoFileSelected => write!(f, "no file selected"),
            InputError::NotAVideo { .. } => write!(f, "not a valid video file"),
        }
    }
}

impl std::error::Error for InputError {}

/// Network failure or non-success status from the analysis service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Service answered with a non-2xx status
    Status(u16),
    /// Request could not be sent or the body could not be read
    Network(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Status(_) => write!(f, "Failed to analyze video"),
            TransportError::Network(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

/// Error carried by `WorkflowState::Failed`
///
/// Every variant is recoverable: input errors by re-selecting, transport and
/// protocol errors by re-submitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    Input(InputError),
    Transport(TransportError),
    /// Response arrived but could not be turned into a verdict
    Protocol { detail: String },
}

impl WorkflowError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        WorkflowError::Protocol {
            detail: detail.into(),
        }
    }

    /// Message shown in the error banner
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowError::Input(err) => write!(f, "{}", err),
            WorkflowError::Transport(err) => write!(f, "Error analyzing video: {}", err),
            WorkflowError::Protocol { .. } => write!(f, "malformed response"),
        }
    }
}

impl std::error::Error for WorkflowError {}

impl From<InputError> for WorkflowError {
    fn from(err: InputError) -> Self {
        WorkflowError::Input(err)
    }
}

impl From<TransportError> for WorkflowError {
    fn from(err: TransportError) -> Self {
        WorkflowError::Transport(err)
    }
}

/// Media engine refused a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No element is mounted or no source is loaded
    NotMounted,
    Rejected(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NotMounted => write!(f, "media element is not mounted"),
            EngineError::Rejected(msg) => write!(f, "media engine rejected command: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
