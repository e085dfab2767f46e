// Domain models - Core types and data structures

use std::fmt;

use bytes::Bytes;

use crate::domain::errors::WorkflowError;

/// Media type prefix accepted by the validation gate
pub const VIDEO_MIME_PREFIX: &str = "video/";

/// Raw file delivered by the picker or a drop target
#[derive(Debug, Clone)]
pub struct FileHandle {
    pub name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// A file accepted into the workflow
///
/// Only the validation gate constructs this, so the declared type always
/// starts with `video/`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedMedia {
    binary: Bytes,
    declared_mime_type: String,
    display_name: String,
}

impl SelectedMedia {
    pub(crate) fn accepted(file: FileHandle) -> Self {
        Self {
            binary: file.bytes,
            declared_mime_type: file.mime_type,
            display_name: file.name,
        }
    }

    pub fn binary(&self) -> &Bytes {
        &self.binary
    }

    pub fn declared_mime_type(&self) -> &str {
        &self.declared_mime_type
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn size(&self) -> usize {
        self.binary.len()
    }
}

/// Outcome class reported by the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Authentic,
    Manipulated,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Authentic => write!(f, "authentic"),
            Classification::Manipulated => write!(f, "manipulated"),
        }
    }
}

/// Confidence fraction, always finite and within `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Format as a percentage with two decimals, e.g. `98.76%`
    pub fn as_percentage(&self) -> String {
        format!("{:.2}%", self.0 * 100.0)
    }
}

/// Result of one successful analysis request
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub classification: Classification,
    pub confidence: Option<Confidence>,
}

impl Verdict {
    pub fn new(classification: Classification, confidence: Option<Confidence>) -> Self {
        Self {
            classification,
            confidence,
        }
    }

    pub fn authentic() -> Self {
        Self::new(Classification::Authentic, None)
    }

    pub fn manipulated() -> Self {
        Self::new(Classification::Manipulated, None)
    }
}

/// Identifies one submission; used to discard stale responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of the submission workflow. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Submitting(RequestId),
    Succeeded(Verdict),
    Failed(WorkflowError),
}

impl WorkflowState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowState::Submitting(_))
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            WorkflowState::Succeeded(verdict) => Some(verdict),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        match self {
            WorkflowState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Short name for logging
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Submitting(_) => "submitting",
            WorkflowState::Succeeded(_) => "succeeded",
            WorkflowState::Failed(_) => "failed",
        }
    }
}

/// Locally created URL referring to a previewable copy of the selected file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewUrl(String);

impl PreviewUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual tone of the result panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
}

impl Tone {
    pub fn class(&self) -> &'static str {
        match self {
            Tone::Positive => "positive",
            Tone::Negative => "negative",
        }
    }
}

/// Display data for a verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
    pub title: String,
    pub detail_message: String,
    pub tone: Tone,
    pub confidence: String,
}
