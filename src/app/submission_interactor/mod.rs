// Submission interactor - Owns the workflow lifecycle state

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::ValidationGate;
use crate::ports::AnalysisPort;

/// A submission that has entered `Submitting` and still needs its request issued
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub request: RequestId,
    pub media: SelectedMedia,
}

/// What happened when an analysis outcome was handed back
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Outcome applied; workflow is now `Succeeded`
    Succeeded(Verdict),
    /// Outcome applied; workflow is now `Failed`
    Failed(WorkflowError),
    /// Workflow moved on since the request was issued; outcome dropped
    Stale,
}

/// Controller for the submission lifecycle
///
/// Sole owner of `WorkflowState` and the selected media. Every transition
/// runs synchronously; the network call happens between `begin_submit` and
/// `complete`, outside of the controller.
pub struct SubmissionInteractor {
    analysis_port: Arc<dyn AnalysisPort>,
    state: WorkflowState,
    media: Option<SelectedMedia>,
    next_request: u64,
}

impl SubmissionInteractor {
    /// Create new submission interactor with injected port
    pub fn new(analysis_port: Arc<dyn AnalysisPort>) -> Self {
        Self {
            analysis_port,
            state: WorkflowState::Idle,
            media: None,
            next_request: 1,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn media(&self) -> Option<&SelectedMedia> {
        self.media.as_ref()
    }

    pub fn analysis_port(&self) -> Arc<dyn AnalysisPort> {
        Arc::clone(&self.analysis_port)
    }

    /// Run a picked file through the validation gate.
    ///
    /// Acceptance resets the workflow and installs the new media. Rejection
    /// discards any selection and leaves the workflow `Failed` with the
    /// reason. Either way a pending request becomes stale.
    pub fn select(&mut self, file: Option<FileHandle>) -> Result<&SelectedMedia, InputError> {
        match ValidationGate::validate(file) {
            Ok(media) => {
                info!(
                    "Accepted {} ({}, {} bytes)",
                    media.display_name(),
                    media.declared_mime_type(),
                    media.size()
                );
                self.reset();
                Ok(&*self.media.insert(media))
            }
            Err(err) => {
                warn!("Rejected selection: {:?}", err);
                self.media = None;
                self.transition(WorkflowState::Failed(err.clone().into()));
                Err(err)
            }
        }
    }

    /// Return to `Idle` and drop the selection
    pub fn reset(&mut self) {
        self.media = None;
        self.transition(WorkflowState::Idle);
    }

    /// Enter `Submitting` for the selected media.
    ///
    /// Returns `None` when a submission is already in flight (re-entrant
    /// call) or when nothing is selected; the latter moves the workflow to
    /// `Failed("no file selected")`.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if let WorkflowState::Submitting(request) = self.state {
            debug!("Submission {} already in flight; ignoring submit", request);
            return None;
        }

        let Some(media) = self.media.clone() else {
            self.transition(WorkflowState::Failed(InputError::NoFileSelected.into()));
            return None;
        };

        let request = RequestId::new(self.next_request);
        self.next_request += 1;
        self.transition(WorkflowState::Submitting(request));
        info!("Submission {} started for {}", request, media.display_name());

        Some(PendingSubmission { request, media })
    }

    /// Apply the outcome of `request`, unless the workflow has moved on
    pub fn complete(&mut self, request: RequestId, outcome: Result<Verdict, WorkflowError>) -> Completion {
        if self.state != WorkflowState::Submitting(request) {
            info!(
                "Discarding stale outcome for submission {} (workflow is {})",
                request,
                self.state.label()
            );
            return Completion::Stale;
        }

        match outcome {
            Ok(verdict) => {
                info!("Submission {} classified as {}", request, verdict.classification);
                self.transition(WorkflowState::Succeeded(verdict.clone()));
                Completion::Succeeded(verdict)
            }
            Err(err) => {
                warn!("Submission {} failed: {}", request, err);
                self.transition(WorkflowState::Failed(err.clone()));
                Completion::Failed(err)
            }
        }
    }

    /// Run one full submission: begin, await the service, complete.
    ///
    /// Holds the controller for the duration of the call; use
    /// `begin_submit`/`complete` to keep handling events meanwhile.
    pub async fn submit(&mut self) -> Option<Completion> {
        let pending = self.begin_submit()?;
        let outcome = self.analysis_port.analyze(&pending.media).await;
        Some(self.complete(pending.request, outcome))
    }

    fn transition(&mut self, next: WorkflowState) {
        debug!("Workflow {} -> {}", self.state.label(), next.label());
        self.state = next;
    }
}
