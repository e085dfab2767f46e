// Session - Single entry point for every workflow event

mod view;

pub use view::{PlaybackView, ViewModel};

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::app::playback_interactor::PlaybackInteractor;
use crate::app::submission_interactor::{Completion, PendingSubmission, SubmissionInteractor};
use crate::domain::errors::WorkflowError;
use crate::domain::model::*;
use crate::domain::rules::ResultPresenter;
use crate::ports::AnalysisPort;

/// Request id paired with what the analysis port returned
type Outcome = (RequestId, Result<Verdict, WorkflowError>);

/// Discrete events the workflow reacts to
#[derive(Debug, Clone)]
pub enum Event {
    /// Picker delivered a file, or nothing when cancelled
    FileSelected(Option<FileHandle>),
    /// User pressed the submit action
    SubmitRequested,
    /// Analysis call for `request` finished
    AnalysisFinished {
        request: RequestId,
        outcome: Result<Verdict, WorkflowError>,
    },
    /// User pressed play/pause
    TogglePlayback,
    /// Clear selection, result and preview
    Reset,
}

/// One workflow instance: submission lifecycle plus the preview player.
///
/// All state changes go through `dispatch`, which runs each event to
/// completion. The analysis call is the only suspension point and lives
/// outside `dispatch`.
pub struct Session {
    submission: SubmissionInteractor,
    playback: PlaybackInteractor,
}

impl Session {
    pub fn new(submission: SubmissionInteractor, playback: PlaybackInteractor) -> Self {
        Self {
            submission,
            playback,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        self.submission.state()
    }

    pub fn media(&self) -> Option<&SelectedMedia> {
        self.submission.media()
    }

    pub fn playback(&self) -> &PlaybackInteractor {
        &self.playback
    }

    /// Apply one event.
    ///
    /// Returns the submission to issue when the event started one; the
    /// caller runs it and feeds the result back as `AnalysisFinished`.
    pub fn dispatch(&mut self, event: Event) -> Option<PendingSubmission> {
        match event {
            Event::FileSelected(file) => {
                self.playback.detach();
                // rejection is reflected in the workflow state
                let _ = self.submission.select(file);
                None
            }
            Event::SubmitRequested => {
                let pending = self.submission.begin_submit();
                if pending.is_some() {
                    self.playback.detach();
                }
                pending
            }
            Event::AnalysisFinished { request, outcome } => {
                if let Completion::Succeeded(_) = self.submission.complete(request, outcome) {
                    if let Some(media) = self.submission.media() {
                        self.playback.attach(media);
                    }
                }
                None
            }
            Event::TogglePlayback => {
                self.playback.toggle();
                None
            }
            Event::Reset => {
                self.playback.detach();
                self.submission.reset();
                None
            }
        }
    }

    /// Render the current state for the user-facing surface
    pub fn view(&self) -> ViewModel {
        let state = self.submission.state();
        let media = self.submission.media();
        let submitting = state.is_submitting();
        let verdict = state.verdict();

        ViewModel {
            selected_file: media.map(|m| m.display_name().to_string()),
            submit_enabled: !submitting && media.is_some(),
            submit_label: ViewModel::label_for(submitting),
            spinner: submitting,
            error_banner: state.error().map(|e| e.user_message()),
            result: verdict.map(ResultPresenter::present),
            playback: verdict.and(self.playback.handle()).map(|h| PlaybackView {
                url: h.url().clone(),
                is_playing: h.is_playing(),
            }),
        }
    }

    /// Submit the selected media and wait for the outcome
    pub async fn submit(&mut self) -> &WorkflowState {
        if let Some(pending) = self.dispatch(Event::SubmitRequested) {
            let (request, outcome) = Self::issue(self.submission.analysis_port(), pending).await;
            self.dispatch(Event::AnalysisFinished { request, outcome });
        }
        self.submission.state()
    }

    /// Drive the session from an event channel.
    ///
    /// User events are handled before completed requests. A fresh view is
    /// published after every event. When the sender side closes, requests
    /// still in flight are awaited and applied (or discarded as stale)
    /// before the session is handed back.
    ///
    /// Engine and preview ports are single-threaded, so a `Session` is not
    /// `Send`. Drive this future with `block_on`, from a `#[tokio::test]`, or
    /// inside a `tokio::task::LocalSet`; it cannot go through `tokio::spawn`.
    /// Only the analysis requests themselves are `Send`.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<Event>, views: watch::Sender<ViewModel>) -> Self {
        let mut in_flight: FuturesUnordered<BoxFuture<'static, Outcome>> = FuturesUnordered::new();
        views.send_replace(self.view());

        loop {
            tokio::select! {
                biased;

                event = events.recv() => {
                    let Some(event) = event else { break };
                    debug!("Handling {:?}", EventKind(&event));
                    if let Some(pending) = self.dispatch(event) {
                        in_flight.push(Self::issue(self.submission.analysis_port(), pending).boxed());
                    }
                }
                Some((request, outcome)) = in_flight.next(), if !in_flight.is_empty() => {
                    self.dispatch(Event::AnalysisFinished { request, outcome });
                }
            }
            views.send_replace(self.view());
        }

        if !in_flight.is_empty() {
            info!("Event source closed; waiting for {} request(s) in flight", in_flight.len());
        }
        while let Some((request, outcome)) = in_flight.next().await {
            self.dispatch(Event::AnalysisFinished { request, outcome });
            views.send_replace(self.view());
        }

        self
    }

    async fn issue(port: Arc<dyn AnalysisPort>, pending: PendingSubmission) -> Outcome {
        debug!("Issuing submission {} to {}", pending.request, port.describe());
        let outcome = port.analyze(&pending.media).await;
        (pending.request, outcome)
    }
}

/// Debug view of an event without the file payload
struct EventKind<'a>(&'a Event);

impl std::fmt::Debug for EventKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::FileSelected(Some(file)) => write!(f, "FileSelected({})", file.name),
            Event::FileSelected(None) => write!(f, "FileSelected(none)"),
            Event::SubmitRequested => write!(f, "SubmitRequested"),
            Event::AnalysisFinished { request, .. } => write!(f, "AnalysisFinished({})", request),
            Event::TogglePlayback => write!(f, "TogglePlayback"),
            Event::Reset => write!(f, "Reset"),
        }
    }
}
