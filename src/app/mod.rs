// Application layer - Use case interactors

pub mod container;
pub mod playback_interactor;
pub mod session;
pub mod submission_interactor;

// Re-export interactors
pub use playback_interactor::{PlaybackHandle, PlaybackInteractor};
pub use session::{Event, PlaybackView, Session, ViewModel};
pub use submission_interactor::{Completion, PendingSubmission, SubmissionInteractor};
