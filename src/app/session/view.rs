// View model - Everything the user-facing surface renders

use crate::domain::model::*;

const SUBMIT_LABEL: &str = "Analyze Video";
const SUBMITTING_LABEL: &str = "Analyzing...";

/// Preview player state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackView {
    pub url: PreviewUrl,
    pub is_playing: bool,
}

/// Snapshot of the surface after an event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewModel {
    /// Name shown under the picker
    pub selected_file: Option<String>,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub spinner: bool,
    pub error_banner: Option<String>,
    pub result: Option<DisplayModel>,
    pub playback: Option<PlaybackView>,
}

impl ViewModel {
    pub(crate) fn label_for(submitting: bool) -> &'static str {
        if submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }
}
