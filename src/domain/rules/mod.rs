// Domain rules - Pure policies for file acceptance and verdict presentation

use crate::domain::errors::*;
use crate::domain::model::*;

const AUTHENTIC_TITLE: &str = "AUTHENTIC";
const AUTHENTIC_DETAIL: &str = "This video appears to be authentic content ✓";
const MANIPULATED_TITLE: &str = "DEEPFAKE";
const MANIPULATED_DETAIL: &str = "This video appears to be artificially manipulated ⚠";
const CONFIDENCE_PLACEHOLDER: &str = "N/A";

/// Gate between the file picker and the workflow
pub struct ValidationGate;

impl ValidationGate {
    /// Accept a picked file only if its declared type is in the video category.
    ///
    /// Looks at metadata only; the binary content is never inspected.
    pub fn validate(file: Option<FileHandle>) -> Result<SelectedMedia, InputError> {
        let file = file.ok_or(InputError::NoFileSelected)?;

        if !Self::is_video_type(&file.mime_type) {
            return Err(InputError::NotAVideo {
                mime_type: file.mime_type,
            });
        }

        Ok(SelectedMedia::accepted(file))
    }

    /// Check whether a declared media type belongs to the video category
    pub fn is_video_type(mime_type: &str) -> bool {
        mime_type.starts_with(VIDEO_MIME_PREFIX)
    }
}

/// Maps verdicts to display data
pub struct ResultPresenter;

impl ResultPresenter {
    pub fn present(verdict: &Verdict) -> DisplayModel {
        let (title, detail, tone) = match verdict.classification {
            Classification::Authentic => (AUTHENTIC_TITLE, AUTHENTIC_DETAIL, Tone::Positive),
            Classification::Manipulated => (MANIPULATED_TITLE, MANIPULATED_DETAIL, Tone::Negative),
        };

        DisplayModel {
            title: title.to_string(),
            detail_message: detail.to_string(),
            tone,
            confidence: Self::format_confidence(verdict.confidence),
        }
    }

    pub fn format_confidence(confidence: Option<Confidence>) -> String {
        confidence
            .map(|c| c.as_percentage())
            .unwrap_or_else(|| CONFIDENCE_PLACEHOLDER.to_string())
    }
}

#[cfg(test)]
mod tests;
