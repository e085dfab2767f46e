// Unit tests for business rules

use super::*;

fn video(name: &str) -> FileHandle {
    FileHandle::new(name, "video/mp4", vec![0u8; 16])
}

#[test]
fn test_gate_accepts_video_types() {
    for mime in ["video/mp4", "video/webm", "video/quicktime", "video/x-matroska"] {
        let file = FileHandle::new("clip", mime, vec![0u8; 4]);
        let media = ValidationGate::validate(Some(file)).unwrap();
        assert_eq!(media.declared_mime_type(), mime);
    }
}

#[test]
fn test_gate_rejects_missing_file() {
    assert_eq!(ValidationGate::validate(None), Err(InputError::NoFileSelected));
}

#[test]
fn test_gate_rejects_non_video_types() {
    for mime in ["application/pdf", "audio/mpeg", "image/png", "", "Video/mp4", "text/video/"] {
        let file = FileHandle::new("doc.pdf", mime, vec![0u8; 4]);
        let err = ValidationGate::validate(Some(file)).unwrap_err();
        assert_eq!(err.to_string(), "not a valid video file");
        assert_eq!(
            err,
            InputError::NotAVideo {
                mime_type: mime.to_string()
            }
        );
    }
}

#[test]
fn test_gate_keeps_display_name() {
    let media = ValidationGate::validate(Some(video("holiday.mov"))).unwrap();
    assert_eq!(media.display_name(), "holiday.mov");
}

#[test]
fn test_present_authentic() {
    let model = ResultPresenter::present(&Verdict::authentic());
    assert_eq!(model.title, "AUTHENTIC");
    assert_eq!(model.detail_message, "This video appears to be authentic content ✓");
    assert_eq!(model.tone, Tone::Positive);
    assert_eq!(model.confidence, "N/A");
}

#[test]
fn test_present_manipulated_with_confidence() {
    let verdict = Verdict::new(Classification::Manipulated, Confidence::new(0.8765));
    let model = ResultPresenter::present(&verdict);
    assert_eq!(model.title, "DEEPFAKE");
    assert_eq!(model.detail_message, "This video appears to be artificially manipulated ⚠");
    assert_eq!(model.tone, Tone::Negative);
    assert_eq!(model.confidence, "87.65%");
}

#[test]
fn test_present_is_referentially_transparent() {
    let verdict = Verdict::new(Classification::Authentic, Confidence::new(0.12345));
    assert_eq!(ResultPresenter::present(&verdict), ResultPresenter::present(&verdict));
}
