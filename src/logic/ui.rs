//! UI state transition logic
//!
//! Pure functions for toast timing and the per-mode key hints.

use crate::model::Mode;

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u128 = 1500;

/// Check if a toast of the given age should be dismissed
///
/// # Examples
/// ```
/// use trashcam::logic::ui::should_dismiss_toast;
///
/// assert!(!should_dismiss_toast(200));
/// assert!(should_dismiss_toast(1500));
/// ```
pub fn should_dismiss_toast(elapsed_ms: u128) -> bool {
    elapsed_ms >= TOAST_DURATION_MS
}

/// Key hints for the status bar, depending on what the current mode accepts
pub fn key_hints(mode: Mode, stream_active: bool) -> Vec<(&'static str, &'static str)> {
    let mut hints = Vec::new();
    match mode {
        Mode::Idle => {
            hints.push(("s", "Start camera"));
            hints.push(("o", "Choose file"));
            hints.push(("u", "Upload"));
            hints.push(("r", "Remove preview"));
        }
        Mode::Streaming => {
            hints.push(("c", "Capture"));
            hints.push(("o", "Choose file"));
            hints.push(("u", "Upload"));
            hints.push(("r", "Remove preview"));
        }
        Mode::Capturing => {}
        Mode::ProcessingUpload => {
            hints.push(("Esc", "Cancel"));
        }
        Mode::CaptureReview => {
            hints.push(("Esc", "Return"));
            hints.push(("m", "Override"));
            hints.push(("←/→", "Category"));
            hints.push(("d", "Download"));
            hints.push(("o", "Choose file"));
        }
        Mode::UploadReview => {
            hints.push(("Esc", "Cancel"));
            hints.push(("m", "Override"));
            hints.push(("←/→", "Category"));
            hints.push(("d", "Download"));
        }
    }
    if stream_active {
        hints.push(("x", "Stop camera"));
    }
    hints.push(("q", "Quit"));
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_timing() {
        assert!(!should_dismiss_toast(0));
        assert!(!should_dismiss_toast(1499));
        assert!(should_dismiss_toast(1500));
        assert!(should_dismiss_toast(10_000));
    }

    #[test]
    fn test_idle_hints_offer_start_not_stop() {
        let keys: Vec<_> = key_hints(Mode::Idle, false).into_iter().map(|(k, _)| k).collect();
        assert!(keys.contains(&"s"));
        assert!(!keys.contains(&"x"));
        assert_eq!(keys.last(), Some(&"q"));
    }

    #[test]
    fn test_review_hints_offer_stop_while_streaming() {
        let keys: Vec<_> = key_hints(Mode::CaptureReview, true).into_iter().map(|(k, _)| k).collect();
        assert!(keys.contains(&"d"));
        assert!(keys.contains(&"x"));
        assert!(!keys.contains(&"c"));
    }
}
