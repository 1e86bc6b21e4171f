//! Session Model
//!
//! The single mutable record the session controller owns: current mode,
//! poller ownership, last result, manual override and the artifact under review.

use super::types::{
    CapturedImage, ClassificationResult, PendingRequest, PollToken, RequestTicket, SelectedFile,
};
use crate::logic::category::CategoryLabel;
use crate::overlay::{CaptureOverlayManager, UploadReviewManager};

/// High-level workflow state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Streaming,
    /// Waiting for /capture_image
    Capturing,
    CaptureReview,
    /// Waiting for /upload
    ProcessingUpload,
    UploadReview,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Idle => "Idle",
            Mode::Streaming => "Streaming",
            Mode::Capturing => "Capturing",
            Mode::CaptureReview => "Capture review",
            Mode::ProcessingUpload => "Processing upload",
            Mode::UploadReview => "Upload review",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub mode: Mode,

    /// Camera stream has been opened and not stopped since
    pub stream_active: bool,

    /// Token of the active poller (Some iff mode == Streaming)
    pub poll: Option<PollToken>,

    /// Last result shown to the user
    pub last_result: Option<ClassificationResult>,

    /// User-chosen category superseding `last_result` for display and export
    pub manual_override: Option<CategoryLabel>,

    /// Artifact under review, owned only while in the matching review mode
    pub captured_image: Option<CapturedImage>,
    pub uploaded_file: Option<SelectedFile>,

    /// Capture or upload request awaiting its response
    pub pending: Option<PendingRequest>,

    /// Handles to the injected review interfaces
    pub capture_overlay: Option<CaptureOverlayManager>,
    pub upload_review: Option<UploadReviewManager>,

    next_poll_token: u64,
    next_ticket: u64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            stream_active: false,
            poll: None,
            last_result: None,
            manual_override: None,
            captured_image: None,
            uploaded_file: None,
            pending: None,
            capture_overlay: None,
            upload_review: None,
            next_poll_token: 0,
            next_ticket: 0,
        }
    }

    /// Issue a fresh poll token; tokens are never reused
    pub fn issue_poll_token(&mut self) -> PollToken {
        self.next_poll_token += 1;
        PollToken(self.next_poll_token)
    }

    /// Issue a fresh request ticket; tickets are never reused
    pub fn issue_ticket(&mut self) -> RequestTicket {
        self.next_ticket += 1;
        RequestTicket(self.next_ticket)
    }

    /// Whether a poll result carrying `token` may still be applied
    pub fn accepts_poll(&self, token: PollToken) -> bool {
        self.mode == Mode::Streaming && self.poll == Some(token)
    }

    /// Whether a capture/upload response carrying `ticket` may still be applied
    pub fn accepts_response(&self, expected_mode: Mode, ticket: RequestTicket) -> bool {
        self.mode == expected_mode
            && self
                .pending
                .as_ref()
                .is_some_and(|pending| pending.ticket() == ticket)
    }

    /// Category name in effect: the manual override if active, else the detected label
    pub fn effective_category(&self) -> Option<String> {
        match self.manual_override {
            Some(category) => Some(category.as_str().to_string()),
            None => self.last_result.as_ref().map(|result| result.label.clone()),
        }
    }

    /// Number of review interfaces currently injected
    pub fn review_count(&self) -> usize {
        self.capture_overlay.iter().count() + self.upload_review.iter().count()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new();
        assert_eq!(session.mode, Mode::Idle);
        assert!(session.poll.is_none());
        assert!(session.last_result.is_none());
        assert_eq!(session.review_count(), 0);
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut session = Session::new();
        let a = session.issue_poll_token();
        let b = session.issue_poll_token();
        assert_ne!(a, b);

        let t1 = session.issue_ticket();
        let t2 = session.issue_ticket();
        assert_ne!(t1, t2);
    }

    #[test]
    fn test_accepts_poll_requires_streaming_and_token() {
        let mut session = Session::new();
        let token = session.issue_poll_token();
        assert!(!session.accepts_poll(token));

        session.mode = Mode::Streaming;
        session.poll = Some(token);
        assert!(session.accepts_poll(token));

        let newer = session.issue_poll_token();
        session.poll = Some(newer);
        assert!(!session.accepts_poll(token));
    }

    #[test]
    fn test_accepts_response_requires_matching_ticket() {
        let mut session = Session::new();
        let ticket = session.issue_ticket();
        session.mode = Mode::Capturing;
        assert!(!session.accepts_response(Mode::Capturing, ticket));

        session.pending = Some(PendingRequest::Capture(ticket));
        assert!(session.accepts_response(Mode::Capturing, ticket));
        assert!(!session.accepts_response(Mode::ProcessingUpload, ticket));
        assert!(!session.accepts_response(Mode::Capturing, RequestTicket(ticket.0 + 1)));
    }

    #[test]
    fn test_effective_category_prefers_override() {
        let mut session = Session::new();
        assert_eq!(session.effective_category(), None);

        session.last_result = Some(ClassificationResult {
            label: "plastic".to_string(),
            category: Some(CategoryLabel::Plastic),
            confidence: 92.0,
        });
        assert_eq!(session.effective_category().as_deref(), Some("plastic"));

        session.manual_override = Some(CategoryLabel::Trash);
        assert_eq!(session.effective_category().as_deref(), Some("trash"));
    }
}
