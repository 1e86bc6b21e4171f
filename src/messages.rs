//! Message types for the Elm Architecture pattern
//!
//! Every event the session controller reacts to. Messages flow into
//! `controller::update`, which mutates the model and returns effects.
//!
//! Message sources:
//! - User input (keyboard events, pasted paths)
//! - API responses (capture, upload, stop-camera, download)
//! - The prediction poller
//! - The live feed task

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::api::{CaptureOutcome, Prediction};
use crate::logic::category::CategoryLabel;
use crate::model::{PollToken, RequestTicket, SelectedFile};

/// Unified message type for all session events
#[derive(Debug)]
pub enum Msg {
    // ============================================
    // USER CONTROLS
    // ============================================
    StartCamera,
    StopCamera,
    RequestCapture,
    /// Leave the capture review and go back to the live feed
    ReturnFromCapture,
    /// A file was picked or pasted; already validated and inspected
    ChooseFile(SelectedFile),
    /// Remove the upload preview (in review this cancels the review)
    RemovePreview,
    SubmitUpload,
    CancelUploadReview,

    /// Flip the manual-override switch of the active review
    ToggleManualOverride,
    /// Move the category selector; only applies while the switch is on
    SelectCategory(CategoryLabel),
    ManualOverrideSet(CategoryLabel),
    ManualOverrideClear,

    /// Export the reviewed artifact, stamped with `at`
    Download { at: DateTime<Utc> },

    DismissNotice,
    Quit,

    // ============================================
    // COMPLETIONS
    // ============================================
    PredictionResult {
        token: PollToken,
        prediction: Result<Prediction>,
    },

    CaptureResponse {
        ticket: RequestTicket,
        result: Result<CaptureOutcome>,
    },

    UploadResponse {
        ticket: RequestTicket,
        result: Result<Prediction>,
    },

    StopCameraAck { result: Result<()> },

    /// Download written (or failed); carries the destination path
    DownloadFinished { result: Result<PathBuf> },

    /// The live feed ended; `error` is None on a clean close
    FeedClosed { error: Option<String> },
}

impl Msg {
    /// Short name for debug logging
    pub fn name(&self) -> &'static str {
        match self {
            Msg::StartCamera => "StartCamera",
            Msg::StopCamera => "StopCamera",
            Msg::RequestCapture => "RequestCapture",
            Msg::ReturnFromCapture => "ReturnFromCapture",
            Msg::ChooseFile(_) => "ChooseFile",
            Msg::RemovePreview => "RemovePreview",
            Msg::SubmitUpload => "SubmitUpload",
            Msg::CancelUploadReview => "CancelUploadReview",
            Msg::ToggleManualOverride => "ToggleManualOverride",
            Msg::SelectCategory(_) => "SelectCategory",
            Msg::ManualOverrideSet(_) => "ManualOverrideSet",
            Msg::ManualOverrideClear => "ManualOverrideClear",
            Msg::Download { .. } => "Download",
            Msg::DismissNotice => "DismissNotice",
            Msg::Quit => "Quit",
            Msg::PredictionResult { .. } => "PredictionResult",
            Msg::CaptureResponse { .. } => "CaptureResponse",
            Msg::UploadResponse { .. } => "UploadResponse",
            Msg::StopCameraAck { .. } => "StopCameraAck",
            Msg::DownloadFinished { .. } => "DownloadFinished",
            Msg::FeedClosed { .. } => "FeedClosed",
        }
    }

    /// Messages produced by background work rather than the user
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Msg::PredictionResult { .. }
                | Msg::CaptureResponse { .. }
                | Msg::UploadResponse { .. }
                | Msg::StopCameraAck { .. }
                | Msg::DownloadFinished { .. }
                | Msg::FeedClosed { .. }
        )
    }
}
