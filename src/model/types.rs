//! Shared types for the Model
//!
//! These types are used across multiple sub-models and represent
//! fundamental domain concepts.

use std::path::PathBuf;

use crate::api::Prediction;
use crate::logic::category::CategoryLabel;

/// Last-known classification shown to the user
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationResult {
    /// Label exactly as the service reported it (may be outside the known set)
    pub label: String,
    /// Parsed category, None for labels like "Error" or "Unknown"
    pub category: Option<CategoryLabel>,
    /// Percentage, clamped to 0..=100
    pub confidence: f64,
}

impl ClassificationResult {
    pub fn from_prediction(prediction: &Prediction) -> Self {
        let confidence = if prediction.confidence.is_finite() {
            prediction.confidence.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            label: prediction.class_name.clone(),
            category: CategoryLabel::parse(&prediction.class_name),
            confidence,
        }
    }
}

/// A local image chosen for upload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub extension: String,
    pub mime: String,
    pub size: u64,
    pub dimensions: Option<(u32, u32)>,
}

/// Image captured by the backend, referenced by its served path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedImage {
    pub image_path: String,
}

/// Ticket identifying one capture/upload request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestTicket(pub u64);

/// Ownership token for an active poller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PollToken(pub u64);

/// Request the session is waiting on
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingRequest {
    Capture(RequestTicket),
    Upload {
        ticket: RequestTicket,
        file: SelectedFile,
    },
}

impl PendingRequest {
    pub fn ticket(&self) -> RequestTicket {
        match self {
            PendingRequest::Capture(ticket) => *ticket,
            PendingRequest::Upload { ticket, .. } => *ticket,
        }
    }
}

/// Where exported bytes come from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DownloadSource {
    /// Captured frame served by the backend
    Remote { image_path: String },
    /// Original file chosen for upload
    Local(PathBuf),
}

/// Export of a reviewed artifact under its effective category name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadRequest {
    pub source: DownloadSource,
    pub file_name: String,
}
