//! Pure Application Model
//!
//! This module defines the state the session controller mutates.
//! The Model is organized into focused sub-models:
//!
//! - **Session**: mode, poller ownership, results, artifacts under review
//! - **Interface**: the regions and injected elements the renderer draws
//! - **UiModel**: notices, toasts, prompt
//!
//! Key principles:
//! - Clone + Debug: Can snapshot and compare state
//! - No services: All I/O is requested through controller effects

pub mod interface;
pub mod session;
pub mod types;
pub mod ui;

pub use interface::{Element, ElementId, FeedSource, Interface, Region, UploadArea};
pub use session::{Mode, Session};
pub use types::*;
pub use ui::UiModel;

use crate::logic::category::CategoryLabel;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub session: Session,
    pub interface: Interface,
    pub ui: UiModel,
}

impl Model {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            interface: Interface::new(),
            ui: UiModel::new(),
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.session.mode
    }

    /// Value of the category selector in the active review interface
    pub fn active_selector(&self) -> Option<CategoryLabel> {
        if let Some(overlay) = &self.session.capture_overlay {
            return overlay.controls().selected(&self.interface.feed.overlay);
        }
        if let Some(review) = &self.session.upload_review {
            return review.controls().selected(&self.interface.upload.review);
        }
        None
    }

    /// Whether the manual-override switch in the active review interface is on
    pub fn override_switch_on(&self) -> bool {
        if let Some(overlay) = &self.session.capture_overlay {
            return overlay.controls().is_on(&self.interface.feed.overlay);
        }
        if let Some(review) = &self.session.upload_review {
            return review.controls().is_on(&self.interface.upload.review);
        }
        false
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}
