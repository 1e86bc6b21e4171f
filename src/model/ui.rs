//! UI Model
//!
//! This sub-model contains state that only affects presentation:
//! blocking notices, toasts, the file path prompt and the quit flag.

use std::time::Instant;

use crate::logic;

#[derive(Clone, Debug)]
pub struct UiModel {
    /// Blocking notice; input is limited to dismissal while shown
    pub notice: Option<String>,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    /// File path being typed for choose-file (None when prompt closed)
    pub file_prompt: Option<String>,

    /// URL the live feed was opened with (cache-busted)
    pub feed_url: Option<String>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new() -> Self {
        Self {
            notice: None,
            toast_message: None,
            file_prompt: None,
            feed_url: None,
            should_quit: false,
        }
    }

    /// Check if any modal input is active
    pub fn has_modal(&self) -> bool {
        self.notice.is_some() || self.file_prompt.is_some()
    }

    /// Show a blocking notice
    pub fn show_notice(&mut self, message: String) {
        self.notice = Some(message);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Show toast message
    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    /// Check if toast should be dismissed
    pub fn should_dismiss_toast(&self) -> bool {
        self.toast_message
            .as_ref()
            .is_some_and(|(_, at)| logic::ui::should_dismiss_toast(at.elapsed().as_millis()))
    }

    /// Dismiss toast message
    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}

impl Default for UiModel {
    fn default() -> Self {
        Self::new()
    }
}
