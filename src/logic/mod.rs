//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - category: The fixed set of waste labels
//! - download: Export file naming
//! - errors: Failure taxonomy and user-facing messages
//! - formatting: Sizes, dimensions, counters
//! - presenter: Label to icon/tip/group mapping
//! - ui: Toast timing and key hints
//! - upload: File selection and validation
//! - view: Result panel projection

pub mod category;
pub mod download;
pub mod errors;
pub mod formatting;
pub mod presenter;
pub mod ui;
pub mod upload;
pub mod view;
