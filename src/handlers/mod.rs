//! Event Handlers
//!
//! Translate terminal input into session messages:
//! - keyboard: key presses, the file path prompt and pasted paths

pub mod keyboard;

// Re-export for convenience
pub use keyboard::{handle_key, handle_paste};
