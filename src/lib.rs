//! Trash Classification TUI Library
//!
//! Exposes the session core for the binary and for testing

pub mod api;
pub mod config;
pub mod controller;
pub mod handlers;
pub mod logic;
pub mod messages;
pub mod model;
pub mod overlay;
pub mod services;
pub mod utils;

use std::sync::atomic::{AtomicBool, Ordering};

// Global flag for debug mode
pub static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

pub fn log_debug(msg: &str) {
    // Only log if debug mode is enabled
    if !DEBUG_MODE.load(Ordering::Relaxed) {
        return;
    }

    use std::fs::OpenOptions;
    use std::io::Write;
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(utils::get_debug_log_path())
    {
        let _ = writeln!(file, "{}", msg);
    }
}
