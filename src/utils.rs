//! Utility functions used throughout the application

use std::path::PathBuf;

/// Get platform-specific debug log path
pub fn get_debug_log_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("trashcam-debug.log");
    path
}

/// Get the directory downloads land in when the config doesn't name one
pub fn get_default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Format a confidence percentage for display (e.g., "92%", "77.5%", "91.23%")
pub fn format_confidence(confidence: f64) -> String {
    let fixed = format!("{:.2}", confidence);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    format!("{}%", trimmed)
}
