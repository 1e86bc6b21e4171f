//! Download file naming
//!
//! Downloads are named `<category>_<unix millis>.<ext>` after the effective category.

use chrono::{DateTime, Utc};

/// Extension used for captured camera frames
pub const CAPTURE_EXTENSION: &str = "jpg";

/// Build the file name for an exported artifact
pub fn download_file_name(category: &str, at: DateTime<Utc>, extension: &str) -> String {
    let extension = sanitize_component(extension);
    let extension = if extension.is_empty() {
        CAPTURE_EXTENSION.to_string()
    } else {
        extension
    };
    format!(
        "{}_{}.{}",
        sanitize_component(category),
        at.timestamp_millis(),
        extension
    )
}

/// Keep a name part inside a single path component: separators, control
/// characters and `..` runs become `_`
fn sanitize_component(part: &str) -> String {
    let cleaned: String = part
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    cleaned.replace("..", "_")
}

/// Extension of a file name, None when it has no dot or ends with one
pub fn original_extension(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}
