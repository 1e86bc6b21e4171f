//! Formatting and display logic
//!
//! Pure functions for formatting data for human-readable display.

/// Format byte size to human-readable
///
/// # Examples
/// ```
/// use trashcam::logic::formatting::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let units = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < units.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, units[unit_index])
    }
}

/// Format image dimensions, "unknown size" when they could not be read
pub fn format_dimensions(dimensions: Option<(u32, u32)>) -> String {
    match dimensions {
        Some((width, height)) => format!("{}×{}", width, height),
        None => "unknown size".to_string(),
    }
}

/// Frame counter text for the camera panel
pub fn format_frame_count(frames: u64) -> String {
    match frames {
        0 => "waiting for frames".to_string(),
        1 => "1 frame".to_string(),
        n => format!("{} frames", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_format_dimensions() {
        assert_eq!(format_dimensions(Some((640, 480))), "640×480");
        assert_eq!(format_dimensions(None), "unknown size");
    }

    #[test]
    fn test_format_frame_count() {
        assert_eq!(format_frame_count(0), "waiting for frames");
        assert_eq!(format_frame_count(1), "1 frame");
        assert_eq!(format_frame_count(42), "42 frames");
    }
}
