//! Upload file selection
//!
//! Validates files picked through the path prompt or dropped onto the
//! terminal (bracketed paste) before they can be submitted.

use anyhow::{Context, Result};
use image::ImageFormat;
use std::path::{Path, PathBuf};

use super::download::original_extension;
use crate::model::SelectedFile;

/// Extensions the classification service accepts
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Check if a file name carries an accepted image extension (case-insensitive)
pub fn is_allowed_file(file_name: &str) -> bool {
    original_extension(file_name)
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Turn pasted text into a path: terminals deliver drops as quoted paths or file:// URLs
pub fn path_from_drop(text: &str) -> Option<PathBuf> {
    let trimmed = text.trim();
    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(trimmed);
    let path = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    // Shells escape spaces in dropped paths
    let path = path.replace("\\ ", " ");

    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Inspect a chosen file and build the selection used for preview and upload
pub fn inspect_file(path: &Path) -> Result<SelectedFile> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Not a file: {}", path.display()))?;

    if !is_allowed_file(&file_name) {
        anyhow::bail!("File format not supported");
    }

    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("Not a file: {}", path.display());
    }

    let extension = original_extension(&file_name).unwrap_or_default().to_string();
    let mime = ImageFormat::from_extension(&extension)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
        .to_string();

    // Dimensions are only for the preview line; an unreadable header is not fatal
    let dimensions = image::image_dimensions(path).ok();

    Ok(SelectedFile {
        path: path.to_path_buf(),
        file_name,
        extension,
        mime,
        size: metadata.len(),
        dimensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        assert!(is_allowed_file("bottle.png"));
        assert!(is_allowed_file("bottle.JPG"));
        assert!(is_allowed_file("can.jpeg"));
        assert!(is_allowed_file("anim.gif"));
        assert!(!is_allowed_file("notes.txt"));
        assert!(!is_allowed_file("photo.webp"));
        assert!(!is_allowed_file("png"));
    }

    #[test]
    fn test_path_from_drop_strips_decoration() {
        assert_eq!(
            path_from_drop("'/home/me/bottle.png'\n"),
            Some(PathBuf::from("/home/me/bottle.png"))
        );
        assert_eq!(
            path_from_drop("file:///tmp/can.jpg"),
            Some(PathBuf::from("/tmp/can.jpg"))
        );
        assert_eq!(
            path_from_drop("/tmp/my\\ photo.jpg"),
            Some(PathBuf::from("/tmp/my photo.jpg"))
        );
        assert_eq!(path_from_drop("   "), None);
    }

    #[test]
    fn test_inspect_rejects_unsupported_format() {
        let err = inspect_file(Path::new("/tmp/whatever.txt")).unwrap_err();
        assert_eq!(err.to_string(), "File format not supported");
    }

    #[test]
    fn test_inspect_rejects_missing_file() {
        assert!(inspect_file(Path::new("/definitely/not/here/bottle.png")).is_err());
    }

    #[test]
    fn test_inspect_existing_file() {
        let mut path = std::env::temp_dir();
        path.push(format!("trashcam-inspect-{}.PNG", std::process::id()));
        std::fs::write(&path, b"not really a png").unwrap();

        let selected = inspect_file(&path).unwrap();
        assert_eq!(selected.extension, "PNG");
        assert_eq!(selected.mime, "image/png");
        assert_eq!(selected.size, 16);
        assert_eq!(selected.dimensions, None);

        std::fs::remove_file(&path).unwrap();
    }
}
