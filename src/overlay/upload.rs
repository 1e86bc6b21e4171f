//! Upload review panel
//!
//! Shown below the upload area after a successful upload classification.

use chrono::{DateTime, Utc};

use super::OverrideControls;
use crate::logic::category::CategoryLabel;
use crate::logic::download::{download_file_name, original_extension};
use crate::model::{
    ClassificationResult, DownloadRequest, DownloadSource, Element, ElementId, Interface,
    SelectedFile, UploadArea,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadReviewManager {
    injected: Vec<ElementId>,
    controls: OverrideControls,
    active: bool,
}

impl UploadReviewManager {
    /// Inject the review panel for `file` below the upload area
    pub fn enter(
        interface: &mut Interface,
        file: &SelectedFile,
        result: &ClassificationResult,
    ) -> Self {
        let switch = interface.allocate_id();
        let selector = interface.allocate_id();
        let cancel_button = interface.allocate_id();
        let download_button = interface.allocate_id();

        interface.upload.area = UploadArea::Preview(file.clone());

        let region = &mut interface.upload.review;
        let preset = result.category.unwrap_or(CategoryLabel::ALL[0]);
        let controls = OverrideControls::inject(region, switch, selector, preset);
        region.insert(cancel_button, Element::CancelButton);
        region.insert(download_button, Element::DownloadButton);

        crate::log_debug(&format!(
            "DEBUG [UploadReview]: entered for {} (detected {})",
            file.file_name, result.label
        ));

        Self {
            injected: vec![switch, selector, cancel_button, download_button],
            controls,
            active: true,
        }
    }

    /// Remove the panel and put the upload area back to empty.
    /// Returns false when already torn down.
    pub fn exit(&mut self, interface: &mut Interface) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;

        for id in self.injected.drain(..) {
            interface.upload.review.remove(id);
        }
        interface.upload.area = UploadArea::Empty;

        crate::log_debug("DEBUG [UploadReview]: exited");
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn injected(&self) -> &[ElementId] {
        &self.injected
    }

    pub fn controls(&self) -> &OverrideControls {
        &self.controls
    }

    /// Export the uploaded file as `<category>_<timestamp>.<original ext>`
    pub fn download_request(
        &self,
        file: &SelectedFile,
        category: &str,
        at: DateTime<Utc>,
    ) -> DownloadRequest {
        let extension = original_extension(&file.file_name).unwrap_or_default();
        DownloadRequest {
            source: DownloadSource::Local(file.path.clone()),
            file_name: download_file_name(category, at, extension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn file(name: &str) -> SelectedFile {
        SelectedFile {
            path: PathBuf::from(format!("/tmp/{}", name)),
            file_name: name.to_string(),
            extension: original_extension(name).unwrap_or_default().to_string(),
            mime: "image/png".to_string(),
            size: 1024,
            dimensions: Some((640, 480)),
        }
    }

    fn result(label: &str) -> ClassificationResult {
        ClassificationResult {
            label: label.to_string(),
            category: CategoryLabel::parse(label),
            confidence: 77.0,
        }
    }

    #[test]
    fn test_enter_injects_panel() {
        let mut interface = Interface::new();
        let review = UploadReviewManager::enter(&mut interface, &file("bottle.png"), &result("battery"));

        assert!(review.is_active());
        assert_eq!(interface.upload.review.len(), 4);
        assert_eq!(interface.upload.selected_file(), Some(&file("bottle.png")));
        assert_eq!(
            review.controls().selected(&interface.upload.review),
            Some(CategoryLabel::Battery)
        );
    }

    #[test]
    fn test_exit_restores_empty_area() {
        let mut interface = Interface::new();
        let mut review = UploadReviewManager::enter(&mut interface, &file("bottle.png"), &result("battery"));

        assert!(review.exit(&mut interface));
        assert!(interface.upload.review.is_empty());
        assert_eq!(interface.upload.area, UploadArea::Empty);
        assert!(review.injected().is_empty());
    }

    #[test]
    fn test_exit_is_idempotent() {
        let mut interface = Interface::new();
        let mut review = UploadReviewManager::enter(&mut interface, &file("bottle.png"), &result("battery"));
        assert!(review.exit(&mut interface));

        // A new file chosen afterwards must survive a repeated exit
        interface.upload.area = UploadArea::Preview(file("can.jpg"));
        assert!(!review.exit(&mut interface));
        assert_eq!(interface.upload.selected_file(), Some(&file("can.jpg")));
    }

    #[test]
    fn test_download_keeps_original_extension() {
        let mut interface = Interface::new();
        let review = UploadReviewManager::enter(&mut interface, &file("bottle.PNG"), &result("battery"));
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

        let request = review.download_request(&file("bottle.PNG"), "metal", at);
        assert_eq!(request.file_name, "metal_1700000000000.PNG");
        assert_eq!(request.source, DownloadSource::Local(PathBuf::from("/tmp/bottle.PNG")));
    }
}
