//! Capture review overlay
//!
//! Shown over the camera panel after a successful capture: the frozen
//! frame replaces the live feed, with return/download controls and the
//! manual-override pair on top.

use chrono::{DateTime, Utc};

use super::OverrideControls;
use crate::logic::category::CategoryLabel;
use crate::logic::download::{download_file_name, CAPTURE_EXTENSION};
use crate::model::{
    CapturedImage, ClassificationResult, DownloadRequest, DownloadSource, Element, ElementId,
    FeedSource, Interface,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureOverlayManager {
    injected: Vec<ElementId>,
    controls: OverrideControls,
    /// Feed source before the capture; taken on exit
    restore_source: Option<FeedSource>,
}

impl CaptureOverlayManager {
    /// Inject the review controls over the feed and freeze it on the captured image
    pub fn enter(
        interface: &mut Interface,
        image: &CapturedImage,
        result: &ClassificationResult,
    ) -> Self {
        let shade = interface.allocate_id();
        let return_button = interface.allocate_id();
        let download_button = interface.allocate_id();
        let switch = interface.allocate_id();
        let selector = interface.allocate_id();

        let restore_source = std::mem::replace(
            &mut interface.feed.source,
            FeedSource::Still {
                image_path: image.image_path.clone(),
            },
        );

        let region = &mut interface.feed.overlay;
        region.insert(shade, Element::Shade);
        region.insert(return_button, Element::ReturnButton);
        region.insert(download_button, Element::DownloadButton);
        let preset = result.category.unwrap_or(CategoryLabel::ALL[0]);
        let controls = OverrideControls::inject(region, switch, selector, preset);

        interface.controls.capture_enabled = false;

        crate::log_debug(&format!(
            "DEBUG [CaptureOverlay]: entered for {} (detected {})",
            image.image_path, result.label
        ));

        Self {
            injected: vec![shade, return_button, download_button, switch, selector],
            controls,
            restore_source: Some(restore_source),
        }
    }

    /// Remove exactly the injected elements and restore the feed source.
    /// Returns false when already torn down.
    pub fn exit(&mut self, interface: &mut Interface) -> bool {
        let Some(source) = self.restore_source.take() else {
            return false;
        };

        for id in self.injected.drain(..) {
            interface.feed.overlay.remove(id);
        }
        interface.feed.source = source;

        crate::log_debug("DEBUG [CaptureOverlay]: exited");
        true
    }

    pub fn is_active(&self) -> bool {
        self.restore_source.is_some()
    }

    pub fn injected(&self) -> &[ElementId] {
        &self.injected
    }

    pub fn controls(&self) -> &OverrideControls {
        &self.controls
    }

    /// Export the captured frame as `<category>_<timestamp>.jpg`
    pub fn download_request(
        &self,
        image: &CapturedImage,
        category: &str,
        at: DateTime<Utc>,
    ) -> DownloadRequest {
        DownloadRequest {
            source: DownloadSource::Remote {
                image_path: image.image_path.clone(),
            },
            file_name: download_file_name(category, at, CAPTURE_EXTENSION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result(label: &str) -> ClassificationResult {
        ClassificationResult {
            label: label.to_string(),
            category: CategoryLabel::parse(label),
            confidence: 92.0,
        }
    }

    fn image() -> CapturedImage {
        CapturedImage {
            image_path: "/static/uploads/capture_1.jpg".to_string(),
        }
    }

    fn streaming_interface() -> (Interface, ElementId) {
        let mut interface = Interface::new();
        interface.feed.source = FeedSource::Live;
        interface.controls.capture_enabled = true;
        let live = interface.allocate_id();
        interface.feed.overlay.insert(live, Element::LiveIndicator);
        (interface, live)
    }

    #[test]
    fn test_enter_freezes_feed_and_disables_capture() {
        let (mut interface, _) = streaming_interface();
        let overlay = CaptureOverlayManager::enter(&mut interface, &image(), &result("plastic"));

        assert!(overlay.is_active());
        assert_eq!(
            interface.feed.source,
            FeedSource::Still {
                image_path: "/static/uploads/capture_1.jpg".to_string()
            }
        );
        assert!(!interface.controls.capture_enabled);
        assert_eq!(interface.feed.overlay.len(), 6);
        assert_eq!(
            overlay.controls().selected(&interface.feed.overlay),
            Some(CategoryLabel::Plastic)
        );
        assert!(!overlay.controls().is_on(&interface.feed.overlay));
    }

    #[test]
    fn test_unknown_label_presets_first_option() {
        let (mut interface, _) = streaming_interface();
        let overlay = CaptureOverlayManager::enter(&mut interface, &image(), &result("Error"));
        assert_eq!(
            overlay.controls().selected(&interface.feed.overlay),
            Some(CategoryLabel::Battery)
        );
    }

    #[test]
    fn test_exit_removes_only_injected_elements() {
        let (mut interface, live) = streaming_interface();
        let mut overlay = CaptureOverlayManager::enter(&mut interface, &image(), &result("plastic"));
        let injected = overlay.injected().to_vec();

        assert!(overlay.exit(&mut interface));

        assert_eq!(interface.feed.overlay.ids(), vec![live]);
        for id in injected {
            assert!(!interface.feed.overlay.contains(id));
        }
        assert_eq!(interface.feed.source, FeedSource::Live);
        assert!(!overlay.is_active());
    }

    #[test]
    fn test_exit_is_idempotent() {
        let (mut interface, live) = streaming_interface();
        let mut overlay = CaptureOverlayManager::enter(&mut interface, &image(), &result("plastic"));
        assert!(overlay.exit(&mut interface));

        // Something else changes the feed afterwards; a second exit must not touch it
        interface.feed.source = FeedSource::Off;
        assert!(!overlay.exit(&mut interface));
        assert_eq!(interface.feed.source, FeedSource::Off);
        assert_eq!(interface.feed.overlay.ids(), vec![live]);
    }

    #[test]
    fn test_download_request_name() {
        let (mut interface, _) = streaming_interface();
        let overlay = CaptureOverlayManager::enter(&mut interface, &image(), &result("plastic"));
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

        let request = overlay.download_request(&image(), "trash", at);
        assert_eq!(request.file_name, "trash_1700000000000.jpg");
        assert_eq!(
            request.source,
            DownloadSource::Remote {
                image_path: "/static/uploads/capture_1.jpg".to_string()
            }
        );
    }
}
