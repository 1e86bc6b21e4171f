//! Session Controller
//!
//! `update` is the only place the session is mutated. It takes the
//! current model and one message, applies the transition, and returns
//! the I/O the runtime must perform. Completions are applied only while
//! the mode and the ticket/token that requested them still match.

use chrono::{DateTime, Utc};

use crate::log_debug;
use crate::logic::category::CategoryLabel;
use crate::logic::errors::{classify_error, format_error_message};
use crate::messages::Msg;
use crate::model::{
    CapturedImage, ClassificationResult, DownloadRequest, Element, FeedSource, Mode, Model,
    PendingRequest, PollToken, Region, SelectedFile, UploadArea,
};
use crate::overlay::{CaptureOverlayManager, OverrideControls, UploadReviewManager};
use crate::services::api::ApiRequest;

/// I/O requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenFeed,
    CloseFeed,
    StartPoller(PollToken),
    StopPoller,
    Api(ApiRequest),
    /// Quit: stop everything, optionally telling the backend to stop the stream
    Shutdown { notify_backend: bool },
}

/// Apply one message to the model
pub fn update(model: &mut Model, msg: Msg) -> Vec<Effect> {
    let mut effects = Vec::new();
    let before = model.session.mode;
    let name = msg.name();

    match msg {
        Msg::StartCamera => start_camera(model, &mut effects),
        Msg::StopCamera => stop_camera(model, &mut effects),
        Msg::RequestCapture => request_capture(model, &mut effects),
        Msg::ReturnFromCapture => return_from_capture(model, &mut effects),
        Msg::ChooseFile(file) => {
            if matches!(before, Mode::ProcessingUpload | Mode::UploadReview) {
                ignore(name, before);
            } else {
                log_debug(&format!("DEBUG [Controller]: selected {}", file.path.display()));
                model.interface.upload.area = UploadArea::Preview(file);
            }
        }
        Msg::RemovePreview => remove_preview(model, &mut effects),
        Msg::SubmitUpload => submit_upload(model, &mut effects),
        Msg::CancelUploadReview => {
            if before == Mode::UploadReview {
                leave_upload_review(model, &mut effects);
            } else {
                ignore(name, before);
            }
        }

        Msg::ToggleManualOverride => {
            let switch_on = model.override_switch_on();
            match (switch_on, model.active_selector()) {
                (true, _) => clear_override(model),
                (false, Some(selected)) => set_override(model, selected),
                (false, None) => ignore(name, before),
            }
        }
        Msg::SelectCategory(category) => {
            if model.override_switch_on() {
                set_override(model, category);
            } else {
                ignore(name, before);
            }
        }
        Msg::ManualOverrideSet(category) => set_override(model, category),
        Msg::ManualOverrideClear => clear_override(model),

        Msg::Download { at } => match download_request(model, at) {
            Some(request) => effects.push(Effect::Api(ApiRequest::Download(request))),
            None => ignore(name, before),
        },

        Msg::DismissNotice => model.ui.dismiss_notice(),

        Msg::Quit => quit(model, &mut effects),

        Msg::PredictionResult { token, prediction } => {
            if !model.session.accepts_poll(token) {
                log_debug(&format!(
                    "DEBUG [Controller]: discarding stale prediction (token {}, mode {})",
                    token.0,
                    before.as_str()
                ));
            } else {
                match prediction {
                    Ok(prediction) => {
                        model.session.last_result = Some(ClassificationResult::from_prediction(&prediction));
                    }
                    Err(e) => {
                        log_debug(&format!(
                            "DEBUG [Controller]: prediction failed ({:?}): {:#}",
                            classify_error(&e),
                            e
                        ));
                    }
                }
            }
        }

        Msg::CaptureResponse { ticket, result } => {
            if !model.session.accepts_response(Mode::Capturing, ticket) {
                log_debug(&format!(
                    "DEBUG [Controller]: discarding stale capture response (ticket {}, mode {})",
                    ticket.0,
                    before.as_str()
                ));
            } else {
                model.session.pending = None;
                match result {
                    Ok(outcome) => {
                        let result = ClassificationResult::from_prediction(&outcome.prediction);
                        let image = CapturedImage {
                            image_path: outcome.image_path,
                        };
                        enter_capture_review(model, image, result);
                    }
                    Err(e) => {
                        log_debug(&format!(
                            "DEBUG [Controller]: capture failed ({:?}): {:#}",
                            classify_error(&e),
                            e
                        ));
                        model
                            .ui
                            .show_notice(format!("Error capturing image: {}", format_error_message(&e)));
                        settle(model, &mut effects);
                    }
                }
            }
        }

        Msg::UploadResponse { ticket, result } => {
            if !model.session.accepts_response(Mode::ProcessingUpload, ticket) {
                log_debug(&format!(
                    "DEBUG [Controller]: discarding stale upload response (ticket {}, mode {})",
                    ticket.0,
                    before.as_str()
                ));
            } else {
                let pending = model.session.pending.take();
                match (result, pending) {
                    (Ok(prediction), Some(PendingRequest::Upload { file, .. })) => {
                        let result = ClassificationResult::from_prediction(&prediction);
                        enter_upload_review(model, file, result);
                    }
                    (Ok(_), _) => settle(model, &mut effects),
                    (Err(e), _) => {
                        log_debug(&format!(
                            "DEBUG [Controller]: upload failed ({:?}): {:#}",
                            classify_error(&e),
                            e
                        ));
                        model
                            .ui
                            .show_notice(format!("Error uploading image: {}", format_error_message(&e)));
                        settle(model, &mut effects);
                    }
                }
            }
        }

        Msg::StopCameraAck { result } => match result {
            Ok(()) => log_debug("DEBUG [Controller]: backend acknowledged stop"),
            Err(e) => {
                log_debug(&format!("DEBUG [Controller]: stop failed: {:#}", e));
                model
                    .ui
                    .show_notice(format!("Error stopping camera: {}", format_error_message(&e)));
            }
        },

        Msg::DownloadFinished { result } => match result {
            Ok(path) => model.ui.show_toast(format!("Saved {}", path.display())),
            Err(e) => {
                log_debug(&format!("DEBUG [Controller]: download failed: {:#}", e));
                model
                    .ui
                    .show_notice(format!("Error downloading image: {}", format_error_message(&e)));
            }
        },

        Msg::FeedClosed { error } => {
            if model.session.stream_active {
                match error {
                    Some(error) => model.ui.show_toast(format!("Video feed lost: {}", error)),
                    None => model.ui.show_toast("Video feed ended".to_string()),
                }
            } else {
                log_debug("DEBUG [Controller]: feed closed after stop");
            }
        }
    }

    refresh_controls(model);

    if model.session.mode != before {
        log_debug(&format!(
            "DEBUG [Controller]: {} -> {} on {}",
            before.as_str(),
            model.session.mode.as_str(),
            name
        ));
    }

    effects
}

fn ignore(name: &str, mode: Mode) {
    log_debug(&format!(
        "DEBUG [Controller]: ignoring {} in mode {}",
        name,
        mode.as_str()
    ));
}

fn start_camera(model: &mut Model, effects: &mut Vec<Effect>) {
    if model.session.mode != Mode::Idle || model.session.stream_active {
        ignore("StartCamera", model.session.mode);
        return;
    }

    model.session.stream_active = true;
    model.interface.feed.source = FeedSource::Live;
    let indicator = model.interface.allocate_id();
    model.interface.feed.overlay.insert(indicator, Element::LiveIndicator);
    model.interface.feed.live_indicator = Some(indicator);

    effects.push(Effect::OpenFeed);
    enter_streaming(model, effects);
}

fn stop_camera(model: &mut Model, effects: &mut Vec<Effect>) {
    if !model.session.stream_active {
        ignore("StopCamera", model.session.mode);
        return;
    }

    stop_polling(model, effects);
    exit_reviews(model);
    // In-flight capture/upload responses become stale
    model.session.pending = None;

    model.session.stream_active = false;
    model.interface.feed.source = FeedSource::Off;
    if let Some(indicator) = model.interface.feed.live_indicator.take() {
        model.interface.feed.overlay.remove(indicator);
    }
    model.session.mode = Mode::Idle;

    effects.push(Effect::CloseFeed);
    effects.push(Effect::Api(ApiRequest::StopCamera));
}

fn request_capture(model: &mut Model, effects: &mut Vec<Effect>) {
    if model.session.mode != Mode::Streaming {
        ignore("RequestCapture", model.session.mode);
        return;
    }

    stop_polling(model, effects);
    let ticket = model.session.issue_ticket();
    model.session.pending = Some(PendingRequest::Capture(ticket));
    model.session.mode = Mode::Capturing;

    effects.push(Effect::Api(ApiRequest::CaptureImage { ticket }));
}

fn return_from_capture(model: &mut Model, effects: &mut Vec<Effect>) {
    if model.session.mode != Mode::CaptureReview {
        ignore("ReturnFromCapture", model.session.mode);
        return;
    }

    exit_reviews(model);
    settle(model, effects);
}

fn submit_upload(model: &mut Model, effects: &mut Vec<Effect>) {
    if !matches!(model.session.mode, Mode::Idle | Mode::Streaming) {
        ignore("SubmitUpload", model.session.mode);
        return;
    }

    let Some(file) = model.interface.upload.selected_file().cloned() else {
        model.ui.show_notice("Please select an image to upload".to_string());
        return;
    };

    stop_polling(model, effects);
    let ticket = model.session.issue_ticket();
    model.session.pending = Some(PendingRequest::Upload {
        ticket,
        file: file.clone(),
    });
    model.session.mode = Mode::ProcessingUpload;

    effects.push(Effect::Api(ApiRequest::Upload { ticket, file }));
}

fn remove_preview(model: &mut Model, effects: &mut Vec<Effect>) {
    match model.session.mode {
        Mode::UploadReview => leave_upload_review(model, effects),
        Mode::ProcessingUpload => {
            // Abandon the request; its response will be discarded
            model.session.pending = None;
            model.interface.upload.area = UploadArea::Empty;
            settle(model, effects);
        }
        _ => model.interface.upload.area = UploadArea::Empty,
    }
}

fn leave_upload_review(model: &mut Model, effects: &mut Vec<Effect>) {
    exit_reviews(model);
    settle(model, effects);
}

fn quit(model: &mut Model, effects: &mut Vec<Effect>) {
    let notify_backend = model.session.stream_active;

    stop_polling(model, effects);
    exit_reviews(model);
    model.session.pending = None;

    if model.session.stream_active {
        model.session.stream_active = false;
        model.interface.feed.source = FeedSource::Off;
        if let Some(indicator) = model.interface.feed.live_indicator.take() {
            model.interface.feed.overlay.remove(indicator);
        }
        effects.push(Effect::CloseFeed);
    }
    model.session.mode = Mode::Idle;
    model.ui.should_quit = true;

    effects.push(Effect::Shutdown { notify_backend });
}

/// Enter Streaming with a fresh poller
fn enter_streaming(model: &mut Model, effects: &mut Vec<Effect>) {
    let token = model.session.issue_poll_token();
    model.session.poll = Some(token);
    model.session.mode = Mode::Streaming;
    effects.push(Effect::StartPoller(token));
}

/// Return to the non-review mode matching the stream state
fn settle(model: &mut Model, effects: &mut Vec<Effect>) {
    if model.session.stream_active {
        enter_streaming(model, effects);
    } else {
        model.session.mode = Mode::Idle;
    }
}

fn stop_polling(model: &mut Model, effects: &mut Vec<Effect>) {
    if model.session.poll.take().is_some() {
        effects.push(Effect::StopPoller);
    }
}

/// Tear down whichever review is injected and release its artifact
fn exit_reviews(model: &mut Model) {
    if let Some(mut overlay) = model.session.capture_overlay.take() {
        overlay.exit(&mut model.interface);
    }
    model.session.captured_image = None;

    if let Some(mut review) = model.session.upload_review.take() {
        review.exit(&mut model.interface);
    }
    model.session.uploaded_file = None;

    model.session.manual_override = None;
}

fn enter_capture_review(model: &mut Model, image: CapturedImage, result: ClassificationResult) {
    exit_reviews(model);

    let overlay = CaptureOverlayManager::enter(&mut model.interface, &image, &result);
    model.session.capture_overlay = Some(overlay);
    model.session.captured_image = Some(image);
    model.session.last_result = Some(result);
    model.session.mode = Mode::CaptureReview;
}

fn enter_upload_review(
    model: &mut Model,
    file: SelectedFile,
    result: ClassificationResult,
) {
    exit_reviews(model);

    let review = UploadReviewManager::enter(&mut model.interface, &file, &result);
    model.session.upload_review = Some(review);
    model.session.uploaded_file = Some(file);
    model.session.last_result = Some(result);
    model.session.mode = Mode::UploadReview;
}

/// Export request for the artifact under review, named by the effective category
fn download_request(model: &Model, at: DateTime<Utc>) -> Option<DownloadRequest> {
    let category = model.session.effective_category()?;
    let session = &model.session;

    if let (Some(overlay), Some(image)) = (&session.capture_overlay, &session.captured_image) {
        return Some(overlay.download_request(image, &category, at));
    }
    if let (Some(review), Some(file)) = (&session.upload_review, &session.uploaded_file) {
        return Some(review.download_request(file, &category, at));
    }
    None
}

/// Controls and region of the active review, if any
fn active_controls(model: &mut Model) -> Option<(OverrideControls, &mut Region)> {
    if let Some(overlay) = &model.session.capture_overlay {
        return Some((*overlay.controls(), &mut model.interface.feed.overlay));
    }
    if let Some(review) = &model.session.upload_review {
        return Some((*review.controls(), &mut model.interface.upload.review));
    }
    None
}

fn set_override(model: &mut Model, category: CategoryLabel) {
    let mode = model.session.mode;
    let Some((controls, region)) = active_controls(model) else {
        ignore("ManualOverrideSet", mode);
        return;
    };
    controls.set(region, category);
    model.session.manual_override = Some(category);
}

fn clear_override(model: &mut Model) {
    let mode = model.session.mode;
    let Some((controls, region)) = active_controls(model) else {
        ignore("ManualOverrideClear", mode);
        return;
    };
    controls.clear(region);
    model.session.manual_override = None;
}

/// Derive the static control states from the session
fn refresh_controls(model: &mut Model) {
    let session = &model.session;
    let controls = &mut model.interface.controls;
    controls.start_enabled = session.mode == Mode::Idle && !session.stream_active;
    controls.stop_enabled = session.stream_active;
    controls.capture_enabled = session.mode == Mode::Streaming;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Prediction;
    use crate::model::RequestTicket;
    use std::path::PathBuf;

    fn file() -> SelectedFile {
        SelectedFile {
            path: PathBuf::from("/tmp/can.png"),
            file_name: "can.png".to_string(),
            extension: "png".to_string(),
            mime: "image/png".to_string(),
            size: 10,
            dimensions: None,
        }
    }

    #[test]
    fn test_start_camera_opens_feed_and_poller() {
        let mut model = Model::new();
        let effects = update(&mut model, Msg::StartCamera);

        assert_eq!(model.mode(), Mode::Streaming);
        assert!(model.session.stream_active);
        let token = model.session.poll.unwrap();
        assert_eq!(effects, vec![Effect::OpenFeed, Effect::StartPoller(token)]);
        assert!(model.interface.controls.capture_enabled);
        assert!(!model.interface.controls.start_enabled);
        assert!(model.interface.controls.stop_enabled);
    }

    #[test]
    fn test_start_camera_ignored_outside_idle() {
        let mut model = Model::new();
        update(&mut model, Msg::StartCamera);
        assert!(update(&mut model, Msg::StartCamera).is_empty());
    }

    #[test]
    fn test_stop_camera_without_stream_is_ignored() {
        let mut model = Model::new();
        assert!(update(&mut model, Msg::StopCamera).is_empty());
        assert_eq!(model.mode(), Mode::Idle);
    }

    #[test]
    fn test_submit_without_file_shows_notice() {
        let mut model = Model::new();
        let effects = update(&mut model, Msg::SubmitUpload);
        assert!(effects.is_empty());
        assert_eq!(model.ui.notice.as_deref(), Some("Please select an image to upload"));
        assert_eq!(model.mode(), Mode::Idle);
    }

    #[test]
    fn test_choose_file_rejected_while_processing() {
        let mut model = Model::new();
        update(&mut model, Msg::ChooseFile(file()));
        update(&mut model, Msg::SubmitUpload);
        assert_eq!(model.mode(), Mode::ProcessingUpload);

        let mut other = file();
        other.file_name = "other.png".to_string();
        update(&mut model, Msg::ChooseFile(other));
        assert_eq!(model.interface.upload.selected_file(), Some(&file()));
    }

    #[test]
    fn test_remove_preview_abandons_upload() {
        let mut model = Model::new();
        update(&mut model, Msg::ChooseFile(file()));
        update(&mut model, Msg::SubmitUpload);
        let ticket = model.session.pending.as_ref().map(|p| p.ticket()).unwrap();

        update(&mut model, Msg::RemovePreview);
        assert_eq!(model.mode(), Mode::Idle);
        assert!(model.interface.upload.selected_file().is_none());

        update(
            &mut model,
            Msg::UploadResponse {
                ticket,
                result: Ok(Prediction {
                    class_name: "battery".to_string(),
                    confidence: 77.0,
                }),
            },
        );
        assert_eq!(model.mode(), Mode::Idle);
        assert!(model.session.upload_review.is_none());
        assert!(model.session.last_result.is_none());
    }

    #[test]
    fn test_override_outside_review_is_ignored() {
        let mut model = Model::new();
        update(&mut model, Msg::ManualOverrideSet(CategoryLabel::Metal));
        assert!(model.session.manual_override.is_none());
    }

    #[test]
    fn test_download_outside_review_is_ignored() {
        let mut model = Model::new();
        let effects = update(&mut model, Msg::Download { at: chrono::Utc::now() });
        assert!(effects.is_empty());
    }

    #[test]
    fn test_unknown_ticket_is_stale() {
        let mut model = Model::new();
        update(&mut model, Msg::StartCamera);
        update(&mut model, Msg::RequestCapture);

        update(
            &mut model,
            Msg::CaptureResponse {
                ticket: RequestTicket(999),
                result: Err(anyhow::anyhow!("boom")),
            },
        );
        assert_eq!(model.mode(), Mode::Capturing);
        assert!(model.ui.notice.is_none());
    }

    #[test]
    fn test_quit_while_streaming_notifies_backend() {
        let mut model = Model::new();
        update(&mut model, Msg::StartCamera);

        let effects = update(&mut model, Msg::Quit);
        assert!(model.ui.should_quit);
        assert_eq!(
            effects,
            vec![
                Effect::StopPoller,
                Effect::CloseFeed,
                Effect::Shutdown { notify_backend: true }
            ]
        );
    }

    #[test]
    fn test_entering_capture_review_tears_down_upload_review() {
        let mut model = Model::new();
        update(&mut model, Msg::ChooseFile(file()));
        update(&mut model, Msg::SubmitUpload);
        let ticket = model.session.pending.as_ref().map(|p| p.ticket()).unwrap();
        update(
            &mut model,
            Msg::UploadResponse {
                ticket,
                result: Ok(Prediction {
                    class_name: "battery".to_string(),
                    confidence: 77.0,
                }),
            },
        );
        assert_eq!(model.mode(), Mode::UploadReview);
        let upload_ids = model.session.upload_review.as_ref().unwrap().injected().to_vec();
        assert!(!upload_ids.is_empty());

        let result = ClassificationResult::from_prediction(&Prediction {
            class_name: "metal".to_string(),
            confidence: 60.0,
        });
        let image = CapturedImage {
            image_path: "/static/uploads/capture_1.jpg".to_string(),
        };
        enter_capture_review(&mut model, image, result);

        assert_eq!(model.mode(), Mode::CaptureReview);
        assert_eq!(model.session.review_count(), 1);
        assert!(model.session.upload_review.is_none());
        assert!(model.session.uploaded_file.is_none());
        for id in upload_ids {
            assert!(!model.interface.upload.review.contains(id));
        }
        assert!(!model.interface.feed.overlay.is_empty());
    }

    #[test]
    fn test_quit_while_idle_skips_backend() {
        let mut model = Model::new();
        let effects = update(&mut model, Msg::Quit);
        assert_eq!(effects, vec![Effect::Shutdown { notify_backend: false }]);
    }
}
