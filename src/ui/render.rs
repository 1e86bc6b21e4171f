use ratatui::Frame;

use super::{camera, dialogs, layout, result, status_bar, toast, upload};
use crate::App;

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();
    let layout_info = layout::calculate_layout(size);
    let model = &app.model;

    camera::render_camera(
        f,
        layout_info.camera_area,
        &model.interface,
        model.session.mode,
        model.ui.feed_url.as_deref(),
        app.frame_count(),
        &app.icon_renderer,
    );

    result::render_result(f, layout_info.result_area, &model.session, &app.icon_renderer);

    upload::render_upload(
        f,
        layout_info.upload_area,
        &model.interface,
        model.session.mode,
        &app.icon_renderer,
    );

    status_bar::render_status_bar(
        f,
        layout_info.status_area,
        model.session.mode,
        model.session.stream_active,
        app.client.base_url(),
    );

    if let Some(input) = &model.ui.file_prompt {
        dialogs::render_file_prompt(f, input);
    }

    // Notice goes on top of everything else
    if let Some(message) = &model.ui.notice {
        dialogs::render_notice(f, message);
    }

    if let Some((message, _)) = &model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
