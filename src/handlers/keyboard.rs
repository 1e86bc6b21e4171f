//! Keyboard Input Handler
//!
//! Maps key presses and pasted text to session messages. Modal input
//! (the notice dialog and the file path prompt) is handled here first;
//! everything else becomes a `Msg` for the controller.

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::log_debug;
use crate::logic::upload::{inspect_file, path_from_drop};
use crate::messages::Msg;
use crate::model::{Mode, Model};

/// Handle keyboard input
///
/// Returns the message to dispatch, if the key maps to one.
pub fn handle_key(model: &mut Model, key: KeyEvent) -> Option<Msg> {
    // Ctrl-C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Msg::Quit);
    }

    // While a notice is shown only dismissal keys are accepted
    if model.ui.notice.is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => {
                Some(Msg::DismissNotice)
            }
            _ => None,
        };
    }

    if model.ui.file_prompt.is_some() {
        return handle_prompt_key(model, key);
    }

    let mode = model.session.mode;
    match key.code {
        KeyCode::Char('q') => Some(Msg::Quit),
        KeyCode::Char('s') => Some(Msg::StartCamera),
        KeyCode::Char('x') => Some(Msg::StopCamera),
        KeyCode::Char('c') | KeyCode::Char(' ') => Some(Msg::RequestCapture),
        KeyCode::Char('o') => {
            if matches!(mode, Mode::ProcessingUpload | Mode::UploadReview) {
                return None;
            }
            model.ui.file_prompt = Some(String::new());
            None
        }
        KeyCode::Char('u') | KeyCode::Enter => Some(Msg::SubmitUpload),
        KeyCode::Char('r') => Some(Msg::RemovePreview),
        KeyCode::Char('m') => Some(Msg::ToggleManualOverride),
        KeyCode::Left | KeyCode::Char('h') => model.active_selector().map(|c| Msg::SelectCategory(c.prev())),
        KeyCode::Right | KeyCode::Char('l') => model.active_selector().map(|c| Msg::SelectCategory(c.next())),
        KeyCode::Esc | KeyCode::Char('b') => match mode {
            Mode::CaptureReview => Some(Msg::ReturnFromCapture),
            Mode::UploadReview => Some(Msg::CancelUploadReview),
            Mode::ProcessingUpload => Some(Msg::RemovePreview),
            _ => None,
        },
        KeyCode::Char('d') => Some(Msg::Download { at: Utc::now() }),
        _ => None,
    }
}

/// Edit the file path prompt; Enter validates the path
fn handle_prompt_key(model: &mut Model, key: KeyEvent) -> Option<Msg> {
    let prompt = model.ui.file_prompt.as_mut()?;
    match key.code {
        KeyCode::Esc => {
            model.ui.file_prompt = None;
            None
        }
        KeyCode::Backspace => {
            prompt.pop();
            None
        }
        KeyCode::Char(c) => {
            prompt.push(c);
            None
        }
        KeyCode::Enter => {
            let text = std::mem::take(prompt);
            model.ui.file_prompt = None;
            select_path(model, &text)
        }
        _ => None,
    }
}

/// Handle a bracketed paste: into the prompt if open, otherwise as a dropped file
pub fn handle_paste(model: &mut Model, text: &str) -> Option<Msg> {
    if model.ui.notice.is_some() {
        return None;
    }
    if let Some(prompt) = model.ui.file_prompt.as_mut() {
        prompt.push_str(text.trim_end_matches(&['\r', '\n'][..]));
        return None;
    }
    if matches!(model.session.mode, Mode::ProcessingUpload | Mode::UploadReview) {
        return None;
    }
    select_path(model, text)
}

fn select_path(model: &mut Model, text: &str) -> Option<Msg> {
    let path = path_from_drop(text)?;
    match inspect_file(&path) {
        Ok(file) => Some(Msg::ChooseFile(file)),
        Err(e) => {
            log_debug(&format!(
                "DEBUG [Keyboard]: rejected {}: {:#}",
                path.display(),
                e
            ));
            model.ui.show_notice(e.to_string());
            None
        }
    }
}
