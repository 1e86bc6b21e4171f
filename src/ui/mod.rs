// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - icons: Icon rendering (emoji and Nerd Fonts) and badge colors
// - layout: Calculates screen layout (camera, result, upload, status)
// - render: Main orchestration function that coordinates all rendering
// - camera: Feed state and the capture review overlay
// - result: Icon, label, confidence gauge, badge and tip
// - upload: Drop area preview and the upload review panel
// - elements: Shared rendering of injected review elements
// - status_bar: Key hints for the current mode
// - dialogs: Blocking notice and the file path prompt
// - toast: Toast notifications (brief pop-up messages)

pub mod camera;
pub mod dialogs;
pub mod elements;
pub mod icons;
pub mod layout;
pub mod render;
pub mod result;
pub mod status_bar;
pub mod toast;
pub mod upload;

// Re-export main render function for convenience
pub use render::render;
