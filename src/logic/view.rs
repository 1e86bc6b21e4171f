//! Result panel projection
//!
//! Derives what the result panel shows from the session alone, so a
//! manual-override change is a pure recomputation.

use super::presenter::{present, present_category, BadgeStyle, CategoryDisplay};
use crate::model::Session;
use crate::utils::format_confidence;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub label_text: String,
    /// Confidence of the detected result, None when nothing was detected yet
    pub confidence: Option<f64>,
    pub confidence_text: String,
    pub display: CategoryDisplay,
    pub badge: BadgeStyle,
    pub manual: bool,
}

/// Project the session to the result panel; None before any result exists
pub fn result_view(session: &Session) -> Option<ResultView> {
    let confidence = session.last_result.as_ref().map(|result| result.confidence);
    let confidence_text = confidence.map(format_confidence).unwrap_or_default();

    if let Some(category) = session.manual_override {
        let display = present_category(category);
        return Some(ResultView {
            label_text: format!("{} (manually selected)", category.display_name()),
            confidence,
            confidence_text,
            badge: display.badge(),
            display,
            manual: true,
        });
    }

    let result = session.last_result.as_ref()?;
    let display = present(&result.label);
    let label_text = match result.category {
        Some(category) => category.display_name().to_string(),
        None => result.label.clone(),
    };

    Some(ResultView {
        label_text,
        confidence,
        confidence_text,
        badge: display.badge(),
        display,
        manual: false,
    })
}
