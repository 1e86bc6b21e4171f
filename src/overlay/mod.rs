//! Review Interfaces
//!
//! Transient review interfaces injected after a capture or an upload:
//! - capture: controls over the frozen camera frame
//! - upload: review panel below the upload area
//!
//! Both carry the same manual-override switch + category selector pair.

pub mod capture;
pub mod upload;

pub use capture::CaptureOverlayManager;
pub use upload::UploadReviewManager;

use crate::logic::category::CategoryLabel;
use crate::model::{Element, ElementId, Region};

/// Manual-override switch and category selector injected into a region
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverrideControls {
    switch: ElementId,
    selector: ElementId,
}

impl OverrideControls {
    /// Insert a switch (off) and a disabled selector pre-set to `initial`
    pub(crate) fn inject(
        region: &mut Region,
        switch: ElementId,
        selector: ElementId,
        initial: CategoryLabel,
    ) -> Self {
        region.insert(switch, Element::OverrideSwitch { on: false });
        region.insert(
            selector,
            Element::CategorySelector {
                selected: initial,
                enabled: false,
            },
        );
        Self { switch, selector }
    }

    pub fn ids(&self) -> [ElementId; 2] {
        [self.switch, self.selector]
    }

    pub fn is_on(&self, region: &Region) -> bool {
        matches!(region.get(self.switch), Some(Element::OverrideSwitch { on: true }))
    }

    pub fn selected(&self, region: &Region) -> Option<CategoryLabel> {
        match region.get(self.selector) {
            Some(Element::CategorySelector { selected, .. }) => Some(*selected),
            _ => None,
        }
    }

    /// Switch on and select `label`
    pub fn set(&self, region: &mut Region, label: CategoryLabel) {
        if let Some(Element::OverrideSwitch { on }) = region.get_mut(self.switch) {
            *on = true;
        }
        if let Some(Element::CategorySelector { selected, enabled }) = region.get_mut(self.selector) {
            *selected = label;
            *enabled = true;
        }
    }

    /// Switch off; the selector keeps its value but is disabled
    pub fn clear(&self, region: &mut Region) {
        if let Some(Element::OverrideSwitch { on }) = region.get_mut(self.switch) {
            *on = false;
        }
        if let Some(Element::CategorySelector { enabled, .. }) = region.get_mut(self.selector) {
            *enabled = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Interface;

    fn controls() -> (Region, OverrideControls) {
        let mut interface = Interface::new();
        let switch = interface.allocate_id();
        let selector = interface.allocate_id();
        let mut region = Region::default();
        let controls = OverrideControls::inject(&mut region, switch, selector, CategoryLabel::Plastic);
        (region, controls)
    }

    #[test]
    fn test_injected_off_with_preset() {
        let (region, controls) = controls();
        assert!(!controls.is_on(&region));
        assert_eq!(controls.selected(&region), Some(CategoryLabel::Plastic));
    }

    #[test]
    fn test_set_and_clear() {
        let (mut region, controls) = controls();
        controls.set(&mut region, CategoryLabel::Trash);
        assert!(controls.is_on(&region));
        assert_eq!(controls.selected(&region), Some(CategoryLabel::Trash));

        controls.clear(&mut region);
        assert!(!controls.is_on(&region));
        assert_eq!(controls.selected(&region), Some(CategoryLabel::Trash));
    }
}
