//! Interface Model
//!
//! Explicit model of the interface regions the review managers inject
//! into. Elements are tracked by id so teardown is a direct removal of
//! what was inserted, never a re-discovery.

use super::types::SelectedFile;
use crate::logic::category::CategoryLabel;

/// Identifier of an injected interface element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

/// Interface elements that can be injected into a region
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    /// Streaming indicator shown over the live feed
    LiveIndicator,
    /// Dim layer over a frozen frame
    Shade,
    ReturnButton,
    DownloadButton,
    CancelButton,
    OverrideSwitch { on: bool },
    CategorySelector { selected: CategoryLabel, enabled: bool },
}

/// Ordered set of injected elements
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    elements: Vec<(ElementId, Element)>,
}

impl Region {
    pub fn insert(&mut self, id: ElementId, element: Element) {
        self.elements.push((id, element));
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|(existing, _)| *existing == id)?;
        Some(self.elements.remove(index).1)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, element)| element)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements
            .iter_mut()
            .find(|(existing, _)| *existing == id)
            .map(|(_, element)| element)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|(id, _)| *id).collect()
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().map(|(_, element)| element)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// What the camera panel is showing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedSource {
    Off,
    Live,
    Still { image_path: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedRegion {
    pub source: FeedSource,
    pub overlay: Region,
    /// Indicator inserted while the stream is open
    pub live_indicator: Option<ElementId>,
}

/// Upload drop area: either waiting for a file or previewing one
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadArea {
    Empty,
    Preview(SelectedFile),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadRegion {
    pub area: UploadArea,
    pub review: Region,
}

impl UploadRegion {
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match &self.area {
            UploadArea::Preview(file) => Some(file),
            UploadArea::Empty => None,
        }
    }
}

/// Enabled state of the static camera controls
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Controls {
    pub start_enabled: bool,
    pub stop_enabled: bool,
    pub capture_enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interface {
    pub feed: FeedRegion,
    pub upload: UploadRegion,
    pub controls: Controls,
    next_id: u64,
}

impl Interface {
    pub fn new() -> Self {
        Self {
            feed: FeedRegion {
                source: FeedSource::Off,
                overlay: Region::default(),
                live_indicator: None,
            },
            upload: UploadRegion {
                area: UploadArea::Empty,
                review: Region::default(),
            },
            controls: Controls {
                start_enabled: true,
                stop_enabled: false,
                capture_enabled: false,
            },
            next_id: 0,
        }
    }

    /// Allocate an id for a new element; ids are never reused
    pub fn allocate_id(&mut self) -> ElementId {
        self.next_id += 1;
        ElementId(self.next_id)
    }
}

impl Default for Interface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_insert_and_remove() {
        let mut interface = Interface::new();
        let a = interface.allocate_id();
        let b = interface.allocate_id();

        let mut region = Region::default();
        region.insert(a, Element::Shade);
        region.insert(b, Element::ReturnButton);
        assert_eq!(region.len(), 2);

        assert_eq!(region.remove(a), Some(Element::Shade));
        assert_eq!(region.remove(a), None);
        assert_eq!(region.ids(), vec![b]);
    }

    #[test]
    fn test_region_get_mut() {
        let mut interface = Interface::new();
        let id = interface.allocate_id();
        let mut region = Region::default();
        region.insert(id, Element::OverrideSwitch { on: false });

        if let Some(Element::OverrideSwitch { on }) = region.get_mut(id) {
            *on = true;
        }
        assert_eq!(region.get(id), Some(&Element::OverrideSwitch { on: true }));
    }

    #[test]
    fn test_initial_controls() {
        let interface = Interface::new();
        assert!(interface.controls.start_enabled);
        assert!(!interface.controls.stop_enabled);
        assert!(!interface.controls.capture_enabled);
        assert_eq!(interface.feed.source, FeedSource::Off);
        assert!(interface.upload.selected_file().is_none());
    }
}
