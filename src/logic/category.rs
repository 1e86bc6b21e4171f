//! Waste category labels
//!
//! The fixed set of labels the classification service reports and the
//! manual-override selector offers.

use std::fmt;
use std::str::FromStr;

/// One of the 10 waste types the classifier knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryLabel {
    Battery,
    Biological,
    BrownGlass,
    Cardboard,
    GreenGlass,
    Metal,
    Paper,
    Plastic,
    Trash,
    WhiteGlass,
}

impl CategoryLabel {
    /// All labels in selector order
    pub const ALL: [CategoryLabel; 10] = [
        CategoryLabel::Battery,
        CategoryLabel::Biological,
        CategoryLabel::BrownGlass,
        CategoryLabel::Cardboard,
        CategoryLabel::GreenGlass,
        CategoryLabel::Metal,
        CategoryLabel::Paper,
        CategoryLabel::Plastic,
        CategoryLabel::Trash,
        CategoryLabel::WhiteGlass,
    ];

    /// Wire identifier (as reported by the service and used in file names)
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryLabel::Battery => "battery",
            CategoryLabel::Biological => "biological",
            CategoryLabel::BrownGlass => "brown-glass",
            CategoryLabel::Cardboard => "cardboard",
            CategoryLabel::GreenGlass => "green-glass",
            CategoryLabel::Metal => "metal",
            CategoryLabel::Paper => "paper",
            CategoryLabel::Plastic => "plastic",
            CategoryLabel::Trash => "trash",
            CategoryLabel::WhiteGlass => "white-glass",
        }
    }

    /// Human-readable name shown in the category selector
    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryLabel::Battery => "Battery & Accumulators",
            CategoryLabel::Biological => "Organic Waste",
            CategoryLabel::BrownGlass => "Brown Glass",
            CategoryLabel::Cardboard => "Cardboard",
            CategoryLabel::GreenGlass => "Green Glass",
            CategoryLabel::Metal => "Metal",
            CategoryLabel::Paper => "Paper",
            CategoryLabel::Plastic => "Plastic",
            CategoryLabel::Trash => "Other Waste",
            CategoryLabel::WhiteGlass => "White Glass",
        }
    }

    /// Parse a label reported by the service (case-insensitive)
    pub fn parse(label: &str) -> Option<CategoryLabel> {
        let lower = label.to_lowercase();
        CategoryLabel::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == lower)
    }

    fn position(&self) -> usize {
        CategoryLabel::ALL
            .iter()
            .position(|candidate| candidate == self)
            .unwrap_or(0)
    }

    /// Next label in selector order (wraps around)
    pub fn next(&self) -> CategoryLabel {
        CategoryLabel::ALL[(self.position() + 1) % CategoryLabel::ALL.len()]
    }

    /// Previous label in selector order (wraps around)
    pub fn prev(&self) -> CategoryLabel {
        let len = CategoryLabel::ALL.len();
        CategoryLabel::ALL[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryLabel::parse(s).ok_or_else(|| anyhow::anyhow!("Unknown waste category: {}", s))
    }
}
