//! Classification presentation
//!
//! Pure mapping from a category label to what the result panel shows:
//! an icon, a disposal tip and a waste group with its badge style.
//!
//! The three glass variants collapse to a single display entry.
//! TODO: product review on whether brown/green/white glass should get distinct tips.

use super::category::CategoryLabel;

/// Icon shown next to a classification result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Hazardous,
    Organic,
    Paper,
    Plastic,
    Metal,
    Glass,
    MixedWaste,
    Unknown,
}

/// Waste group a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryGroup {
    Hazardous,
    Organic,
    Recyclable,
    NonRecyclable,
    Unidentified,
}

impl CategoryGroup {
    /// Group name ("" for unidentified input)
    pub fn label(&self) -> &'static str {
        match self {
            CategoryGroup::Hazardous => "Hazardous waste",
            CategoryGroup::Organic => "Organic waste",
            CategoryGroup::Recyclable => "Recyclable waste",
            CategoryGroup::NonRecyclable => "Non-recyclable waste",
            CategoryGroup::Unidentified => "",
        }
    }

    /// Text shown inside the badge
    pub fn badge_text(&self) -> &'static str {
        match self {
            CategoryGroup::Unidentified => "Unidentified",
            other => other.label(),
        }
    }
}

/// Badge styling, one per waste group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Success,
    Primary,
    Warning,
    Danger,
    Secondary,
}

/// Display metadata derived from a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDisplay {
    pub icon: Icon,
    pub tip: &'static str,
    pub group: CategoryGroup,
}

impl CategoryDisplay {
    pub fn badge(&self) -> BadgeStyle {
        badge_style(self.group)
    }
}

const FALLBACK: CategoryDisplay = CategoryDisplay {
    icon: Icon::Unknown,
    tip: "Unable to identify this type of waste.",
    group: CategoryGroup::Unidentified,
};

/// Present a raw label as reported by the service (case-insensitive).
/// Anything outside the known categories gets the fallback entry.
pub fn present(label: &str) -> CategoryDisplay {
    match CategoryLabel::parse(label) {
        Some(category) => present_category(category),
        None => FALLBACK,
    }
}

/// Total mapping from category to display metadata
pub fn present_category(category: CategoryLabel) -> CategoryDisplay {
    match category {
        CategoryLabel::Battery => CategoryDisplay {
            icon: Icon::Hazardous,
            tip: "Batteries are hazardous waste and should be collected at special collection points.",
            group: CategoryGroup::Hazardous,
        },
        CategoryLabel::Biological => CategoryDisplay {
            icon: Icon::Organic,
            tip: "Organic waste can be composted or processed into biogas.",
            group: CategoryGroup::Organic,
        },
        CategoryLabel::Cardboard | CategoryLabel::Paper => CategoryDisplay {
            icon: Icon::Paper,
            tip: "Paper and cardboard are recyclable. Fold them neatly and sort separately.",
            group: CategoryGroup::Recyclable,
        },
        CategoryLabel::Plastic => CategoryDisplay {
            icon: Icon::Plastic,
            tip: "Plastic is recyclable. Clean and flatten before disposal.",
            group: CategoryGroup::Recyclable,
        },
        CategoryLabel::Metal => CategoryDisplay {
            icon: Icon::Metal,
            tip: "Metals are recyclable and can be recycled multiple times without losing quality.",
            group: CategoryGroup::Recyclable,
        },
        CategoryLabel::BrownGlass | CategoryLabel::GreenGlass | CategoryLabel::WhiteGlass => {
            CategoryDisplay {
                icon: Icon::Glass,
                tip: "Glass is non-recyclable. Wrap carefully to avoid injury.",
                group: CategoryGroup::NonRecyclable,
            }
        }
        CategoryLabel::Trash => CategoryDisplay {
            icon: Icon::MixedWaste,
            tip: "Mixed waste belongs to the non-recyclable category.",
            group: CategoryGroup::NonRecyclable,
        },
    }
}

/// Badge style is a pure function of the waste group
pub fn badge_style(group: CategoryGroup) -> BadgeStyle {
    match group {
        CategoryGroup::Organic => BadgeStyle::Success,
        CategoryGroup::Recyclable => BadgeStyle::Primary,
        CategoryGroup::NonRecyclable => BadgeStyle::Warning,
        CategoryGroup::Hazardous => BadgeStyle::Danger,
        CategoryGroup::Unidentified => BadgeStyle::Secondary,
    }
}
