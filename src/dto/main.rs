use serde::Serialize;

use crate::domain::section::{Section, SectionText};

/// Sidebar entry.
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// Sidebar entries in display order with `current` highlighted.
pub fn navigation(current: Section) -> Vec<NavItem> {
    Section::ALL
        .into_iter()
        .map(|section| NavItem {
            path: section.path(),
            label: section.label(),
            icon: section.icon(),
            active: section == current,
        })
        .collect()
}

/// Data required to render a section that has no functionality yet.
#[derive(Debug, Serialize)]
pub struct PlaceholderPageData {
    pub section: Section,
    pub text: SectionText,
}
