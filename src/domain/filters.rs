//! Filter state parameterizing the vehicle list.
//!
//! Every transition returns a new value; filter changes (text, status,
//! city, ordering, page size) always land on the first page while a page
//! change touches nothing else.

use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::types::{TypeConstraintError, non_empty_trimmed};
use crate::domain::vehicle::{VehicleCity, VehicleStatus};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

/// Column and direction the backend sorts the list by.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash, Default)]
pub enum VehicleOrdering {
    CreatedAt,
    #[default]
    CreatedAtDesc,
    UpdatedAt,
    UpdatedAtDesc,
    PlateNumber,
    PlateNumberDesc,
    Year,
    YearDesc,
    Mileage,
    MileageDesc,
}

impl VehicleOrdering {
    const ALL: [VehicleOrdering; 10] = [
        VehicleOrdering::CreatedAt,
        VehicleOrdering::CreatedAtDesc,
        VehicleOrdering::UpdatedAt,
        VehicleOrdering::UpdatedAtDesc,
        VehicleOrdering::PlateNumber,
        VehicleOrdering::PlateNumberDesc,
        VehicleOrdering::Year,
        VehicleOrdering::YearDesc,
        VehicleOrdering::Mileage,
        VehicleOrdering::MileageDesc,
    ];

    /// Value of the `ordering` query parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            VehicleOrdering::CreatedAt => "created_at",
            VehicleOrdering::CreatedAtDesc => "-created_at",
            VehicleOrdering::UpdatedAt => "updated_at",
            VehicleOrdering::UpdatedAtDesc => "-updated_at",
            VehicleOrdering::PlateNumber => "plate_number",
            VehicleOrdering::PlateNumberDesc => "-plate_number",
            VehicleOrdering::Year => "year",
            VehicleOrdering::YearDesc => "-year",
            VehicleOrdering::Mileage => "mileage_km",
            VehicleOrdering::MileageDesc => "-mileage_km",
        }
    }

    pub const fn is_descending(self) -> bool {
        matches!(
            self,
            VehicleOrdering::CreatedAtDesc
                | VehicleOrdering::UpdatedAtDesc
                | VehicleOrdering::PlateNumberDesc
                | VehicleOrdering::YearDesc
                | VehicleOrdering::MileageDesc
        )
    }

    /// Same column, opposite direction.
    pub const fn reversed(self) -> Self {
        match self {
            VehicleOrdering::CreatedAt => VehicleOrdering::CreatedAtDesc,
            VehicleOrdering::CreatedAtDesc => VehicleOrdering::CreatedAt,
            VehicleOrdering::UpdatedAt => VehicleOrdering::UpdatedAtDesc,
            VehicleOrdering::UpdatedAtDesc => VehicleOrdering::UpdatedAt,
            VehicleOrdering::PlateNumber => VehicleOrdering::PlateNumberDesc,
            VehicleOrdering::PlateNumberDesc => VehicleOrdering::PlateNumber,
            VehicleOrdering::Year => VehicleOrdering::YearDesc,
            VehicleOrdering::YearDesc => VehicleOrdering::Year,
            VehicleOrdering::Mileage => VehicleOrdering::MileageDesc,
            VehicleOrdering::MileageDesc => VehicleOrdering::Mileage,
        }
    }

    /// Column name without the direction prefix.
    pub fn column(self) -> &'static str {
        self.as_str().trim_start_matches('-')
    }
}

impl Display for VehicleOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleOrdering {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        VehicleOrdering::ALL
            .into_iter()
            .find(|ordering| ordering.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("ordering {s}")))
    }
}

/// Search, status, city, page, page size and ordering of a list query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VehicleFilters {
    pub query: Option<String>,
    pub status: Option<VehicleStatus>,
    pub city: Option<VehicleCity>,
    pub page: u32,
    pub page_size: u32,
    pub ordering: VehicleOrdering,
}

impl Default for VehicleFilters {
    fn default() -> Self {
        Self {
            query: None,
            status: None,
            city: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            ordering: VehicleOrdering::default(),
        }
    }
}

impl VehicleFilters {
    /// Replaces the search text; blank text removes the search.
    #[must_use]
    pub fn with_search(self, query: Option<&str>) -> Self {
        Self {
            query: non_empty_trimmed(query),
            page: 1,
            ..self
        }
    }

    #[must_use]
    pub fn with_status(self, status: Option<VehicleStatus>) -> Self {
        Self {
            status,
            page: 1,
            ..self
        }
    }

    #[must_use]
    pub fn with_city(self, city: Option<VehicleCity>) -> Self {
        Self {
            city,
            page: 1,
            ..self
        }
    }

    #[must_use]
    pub fn with_ordering(self, ordering: VehicleOrdering) -> Self {
        Self {
            ordering,
            page: 1,
            ..self
        }
    }

    #[must_use]
    pub fn with_page(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    #[must_use]
    pub fn with_page_size(self, page_size: u32) -> Self {
        Self {
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            page: 1,
            ..self
        }
    }

    /// Drops search, status and city while keeping page size and ordering.
    #[must_use]
    pub fn cleared(self) -> Self {
        Self {
            query: None,
            status: None,
            city: None,
            page: 1,
            ..self
        }
    }

    /// Number of active narrowing filters (search, status, city).
    pub fn active_filter_count(&self) -> usize {
        [
            self.query.is_some(),
            self.status.is_some(),
            self.city.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_page_state() {
        let filters = VehicleFilters::default();
        assert_eq!(filters.page, 1);
        assert_eq!(filters.page_size, 10);
        assert_eq!(filters.ordering.as_str(), "-created_at");
        assert!(!filters.has_active_filters());
    }

    #[test]
    fn search_change_resets_page_and_keeps_size_and_ordering() {
        let filters = VehicleFilters {
            page: 4,
            page_size: 20,
            ..VehicleFilters::default()
        };

        let next = filters.with_search(Some("Lada"));

        assert_eq!(next.query.as_deref(), Some("Lada"));
        assert_eq!(next.page, 1);
        assert_eq!(next.page_size, 20);
        assert_eq!(next.ordering, VehicleOrdering::CreatedAtDesc);
    }

    #[test]
    fn status_and_city_changes_reset_page() {
        let filters = VehicleFilters::default().with_page(3);
        let next = filters.clone().with_status(Some(VehicleStatus::Maintenance));
        assert_eq!(next.page, 1);
        let next = filters.with_city(Some(VehicleCity::Ostrov));
        assert_eq!(next.page, 1);
        assert_eq!(next.city, Some(VehicleCity::Ostrov));
    }

    #[test]
    fn page_change_only_touches_page() {
        let filters = VehicleFilters::default()
            .with_search(Some("vesta"))
            .with_status(Some(VehicleStatus::Available));
        let next = filters.clone().with_page(5);
        assert_eq!(next, VehicleFilters { page: 5, ..filters });
    }

    #[test]
    fn page_size_change_resets_page() {
        let next = VehicleFilters::default().with_page(7).with_page_size(50);
        assert_eq!(next.page, 1);
        assert_eq!(next.page_size, 50);
        assert_eq!(VehicleFilters::default().with_page_size(1000).page_size, 100);
    }

    #[test]
    fn clearing_keeps_page_size_and_ordering() {
        let filters = VehicleFilters::default()
            .with_page_size(20)
            .with_ordering(VehicleOrdering::YearDesc)
            .with_search(Some("А111"))
            .with_status(Some(VehicleStatus::Inactive))
            .with_city(Some(VehicleCity::Pskov))
            .with_page(2);
        assert_eq!(filters.active_filter_count(), 3);

        let cleared = filters.cleared();

        assert_eq!(cleared.query, None);
        assert_eq!(cleared.status, None);
        assert_eq!(cleared.city, None);
        assert_eq!(cleared.page, 1);
        assert_eq!(cleared.page_size, 20);
        assert_eq!(cleared.ordering, VehicleOrdering::YearDesc);
    }

    #[test]
    fn blank_search_removes_query() {
        let filters = VehicleFilters::default().with_search(Some("   "));
        assert_eq!(filters.query, None);
    }

    #[test]
    fn ordering_parses_and_reverses() {
        let ordering: VehicleOrdering = "-year".parse().unwrap();
        assert_eq!(ordering, VehicleOrdering::YearDesc);
        assert!(ordering.is_descending());
        assert_eq!(ordering.reversed().as_str(), "year");
        assert_eq!(ordering.column(), "year");
        assert!("colour".parse::<VehicleOrdering>().is_err());
    }
}
