//! Query string of the fleet list.
//!
//! Parsing is lenient: unknown statuses, cities or orderings and
//! malformed numbers fall back to their defaults instead of rejecting the
//! request, so a hand-edited URL still renders a page.

use serde::{Deserialize, Serialize};

use crate::domain::filters::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, VehicleFilters};
use crate::domain::types::non_empty_trimmed;
use crate::forms::vehicle::VehicleForm;

/// Raw `/fleet` query parameters.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FleetQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordering: Option<String>,
}

impl From<FleetQuery> for VehicleFilters {
    fn from(query: FleetQuery) -> Self {
        let page = parse_number(query.page.as_deref()).unwrap_or(1).max(1);
        let page_size = parse_number(query.page_size.as_deref())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        VehicleFilters {
            query: non_empty_trimmed(query.q),
            status: query.status.as_deref().and_then(|s| s.parse().ok()),
            city: query.city.as_deref().and_then(|s| s.parse().ok()),
            page,
            page_size,
            ordering: query
                .ordering
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        }
    }
}

impl From<&VehicleFilters> for FleetQuery {
    fn from(filters: &VehicleFilters) -> Self {
        Self {
            q: filters.query.clone(),
            status: filters.status.map(|status| status.as_str().to_string()),
            city: filters.city.map(|city| city.as_str().to_string()),
            page: Some(filters.page.to_string()),
            page_size: Some(filters.page_size.to_string()),
            ordering: Some(filters.ordering.as_str().to_string()),
        }
    }
}

/// Creation modal submission together with the list it was opened from.
#[derive(Debug, Deserialize)]
pub struct AddVehicleForm {
    #[serde(default)]
    pub return_query: String,
    #[serde(flatten)]
    pub vehicle: VehicleForm,
}

fn parse_number(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().parse().ok())
}

/// Parses a raw query string, as used by the table fragment.
pub fn parse_query_string(query_string: &str) -> VehicleFilters {
    match serde_html_form::from_str::<FleetQuery>(query_string) {
        Ok(query) => query.into(),
        Err(err) => {
            log::warn!("Ignoring malformed fleet query '{query_string}': {err}");
            VehicleFilters::default()
        }
    }
}

/// Encodes filters as a query string that round-trips through
/// [`parse_query_string`].
pub fn to_query_string(filters: &VehicleFilters) -> String {
    serde_html_form::to_string(FleetQuery::from(filters)).unwrap_or_else(|err| {
        log::error!("Failed to encode fleet query: {err}");
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filters::VehicleOrdering;
    use crate::domain::vehicle::{VehicleCity, VehicleStatus};

    #[test]
    fn empty_query_yields_default_filters() {
        assert_eq!(parse_query_string(""), VehicleFilters::default());
    }

    #[test]
    fn full_query_is_parsed() {
        let filters = parse_query_string(
            "q=Lada&status=MAINTENANCE&city=%D0%9F%D1%81%D0%BA%D0%BE%D0%B2&page=3&page_size=50&ordering=year",
        );

        assert_eq!(filters.query.as_deref(), Some("Lada"));
        assert_eq!(filters.status, Some(VehicleStatus::Maintenance));
        assert_eq!(filters.city, Some(VehicleCity::Pskov));
        assert_eq!(filters.page, 3);
        assert_eq!(filters.page_size, 50);
        assert_eq!(filters.ordering, VehicleOrdering::Year);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let filters =
            parse_query_string("q=+&status=BROKEN&city=Moscow&page=abc&page_size=0&ordering=colour");

        assert_eq!(filters.query, None);
        assert_eq!(filters.status, None);
        assert_eq!(filters.city, None);
        assert_eq!(filters.page, 1);
        assert_eq!(filters.page_size, 1);
        assert_eq!(filters.ordering, VehicleOrdering::CreatedAtDesc);
    }

    #[test]
    fn default_filters_encode_page_size_and_ordering() {
        assert_eq!(
            to_query_string(&VehicleFilters::default()),
            "page=1&page_size=10&ordering=-created_at"
        );
    }

    #[test]
    fn encoded_filters_parse_back() {
        let filters = VehicleFilters::default()
            .with_search(Some("А111АА77"))
            .with_status(Some(VehicleStatus::RentedTaxi))
            .with_city(Some(VehicleCity::Pechory))
            .with_page(4);

        assert_eq!(parse_query_string(&to_query_string(&filters)), filters);
    }
}
