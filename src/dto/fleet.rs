//! DTOs for the fleet list page and its lazily loaded table.
//!
//! Every link and form on the page is derived from the current
//! [`VehicleFilters`] through its transition methods, so following a link
//! is the same as applying the transition.

use serde::Serialize;

use crate::domain::filters::{PAGE_SIZE_OPTIONS, VehicleFilters, VehicleOrdering};
use crate::domain::vehicle::VehiclePage;
use crate::dto::vehicle::{VehicleFormView, VehicleView};
use crate::dto::{HiddenField, SelectOption};
use crate::forms::fleet::to_query_string;
use crate::forms::vehicle::{FormErrors, VehicleForm};
use crate::pagination::Paginated;

pub const FLEET_PATH: &str = "/fleet";
pub const TABLE_PATH: &str = "/fleet/table";
pub const ADD_PATH: &str = "/fleet/add";

/// Sortable columns with their ascending ordering.
const SORTABLE_COLUMNS: [(&str, VehicleOrdering); 3] = [
    ("Номер", VehicleOrdering::PlateNumber),
    ("Год", VehicleOrdering::Year),
    ("Пробег", VehicleOrdering::Mileage),
];

/// `/fleet` URL reproducing `filters`.
pub fn fleet_url(filters: &VehicleFilters) -> String {
    format!("{FLEET_PATH}?{}", to_query_string(filters))
}

pub fn table_url(filters: &VehicleFilters) -> String {
    format!("{TABLE_PATH}?{}", to_query_string(filters))
}

/// Removable chip for one active filter.
#[derive(Debug, Clone, Serialize)]
pub struct FilterChip {
    pub label: String,
    pub remove_url: String,
}

/// Search, status and city controls above the table.
#[derive(Debug, Clone, Serialize)]
pub struct FilterPanel {
    pub query: Option<String>,
    pub statuses: Vec<SelectOption>,
    pub cities: Vec<SelectOption>,
    pub active_count: usize,
    pub chips: Vec<FilterChip>,
    pub clear_url: String,
    /// Carried by the filter form; page is omitted so submitting lands on
    /// the first page.
    pub hidden: Vec<HiddenField>,
}

impl FilterPanel {
    pub fn new(filters: &VehicleFilters) -> Self {
        let mut chips = Vec::new();
        if let Some(query) = &filters.query {
            chips.push(FilterChip {
                label: format!("Поиск: {query}"),
                remove_url: fleet_url(&filters.clone().with_search(None)),
            });
        }
        if let Some(status) = filters.status {
            chips.push(FilterChip {
                label: format!("Статус: {}", status.label()),
                remove_url: fleet_url(&filters.clone().with_status(None)),
            });
        }
        if let Some(city) = filters.city {
            chips.push(FilterChip {
                label: format!("Город: {city}"),
                remove_url: fleet_url(&filters.clone().with_city(None)),
            });
        }

        Self {
            query: filters.query.clone(),
            statuses: SelectOption::statuses(filters.status.map(|s| s.as_str())),
            cities: SelectOption::cities(filters.city.map(|c| c.as_str())),
            active_count: filters.active_filter_count(),
            chips,
            clear_url: fleet_url(&filters.clone().cleared()),
            hidden: vec![
                HiddenField {
                    name: "page_size",
                    value: filters.page_size.to_string(),
                },
                HiddenField {
                    name: "ordering",
                    value: filters.ordering.as_str().to_string(),
                },
            ],
        }
    }
}

/// Creation modal state.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleModal {
    pub open: bool,
    pub form: VehicleFormView,
    /// Query string of the list the modal was opened from.
    pub return_query: String,
}

/// Data required to render `/fleet`.
#[derive(Debug, Serialize)]
pub struct FleetPageData {
    pub filters: FilterPanel,
    pub table_url: String,
    pub modal: VehicleModal,
}

impl FleetPageData {
    /// Page with the modal closed and an empty, seeded form.
    pub fn new(filters: &VehicleFilters) -> Self {
        Self::with_modal(filters, false, VehicleForm::default(), FormErrors::default())
    }

    /// Page re-rendered after a rejected creation: modal open, submitted
    /// values and errors kept.
    pub fn with_modal(
        filters: &VehicleFilters,
        open: bool,
        values: VehicleForm,
        errors: FormErrors,
    ) -> Self {
        Self {
            filters: FilterPanel::new(filters),
            table_url: table_url(filters),
            modal: VehicleModal {
                open,
                form: VehicleFormView::new(ADD_PATH, values, errors),
                return_query: to_query_string(filters),
            },
        }
    }
}

/// Clickable column header.
#[derive(Debug, Clone, Serialize)]
pub struct SortLink {
    pub label: &'static str,
    pub url: String,
    pub active: bool,
    pub descending: bool,
}

/// Entry of the pager; `number == None` is a gap.
#[derive(Debug, Clone, Serialize)]
pub struct PageLink {
    pub number: Option<usize>,
    pub url: Option<String>,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSizeOption {
    pub value: u32,
    pub selected: bool,
}

/// Data required to render the table fragment.
#[derive(Debug, Serialize)]
pub struct FleetTableData {
    pub rows: Paginated<VehicleView>,
    pub sort_links: Vec<SortLink>,
    pub pages: Vec<PageLink>,
    pub previous_url: Option<String>,
    pub next_url: Option<String>,
    pub page_sizes: Vec<PageSizeOption>,
    /// Carried by the page-size form; page is omitted so a new size lands
    /// on the first page.
    pub page_size_hidden: Vec<HiddenField>,
    /// Query string of the current list, used to return after a delete.
    pub return_query: String,
    /// Set when the requested page lies past the last one while the list
    /// itself is not empty.
    pub last_page_url: Option<String>,
}

impl FleetTableData {
    /// Builds the table from a backend page. Counts come from the response,
    /// not from the request.
    pub fn new(page: VehiclePage, filters: &VehicleFilters) -> Self {
        let rows: Vec<VehicleView> = page.items.iter().map(VehicleView::from).collect();
        let rows = Paginated::new(
            rows,
            page.page as usize,
            page.page_size as usize,
            page.total,
        );

        let page_url = |number: usize| {
            fleet_url(&filters.clone().with_page(u32::try_from(number).unwrap_or(u32::MAX)))
        };

        let pages = rows
            .pages
            .iter()
            .map(|number| PageLink {
                number: *number,
                url: number.map(&page_url),
                current: *number == Some(rows.page),
            })
            .collect();

        let previous_url = rows.has_previous().then(|| page_url(rows.page - 1));
        let next_url = rows.has_next().then(|| page_url(rows.page + 1));
        let last_page_url = (rows.items.is_empty() && rows.total_pages > 0)
            .then(|| page_url(rows.total_pages));

        let sort_links = SORTABLE_COLUMNS
            .into_iter()
            .map(|(label, ascending)| {
                let active = filters.ordering.column() == ascending.column();
                let next = if active {
                    filters.ordering.reversed()
                } else {
                    ascending
                };
                SortLink {
                    label,
                    url: fleet_url(&filters.clone().with_ordering(next)),
                    active,
                    descending: active && filters.ordering.is_descending(),
                }
            })
            .collect();

        let page_sizes = PAGE_SIZE_OPTIONS
            .into_iter()
            .map(|value| PageSizeOption {
                value,
                selected: value == filters.page_size,
            })
            .collect();

        let mut page_size_hidden = Vec::new();
        if let Some(query) = &filters.query {
            page_size_hidden.push(HiddenField {
                name: "q",
                value: query.clone(),
            });
        }
        if let Some(status) = filters.status {
            page_size_hidden.push(HiddenField {
                name: "status",
                value: status.as_str().to_string(),
            });
        }
        if let Some(city) = filters.city {
            page_size_hidden.push(HiddenField {
                name: "city",
                value: city.as_str().to_string(),
            });
        }
        page_size_hidden.push(HiddenField {
            name: "ordering",
            value: filters.ordering.as_str().to_string(),
        });

        Self {
            rows,
            sort_links,
            pages,
            previous_url,
            next_url,
            page_sizes,
            page_size_hidden,
            return_query: to_query_string(filters),
            last_page_url,
        }
    }
}
