//! DTOs shaped for the vehicle detail and edit templates.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::types::VehicleId;
use crate::domain::vehicle::Vehicle;
use crate::dto::{SelectOption, format_thousands};
use crate::forms::vehicle::{FormErrors, MIN_YEAR, VehicleForm, max_year};

pub const DATE_FORMAT: &str = "%d.%m.%Y";

pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub fn detail_url(id: VehicleId) -> String {
    format!("/fleet/{id}")
}

pub fn edit_url(id: VehicleId) -> String {
    format!("/fleet/{id}/edit")
}

pub fn delete_url(id: VehicleId) -> String {
    format!("/fleet/{id}/delete")
}

/// Confirmation prompt shown before a delete is submitted.
pub fn delete_confirmation(plate_number: &str) -> String {
    format!("Вы уверены, что хотите удалить автомобиль {plate_number}?")
}

/// A vehicle with every field already formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleView {
    pub id: String,
    pub plate_number: String,
    pub vin: Option<String>,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: Option<String>,
    pub status: &'static str,
    pub status_label: &'static str,
    pub status_badge: &'static str,
    /// Mileage with grouped digits and unit, e.g. `15 000 км`.
    pub mileage: String,
    pub city: Option<&'static str>,
    pub owner_name: Option<String>,
    pub osago_policy_number: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub detail_url: String,
    pub edit_url: String,
    pub delete_url: String,
    pub delete_confirmation: String,
}

impl From<&Vehicle> for VehicleView {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id.to_string(),
            plate_number: vehicle.plate_number.to_string(),
            vin: vehicle.vin.clone(),
            brand: vehicle.brand.to_string(),
            model: vehicle.model.to_string(),
            year: vehicle.year,
            color: vehicle.color.clone(),
            status: vehicle.status.as_str(),
            status_label: vehicle.status.label(),
            status_badge: vehicle.status.badge_class(),
            mileage: format!("{} км", format_thousands(vehicle.mileage_km)),
            city: vehicle.city.map(|city| city.as_str()),
            owner_name: vehicle.owner_name.clone(),
            osago_policy_number: vehicle.osago_policy_number.clone(),
            created_at: format_date(&vehicle.created_at),
            updated_at: format_date(&vehicle.updated_at),
            detail_url: detail_url(vehicle.id),
            edit_url: edit_url(vehicle.id),
            delete_url: delete_url(vehicle.id),
            delete_confirmation: delete_confirmation(vehicle.plate_number.as_str()),
        }
    }
}

/// Data required to render the vehicle details page.
#[derive(Debug, Serialize)]
pub struct VehiclePageData {
    pub vehicle: VehicleView,
}

/// Form state shared by the creation modal and the edit page.
#[derive(Debug, Clone, Serialize)]
pub struct VehicleFormView {
    pub action: String,
    pub values: VehicleForm,
    pub errors: FormErrors,
    pub statuses: Vec<SelectOption>,
    pub cities: Vec<SelectOption>,
    pub min_year: i32,
    pub max_year: i32,
}

impl VehicleFormView {
    pub fn new(action: impl Into<String>, values: VehicleForm, errors: FormErrors) -> Self {
        let statuses = SelectOption::statuses(Some(values.status.trim()));
        let cities = SelectOption::cities(Some(values.city.trim()));
        Self {
            action: action.into(),
            values,
            errors,
            statuses,
            cities,
            min_year: MIN_YEAR,
            max_year: max_year(),
        }
    }
}

/// Data required to render the vehicle edit page.
#[derive(Debug, Serialize)]
pub struct EditPageData {
    pub title: String,
    pub detail_url: String,
    pub form: VehicleFormView,
}

impl EditPageData {
    pub fn new(id: VehicleId, title: String, values: VehicleForm, errors: FormErrors) -> Self {
        Self {
            title,
            detail_url: detail_url(id),
            form: VehicleFormView::new(edit_url(id), values, errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;
    use crate::domain::types::{PlateNumber, VehicleBrand, VehicleModel};
    use crate::domain::vehicle::{VehicleCity, VehicleStatus};

    #[test]
    fn view_formats_mileage_and_dates() {
        let vehicle = Vehicle {
            id: VehicleId::new(Uuid::nil()),
            plate_number: PlateNumber::new("В222ВВ60").unwrap(),
            vin: None,
            brand: VehicleBrand::new("Hyundai").unwrap(),
            model: VehicleModel::new("Solaris").unwrap(),
            year: 2019,
            color: Some("Белый".into()),
            status: VehicleStatus::Maintenance,
            mileage_km: 125_400,
            city: Some(VehicleCity::Sebezh),
            owner_name: None,
            osago_policy_number: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 11, 21, 8, 30, 0).unwrap(),
        };

        let view = VehicleView::from(&vehicle);

        assert_eq!(view.mileage, "125 400 км");
        assert_eq!(view.created_at, "05.03.2024");
        assert_eq!(view.updated_at, "21.11.2024");
        assert_eq!(view.status_label, "На ТО");
        assert_eq!(view.status_badge, "status-yellow");
        assert_eq!(view.city, Some("Себеж"));
        assert_eq!(
            view.delete_confirmation,
            "Вы уверены, что хотите удалить автомобиль В222ВВ60?"
        );
        assert_eq!(
            view.edit_url,
            "/fleet/00000000-0000-0000-0000-000000000000/edit"
        );
    }

    #[test]
    fn form_view_selects_submitted_status() {
        let values = VehicleForm {
            status: "INACTIVE".into(),
            ..VehicleForm::default()
        };
        let view = VehicleFormView::new("/fleet/add", values, FormErrors::default());
        let selected: Vec<_> = view.statuses.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value, "INACTIVE");
        assert!(view.cities.iter().all(|o| !o.selected));
    }
}
