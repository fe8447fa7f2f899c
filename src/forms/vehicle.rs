//! Create and edit forms for a single vehicle.

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::types::{PlateNumber, VehicleBrand, VehicleModel, non_empty_trimmed};
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle, VehicleCity, VehicleStatus};
use crate::forms::FormError;

pub const MIN_YEAR: i32 = 1990;

/// Latest accepted model year, one ahead of the calendar.
pub fn max_year() -> i32 {
    Utc::now().year() + 1
}

fn validate_year(year: &str) -> Result<(), ValidationError> {
    match year.trim().parse::<i32>() {
        Ok(year) if (MIN_YEAR..=max_year()).contains(&year) => Ok(()),
        _ => Err(ValidationError::new("year")),
    }
}

fn validate_mileage(mileage: &str) -> Result<(), ValidationError> {
    let mileage = mileage.trim();
    if mileage.is_empty() || mileage.parse::<u32>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("mileage_km"))
    }
}

/// Vehicle form as submitted by the browser.
///
/// Every field is kept as raw text so that a rejected submission can be
/// shown again exactly as typed.
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct VehicleForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 20))]
    pub plate_number: String,
    #[serde(default)]
    #[validate(length(max = 17))]
    pub vin: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub brand: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    #[serde(default)]
    #[validate(custom(function = "validate_year"))]
    pub year: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub color: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    #[validate(custom(function = "validate_mileage"))]
    pub mileage_km: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub owner_name: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub osago_policy_number: String,
}

impl Default for VehicleForm {
    /// Empty creation form: current year, available, zero mileage.
    fn default() -> Self {
        Self {
            plate_number: String::new(),
            vin: String::new(),
            brand: String::new(),
            model: String::new(),
            year: Utc::now().year().to_string(),
            color: String::new(),
            status: VehicleStatus::default().as_str().to_string(),
            mileage_km: "0".to_string(),
            city: String::new(),
            owner_name: String::new(),
            osago_policy_number: String::new(),
        }
    }
}

impl From<&Vehicle> for VehicleForm {
    /// Edit form pre-filled with the stored values.
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            plate_number: vehicle.plate_number.to_string(),
            vin: vehicle.vin.clone().unwrap_or_default(),
            brand: vehicle.brand.to_string(),
            model: vehicle.model.to_string(),
            year: vehicle.year.to_string(),
            color: vehicle.color.clone().unwrap_or_default(),
            status: vehicle.status.as_str().to_string(),
            mileage_km: vehicle.mileage_km.to_string(),
            city: vehicle
                .city
                .map(|city| city.as_str().to_string())
                .unwrap_or_default(),
            owner_name: vehicle.owner_name.clone().unwrap_or_default(),
            osago_policy_number: vehicle.osago_policy_number.clone().unwrap_or_default(),
        }
    }
}

/// Delete button form. Buttons in the table carry the list they belong to,
/// the one on the details page does not.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteVehicleForm {
    #[serde(default)]
    pub return_query: Option<String>,
}

/// Validated and typed vehicle form.
#[derive(Clone, Debug, PartialEq)]
pub struct VehiclePayload {
    pub plate_number: PlateNumber,
    pub vin: Option<String>,
    pub brand: VehicleBrand,
    pub model: VehicleModel,
    pub year: i32,
    pub color: Option<String>,
    pub status: VehicleStatus,
    pub mileage_km: u32,
    pub city: Option<VehicleCity>,
    pub owner_name: Option<String>,
    pub osago_policy_number: Option<String>,
}

impl TryFrom<VehicleForm> for VehiclePayload {
    type Error = FormError;

    fn try_from(form: VehicleForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let status = match form.status.trim() {
            "" => VehicleStatus::default(),
            status => status.parse().map_err(|_| FormError::InvalidStatus)?,
        };
        let city = match form.city.trim() {
            "" => None,
            city => Some(city.parse().map_err(|_| FormError::InvalidCity)?),
        };

        Ok(Self {
            plate_number: PlateNumber::new(form.plate_number.to_uppercase())
                .map_err(|_| FormError::InvalidPlateNumber)?,
            vin: non_empty_trimmed(Some(form.vin)).map(|vin| vin.to_uppercase()),
            brand: VehicleBrand::new(form.brand).map_err(|_| FormError::InvalidBrand)?,
            model: VehicleModel::new(form.model).map_err(|_| FormError::InvalidModel)?,
            // validated above
            year: form.year.trim().parse().unwrap_or(MIN_YEAR),
            color: non_empty_trimmed(Some(form.color)),
            status,
            mileage_km: form.mileage_km.trim().parse().unwrap_or(0),
            city,
            owner_name: non_empty_trimmed(Some(form.owner_name)),
            osago_policy_number: non_empty_trimmed(Some(form.osago_policy_number)),
        })
    }
}

impl VehiclePayload {
    pub fn into_new_vehicle(self) -> NewVehicle {
        NewVehicle::new(self.plate_number, self.brand, self.model, self.year)
            .vin(self.vin)
            .color(self.color)
            .status(self.status)
            .mileage_km(self.mileage_km)
            .city(self.city)
            .owner_name(self.owner_name)
            .osago_policy_number(self.osago_policy_number)
    }

    /// Every submitted field; a blank optional field clears the stored value.
    pub fn into_update(self) -> UpdateVehicle {
        UpdateVehicle {
            plate_number: Some(self.plate_number),
            vin: Some(self.vin),
            brand: Some(self.brand),
            model: Some(self.model),
            year: Some(self.year),
            color: Some(self.color),
            status: Some(self.status),
            mileage_km: Some(self.mileage_km),
            city: Some(self.city),
            owner_name: Some(self.owner_name),
            osago_policy_number: Some(self.osago_policy_number),
        }
    }
}

/// Errors displayed next to the form: one general message plus optional
/// messages per field.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct FormErrors {
    pub general: Option<String>,
    pub fields: BTreeMap<String, String>,
}

impl FormErrors {
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            general: Some(message.into()),
            fields: BTreeMap::new(),
        }
    }
}

/// Human readable message for a failed field.
fn field_message(field: &str) -> &'static str {
    match field {
        "plate_number" => "Укажите государственный номер",
        "vin" => "VIN должен содержать не более 17 символов",
        "brand" => "Укажите марку",
        "model" => "Укажите модель",
        "year" => "Некорректный год выпуска",
        "mileage_km" => "Пробег должен быть неотрицательным числом",
        _ => "Некорректное значение",
    }
}

impl From<&FormError> for FormErrors {
    fn from(err: &FormError) -> Self {
        let (general, fields) = match err {
            FormError::Validation(errors) => ("Ошибка валидации формы", field_errors(errors)),
            FormError::InvalidPlateNumber => ("Ошибка валидации формы", single("plate_number")),
            FormError::InvalidBrand => ("Ошибка валидации формы", single("brand")),
            FormError::InvalidModel => ("Ошибка валидации формы", single("model")),
            FormError::InvalidStatus => ("Неизвестный статус", BTreeMap::new()),
            FormError::InvalidCity => ("Неизвестный город", BTreeMap::new()),
        };
        Self {
            general: Some(general.to_string()),
            fields,
        }
    }
}

fn single(field: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(field.to_string(), field_message(field).to_string())])
}

fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_keys()
        .map(|field| (field.to_string(), field_message(&field).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> VehicleForm {
        VehicleForm {
            plate_number: "а111аа77".to_string(),
            vin: "xta21700000000001".to_string(),
            brand: "Lada".to_string(),
            model: "Vesta".to_string(),
            year: "2021".to_string(),
            color: " ".to_string(),
            status: "RENTED_TAXI".to_string(),
            mileage_km: "15000".to_string(),
            city: "Псков".to_string(),
            owner_name: String::new(),
            osago_policy_number: "ХХХ 0123456789".to_string(),
        }
    }

    #[test]
    fn default_form_is_seeded() {
        let form = VehicleForm::default();
        assert_eq!(form.year, Utc::now().year().to_string());
        assert_eq!(form.status, "AVAILABLE");
        assert_eq!(form.mileage_km, "0");
    }

    #[test]
    fn filled_form_becomes_new_vehicle() {
        let payload = VehiclePayload::try_from(filled_form()).unwrap();
        let new_vehicle = payload.into_new_vehicle();

        assert_eq!(new_vehicle.plate_number.as_str(), "А111АА77");
        assert_eq!(new_vehicle.vin.as_deref(), Some("XTA21700000000001"));
        assert_eq!(new_vehicle.year, 2021);
        assert_eq!(new_vehicle.color, None);
        assert_eq!(new_vehicle.status, VehicleStatus::RentedTaxi);
        assert_eq!(new_vehicle.mileage_km, 15000);
        assert_eq!(new_vehicle.city, Some(VehicleCity::Pskov));
        assert_eq!(new_vehicle.owner_name, None);
    }

    #[test]
    fn missing_required_fields_are_reported_per_field() {
        let form = VehicleForm {
            plate_number: String::new(),
            brand: String::new(),
            ..filled_form()
        };

        let err = VehiclePayload::try_from(form).unwrap_err();
        let errors = FormErrors::from(&err);

        assert_eq!(errors.general.as_deref(), Some("Ошибка валидации формы"));
        assert!(errors.fields.contains_key("plate_number"));
        assert!(errors.fields.contains_key("brand"));
        assert!(!errors.fields.contains_key("model"));
    }

    #[test]
    fn year_outside_range_is_rejected() {
        let too_new = (max_year() + 1).to_string();
        for year in ["1989", "abc", too_new.as_str()] {
            let form = VehicleForm {
                year: year.to_string(),
                ..filled_form()
            };
            assert!(VehiclePayload::try_from(form).is_err(), "year {year}");
        }
    }

    #[test]
    fn negative_mileage_is_rejected() {
        let form = VehicleForm {
            mileage_km: "-5".to_string(),
            ..filled_form()
        };
        assert!(VehiclePayload::try_from(form).is_err());
    }

    #[test]
    fn unknown_city_is_rejected() {
        let form = VehicleForm {
            city: "Москва".to_string(),
            ..filled_form()
        };
        assert!(matches!(
            VehiclePayload::try_from(form),
            Err(FormError::InvalidCity)
        ));
    }

    #[test]
    fn update_clears_blank_optional_fields() {
        let update = VehiclePayload::try_from(filled_form())
            .unwrap()
            .into_update();

        assert_eq!(update.mileage_km, Some(15000));
        assert_eq!(update.color, Some(None));
        assert_eq!(update.owner_name, Some(None));
    }
}
