//! Services backing the fleet list, its table fragment and the creation
//! modal.

use crate::domain::filters::VehicleFilters;
use crate::domain::vehicle::Vehicle;
use crate::dto::fleet::{FleetPageData, FleetTableData};
use crate::forms::fleet::{FleetQuery, parse_query_string};
use crate::forms::vehicle::{FormErrors, VehicleForm, VehiclePayload};
use crate::repository::{VehicleReader, VehicleWriter};
use crate::services::{ServiceError, ServiceResult};

/// General error of the creation modal when the backend gave no reason.
pub const CREATE_FAILED_MESSAGE: &str = "Произошла ошибка при создании автомобиля";

/// Builds the fleet page shell; rows arrive through the table fragment.
pub fn load_fleet_page(query: FleetQuery) -> FleetPageData {
    FleetPageData::new(&VehicleFilters::from(query))
}

/// Fetches one page of vehicles for the table fragment.
pub async fn load_fleet_table<R>(repo: &R, query: FleetQuery) -> ServiceResult<FleetTableData>
where
    R: VehicleReader + ?Sized,
{
    let filters = VehicleFilters::from(query);

    let page = repo.list_vehicles(&filters).await.map_err(|err| {
        log::error!("Failed to list vehicles: {err}");
        err
    })?;

    Ok(FleetTableData::new(page, &filters))
}

/// Banner shown in place of the table when the list could not be loaded.
pub fn load_error_message(err: &ServiceError) -> String {
    let reason = match err {
        ServiceError::Repository(err) => err.to_string(),
        err => err.to_string(),
    };
    format!("Произошла ошибка при загрузке данных: {reason}")
}

/// Validates the creation form and creates the vehicle.
pub async fn create_vehicle<R>(repo: &R, form: VehicleForm) -> ServiceResult<Vehicle>
where
    R: VehicleWriter + ?Sized,
{
    let payload = VehiclePayload::try_from(form)?;
    let new_vehicle = payload.into_new_vehicle();

    let vehicle = repo.create_vehicle(&new_vehicle).await.map_err(|err| {
        log::error!("Failed to create a vehicle: {err}");
        err
    })?;

    Ok(vehicle)
}

/// Fleet page after a rejected creation, with the modal still open.
pub fn creation_failed_page(
    return_query: &str,
    form: VehicleForm,
    err: &ServiceError,
) -> FleetPageData {
    let errors = match err {
        ServiceError::Form(form_err) => FormErrors::from(form_err),
        err => FormErrors::general(err.user_message(CREATE_FAILED_MESSAGE)),
    };

    FleetPageData::with_modal(&parse_query_string(return_query), true, form, errors)
}
