//! Services for a single vehicle: details, editing and removal.

use crate::domain::types::VehicleId;
use crate::domain::vehicle::Vehicle;
use crate::dto::vehicle::{EditPageData, VehiclePageData, VehicleView};
use crate::forms::vehicle::{FormErrors, VehicleForm, VehiclePayload};
use crate::repository::{VehicleReader, VehicleWriter};
use crate::services::{ServiceError, ServiceResult};

/// General error of the edit form when the backend gave no reason.
pub const UPDATE_FAILED_MESSAGE: &str = "Произошла ошибка при обновлении автомобиля";

/// Path segments that are not a uuid cannot name a vehicle.
pub fn parse_vehicle_id(raw: &str) -> ServiceResult<VehicleId> {
    raw.parse().map_err(|_| ServiceError::NotFound)
}

async fn fetch_vehicle<R>(repo: &R, id: VehicleId) -> ServiceResult<Vehicle>
where
    R: VehicleReader + ?Sized,
{
    repo.get_vehicle(id)
        .await
        .map_err(|err| {
            log::error!("Failed to load vehicle {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Loads the vehicle shown on the details page.
pub async fn load_vehicle_page<R>(repo: &R, raw_id: &str) -> ServiceResult<VehiclePageData>
where
    R: VehicleReader + ?Sized,
{
    let id = parse_vehicle_id(raw_id)?;
    let vehicle = fetch_vehicle(repo, id).await?;

    Ok(VehiclePageData {
        vehicle: VehicleView::from(&vehicle),
    })
}

/// Loads the edit form pre-filled with the stored vehicle.
pub async fn load_edit_page<R>(repo: &R, raw_id: &str) -> ServiceResult<EditPageData>
where
    R: VehicleReader + ?Sized,
{
    let id = parse_vehicle_id(raw_id)?;
    let vehicle = fetch_vehicle(repo, id).await?;

    Ok(EditPageData::new(
        id,
        vehicle.plate_number.to_string(),
        VehicleForm::from(&vehicle),
        FormErrors::default(),
    ))
}

/// Validates the edit form and sends the changes.
pub async fn update_vehicle<R>(repo: &R, raw_id: &str, form: VehicleForm) -> ServiceResult<Vehicle>
where
    R: VehicleWriter + ?Sized,
{
    let id = parse_vehicle_id(raw_id)?;
    let updates = VehiclePayload::try_from(form)?.into_update();

    let vehicle = repo.update_vehicle(id, &updates).await.map_err(|err| {
        log::error!("Failed to update vehicle {id}: {err}");
        err
    })?;

    Ok(vehicle)
}

/// Edit page re-rendered after a rejected update.
pub fn update_failed_page(id: VehicleId, form: VehicleForm, err: &ServiceError) -> EditPageData {
    let errors = match err {
        ServiceError::Form(form_err) => FormErrors::from(form_err),
        err => FormErrors::general(err.user_message(UPDATE_FAILED_MESSAGE)),
    };
    let title = form.plate_number.clone();

    EditPageData::new(id, title, form, errors)
}

pub async fn delete_vehicle<R>(repo: &R, raw_id: &str) -> ServiceResult<()>
where
    R: VehicleWriter + ?Sized,
{
    let id = parse_vehicle_id(raw_id)?;

    repo.delete_vehicle(id).await.map_err(|err| {
        log::error!("Failed to delete vehicle {id}: {err}");
        err
    })?;

    Ok(())
}
