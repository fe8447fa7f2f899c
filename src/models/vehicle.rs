use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::filters::VehicleFilters;
use crate::domain::types::{PlateNumber, TypeConstraintError, VehicleBrand, VehicleModel};
use crate::domain::vehicle::{
    NewVehicle as DomainNewVehicle, UpdateVehicle as DomainUpdateVehicle, Vehicle as DomainVehicle,
    VehicleCity, VehiclePage, VehicleStatus,
};

#[derive(Debug, Clone, Deserialize)]
/// Backend representation of [`crate::domain::vehicle::Vehicle`].
pub struct Vehicle {
    pub id: Uuid,
    pub plate_number: String,
    pub vin: Option<String>,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: Option<String>,
    pub status: VehicleStatus,
    pub mileage_km: u32,
    pub city: Option<VehicleCity>,
    pub owner_name: Option<String>,
    pub osago_policy_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
/// Body of `GET /api/v1/vehicles`.
pub struct VehicleList {
    pub items: Vec<Vehicle>,
    pub page: u32,
    pub page_size: u32,
    pub total: usize,
}

#[derive(Debug, Serialize)]
/// Body of `POST /api/v1/vehicles`.
pub struct NewVehicle<'a> {
    pub plate_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<&'a str>,
    pub brand: &'a str,
    pub model: &'a str,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'a str>,
    pub status: VehicleStatus,
    pub mileage_km: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<VehicleCity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osago_policy_number: Option<&'a str>,
}

#[derive(Debug, Default, Serialize)]
/// Body of `PUT /api/v1/vehicles/{id}`; absent fields stay untouched and
/// `Some(None)` is sent as `null` to clear the stored value.
pub struct UpdateVehicle<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage_km: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<Option<VehicleCity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<Option<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osago_policy_number: Option<Option<&'a str>>,
}

#[derive(Debug, Serialize, PartialEq)]
/// Query string of `GET /api/v1/vehicles`; empty filters are omitted.
pub struct VehicleListParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VehicleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<VehicleCity>,
    pub page: u32,
    pub page_size: u32,
    pub ordering: &'static str,
}

#[derive(Debug, Deserialize)]
/// Error body produced by the backend, `{"detail": ...}`.
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// Displayable text of the error: the `detail` string itself, or the
    /// `msg` entries of a validation error list.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::String(detail) if !detail.trim().is_empty() => {
                Some(detail.clone())
            }
            serde_json::Value::Array(entries) => {
                let messages: Vec<&str> = entries
                    .iter()
                    .filter_map(|entry| entry.get("msg").and_then(|msg| msg.as_str()))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }
}

impl TryFrom<Vehicle> for DomainVehicle {
    type Error = TypeConstraintError;

    fn try_from(vehicle: Vehicle) -> Result<Self, Self::Error> {
        Ok(Self {
            id: vehicle.id.into(),
            plate_number: PlateNumber::new(vehicle.plate_number)?,
            vin: vehicle.vin,
            brand: VehicleBrand::new(vehicle.brand)?,
            model: VehicleModel::new(vehicle.model)?,
            year: vehicle.year,
            color: vehicle.color,
            status: vehicle.status,
            mileage_km: vehicle.mileage_km,
            city: vehicle.city,
            owner_name: vehicle.owner_name,
            osago_policy_number: vehicle.osago_policy_number,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        })
    }
}

impl TryFrom<VehicleList> for VehiclePage {
    type Error = TypeConstraintError;

    fn try_from(list: VehicleList) -> Result<Self, Self::Error> {
        let items = list
            .items
            .into_iter()
            .map(DomainVehicle::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            items,
            total: list.total,
            page: list.page,
            page_size: list.page_size,
        })
    }
}

impl<'a> From<&'a DomainNewVehicle> for NewVehicle<'a> {
    fn from(vehicle: &'a DomainNewVehicle) -> Self {
        Self {
            plate_number: vehicle.plate_number.as_str(),
            vin: vehicle.vin.as_deref(),
            brand: vehicle.brand.as_str(),
            model: vehicle.model.as_str(),
            year: vehicle.year,
            color: vehicle.color.as_deref(),
            status: vehicle.status,
            mileage_km: vehicle.mileage_km,
            city: vehicle.city,
            owner_name: vehicle.owner_name.as_deref(),
            osago_policy_number: vehicle.osago_policy_number.as_deref(),
        }
    }
}

fn clearable(value: &Option<Option<String>>) -> Option<Option<&str>> {
    value.as_ref().map(|inner| inner.as_deref())
}

impl<'a> From<&'a DomainUpdateVehicle> for UpdateVehicle<'a> {
    fn from(update: &'a DomainUpdateVehicle) -> Self {
        Self {
            plate_number: update.plate_number.as_deref(),
            vin: clearable(&update.vin),
            brand: update.brand.as_deref(),
            model: update.model.as_deref(),
            year: update.year,
            color: clearable(&update.color),
            status: update.status,
            mileage_km: update.mileage_km,
            city: update.city,
            owner_name: clearable(&update.owner_name),
            osago_policy_number: clearable(&update.osago_policy_number),
        }
    }
}

impl<'a> From<&'a VehicleFilters> for VehicleListParams<'a> {
    fn from(filters: &'a VehicleFilters) -> Self {
        Self {
            q: filters.query.as_deref(),
            status: filters.status,
            city: filters.city,
            page: filters.page,
            page_size: filters.page_size,
            ordering: filters.ordering.as_str(),
        }
    }
}
