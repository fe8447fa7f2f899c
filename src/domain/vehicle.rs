use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    PlateNumber, TypeConstraintError, VehicleBrand, VehicleId, VehicleModel, non_empty_trimmed,
};

/// Operational state of a vehicle.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    #[default]
    Available,
    RentedTaxi,
    RentedTour,
    Maintenance,
    Inspection,
    Inactive,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 6] = [
        VehicleStatus::Available,
        VehicleStatus::RentedTaxi,
        VehicleStatus::RentedTour,
        VehicleStatus::Maintenance,
        VehicleStatus::Inspection,
        VehicleStatus::Inactive,
    ];

    /// Value used on the wire and in query strings.
    pub const fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Available => "AVAILABLE",
            VehicleStatus::RentedTaxi => "RENTED_TAXI",
            VehicleStatus::RentedTour => "RENTED_TOUR",
            VehicleStatus::Maintenance => "MAINTENANCE",
            VehicleStatus::Inspection => "INSPECTION",
            VehicleStatus::Inactive => "INACTIVE",
        }
    }

    /// Human readable label shown in badges and selects.
    pub const fn label(self) -> &'static str {
        match self {
            VehicleStatus::Available => "Доступен",
            VehicleStatus::RentedTaxi => "Арендован (такси)",
            VehicleStatus::RentedTour => "Арендован (тур)",
            VehicleStatus::Maintenance => "На ТО",
            VehicleStatus::Inspection => "На осмотре",
            VehicleStatus::Inactive => "Неактивен",
        }
    }

    /// CSS class of the status badge.
    pub const fn badge_class(self) -> &'static str {
        match self {
            VehicleStatus::Available => "status-green",
            VehicleStatus::RentedTaxi => "status-blue",
            VehicleStatus::RentedTour => "status-purple",
            VehicleStatus::Maintenance => "status-yellow",
            VehicleStatus::Inspection => "status-orange",
            VehicleStatus::Inactive => "status-gray",
        }
    }
}

impl Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        VehicleStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypeConstraintError::UnknownStatus(s.to_string()))
    }
}

/// Locations the fleet operates in.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VehicleCity {
    #[serde(rename = "Псков")]
    Pskov,
    #[serde(rename = "Печоры")]
    Pechory,
    #[serde(rename = "Себеж")]
    Sebezh,
    #[serde(rename = "Остров")]
    Ostrov,
    #[serde(rename = "Опочка")]
    Opochka,
}

impl VehicleCity {
    pub const ALL: [VehicleCity; 5] = [
        VehicleCity::Pskov,
        VehicleCity::Pechory,
        VehicleCity::Sebezh,
        VehicleCity::Ostrov,
        VehicleCity::Opochka,
    ];

    /// City name; doubles as the wire value.
    pub const fn as_str(self) -> &'static str {
        match self {
            VehicleCity::Pskov => "Псков",
            VehicleCity::Pechory => "Печоры",
            VehicleCity::Sebezh => "Себеж",
            VehicleCity::Ostrov => "Остров",
            VehicleCity::Opochka => "Опочка",
        }
    }
}

impl Display for VehicleCity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleCity {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        VehicleCity::ALL
            .into_iter()
            .find(|city| city.as_str() == s)
            .ok_or_else(|| TypeConstraintError::UnknownCity(s.to_string()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
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
    /// OSAGO insurance policy number.
    pub osago_policy_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewVehicle {
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

impl NewVehicle {
    /// Builds a vehicle with the default status and zero mileage.
    #[must_use]
    pub fn new(plate_number: PlateNumber, brand: VehicleBrand, model: VehicleModel, year: i32) -> Self {
        Self {
            plate_number,
            vin: None,
            brand,
            model,
            year,
            color: None,
            status: VehicleStatus::default(),
            mileage_km: 0,
            city: None,
            owner_name: None,
            osago_policy_number: None,
        }
    }

    #[must_use]
    pub fn vin(mut self, vin: Option<String>) -> Self {
        self.vin = non_empty_trimmed(vin);
        self
    }

    #[must_use]
    pub fn color(mut self, color: Option<String>) -> Self {
        self.color = non_empty_trimmed(color);
        self
    }

    #[must_use]
    pub fn status(mut self, status: VehicleStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn mileage_km(mut self, mileage_km: u32) -> Self {
        self.mileage_km = mileage_km;
        self
    }

    #[must_use]
    pub fn city(mut self, city: Option<VehicleCity>) -> Self {
        self.city = city;
        self
    }

    #[must_use]
    pub fn owner_name(mut self, owner_name: Option<String>) -> Self {
        self.owner_name = non_empty_trimmed(owner_name);
        self
    }

    #[must_use]
    pub fn osago_policy_number(mut self, number: Option<String>) -> Self {
        self.osago_policy_number = non_empty_trimmed(number);
        self
    }
}

/// Partial update; only the fields that are `Some` are sent to the backend.
///
/// Optional vehicle attributes are doubly wrapped: `Some(None)` clears the
/// stored value, `None` leaves it untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateVehicle {
    pub plate_number: Option<PlateNumber>,
    pub vin: Option<Option<String>>,
    pub brand: Option<VehicleBrand>,
    pub model: Option<VehicleModel>,
    pub year: Option<i32>,
    pub color: Option<Option<String>>,
    pub status: Option<VehicleStatus>,
    pub mileage_km: Option<u32>,
    pub city: Option<Option<VehicleCity>>,
    pub owner_name: Option<Option<String>>,
    pub osago_policy_number: Option<Option<String>>,
}

/// One page of the vehicle list as returned by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VehiclePage {
    pub items: Vec<Vehicle>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

impl VehiclePage {
    /// Number of pages needed to show `total` items, `ceil(total / page_size)`.
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size as usize)
    }
}
