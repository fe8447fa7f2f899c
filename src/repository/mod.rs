//! Access to the vehicle backend.
//!
//! [`HttpRepository`] talks to the REST API; [`CachedRepository`] wraps any
//! implementation and applies the cache invalidation rules of each
//! mutation. Handlers receive the cached variant.

use async_trait::async_trait;

use crate::domain::filters::VehicleFilters;
use crate::domain::types::VehicleId;
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle, VehiclePage};
use crate::repository::errors::RepositoryResult;

pub mod cache;
pub mod cached;
pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use cached::CachedRepository;
pub use http::HttpRepository;

/// Repository handed to the handlers.
pub type DashboardRepository = CachedRepository<HttpRepository>;

#[async_trait]
pub trait VehicleReader: Send + Sync {
    async fn list_vehicles(&self, filters: &VehicleFilters) -> RepositoryResult<VehiclePage>;
    async fn get_vehicle(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>>;
}

#[async_trait]
pub trait VehicleWriter: Send + Sync {
    async fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle>;
    async fn update_vehicle(
        &self,
        id: VehicleId,
        updates: &UpdateVehicle,
    ) -> RepositoryResult<Vehicle>;
    async fn delete_vehicle(&self, id: VehicleId) -> RepositoryResult<()>;
}
