//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::filters::VehicleFilters;
use crate::domain::types::VehicleId;
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle, VehiclePage};
use crate::repository::errors::RepositoryResult;
use crate::repository::{VehicleReader, VehicleWriter};

mock! {
    pub Repository {}

    #[async_trait]
    impl VehicleReader for Repository {
        async fn list_vehicles(&self, filters: &VehicleFilters) -> RepositoryResult<VehiclePage>;
        async fn get_vehicle(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>>;
    }

    #[async_trait]
    impl VehicleWriter for Repository {
        async fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle>;
        async fn update_vehicle(
            &self,
            id: VehicleId,
            updates: &UpdateVehicle,
        ) -> RepositoryResult<Vehicle>;
        async fn delete_vehicle(&self, id: VehicleId) -> RepositoryResult<()>;
    }
}
