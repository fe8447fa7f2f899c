use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::filters::VehicleFilters;
use crate::domain::types::VehicleId;
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle, VehiclePage};
use crate::repository::cache::QueryCache;
use crate::repository::errors::RepositoryResult;
use crate::repository::{VehicleReader, VehicleWriter};

/// Serves reads from a [`QueryCache`] and keeps it consistent with writes.
///
/// - create: invalidates every list
/// - update: replaces the vehicle entry, invalidates every list
/// - delete: evicts the vehicle entry, invalidates every list
///
/// Failed calls leave the cache untouched.
#[derive(Debug, Clone)]
pub struct CachedRepository<R> {
    inner: R,
    cache: Arc<QueryCache>,
}

impl<R> CachedRepository<R> {
    pub fn new(inner: R, cache: QueryCache) -> Self {
        Self {
            inner,
            cache: Arc::new(cache),
        }
    }
}

#[async_trait]
impl<R> VehicleReader for CachedRepository<R>
where
    R: VehicleReader,
{
    async fn list_vehicles(&self, filters: &VehicleFilters) -> RepositoryResult<VehiclePage> {
        if let Some(page) = self.cache.get_list(filters) {
            log::debug!("Vehicle list cache hit for {filters:?}");
            return Ok(page);
        }

        let ticket = self.cache.list_ticket();
        let page = self.inner.list_vehicles(filters).await?;
        if self.cache.store_list(ticket, filters.clone(), page.clone()) {
            log::debug!("Cached vehicle list, {} lists held", self.cache.list_len());
        } else {
            log::debug!("Discarding stale vehicle list for {filters:?}");
        }
        Ok(page)
    }

    async fn get_vehicle(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>> {
        if let Some(vehicle) = self.cache.get_vehicle(id) {
            return Ok(Some(vehicle));
        }

        let ticket = self.cache.vehicle_ticket();
        let vehicle = self.inner.get_vehicle(id).await?;
        if let Some(vehicle) = &vehicle {
            self.cache.store_vehicle(ticket, vehicle.clone());
        }
        Ok(vehicle)
    }
}

#[async_trait]
impl<R> VehicleWriter for CachedRepository<R>
where
    R: VehicleWriter,
{
    async fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle> {
        let vehicle = self.inner.create_vehicle(new_vehicle).await?;
        self.cache.invalidate_lists();
        Ok(vehicle)
    }

    async fn update_vehicle(
        &self,
        id: VehicleId,
        updates: &UpdateVehicle,
    ) -> RepositoryResult<Vehicle> {
        let vehicle = self.inner.update_vehicle(id, updates).await?;
        self.cache.replace_vehicle(vehicle.clone());
        self.cache.invalidate_lists();
        Ok(vehicle)
    }

    async fn delete_vehicle(&self, id: VehicleId) -> RepositoryResult<()> {
        self.inner.delete_vehicle(id).await?;
        self.cache.evict_vehicle(id);
        self.cache.invalidate_lists();
        Ok(())
    }
}
