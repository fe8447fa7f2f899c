//! Keyed request cache shared by all workers.
//!
//! List pages are keyed by the exact [`VehicleFilters`] tuple, single
//! vehicles by their id. Both maps are bounded LRU caches and every entry
//! expires after the configured lifetime, so backend changes made by other
//! clients show up without a restart.
//!
//! Each key class carries a generation counter that is bumped on
//! invalidation; a fetch obtains a [`Ticket`] before going to the backend
//! and its result is only stored if the generation is still the same when
//! the response arrives.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use lru::LruCache;

use crate::domain::filters::VehicleFilters;
use crate::domain::types::VehicleId;
use crate::domain::vehicle::{Vehicle, VehiclePage};

/// Entries kept per key class unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Lifetime of a cached response unless configured otherwise.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Generation observed when a fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Entry<T> {
    value: T,
    stored_at: Instant,
}

impl<T> Entry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }
}

#[derive(Debug)]
struct CacheState {
    lists: LruCache<VehicleFilters, Entry<VehiclePage>>,
    list_generation: u64,
    details: LruCache<VehicleId, Entry<Vehicle>>,
    detail_generation: u64,
}

#[derive(Debug)]
pub struct QueryCache {
    state: Mutex<CacheState>,
    ttl: Duration,
}

/// Returns the entry under `key` if it has not expired, dropping it if it has.
fn fresh<K, T>(entries: &mut LruCache<K, Entry<T>>, key: &K, ttl: Duration) -> Option<T>
where
    K: Hash + Eq,
    T: Clone,
{
    match entries.get(key) {
        Some(entry) if entry.stored_at.elapsed() < ttl => return Some(entry.value.clone()),
        Some(_) => {}
        None => return None,
    }
    entries.pop(key);
    None
}

impl QueryCache {
    /// Cache holding at most `capacity` lists and `capacity` vehicles, each
    /// for at most `ttl`.
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState {
                lists: LruCache::new(capacity),
                list_generation: 0,
                details: LruCache::new(capacity),
                detail_generation: 0,
            }),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_list(&self, filters: &VehicleFilters) -> Option<VehiclePage> {
        fresh(&mut self.lock().lists, filters, self.ttl)
    }

    pub fn list_ticket(&self) -> Ticket {
        Ticket(self.lock().list_generation)
    }

    /// Stores a list page unless lists were invalidated after `ticket`.
    /// Returns whether the page was stored.
    pub fn store_list(&self, ticket: Ticket, filters: VehicleFilters, page: VehiclePage) -> bool {
        let mut state = self.lock();
        if state.list_generation != ticket.0 {
            return false;
        }
        state.lists.put(filters, Entry::new(page));
        true
    }

    /// Marks every cached list stale.
    pub fn invalidate_lists(&self) {
        let mut state = self.lock();
        state.lists.clear();
        state.list_generation += 1;
    }

    pub fn get_vehicle(&self, id: VehicleId) -> Option<Vehicle> {
        fresh(&mut self.lock().details, &id, self.ttl)
    }

    pub fn vehicle_ticket(&self) -> Ticket {
        Ticket(self.lock().detail_generation)
    }

    /// Stores a fetched vehicle unless any vehicle was replaced or evicted
    /// after `ticket`.
    pub fn store_vehicle(&self, ticket: Ticket, vehicle: Vehicle) -> bool {
        let mut state = self.lock();
        if state.detail_generation != ticket.0 {
            return false;
        }
        state.details.put(vehicle.id, Entry::new(vehicle));
        true
    }

    /// Replaces the entry with a vehicle returned by a mutation.
    pub fn replace_vehicle(&self, vehicle: Vehicle) {
        let mut state = self.lock();
        state.detail_generation += 1;
        state.details.put(vehicle.id, Entry::new(vehicle));
    }

    pub fn evict_vehicle(&self, id: VehicleId) {
        let mut state = self.lock();
        state.detail_generation += 1;
        state.details.pop(&id);
    }

    /// Number of cached list pages, expired ones included until touched.
    pub fn list_len(&self) -> usize {
        self.lock().lists.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::types::{PlateNumber, VehicleBrand, VehicleModel};
    use crate::domain::vehicle::VehicleStatus;

    fn vehicle(mileage_km: u32) -> Vehicle {
        Vehicle {
            id: VehicleId::new(Uuid::nil()),
            plate_number: PlateNumber::new("А111АА77").unwrap(),
            vin: None,
            brand: VehicleBrand::new("Lada").unwrap(),
            model: VehicleModel::new("Largus").unwrap(),
            year: 2020,
            color: None,
            status: VehicleStatus::Available,
            mileage_km,
            city: None,
            owner_name: None,
            osago_policy_number: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn cache() -> QueryCache {
        QueryCache::new(NonZeroUsize::new(100).unwrap(), DEFAULT_TTL)
    }

    fn page(total: usize) -> VehiclePage {
        VehiclePage {
            items: vec![],
            total,
            page: 1,
            page_size: 10,
        }
    }

    #[test]
    fn list_is_keyed_by_exact_filters() {
        let cache = cache();
        let filters = VehicleFilters::default();
        let ticket = cache.list_ticket();
        assert!(cache.store_list(ticket, filters.clone(), page(3)));

        assert_eq!(cache.get_list(&filters).map(|p| p.total), Some(3));
        assert!(cache.get_list(&filters.clone().with_page(2)).is_none());
    }

    #[test]
    fn invalidation_drops_lists() {
        let cache = cache();
        let filters = VehicleFilters::default();
        cache.store_list(cache.list_ticket(), filters.clone(), page(3));

        cache.invalidate_lists();

        assert!(cache.get_list(&filters).is_none());
        assert_eq!(cache.list_len(), 0);
    }

    #[test]
    fn stale_list_response_is_discarded() {
        let cache = cache();
        let filters = VehicleFilters::default();
        let ticket = cache.list_ticket();

        // a mutation lands while the list request is in flight
        cache.invalidate_lists();

        assert!(!cache.store_list(ticket, filters.clone(), page(3)));
        assert!(cache.get_list(&filters).is_none());
    }

    #[test]
    fn replaced_vehicle_wins_over_in_flight_fetch() {
        let cache = cache();
        let id = VehicleId::new(Uuid::nil());
        let ticket = cache.vehicle_ticket();

        cache.replace_vehicle(vehicle(500));

        assert!(!cache.store_vehicle(ticket, vehicle(100)));
        assert_eq!(cache.get_vehicle(id).map(|v| v.mileage_km), Some(500));
    }

    #[test]
    fn evicted_vehicle_is_gone() {
        let cache = cache();
        let id = VehicleId::new(Uuid::nil());
        assert!(cache.store_vehicle(cache.vehicle_ticket(), vehicle(100)));

        cache.evict_vehicle(id);

        assert!(cache.get_vehicle(id).is_none());
    }

    #[test]
    fn list_cache_is_bounded() {
        let capacity = NonZeroUsize::new(DEFAULT_CAPACITY).unwrap();
        let cache = QueryCache::new(capacity, DEFAULT_TTL);
        for i in 0..20_000 {
            let filters = VehicleFilters::default().with_search(Some(&format!("q{i}")));
            cache.store_list(cache.list_ticket(), filters, page(i));
        }

        assert_eq!(cache.list_len(), DEFAULT_CAPACITY);
        let newest = VehicleFilters::default().with_search(Some("q19999"));
        assert_eq!(cache.get_list(&newest).map(|p| p.total), Some(19_999));
        let oldest = VehicleFilters::default().with_search(Some("q0"));
        assert!(cache.get_list(&oldest).is_none());
    }

    #[test]
    fn vehicle_cache_is_bounded() {
        let cache = QueryCache::new(NonZeroUsize::new(2).unwrap(), DEFAULT_TTL);
        let ids: Vec<_> = (0..3).map(|_| VehicleId::new(Uuid::new_v4())).collect();
        for id in &ids {
            let vehicle = Vehicle {
                id: *id,
                ..vehicle(100)
            };
            assert!(cache.store_vehicle(cache.vehicle_ticket(), vehicle));
        }

        assert!(cache.get_vehicle(ids[0]).is_none());
        assert!(cache.get_vehicle(ids[2]).is_some());
    }

    #[test]
    fn expired_entries_are_dropped() {
        let cache = QueryCache::new(NonZeroUsize::new(10).unwrap(), Duration::ZERO);
        let filters = VehicleFilters::default();
        let id = VehicleId::new(Uuid::nil());
        cache.store_list(cache.list_ticket(), filters.clone(), page(3));
        cache.store_vehicle(cache.vehicle_ticket(), vehicle(100));

        assert!(cache.get_list(&filters).is_none());
        assert!(cache.get_vehicle(id).is_none());
        assert_eq!(cache.list_len(), 0);
    }
}
