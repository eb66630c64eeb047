use crate::adapters::{JsonStore, LocalStorage};
use crate::core::customer_service::CustomerService;
use crate::core::hotel_service::HotelService;
use crate::core::reservation_service::ReservationService;
use crate::domain::ids::{CustomerId, HotelId};
use crate::domain::model::{Hotel, HotelUpdate};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::{ReservationError, Result};
use std::sync::Arc;

/// Owns the three services over one shared store and carries the rules that
/// span aggregates: cascade deletes and capacity-aware hotel updates.
pub struct ReservationSystem<S: Storage> {
    hotels: HotelService<S>,
    customers: CustomerService<S>,
    reservations: ReservationService<S>,
}

impl ReservationSystem<LocalStorage> {
    /// 開啟設定中的資料目錄，缺少的 JSON 檔會以空陣列建立
    pub fn open<C: ConfigProvider>(config: &C) -> Result<Self> {
        let storage = LocalStorage::init(config.data_dir())?;
        tracing::debug!("Using data directory {}", storage.base_path().display());
        Ok(Self::new(storage))
    }
}

impl<S: Storage> ReservationSystem<S> {
    pub fn new(storage: S) -> Self {
        let store = Arc::new(JsonStore::new(storage));
        let hotels = HotelService::new(Arc::clone(&store));
        let customers = CustomerService::new(Arc::clone(&store));
        let reservations = ReservationService::new(store, hotels.clone(), customers.clone());
        Self {
            hotels,
            customers,
            reservations,
        }
    }

    pub fn hotels(&self) -> &HotelService<S> {
        &self.hotels
    }

    pub fn customers(&self) -> &CustomerService<S> {
        &self.customers
    }

    pub fn reservations(&self) -> &ReservationService<S> {
        &self.reservations
    }

    /// Deletes the hotel and every reservation that points at it.
    pub fn delete_hotel(&self, id: &HotelId) -> Result<bool> {
        if !self.hotels.delete(id)? {
            return Ok(false);
        }
        match self.reservations.remove_for_hotel(id) {
            Ok(removed) => {
                tracing::info!("Removed {} reservations of deleted hotel {}", removed, id);
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(
                    "Hotel {} deleted but its reservations could not be removed: {}",
                    id,
                    e
                );
                Err(e)
            }
        }
    }

    /// Deletes the customer and every reservation that points at them.
    pub fn delete_customer(&self, id: &CustomerId) -> Result<bool> {
        if !self.customers.delete(id)? {
            return Ok(false);
        }
        match self.reservations.remove_for_customer(id) {
            Ok(removed) => {
                tracing::info!("Removed {} reservations of deleted customer {}", removed, id);
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(
                    "Customer {} deleted but their reservations could not be removed: {}",
                    id,
                    e
                );
                Err(e)
            }
        }
    }

    /// Like [`HotelService::update`], but refuses to shrink `total_rooms`
    /// below the number of reservations already sharing a night.
    pub fn update_hotel(&self, id: &HotelId, update: &HotelUpdate) -> Result<Option<Hotel>> {
        // 不存在的飯店即使留有孤立訂房也回傳 None
        if self.hotels.get(id).is_none() {
            return Ok(None);
        }
        if let Some(total_rooms) = update.total_rooms.filter(|rooms| *rooms > 0) {
            let peak = self.reservations.peak_occupancy(id);
            if usize::try_from(total_rooms).is_ok_and(|rooms| rooms < peak) {
                return Err(ReservationError::capacity(format!(
                    "hotel has {} overlapping reservations, cannot shrink to {} rooms",
                    peak, total_rooms
                )));
            }
        }
        self.hotels.update(id, update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;
    use crate::domain::model::EntityKind;
    use crate::utils::validation::parse_iso_date;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Memory storage whose reservation writes can be switched to fail.
    struct FailingReservationWrites {
        inner: MemoryStorage,
        failing: Arc<AtomicBool>,
    }

    impl Storage for FailingReservationWrites {
        fn read_document(&self, kind: EntityKind) -> Result<Option<Vec<u8>>> {
            self.inner.read_document(kind)
        }

        fn write_document(&self, kind: EntityKind, data: &[u8]) -> Result<()> {
            if kind == EntityKind::Reservations && self.failing.load(Ordering::SeqCst) {
                return Err(ReservationError::IoError(std::io::Error::other("disk full")));
            }
            self.inner.write_document(kind, data)
        }
    }

    fn failing_system() -> (ReservationSystem<FailingReservationWrites>, Arc<AtomicBool>) {
        let failing = Arc::new(AtomicBool::new(false));
        let storage = FailingReservationWrites {
            inner: MemoryStorage::new(),
            failing: Arc::clone(&failing),
        };
        (ReservationSystem::new(storage), failing)
    }

    fn book<S: Storage>(system: &ReservationSystem<S>, hotel: &Hotel, customer: &CustomerId) {
        system
            .reservations()
            .create(
                customer,
                hotel.id(),
                parse_iso_date("2024-01-10").unwrap(),
                parse_iso_date("2024-01-12").unwrap(),
            )
            .unwrap();
    }

    #[test]
    fn test_update_unknown_hotel_with_orphan_reservations() {
        let orphans = r#"[
            {"id": "r1", "customer_id": "c1", "hotel_id": "ghost", "check_in": "2024-01-10", "check_out": "2024-01-12"},
            {"id": "r2", "customer_id": "c2", "hotel_id": "ghost", "check_in": "2024-01-11", "check_out": "2024-01-13"}
        ]"#;
        let system =
            ReservationSystem::new(MemoryStorage::new().with_document(EntityKind::Reservations, orphans));
        let ghost = HotelId::parse("ghost").unwrap();
        assert_eq!(system.reservations().peak_occupancy(&ghost), 2);

        let update = HotelUpdate {
            total_rooms: Some(1),
            ..Default::default()
        };
        assert_eq!(system.update_hotel(&ghost, &update).unwrap(), None);
    }

    #[test]
    fn test_shrink_below_peak_is_rejected() {
        let system = ReservationSystem::new(MemoryStorage::new());
        let hotel = system.hotels().create("Hotel X", 3).unwrap();
        let customer = system.customers().create("Alice", "alice@example.com").unwrap();
        book(&system, &hotel, customer.id());
        book(&system, &hotel, customer.id());

        let shrink = |rooms| HotelUpdate {
            total_rooms: Some(rooms),
            ..Default::default()
        };
        assert!(matches!(
            system.update_hotel(hotel.id(), &shrink(1)),
            Err(ReservationError::CapacityError { .. })
        ));
        let updated = system.update_hotel(hotel.id(), &shrink(2)).unwrap().unwrap();
        assert_eq!(updated.total_rooms(), 2);
    }

    #[test]
    fn test_delete_hotel_reports_failed_cascade() {
        let (system, failing) = failing_system();
        let hotel = system.hotels().create("Hotel X", 1).unwrap();
        let customer = system.customers().create("Alice", "alice@example.com").unwrap();
        book(&system, &hotel, customer.id());

        failing.store(true, Ordering::SeqCst);
        let result = system.delete_hotel(hotel.id());

        assert!(matches!(result, Err(ReservationError::IoError(_))));
        assert!(system.hotels().get(hotel.id()).is_none());
        assert_eq!(system.reservations().list_for_hotel(hotel.id()).len(), 1);
    }

    #[test]
    fn test_delete_customer_reports_failed_cascade() {
        let (system, failing) = failing_system();
        let hotel = system.hotels().create("Hotel X", 1).unwrap();
        let customer = system.customers().create("Alice", "alice@example.com").unwrap();
        book(&system, &hotel, customer.id());

        failing.store(true, Ordering::SeqCst);
        assert!(system.delete_customer(customer.id()).is_err());
        assert!(system.customers().get(customer.id()).is_none());

        failing.store(false, Ordering::SeqCst);
        assert_eq!(system.reservations().remove_for_customer(customer.id()).unwrap(), 1);
    }
}
