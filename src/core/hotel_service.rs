use crate::adapters::JsonStore;
use crate::domain::ids::HotelId;
use crate::domain::model::{Hotel, HotelUpdate};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::sync::Arc;

pub struct HotelService<S: Storage> {
    store: Arc<JsonStore<S>>,
}

impl<S: Storage> Clone for HotelService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Storage> HotelService<S> {
    pub fn new(store: Arc<JsonStore<S>>) -> Self {
        Self { store }
    }

    pub fn create(&self, name: &str, total_rooms: i64) -> Result<Hotel> {
        let hotel = Hotel::new(name, total_rooms)?;

        let mut hotels: Vec<Hotel> = self.store.load();
        hotels.push(hotel.clone());
        self.store.save(&hotels)?;

        tracing::info!(
            "Created hotel {} '{}' with {} rooms",
            hotel.id(),
            hotel.name(),
            hotel.total_rooms()
        );
        Ok(hotel)
    }

    pub fn get(&self, id: &HotelId) -> Option<Hotel> {
        self.store
            .load::<Hotel>()
            .into_iter()
            .find(|hotel| hotel.id() == id)
    }

    pub fn list(&self) -> Vec<Hotel> {
        self.store.load()
    }

    /// Returns `Ok(None)` when no hotel has this id.
    pub fn update(&self, id: &HotelId, update: &HotelUpdate) -> Result<Option<Hotel>> {
        let mut hotels: Vec<Hotel> = self.store.load();
        let Some(slot) = hotels.iter_mut().find(|hotel| hotel.id() == id) else {
            return Ok(None);
        };

        let updated = slot.apply(update)?;
        *slot = updated.clone();
        self.store.save(&hotels)?;

        tracing::info!("Updated hotel {}", id);
        Ok(Some(updated))
    }

    /// Removes only the hotel; see `ReservationSystem::delete_hotel` for the cascade.
    pub fn delete(&self, id: &HotelId) -> Result<bool> {
        let mut hotels: Vec<Hotel> = self.store.load();
        let before = hotels.len();
        hotels.retain(|hotel| hotel.id() != id);
        if hotels.len() == before {
            return Ok(false);
        }

        self.store.save(&hotels)?;
        tracing::info!("Deleted hotel {}", id);
        Ok(true)
    }
}
