use crate::adapters::JsonStore;
use crate::core::customer_service::CustomerService;
use crate::core::hotel_service::HotelService;
use crate::domain::ids::{CustomerId, HotelId, ReservationId};
use crate::domain::model::{Hotel, Reservation};
use crate::domain::period::StayPeriod;
use crate::domain::ports::Storage;
use crate::utils::error::{ReservationError, Result};
use chrono::NaiveDate;
use std::sync::Arc;

/// Bookings, with reference checks against the hotel and customer services
/// and a per-hotel capacity check that rescans all bookings on every create.
pub struct ReservationService<S: Storage> {
    store: Arc<JsonStore<S>>,
    hotels: HotelService<S>,
    customers: CustomerService<S>,
}

impl<S: Storage> Clone for ReservationService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            hotels: self.hotels.clone(),
            customers: self.customers.clone(),
        }
    }
}

impl<S: Storage> ReservationService<S> {
    pub fn new(
        store: Arc<JsonStore<S>>,
        hotels: HotelService<S>,
        customers: CustomerService<S>,
    ) -> Self {
        Self {
            store,
            hotels,
            customers,
        }
    }

    pub fn create(
        &self,
        customer_id: &CustomerId,
        hotel_id: &HotelId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Reservation> {
        if self.customers.get(customer_id).is_none() {
            return Err(ReservationError::reference("customer not found"));
        }
        let hotel = self
            .hotels
            .get(hotel_id)
            .ok_or_else(|| ReservationError::reference("hotel not found"))?;
        let period = StayPeriod::new(check_in, check_out)?;

        let mut reservations: Vec<Reservation> = self.store.load();
        let overlapping = count_overlapping(&reservations, hotel_id, &period);
        // 剛好 total_rooms 筆重疊仍可接受，再多一筆即拒絕
        if overlapping >= hotel.total_rooms() as usize {
            tracing::warn!(
                "Hotel {} is full for {}..{} ({} of {} rooms taken)",
                hotel_id,
                check_in,
                check_out,
                overlapping,
                hotel.total_rooms()
            );
            return Err(ReservationError::capacity("no rooms available"));
        }

        let reservation = Reservation::for_period(customer_id.clone(), hotel_id.clone(), period);
        reservations.push(reservation.clone());
        self.store.save(&reservations)?;

        tracing::info!(
            "Created reservation {} at hotel {} for customer {} ({} nights)",
            reservation.id(),
            hotel_id,
            customer_id,
            reservation.nights()
        );
        Ok(reservation)
    }

    pub fn get(&self, id: &ReservationId) -> Option<Reservation> {
        self.store
            .load::<Reservation>()
            .into_iter()
            .find(|reservation| reservation.id() == id)
    }

    pub fn list(&self) -> Vec<Reservation> {
        self.store.load()
    }

    pub fn list_for_hotel(&self, hotel_id: &HotelId) -> Vec<Reservation> {
        self.store
            .load::<Reservation>()
            .into_iter()
            .filter(|reservation| reservation.hotel_id() == hotel_id)
            .collect()
    }

    pub fn list_for_customer(&self, customer_id: &CustomerId) -> Vec<Reservation> {
        self.store
            .load::<Reservation>()
            .into_iter()
            .filter(|reservation| reservation.customer_id() == customer_id)
            .collect()
    }

    /// `true` when the reservation existed and was removed, `false` otherwise.
    pub fn cancel(&self, id: &ReservationId) -> Result<bool> {
        let removed = self.remove_where(|reservation| reservation.id() == id)?;
        if removed > 0 {
            tracing::info!("Cancelled reservation {}", id);
        }
        Ok(removed > 0)
    }

    pub fn remove_for_hotel(&self, hotel_id: &HotelId) -> Result<usize> {
        self.remove_where(|reservation| reservation.hotel_id() == hotel_id)
    }

    pub fn remove_for_customer(&self, customer_id: &CustomerId) -> Result<usize> {
        self.remove_where(|reservation| reservation.customer_id() == customer_id)
    }

    /// Rooms still free at `hotel_id` for the whole requested stay.
    pub fn availability(
        &self,
        hotel_id: &HotelId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<usize> {
        let hotel: Hotel = self
            .hotels
            .get(hotel_id)
            .ok_or_else(|| ReservationError::reference("hotel not found"))?;
        let period = StayPeriod::new(check_in, check_out)?;

        let reservations: Vec<Reservation> = self.store.load();
        let overlapping = count_overlapping(&reservations, hotel_id, &period);
        Ok((hotel.total_rooms() as usize).saturating_sub(overlapping))
    }

    /// Largest number of the hotel's reservations sharing a single night.
    pub fn peak_occupancy(&self, hotel_id: &HotelId) -> usize {
        peak_occupancy(
            self.store
                .load::<Reservation>()
                .iter()
                .filter(|reservation| reservation.hotel_id() == hotel_id)
                .map(|reservation| reservation.period()),
        )
    }

    fn remove_where(&self, mut matches: impl FnMut(&Reservation) -> bool) -> Result<usize> {
        let mut reservations: Vec<Reservation> = self.store.load();
        let before = reservations.len();
        reservations.retain(|reservation| !matches(reservation));

        let removed = before - reservations.len();
        if removed > 0 {
            self.store.save(&reservations)?;
        }
        Ok(removed)
    }
}

fn count_overlapping(reservations: &[Reservation], hotel_id: &HotelId, period: &StayPeriod) -> usize {
    reservations
        .iter()
        .filter(|reservation| reservation.hotel_id() == hotel_id)
        .filter(|reservation| reservation.period().overlaps(period))
        .count()
}

fn peak_occupancy<'a>(periods: impl Iterator<Item = &'a StayPeriod>) -> usize {
    let mut events: Vec<(NaiveDate, i64)> = periods
        .flat_map(|period| [(period.check_in(), 1), (period.check_out(), -1)])
        .collect();
    // 同一天先退房再入住
    events.sort();

    let mut current = 0i64;
    let mut peak = 0i64;
    for (_, delta) in events {
        current += delta;
        peak = peak.max(current);
    }
    peak as usize
}
