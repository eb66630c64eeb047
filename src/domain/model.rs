use crate::domain::ids::{CustomerId, HotelId, ReservationId};
use crate::domain::period::StayPeriod;
use crate::utils::error::Result;
use crate::utils::validation::{
    parse_iso_date, validate_email, validate_non_empty_string, validate_positive_number,
};
use chrono::NaiveDate;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The three persisted collections, one JSON document each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Hotels,
    Customers,
    Reservations,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [Self::Hotels, Self::Customers, Self::Reservations];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hotels => "hotels",
            Self::Customers => "customers",
            Self::Reservations => "reservations",
        }
    }

    pub fn document_name(&self) -> &'static str {
        match self {
            Self::Hotels => "hotels.json",
            Self::Customers => "customers.json",
            Self::Reservations => "reservations.json",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted record type. Deserializing must run the entity's constructor
/// checks so that nothing invalid is ever loaded.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    type Id: PartialEq + fmt::Display;

    const KIND: EntityKind;

    fn id(&self) -> &Self::Id;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hotel {
    id: HotelId,
    name: String,
    total_rooms: u32,
}

#[derive(Debug, Clone, Default)]
pub struct HotelUpdate {
    pub name: Option<String>,
    pub total_rooms: Option<i64>,
}

#[derive(Deserialize)]
struct HotelRecord {
    id: String,
    name: String,
    total_rooms: i64,
}

impl Hotel {
    pub fn new(name: &str, total_rooms: i64) -> Result<Self> {
        Self::restore(HotelId::generate(), name, total_rooms)
    }

    pub fn restore(id: HotelId, name: &str, total_rooms: i64) -> Result<Self> {
        Ok(Self {
            id,
            name: validate_non_empty_string("name", name)?,
            total_rooms: validate_positive_number("total_rooms", total_rooms)?,
        })
    }

    /// Builds the replacement hotel; absent fields keep their current value.
    pub fn apply(&self, update: &HotelUpdate) -> Result<Self> {
        Self::restore(
            self.id.clone(),
            update.name.as_deref().unwrap_or(&self.name),
            update.total_rooms.unwrap_or(i64::from(self.total_rooms)),
        )
    }

    pub fn id(&self) -> &HotelId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_rooms(&self) -> u32 {
        self.total_rooms
    }
}

impl<'de> Deserialize<'de> for Hotel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = HotelRecord::deserialize(deserializer)?;
        let id = HotelId::parse(&record.id).map_err(D::Error::custom)?;
        Hotel::restore(id, &record.name, record.total_rooms).map_err(D::Error::custom)
    }
}

impl Entity for Hotel {
    type Id = HotelId;

    const KIND: EntityKind = EntityKind::Hotels;

    fn id(&self) -> &HotelId {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct CustomerRecord {
    id: String,
    name: String,
    email: String,
}

impl Customer {
    pub fn new(name: &str, email: &str) -> Result<Self> {
        Self::restore(CustomerId::generate(), name, email)
    }

    pub fn restore(id: CustomerId, name: &str, email: &str) -> Result<Self> {
        Ok(Self {
            id,
            name: validate_non_empty_string("name", name)?,
            email: validate_email("email", email)?,
        })
    }

    pub fn apply(&self, update: &CustomerUpdate) -> Result<Self> {
        Self::restore(
            self.id.clone(),
            update.name.as_deref().unwrap_or(&self.name),
            update.email.as_deref().unwrap_or(&self.email),
        )
    }

    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl<'de> Deserialize<'de> for Customer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = CustomerRecord::deserialize(deserializer)?;
        let id = CustomerId::parse(&record.id).map_err(D::Error::custom)?;
        Customer::restore(id, &record.name, &record.email).map_err(D::Error::custom)
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    const KIND: EntityKind = EntityKind::Customers;

    fn id(&self) -> &CustomerId {
        &self.id
    }
}

/// A booking of one room. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    id: ReservationId,
    customer_id: CustomerId,
    hotel_id: HotelId,
    #[serde(flatten)]
    period: StayPeriod,
}

#[derive(Deserialize)]
struct ReservationRecord {
    id: String,
    customer_id: String,
    hotel_id: String,
    check_in: String,
    check_out: String,
}

impl ReservationRecord {
    fn into_reservation(self) -> Result<Reservation> {
        Reservation::restore(
            ReservationId::parse(&self.id)?,
            CustomerId::parse(&self.customer_id)?,
            HotelId::parse(&self.hotel_id)?,
            parse_iso_date(&self.check_in)?,
            parse_iso_date(&self.check_out)?,
        )
    }
}

impl Reservation {
    pub fn new(
        customer_id: CustomerId,
        hotel_id: HotelId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Self> {
        Ok(Self::for_period(
            customer_id,
            hotel_id,
            StayPeriod::new(check_in, check_out)?,
        ))
    }

    pub fn for_period(customer_id: CustomerId, hotel_id: HotelId, period: StayPeriod) -> Self {
        Self {
            id: ReservationId::generate(),
            customer_id,
            hotel_id,
            period,
        }
    }

    pub fn restore(
        id: ReservationId,
        customer_id: CustomerId,
        hotel_id: HotelId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Self> {
        Ok(Self {
            id,
            customer_id,
            hotel_id,
            period: StayPeriod::new(check_in, check_out)?,
        })
    }

    pub fn id(&self) -> &ReservationId {
        &self.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    pub fn period(&self) -> &StayPeriod {
        &self.period
    }

    pub fn check_in(&self) -> NaiveDate {
        self.period.check_in()
    }

    pub fn check_out(&self) -> NaiveDate {
        self.period.check_out()
    }

    pub fn nights(&self) -> i64 {
        self.period.nights()
    }

    pub fn overlaps(&self, other: &Reservation) -> bool {
        self.period.overlaps(&other.period)
    }
}

impl<'de> Deserialize<'de> for Reservation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        ReservationRecord::deserialize(deserializer)?
            .into_reservation()
            .map_err(D::Error::custom)
    }
}

impl Entity for Reservation {
    type Id = ReservationId;

    const KIND: EntityKind = EntityKind::Reservations;

    fn id(&self) -> &ReservationId {
        &self.id
    }
}
