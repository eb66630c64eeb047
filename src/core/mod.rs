pub mod customer_service;
pub mod hotel_service;
pub mod reservation_service;
pub mod system;

pub use crate::domain::model::{Customer, Entity, EntityKind, Hotel, Reservation};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
pub use customer_service::CustomerService;
pub use hotel_service::HotelService;
pub use reservation_service::ReservationService;
pub use system::ReservationSystem;
