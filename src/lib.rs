pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::{toml_config::TomlConfig, Settings};

pub use adapters::{JsonStore, LocalStorage, MemoryStorage};
pub use core::{CustomerService, HotelService, ReservationService, ReservationSystem};
pub use domain::ids::{CustomerId, HotelId, ReservationId};
pub use domain::model::{Customer, CustomerUpdate, Entity, EntityKind, Hotel, HotelUpdate, Reservation};
pub use domain::period::StayPeriod;
pub use utils::error::{ReservationError, Result};
