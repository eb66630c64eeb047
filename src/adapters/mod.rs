// Adapters layer: concrete storage backends and the JSON document store.

pub mod json_store;
pub mod local;
pub mod memory;

pub use json_store::JsonStore;
pub use local::LocalStorage;
pub use memory::MemoryStorage;
