//! Item records: domain types, the store trait and its in-memory implementation.

pub mod domain;
pub mod memory;
pub mod store;

pub use domain::{Item, ItemPatch};
pub use memory::InMemoryItemStore;
pub use store::ItemStore;
