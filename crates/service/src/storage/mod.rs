//! Storage abstractions for service layer
//!
//! Contains the reusable lock-guarded map used by the domain stores.

pub mod memory_map_store;
