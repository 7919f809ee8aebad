//! Service layer holding the item records and their CRUD rules.
//! - `items`: domain types, the `ItemStore` trait, the in-memory implementation.
//! - `storage`: lock-guarded generic map reused by stores.
//! - `errors`: the error taxonomy surfaced to the HTTP layer.

pub mod errors;
pub mod items;
pub mod storage;
