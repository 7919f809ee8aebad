use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::ServiceError;
use crate::items::domain::Item;

/// Trait abstraction for the item record store.
/// The router only sees this trait; implementations are injected at startup.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Every entry keyed by name; iteration order is unspecified.
    async fn list(&self) -> HashMap<String, Item>;
    async fn get(&self, name: &str) -> Option<Item>;
    /// Insert under `item.name`; `Conflict` if the key exists.
    async fn create(&self, item: Item) -> Result<Item, ServiceError>;
    /// Overwrite the value at `name` wholesale; the key is not re-derived from the body.
    async fn replace(&self, name: &str, item: Item) -> Result<Item, ServiceError>;
    /// Apply the known fields of `updates`; a missing name is reported before a bad value.
    async fn partial_update(&self, name: &str, updates: Map<String, Value>) -> Result<Item, ServiceError>;
    /// Remove and return the previous value.
    async fn delete(&self, name: &str) -> Result<Item, ServiceError>;
}
