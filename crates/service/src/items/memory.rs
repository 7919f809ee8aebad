use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::items::domain::{Item, ItemPatch};
use crate::items::store::ItemStore;
use crate::storage::memory_map_store::MemoryMapStore;

const ENTITY: &str = "item";

/// Process-lifetime item store. Starts empty, nothing survives a restart.
#[derive(Clone, Default)]
pub struct InMemoryItemStore {
    store: MemoryMapStore<String, Item>,
}

impl InMemoryItemStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list(&self) -> HashMap<String, Item> {
        self.store.list().await
    }

    async fn get(&self, name: &str) -> Option<Item> {
        self.store.get(&name.to_owned()).await
    }

    #[instrument(skip_all, fields(name = %item.name))]
    async fn create(&self, item: Item) -> Result<Item, ServiceError> {
        item.validate()?;
        let created = self
            .store
            .insert_new(item.name.clone(), item, || ServiceError::already_exists(ENTITY))
            .await
            .map_err(|e| {
                warn!("item_create_conflict");
                e
            })?;
        info!("item_created");
        Ok(created)
    }

    #[instrument(skip(self, item), fields(body_name = %item.name))]
    async fn replace(&self, name: &str, item: Item) -> Result<Item, ServiceError> {
        if item.name != name {
            // stored value keeps the body's name under the path key
            warn!("item_replace_name_mismatch");
        }
        let replaced = self
            .store
            .replace_existing(&name.to_owned(), item, || ServiceError::not_found(ENTITY), Item::validate)
            .await?;
        info!("item_replaced");
        Ok(replaced)
    }

    #[instrument(skip(self, updates))]
    async fn partial_update(&self, name: &str, updates: Map<String, Value>) -> Result<Item, ServiceError> {
        let updated = self
            .store
            .update_with(&name.to_owned(), || ServiceError::not_found(ENTITY), |item| {
                item.apply(ItemPatch::from_map(&updates)?);
                Ok(())
            })
            .await?;
        info!("item_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, name: &str) -> Result<Item, ServiceError> {
        let deleted = self
            .store
            .remove(&name.to_owned())
            .await
            .ok_or_else(|| ServiceError::not_found(ENTITY))?;
        info!("item_deleted");
        Ok(deleted)
    }
}
