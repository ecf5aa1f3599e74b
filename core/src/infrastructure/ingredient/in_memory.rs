use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient::{entities::IngredientRecord, ports::IngredientRepository},
};

/// Process-local ingredient store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIngredientRepository {
    store: Arc<RwLock<HashMap<String, IngredientRecord>>>,
}

impl InMemoryIngredientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl IngredientRepository for InMemoryIngredientRepository {
    async fn get(&self, name: &str) -> Result<Option<IngredientRecord>, CoreError> {
        Ok(self.store.read().await.get(name).cloned())
    }

    async fn put(&self, record: IngredientRecord) -> Result<IngredientRecord, CoreError> {
        self.store
            .write()
            .await
            .insert(record.name.clone(), record.clone());
        Ok(record)
    }
}
