use super::{context_field_text, InteractionStore};
use crate::error::StorageError;
use crate::models::{Interaction, InteractionWrite};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

type InteractionKey = (String, String, String);

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, Interaction>,
    keys: HashMap<InteractionKey, i32>,
    last_id: i32,
}

impl Table {
    fn remove(&mut self, key: &InteractionKey) {
        if let Some(id) = self.keys.remove(key) {
            self.rows.remove(&id);
        }
    }

    fn upsert(&mut self, write: &InteractionWrite) -> Result<i32, StorageError> {
        let key = (
            write.user_alias.clone(),
            write.post_id.clone(),
            write.action_type.clone(),
        );
        let now = Utc::now();

        if let Some(id) = self.keys.get(&key) {
            if let Some(row) = self.rows.get_mut(id) {
                row.context = write.context.clone();
                row.created_at = now;
                return Ok(row.id);
            }
        }

        let id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| StorageError::Other("interaction id sequence exhausted".to_string()))?;
        self.last_id = id;
        self.rows.insert(
            id,
            Interaction {
                id,
                user_alias: write.user_alias.clone(),
                post_id: write.post_id.clone(),
                action_type: write.action_type.clone(),
                context: write.context.clone(),
                created_at: now,
            },
        );
        self.keys.insert(key, id);
        Ok(id)
    }

    fn filtered<F>(&self, predicate: F) -> Vec<Interaction>
    where
        F: Fn(&Interaction) -> bool,
    {
        self.rows
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }
}

/// In-process interaction table.
///
/// Every write holds the table's write lock for the whole conflict delete
/// and upsert, which gives the same guarantees as the unique constraint plus
/// transaction in Postgres. Ids start at 1 like a SERIAL column.
#[derive(Debug, Default)]
pub struct MemoryInteractionStore {
    table: RwLock<Table>,
}

impl MemoryInteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl InteractionStore for MemoryInteractionStore {
    async fn record(&self, write: &InteractionWrite) -> Result<i32, StorageError> {
        let mut table = self.table.write().await;
        if let Some(conflicting) = &write.conflicting_action {
            table.remove(&(
                write.user_alias.clone(),
                write.post_id.clone(),
                conflicting.clone(),
            ));
        }
        table.upsert(write)
    }

    async fn interactions_for_post(&self, post_id: &str) -> Result<Vec<Interaction>, StorageError> {
        let table = self.table.read().await;
        Ok(table.filtered(|row| row.post_id == post_id))
    }

    async fn interactions_for_user(
        &self,
        user_alias: &str,
    ) -> Result<Vec<Interaction>, StorageError> {
        let table = self.table.read().await;
        Ok(table.filtered(|row| row.user_alias == user_alias))
    }

    async fn interactions_for_user_action(
        &self,
        user_alias: &str,
        action_type: &str,
    ) -> Result<Vec<Interaction>, StorageError> {
        let table = self.table.read().await;
        Ok(table.filtered(|row| row.user_alias == user_alias && row.action_type == action_type))
    }

    async fn action_counts(
        &self,
        context_key: &str,
        value: &str,
    ) -> Result<BTreeMap<String, i64>, StorageError> {
        let table = self.table.read().await;
        let mut counts = BTreeMap::new();
        for row in table.rows.values() {
            if context_field_text(&row.context, context_key).as_deref() == Some(value) {
                *counts.entry(row.action_type.clone()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
