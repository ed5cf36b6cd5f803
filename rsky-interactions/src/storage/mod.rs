pub mod memory;
pub mod postgres;

use crate::error::StorageError;
use crate::models::{Interaction, InteractionWrite};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

pub use memory::MemoryInteractionStore;
pub use postgres::PgInteractionStore;

/// Backing table for the ledger.
///
/// `record` is the only mutating call and must be all-or-nothing: the
/// conflict delete and the upsert land together or not at all, and two
/// concurrent upserts of the same (user_alias, post_id, action_type) never
/// produce two rows.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Apply a write and return the id of the surviving row.
    async fn record(&self, write: &InteractionWrite) -> Result<i32, StorageError>;

    async fn interactions_for_post(&self, post_id: &str) -> Result<Vec<Interaction>, StorageError>;

    async fn interactions_for_user(
        &self,
        user_alias: &str,
    ) -> Result<Vec<Interaction>, StorageError>;

    async fn interactions_for_user_action(
        &self,
        user_alias: &str,
        action_type: &str,
    ) -> Result<Vec<Interaction>, StorageError>;

    /// Count rows per action type where the text of `context->>key` equals
    /// `value`.
    async fn action_counts(
        &self,
        context_key: &str,
        value: &str,
    ) -> Result<BTreeMap<String, i64>, StorageError>;

    async fn ping(&self) -> Result<(), StorageError>;
}

/// Text of a top-level context field, with the same rules as Postgres
/// `jsonb ->> key`: strings unquoted, other values as JSON text, null absent.
pub fn context_field_text(context: &JsonValue, key: &str) -> Option<String> {
    match context.get(key)? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
