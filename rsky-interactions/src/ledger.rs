use crate::action::{conflicting_action, normalize_action, FAVORITE};
use crate::error::{InteractionError, StorageError};
use crate::models::{Interaction, InteractionWrite};
use crate::pseudonym::Pseudonymizer;
use crate::storage::InteractionStore;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const FEED_ID_KEY: &str = "feed_id";

/// Records interactions under pseudonymized user aliases and serves the read
/// views over them.
///
/// Every storage call is bounded by `timeout`. When it elapses the in-flight
/// call is dropped, which rolls back an uncommitted write.
pub struct InteractionLedger {
    pseudonymizer: Pseudonymizer,
    store: Arc<dyn InteractionStore>,
    timeout: Duration,
}

impl InteractionLedger {
    pub fn new(
        pseudonymizer: Pseudonymizer,
        store: Arc<dyn InteractionStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            pseudonymizer,
            store,
            timeout,
        }
    }

    pub fn alias(&self, raw_user_id: &str) -> String {
        self.pseudonymizer.alias(raw_user_id)
    }

    /// Record one interaction and return the id of the stored row.
    ///
    /// A repeated (user, post, action) overwrites the context and refreshes
    /// `created_at` on the existing row. Recording one side of a conflicting
    /// pair removes the other side in the same transaction.
    pub async fn record(
        &self,
        user_id: &str,
        post_id: &str,
        action_type: &str,
        context: Option<JsonValue>,
    ) -> Result<i32, InteractionError> {
        let missing: Vec<&str> = [
            ("user_id", user_id),
            ("post_id", post_id),
            ("action_type", action_type),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();
        if !missing.is_empty() {
            warn!("Rejected interaction, missing {missing:?}");
            return Err(InteractionError::Validation(missing.join(", ")));
        }

        let action_type = normalize_action(action_type);
        let write = InteractionWrite {
            user_alias: self.pseudonymizer.alias(user_id),
            post_id: post_id.to_string(),
            action_type: action_type.to_string(),
            context: match context {
                None | Some(JsonValue::Null) => JsonValue::Object(Default::default()),
                Some(context) => context,
            },
            conflicting_action: conflicting_action(action_type).map(String::from),
        };

        let id = self.bounded(self.store.record(&write)).await?;
        debug!("Recorded {} on post {} as id {id}", write.action_type, write.post_id);
        Ok(id)
    }

    pub async fn interactions_for_post(
        &self,
        post_id: &str,
    ) -> Result<Vec<Interaction>, InteractionError> {
        Ok(self.bounded(self.store.interactions_for_post(post_id)).await?)
    }

    pub async fn interactions_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Interaction>, InteractionError> {
        let user_alias = self.pseudonymizer.alias(user_id);
        Ok(self
            .bounded(self.store.interactions_for_user(&user_alias))
            .await?)
    }

    pub async fn favourites_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Interaction>, InteractionError> {
        if user_id.is_empty() {
            return Err(InteractionError::Validation("user_id".to_string()));
        }
        let user_alias = self.pseudonymizer.alias(user_id);
        Ok(self
            .bounded(self.store.interactions_for_user_action(&user_alias, FAVORITE))
            .await?)
    }

    /// Interaction counts per action type for one feed. No feed id matches
    /// nothing.
    pub async fn feed_stats(
        &self,
        feed_id: Option<&str>,
    ) -> Result<BTreeMap<String, i64>, InteractionError> {
        match feed_id {
            None => Ok(BTreeMap::new()),
            Some(feed_id) => Ok(self
                .bounded(self.store.action_counts(FEED_ID_KEY, feed_id))
                .await?),
        }
    }

    pub async fn health(&self) -> Result<(), InteractionError> {
        Ok(self.bounded(self.store.ping()).await?)
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, StorageError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout(self.timeout)),
        }
    }
}
