use async_trait::async_trait;
use rocket::http::ContentType;
use rocket::local::asynchronous::{Client, LocalResponse};
use rsky_interactions::build_rocket;
use rsky_interactions::config::DEFAULT_HTTP_PORT;
use rsky_interactions::error::StorageError;
use rsky_interactions::ledger::InteractionLedger;
use rsky_interactions::models::{Interaction, InteractionWrite};
use rsky_interactions::pseudonym::Pseudonymizer;
use rsky_interactions::storage::{InteractionStore, MemoryInteractionStore};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_SALT: &str = "integration-salt";

pub async fn get_client_with(store: Arc<dyn InteractionStore>) -> Client {
    let ledger = InteractionLedger::new(Pseudonymizer::new(TEST_SALT), store, Duration::from_secs(5));
    Client::untracked(build_rocket(ledger, DEFAULT_HTTP_PORT))
        .await
        .expect("Valid Rocket instance")
}

pub async fn get_client() -> (Client, Arc<MemoryInteractionStore>) {
    let store = Arc::new(MemoryInteractionStore::new());
    (get_client_with(store.clone()).await, store)
}

pub async fn post_interaction<'c>(client: &'c Client, body: Value) -> LocalResponse<'c> {
    client
        .post("/interactions")
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
        .await
}

pub fn alias(user_id: &str) -> String {
    Pseudonymizer::new(TEST_SALT).alias(user_id)
}

/// Store whose connection is always down.
pub struct BrokenStore;

fn unavailable() -> StorageError {
    StorageError::Other("connection refused (test)".to_string())
}

#[async_trait]
impl InteractionStore for BrokenStore {
    async fn record(&self, _write: &InteractionWrite) -> Result<i32, StorageError> {
        Err(unavailable())
    }

    async fn interactions_for_post(&self, _post_id: &str) -> Result<Vec<Interaction>, StorageError> {
        Err(unavailable())
    }

    async fn interactions_for_user(
        &self,
        _user_alias: &str,
    ) -> Result<Vec<Interaction>, StorageError> {
        Err(unavailable())
    }

    async fn interactions_for_user_action(
        &self,
        _user_alias: &str,
        _action_type: &str,
    ) -> Result<Vec<Interaction>, StorageError> {
        Err(unavailable())
    }

    async fn action_counts(
        &self,
        _context_key: &str,
        _value: &str,
    ) -> Result<BTreeMap<String, i64>, StorageError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Err(unavailable())
    }
}
