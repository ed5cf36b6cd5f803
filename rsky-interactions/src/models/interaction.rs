use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

/// Latest state of one (user_alias, post_id, action_type) tuple.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(rename = "id")]
    pub id: i32,
    #[serde(rename = "user_alias")]
    pub user_alias: String,
    #[serde(rename = "post_id")]
    pub post_id: String,
    #[serde(rename = "action_type")]
    pub action_type: String,
    #[serde(rename = "context")]
    pub context: JsonValue,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// A validated, pseudonymized and normalized write, ready for storage.
///
/// When `conflicting_action` is set the store must delete the row for
/// (user_alias, post_id, conflicting_action) in the same transaction as the
/// upsert.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionWrite {
    pub user_alias: String,
    pub post_id: String,
    pub action_type: String,
    pub context: JsonValue,
    pub conflicting_action: Option<String>,
}
