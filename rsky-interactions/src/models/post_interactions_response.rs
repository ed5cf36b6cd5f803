use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostInteraction {
    #[serde(rename = "user_alias")]
    pub user_alias: String,
    #[serde(rename = "action_type")]
    pub action_type: String,
    #[serde(rename = "context")]
    pub context: JsonValue,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl From<crate::models::Interaction> for PostInteraction {
    fn from(row: crate::models::Interaction) -> Self {
        PostInteraction {
            user_alias: row.user_alias,
            action_type: row.action_type,
            context: row.context,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostInteractionsResponse {
    #[serde(rename = "post_id")]
    pub post_id: String,
    #[serde(rename = "interactions")]
    pub interactions: Vec<PostInteraction>,
}
