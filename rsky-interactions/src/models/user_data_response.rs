use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserInteraction {
    #[serde(rename = "post_id")]
    pub post_id: String,
    #[serde(rename = "action_type")]
    pub action_type: String,
    #[serde(rename = "context")]
    pub context: JsonValue,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl From<crate::models::Interaction> for UserInteraction {
    fn from(row: crate::models::Interaction) -> Self {
        UserInteraction {
            post_id: row.post_id,
            action_type: row.action_type,
            context: row.context,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserDataResponse {
    #[serde(rename = "user_id")]
    pub user_id: String,
    #[serde(rename = "interactions")]
    pub interactions: Vec<UserInteraction>,
}
