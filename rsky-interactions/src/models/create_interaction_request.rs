use serde_json::Value as JsonValue;

/// Body of `POST /interactions`. Fields are optional here so that a missing
/// field is reported as a validation error rather than a parse failure.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateInteractionRequest {
    #[serde(rename = "user_id")]
    pub user_id: Option<String>,
    #[serde(rename = "post_id")]
    pub post_id: Option<String>,
    #[serde(rename = "action_type")]
    pub action_type: Option<String>,
    #[serde(rename = "context", skip_serializing_if = "Option::is_none")]
    pub context: Option<JsonValue>,
}
