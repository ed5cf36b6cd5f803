/// Informational body, used for empty read results.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(rename = "message")]
    pub message: String,
}
