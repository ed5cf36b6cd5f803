#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateInteractionResponse {
    #[serde(rename = "message")]
    pub message: String,
    #[serde(rename = "id")]
    pub id: i32,
}
