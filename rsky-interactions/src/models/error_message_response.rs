#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorMessageResponse {
    #[serde(rename = "error")]
    pub error: String,
    #[serde(rename = "message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
