#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(rename = "status")]
    pub status: String,
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn healthy() -> HealthResponse {
        HealthResponse {
            status: "healthy".to_string(),
            error: None,
        }
    }

    pub fn unhealthy(error: String) -> HealthResponse {
        HealthResponse {
            status: "unhealthy".to_string(),
            error: Some(error),
        }
    }
}
