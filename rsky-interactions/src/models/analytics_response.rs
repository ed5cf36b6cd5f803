use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    #[serde(rename = "feed_id")]
    pub feed_id: Option<String>,
    /// Interaction count per action type.
    #[serde(rename = "stats")]
    pub stats: BTreeMap<String, i64>,
}
