use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Favourite {
    #[serde(rename = "post_id")]
    pub post_id: String,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

impl From<crate::models::Interaction> for Favourite {
    fn from(row: crate::models::Interaction) -> Self {
        Favourite {
            post_id: row.post_id,
            created_at: row.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FavouritesResponse {
    #[serde(rename = "user_id")]
    pub user_id: String,
    #[serde(rename = "favourites")]
    pub favourites: Vec<Favourite>,
}
