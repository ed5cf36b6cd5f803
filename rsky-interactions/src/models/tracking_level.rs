use std::fmt::Display;
use std::str::FromStr;

/// How much a user has agreed to be tracked. Stored in `privacy_settings`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum TrackingLevel {
    #[serde(rename = "full")]
    Full,
    #[serde(rename = "limited")]
    Limited,
    #[serde(rename = "none")]
    None,
}

impl TrackingLevel {
    pub const ALL: [TrackingLevel; 3] = [Self::Full, Self::Limited, Self::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Limited => "limited",
            Self::None => "none",
        }
    }
}

impl Display for TrackingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "limited" => Ok(Self::Limited),
            "none" => Ok(Self::None),
            other => Err(format!("unknown tracking level {other:?}")),
        }
    }
}

impl Default for TrackingLevel {
    fn default() -> TrackingLevel {
        Self::Full
    }
}

/// Keyed by the raw user identifier, unlike interactions.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PrivacySetting {
    #[serde(rename = "user_id")]
    pub user_id: String,
    #[serde(rename = "tracking_level")]
    pub tracking_level: TrackingLevel,
}
