use crate::error::ConfigError;
use crate::{LIKED_POSTS_STORAGE_KEY, SUBSCRIBE_ENDPOINT};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Storage key holding the JSON array of liked post slugs.
    pub liked_posts_key: String,

    /// Where the subscribe form POSTs `{"email": ...}`.
    pub subscribe_endpoint: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        FrontendConfig {
            liked_posts_key: LIKED_POSTS_STORAGE_KEY.to_owned(),
            subscribe_endpoint: SUBSCRIBE_ENDPOINT.to_owned(),
        }
    }
}

impl FrontendConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
