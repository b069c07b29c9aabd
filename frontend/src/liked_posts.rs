use log::{debug, warn};
use serde_json::Value;

use crate::error::StorageError;
use crate::storage::Storage;
use crate::LIKED_POSTS_STORAGE_KEY;

/// The set of post slugs this browser has liked, stored as a JSON array of
/// strings under a single key.
///
/// Reads never fail: missing storage, a missing key, unparsable JSON and
/// anything that is not an array all read as the empty set. Writes that fail
/// are logged and dropped.
#[derive(Clone, Debug)]
pub struct LikedPosts<S> {
    storage: S,
    key: String,
}

impl<S: Storage> LikedPosts<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, LIKED_POSTS_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        LikedPosts {
            storage,
            key: key.to_owned(),
        }
    }

    pub fn get_liked_posts(&self) -> Vec<String> {
        let stored = match self.storage.get_item(&self.key) {
            Ok(Some(stored)) if !stored.is_empty() => stored,
            Ok(_) => return Vec::new(),
            Err(err) => {
                debug!("reading liked posts: {}", err);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Value>(&stored) {
            Ok(Value::Array(items)) => {
                let mut slugs: Vec<String> = Vec::with_capacity(items.len());
                for item in items {
                    // non-string entries were not written by us
                    if let Value::String(slug) = item {
                        if !slugs.contains(&slug) {
                            slugs.push(slug);
                        }
                    }
                }
                slugs
            }
            Ok(_) => {
                warn!("liked posts under {:?} is not an array, ignoring", self.key);
                Vec::new()
            }
            Err(err) => {
                warn!("liked posts under {:?} is not valid json: {}", self.key, err);
                Vec::new()
            }
        }
    }

    pub fn set_liked_post(&self, slug: &str, liked: bool) {
        if let Err(err) = self.try_set_liked_post(slug, liked) {
            warn!("could not persist like for {:?}: {}", slug, err);
        }
    }

    fn try_set_liked_post(&self, slug: &str, liked: bool) -> Result<(), StorageError> {
        let mut slugs = self.get_liked_posts();

        if liked {
            if !slugs.iter().any(|s| s == slug) {
                slugs.push(slug.to_owned());
            }
        } else {
            slugs.retain(|s| s != slug);
        }

        let serialized = serde_json::to_string(&slugs)
            .map_err(|err| StorageError::Serialize(err.to_string()))?;
        self.storage.set_item(&self.key, &serialized)?;

        debug!("persisted {} liked posts", slugs.len());
        Ok(())
    }

    pub fn is_post_liked(&self, slug: &str) -> bool {
        self.get_liked_posts().iter().any(|s| s == slug)
    }
}
