// Client-side interaction logic for the blog: liked posts kept in browser
// storage, and the email subscription form.
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;

pub mod config;
pub mod email;
pub mod error;
pub mod like;
pub mod liked_posts;
pub mod logger;
pub mod messages;
pub mod storage;
pub mod subscribe;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use config::FrontendConfig;
pub use email::{is_valid_email, normalize_email};
pub use error::{ConfigError, StorageError, TransportError};
pub use like::{LikeController, LikeState};
pub use liked_posts::LikedPosts;
pub use storage::{MemoryStorage, NoStorage, Storage};
pub use subscribe::{
    HttpResponse, SubmitOutcome, SubscribeController, SubscribeStatus, SubscribeTransport,
};

pub const LIKED_POSTS_STORAGE_KEY: &'static str = "blog-liked-posts";
pub const SUBSCRIBE_ENDPOINT: &'static str = "/api/subscribe";
