use log::debug;

use crate::liked_posts::LikedPosts;
use crate::storage::Storage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LikeState {
    /// Storage has not been read yet.
    Unknown,
    Liked,
    NotLiked,
}

impl LikeState {
    fn from_liked(liked: bool) -> Self {
        if liked {
            LikeState::Liked
        } else {
            LikeState::NotLiked
        }
    }
}

/// Like toggle for a single post.
///
/// Starts out `Unknown` so a view can hold off drawing the heart until
/// [`hydrate`](LikeController::hydrate) has read the stored state once.
pub struct LikeController<S> {
    slug: String,
    liked_posts: LikedPosts<S>,
    state: LikeState,
}

impl<S: Storage> LikeController<S> {
    pub fn new(slug: &str, liked_posts: LikedPosts<S>) -> Self {
        LikeController {
            slug: slug.to_owned(),
            liked_posts,
            state: LikeState::Unknown,
        }
    }

    pub fn state(&self) -> LikeState {
        self.state
    }

    pub fn is_liked(&self) -> bool {
        self.state == LikeState::Liked
    }

    /// Reads the stored state. Only the first call touches storage; the
    /// controller is never re-synced with other tabs afterwards.
    pub fn hydrate(&mut self) -> LikeState {
        if self.state == LikeState::Unknown {
            self.state = LikeState::from_liked(self.liked_posts.is_post_liked(&self.slug));
            debug!("hydrated like state for {:?}: {:?}", self.slug, self.state);
        }
        self.state
    }

    /// Flips the in-memory state and writes it through. `Unknown` counts as
    /// not liked.
    pub fn toggle(&mut self) -> LikeState {
        let liked = !self.is_liked();
        self.state = LikeState::from_liked(liked);
        self.liked_posts.set_liked_post(&self.slug, liked);
        debug!("toggled like for {:?} to {:?}", self.slug, self.state);
        self.state
    }

    pub fn aria_label(&self) -> &'static str {
        if self.is_liked() {
            "좋아요 취소"
        } else {
            "좋아요"
        }
    }
}
