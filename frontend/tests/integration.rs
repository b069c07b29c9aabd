#![cfg(not(target_arch = "wasm32"))]
extern crate blog_frontend;
extern crate futures_util;

use std::cell::RefCell;
use std::rc::Rc;

use futures_util::future::{self, LocalBoxFuture};
use futures_util::{poll, FutureExt};

use blog_frontend::messages;
use blog_frontend::{
    FrontendConfig, HttpResponse, LikeController, LikeState, LikedPosts, MemoryStorage,
    NoStorage, SubmitOutcome, SubscribeController, SubscribeStatus, SubscribeTransport,
    TransportError,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

type SentRequests = Rc<RefCell<Vec<(String, String)>>>;

enum Reply {
    Respond(u16, &'static str),
    Fail,
    Hang,
}

/// Records every request and answers with a canned reply.
struct MockTransport {
    reply: Reply,
    sent: SentRequests,
}

impl MockTransport {
    fn new(reply: Reply) -> (Self, SentRequests) {
        let sent = Rc::new(RefCell::new(Vec::new()));
        (
            MockTransport {
                reply,
                sent: sent.clone(),
            },
            sent,
        )
    }
}

impl SubscribeTransport for MockTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> LocalBoxFuture<'a, Result<HttpResponse, TransportError>> {
        self.sent.borrow_mut().push((url.to_owned(), body));
        match self.reply {
            Reply::Respond(status, body) => {
                future::ready(Ok(HttpResponse::new(status, body))).boxed_local()
            }
            Reply::Fail => future::ready(Err(TransportError::Response(
                "net::ERR_CONNECTION_REFUSED".to_owned(),
            )))
            .boxed_local(),
            Reply::Hang => future::pending().boxed_local(),
        }
    }
}

fn subscribe_form(
    reply: Reply,
    email: &str,
) -> (SubscribeController<MockTransport>, SentRequests) {
    let (transport, sent) = MockTransport::new(reply);
    let form = SubscribeController::new(transport);
    form.set_email(email);
    (form, sent)
}

#[test]
fn liked_posts_reflect_last_write_per_slug() {
    init_logger();
    let liked = LikedPosts::new(MemoryStorage::new());

    let writes = [
        ("vim", true),
        ("tabs", true),
        ("vim", false),
        ("typing", true),
        ("tabs", true),
        ("typing", false),
        ("vim", true),
        ("typing", false),
    ];
    for (slug, is_liked) in writes {
        liked.set_liked_post(slug, is_liked);
    }

    assert!(liked.is_post_liked("vim"));
    assert!(liked.is_post_liked("tabs"));
    assert!(!liked.is_post_liked("typing"));
    assert_eq!(liked.get_liked_posts(), vec!["tabs", "vim"]);
}

#[test]
fn two_tabs_last_write_wins() {
    let storage = MemoryStorage::new();
    let mut tab0 = LikeController::new("vim", LikedPosts::new(storage.clone()));
    let mut tab1 = LikeController::new("vim", LikedPosts::new(storage.clone()));
    tab0.hydrate();
    tab1.hydrate();

    tab0.toggle();
    assert!(LikedPosts::new(storage.clone()).is_post_liked("vim"));

    // tab1 still believes the post is not liked
    tab1.toggle();
    assert!(tab1.is_liked());
    assert!(LikedPosts::new(storage).is_post_liked("vim"));
}

#[test]
fn toggle_parity_and_write_through() {
    init_logger();
    for n in 0..7 {
        let storage = MemoryStorage::new();
        let mut like = LikeController::new("vim", LikedPosts::new(storage.clone()));
        assert_eq!(like.hydrate(), LikeState::NotLiked);

        for _ in 0..n {
            let state = like.toggle();
            assert_eq!(
                LikedPosts::new(storage.clone()).is_post_liked("vim"),
                state == LikeState::Liked
            );
        }

        let expected = if n % 2 == 1 {
            LikeState::Liked
        } else {
            LikeState::NotLiked
        };
        assert_eq!(like.state(), expected, "after {} toggles", n);
    }
}

#[test]
fn like_without_storage_still_toggles() {
    let mut like = LikeController::new("vim", LikedPosts::new(NoStorage));
    assert_eq!(like.hydrate(), LikeState::NotLiked);
    assert_eq!(like.toggle(), LikeState::Liked);
    assert_eq!(like.toggle(), LikeState::NotLiked);
}

#[test]
fn like_uses_configured_key() {
    let config = FrontendConfig::from_json(r#"{"liked_posts_key":"likes-v2"}"#).unwrap();
    let storage = MemoryStorage::new();
    let mut like = LikeController::new(
        "vim",
        LikedPosts::with_key(storage.clone(), &config.liked_posts_key),
    );
    like.toggle();

    assert!(LikedPosts::with_key(storage.clone(), "likes-v2").is_post_liked("vim"));
    assert!(!LikedPosts::new(storage).is_post_liked("vim"));
}

#[tokio::test]
async fn fresh_form_is_idle() {
    let (form, _) = subscribe_form(Reply::Fail, "");
    assert_eq!(form.status(), SubscribeStatus::Idle);
    assert_eq!(form.email(), "");
    assert_eq!(form.message(), "");
    assert_eq!(form.submit_label(), messages::SUBMIT_LABEL);
    assert!(form.shows_form());
}

#[tokio::test]
async fn invalid_email_never_sent() {
    init_logger();
    for email in ["", "not-an-email", "a<b@c.com", "test@example"] {
        let reply = Reply::Respond(200, r#"{"code":"subscribed"}"#);
        let (form, sent) = subscribe_form(reply, email);

        assert_eq!(form.handle_submit().await, SubmitOutcome::Invalid);
        assert_eq!(form.status(), SubscribeStatus::Error);
        assert_eq!(form.message(), messages::INVALID_EMAIL);
        assert!(sent.borrow().is_empty(), "{:?} was sent", email);
    }
}

#[tokio::test]
async fn subscribed() {
    init_logger();
    let (form, sent) = subscribe_form(
        Reply::Respond(200, r#"{"code":"subscribed"}"#),
        "test@example.com",
    );

    assert_eq!(
        form.handle_submit().await,
        SubmitOutcome::Sent(SubscribeStatus::Success)
    );
    assert_eq!(form.status(), SubscribeStatus::Success);
    assert_eq!(form.message(), messages::SUBSCRIBED);
    assert!(!form.shows_form());

    let sent = sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "/api/subscribe");
    let body: serde_json::Value = serde_json::from_str(&sent[0].1).unwrap();
    assert_eq!(body, serde_json::json!({ "email": "test@example.com" }));
}

#[tokio::test]
async fn already_pending_and_unknown_success_codes() {
    let reply = Reply::Respond(200, r#"{"code":"already_pending"}"#);
    let (form, _) = subscribe_form(reply, "a@b.co");
    form.handle_submit().await;
    assert_eq!(form.message(), messages::ALREADY_PENDING);

    let (form, _) = subscribe_form(Reply::Respond(201, r#"{"code":"welcome"}"#), "a@b.co");
    form.handle_submit().await;
    assert_eq!(form.status(), SubscribeStatus::Success);
    assert_eq!(form.message(), messages::SUBSCRIBED);

    let (form, _) = subscribe_form(Reply::Respond(200, "not json"), "a@b.co");
    form.handle_submit().await;
    assert_eq!(form.status(), SubscribeStatus::Success);
    assert_eq!(form.message(), messages::SUBSCRIBED);
}

#[tokio::test]
async fn server_rejections() {
    let cases = [
        (409, r#"{"code":"already_subscribed"}"#, messages::ALREADY_SUBSCRIBED),
        (400, r#"{"code":"invalid_email"}"#, messages::INVALID_EMAIL),
        (429, r#"{"code":"rate_limited"}"#, messages::RATE_LIMITED),
        (500, r#"{"code":"server_error"}"#, messages::SERVER_ERROR),
        (500, r#"{"code":"unknown_code"}"#, messages::DEFAULT_ERROR),
        (500, r#"{"code":"<script>alert(\"xss\")</script>"}"#, messages::DEFAULT_ERROR),
        (502, "<html>bad gateway</html>", messages::DEFAULT_ERROR),
        (404, "", messages::DEFAULT_ERROR),
    ];

    for (status, body, expected) in cases {
        let (form, _) = subscribe_form(Reply::Respond(status, body), "test@example.com");
        assert_eq!(
            form.handle_submit().await,
            SubmitOutcome::Sent(SubscribeStatus::Error)
        );
        assert_eq!(form.message(), expected, "{} {}", status, body);
    }
}

#[tokio::test]
async fn network_failure_has_its_own_message() {
    let (form, sent) = subscribe_form(Reply::Fail, "test@example.com");

    form.handle_submit().await;
    assert_eq!(form.status(), SubscribeStatus::Error);
    assert_eq!(form.message(), messages::NETWORK_ERROR);
    assert_ne!(form.message(), messages::DEFAULT_ERROR);
    assert_ne!(form.message(), messages::SERVER_ERROR);
    assert_eq!(sent.borrow().len(), 1);
}

#[tokio::test]
async fn error_can_be_resubmitted() {
    let reply = Reply::Respond(200, r#"{"code":"subscribed"}"#);
    let (form, sent) = subscribe_form(reply, "nope");

    assert_eq!(form.handle_submit().await, SubmitOutcome::Invalid);
    form.set_email("test@example.com");
    assert_eq!(
        form.handle_submit().await,
        SubmitOutcome::Sent(SubscribeStatus::Success)
    );
    assert_eq!(sent.borrow().len(), 1);
}

#[tokio::test]
async fn loading_while_in_flight_and_second_submit_is_busy() {
    let (form, sent) = subscribe_form(Reply::Hang, "test@example.com");

    let mut first = Box::pin(form.handle_submit());
    assert!(poll!(&mut first).is_pending());

    assert_eq!(form.status(), SubscribeStatus::Loading);
    assert!(form.is_submit_disabled());
    assert_eq!(form.submit_label(), messages::SUBMITTING_LABEL);

    assert_eq!(form.handle_submit().await, SubmitOutcome::Busy);
    assert_eq!(form.status(), SubscribeStatus::Loading);
    assert_eq!(sent.borrow().len(), 1);
}

#[tokio::test]
async fn configured_endpoint() {
    let config = FrontendConfig::from_json(
        r#"{"subscribe_endpoint":"https://blog.example/api/subscribe"}"#,
    )
    .unwrap();
    let (transport, sent) = MockTransport::new(Reply::Respond(200, "{}"));
    let form = SubscribeController::with_config(transport, &config);
    form.set_email("test@example.com");

    form.handle_submit().await;
    assert_eq!(sent.borrow()[0].0, "https://blog.example/api/subscribe");
}
