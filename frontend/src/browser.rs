// Browser bindings: localStorage, fetch, and the handles the page scripts use.
use std::cell::RefCell;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use js_sys::Promise;
use log::{debug, info, warn, LevelFilter};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{Event, Headers, Request, RequestInit, Response};

use crate::config::FrontendConfig;
use crate::error::{StorageError, TransportError};
use crate::like::{LikeController, LikeState};
use crate::liked_posts::LikedPosts;
use crate::logger;
use crate::storage::Storage;
use crate::subscribe::{HttpResponse, SubmitOutcome, SubscribeController, SubscribeTransport};

thread_local! {
    static CONFIG: RefCell<FrontendConfig> = RefCell::new(FrontendConfig::default());
}

fn current_config() -> FrontendConfig {
    CONFIG.with(|config| config.borrow().clone())
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[wasm_bindgen]
pub fn bootstrap(config_json: Option<String>) {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if let Err(err) = logger::init(LevelFilter::Debug) {
        debug!("console logger already installed: {}", err);
    }

    if let Some(json) = config_json {
        match FrontendConfig::from_json(&json) {
            Ok(config) => CONFIG.with(|current| *current.borrow_mut() = config),
            Err(err) => warn!("{}, using defaults", err),
        }
    }
    info!("blog frontend ready: {:?}", current_config());
}

/// `window.localStorage`, or nothing when the window has none (or it is
/// blocked by privacy settings).
#[derive(Clone)]
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn local() -> Self {
        let storage =
            web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        BrowserStorage { storage }
    }

    fn inner(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl Storage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner()?
            .get_item(key)
            .map_err(|_| StorageError::Read(key.to_owned()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner()?
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_owned()))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner()?
            .remove_item(key)
            .map_err(|_| StorageError::Write(key.to_owned()))
    }
}

pub struct FetchTransport;

impl FetchTransport {
    fn build_request(url: &str, body: &str) -> Result<Request, TransportError> {
        let headers = Headers::new().map_err(|err| TransportError::Request(describe(&err)))?;
        headers
            .set("Content-Type", "application/json")
            .map_err(|err| TransportError::Request(describe(&err)))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(body));

        Request::new_with_str_and_init(url, &init)
            .map_err(|err| TransportError::Request(describe(&err)))
    }

    async fn fetch(url: &str, body: String) -> Result<HttpResponse, TransportError> {
        let window = web_sys::window().ok_or(TransportError::NoWindow)?;
        let request = Self::build_request(url, &body)?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .and_then(|value| value.dyn_into())
            .map_err(|err| TransportError::Response(describe(&err)))?;

        let text = response
            .text()
            .map_err(|err| TransportError::Body(describe(&err)))?;
        let body = JsFuture::from(text)
            .await
            .map_err(|err| TransportError::Body(describe(&err)))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse {
            status: response.status(),
            body,
        })
    }
}

impl SubscribeTransport for FetchTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> LocalBoxFuture<'a, Result<HttpResponse, TransportError>> {
        Box::pin(Self::fetch(url, body))
    }
}

#[wasm_bindgen]
pub struct LikeButton {
    controller: LikeController<BrowserStorage>,
}

#[wasm_bindgen]
impl LikeButton {
    #[wasm_bindgen(constructor)]
    pub fn new(slug: &str) -> LikeButton {
        let config = current_config();
        let liked_posts =
            LikedPosts::with_key(BrowserStorage::local(), &config.liked_posts_key);
        LikeButton {
            controller: LikeController::new(slug, liked_posts),
        }
    }

    /// Call once the button is on the page. Returns whether it is liked.
    pub fn hydrate(&mut self) -> bool {
        self.controller.hydrate() == LikeState::Liked
    }

    pub fn toggle(&mut self) -> bool {
        self.controller.toggle() == LikeState::Liked
    }

    /// `undefined` until hydrated.
    #[wasm_bindgen(getter)]
    pub fn liked(&self) -> Option<bool> {
        match self.controller.state() {
            LikeState::Unknown => None,
            state => Some(state == LikeState::Liked),
        }
    }

    #[wasm_bindgen(getter, js_name = ariaLabel)]
    pub fn aria_label(&self) -> String {
        self.controller.aria_label().to_owned()
    }
}

#[wasm_bindgen]
pub struct SubscribeForm {
    // shared with the pending submission, which outlives a dropped form
    controller: Rc<SubscribeController<FetchTransport>>,
}

#[wasm_bindgen]
impl SubscribeForm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SubscribeForm {
        SubscribeForm {
            controller: Rc::new(SubscribeController::with_config(
                FetchTransport,
                &current_config(),
            )),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn email(&self) -> String {
        self.controller.email()
    }

    #[wasm_bindgen(setter)]
    pub fn set_email(&self, email: &str) {
        self.controller.set_email(email);
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.controller.status().as_str().to_owned()
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.controller.message()
    }

    #[wasm_bindgen(getter, js_name = submitLabel)]
    pub fn submit_label(&self) -> String {
        self.controller.submit_label().to_owned()
    }

    #[wasm_bindgen(getter, js_name = submitDisabled)]
    pub fn submit_disabled(&self) -> bool {
        self.controller.is_submit_disabled()
    }

    #[wasm_bindgen(getter, js_name = showsForm)]
    pub fn shows_form(&self) -> bool {
        self.controller.shows_form()
    }

    /// Form submit handler. Resolves to the status once the attempt is over.
    pub fn submit(&self, event: Option<Event>) -> Promise {
        if let Some(event) = event {
            event.prevent_default();
        }

        let controller = self.controller.clone();
        future_to_promise(async move {
            let outcome = controller.handle_submit().await;
            let status = match outcome {
                SubmitOutcome::Busy | SubmitOutcome::Invalid => controller.status(),
                SubmitOutcome::Sent(status) => status,
            };
            Ok(JsValue::from_str(status.as_str()))
        })
    }
}

impl Default for SubscribeForm {
    fn default() -> Self {
        Self::new()
    }
}
