use std::cell::RefCell;

use futures_util::future::LocalBoxFuture;
use log::{debug, warn};
use serde_json::Value;

use crate::config::FrontendConfig;
use crate::email::is_valid_email;
use crate::error::TransportError;
use crate::messages;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: &str) -> Self {
        HttpResponse {
            status,
            body: body.to_owned(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `code` field of a JSON object body, as a string. Anything else,
    /// including a body that is not JSON, gives an empty code.
    pub fn code(&self) -> String {
        match serde_json::from_str::<Value>(&self.body) {
            Ok(Value::Object(fields)) => match fields.get("code") {
                Some(Value::String(code)) => code.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            },
            _ => String::new(),
        }
    }
}

/// Sends the subscribe request. `Err` means the request never completed;
/// any HTTP status, including errors, is an `Ok` response.
pub trait SubscribeTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> LocalBoxFuture<'a, Result<HttpResponse, TransportError>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubscribeStatus {
    Idle,
    Loading,
    Success,
    Error,
}

impl SubscribeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscribeStatus::Idle => "idle",
            SubscribeStatus::Loading => "loading",
            SubscribeStatus::Success => "success",
            SubscribeStatus::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Failed local validation, nothing was sent.
    Invalid,
    /// A request is already in flight, nothing was sent.
    Busy,
    /// A request was sent and its result applied.
    Sent(SubscribeStatus),
}

#[derive(Debug)]
struct SubscribeState {
    email: String,
    status: SubscribeStatus,
    message: String,
}

/// One subscribe form: the typed email, and the status and message of the
/// latest submission.
///
/// State sits behind a `RefCell` so the form can be read while a submission
/// is awaiting its response. Nothing is borrowed across that await.
pub struct SubscribeController<T> {
    transport: T,
    endpoint: String,
    state: RefCell<SubscribeState>,
}

impl<T: SubscribeTransport> SubscribeController<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, &FrontendConfig::default())
    }

    pub fn with_config(transport: T, config: &FrontendConfig) -> Self {
        SubscribeController {
            transport,
            endpoint: config.subscribe_endpoint.clone(),
            state: RefCell::new(SubscribeState {
                email: String::new(),
                status: SubscribeStatus::Idle,
                message: String::new(),
            }),
        }
    }

    pub fn email(&self) -> String {
        self.state.borrow().email.clone()
    }

    pub fn set_email(&self, email: &str) {
        self.state.borrow_mut().email = email.to_owned();
    }

    pub fn status(&self) -> SubscribeStatus {
        self.state.borrow().status
    }

    pub fn message(&self) -> String {
        self.state.borrow().message.clone()
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.status() == SubscribeStatus::Loading
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submit_disabled() {
            messages::SUBMITTING_LABEL
        } else {
            messages::SUBMIT_LABEL
        }
    }

    /// Once subscribed the form is replaced by the success message.
    pub fn shows_form(&self) -> bool {
        self.status() != SubscribeStatus::Success
    }

    pub async fn handle_submit(&self) -> SubmitOutcome {
        let email = {
            let state = self.state.borrow();
            if state.status == SubscribeStatus::Loading {
                debug!("subscribe already in flight, ignoring submit");
                return SubmitOutcome::Busy;
            }
            state.email.clone()
        };

        if !is_valid_email(&email) {
            debug!("rejected email of length {}", email.chars().count());
            self.finish(SubscribeStatus::Error, messages::INVALID_EMAIL);
            return SubmitOutcome::Invalid;
        }

        self.state.borrow_mut().status = SubscribeStatus::Loading;
        debug!("subscribe: POST {}", self.endpoint);

        let body = serde_json::json!({ "email": email }).to_string();
        let (status, message) = match self.transport.post_json(&self.endpoint, body).await {
            Ok(response) => {
                let code = response.code();
                debug!("subscribe: {} with code {:?}", response.status, code);
                if response.is_success() {
                    (SubscribeStatus::Success, messages::success_message(&code))
                } else {
                    (SubscribeStatus::Error, messages::error_message(&code))
                }
            }
            Err(err) => {
                warn!("subscribe request failed: {}", err);
                (SubscribeStatus::Error, messages::NETWORK_ERROR)
            }
        };

        self.finish(status, message);
        SubmitOutcome::Sent(status)
    }

    fn finish(&self, status: SubscribeStatus, message: &str) {
        let mut state = self.state.borrow_mut();
        state.status = status;
        state.message = message.to_owned();
    }
}
