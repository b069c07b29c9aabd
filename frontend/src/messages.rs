//! User-facing text for the subscribe form.
//!
//! Response codes from the server are only ever used as lookup keys here;
//! an unknown code gets the default message and is never shown itself.

pub const SUBSCRIBED: &str = "확인 이메일을 보내드렸습니다. 이메일을 확인해주세요.";
pub const ALREADY_PENDING: &str = "이미 확인 이메일을 보내드렸습니다. 이메일을 확인해주세요.";

pub const ALREADY_SUBSCRIBED: &str = "이미 구독 중인 이메일입니다.";
pub const INVALID_EMAIL: &str = "유효한 이메일 주소를 입력해주세요.";
pub const RATE_LIMITED: &str = "요청이 너무 많습니다. 잠시 후 다시 시도해주세요.";
pub const SERVER_ERROR: &str = "서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

pub const DEFAULT_ERROR: &str = "오류가 발생했습니다. 다시 시도해주세요.";
pub const NETWORK_ERROR: &str = "네트워크 오류가 발생했습니다. 다시 시도해주세요.";

pub const SUBMIT_LABEL: &str = "구독";
pub const SUBMITTING_LABEL: &str = "전송 중...";

pub fn success_message(code: &str) -> &'static str {
    match code {
        "already_pending" => ALREADY_PENDING,
        _ => SUBSCRIBED,
    }
}

pub fn error_message(code: &str) -> &'static str {
    match code {
        "already_subscribed" => ALREADY_SUBSCRIBED,
        "invalid_email" => INVALID_EMAIL,
        "rate_limited" => RATE_LIMITED,
        "server_error" => SERVER_ERROR,
        _ => DEFAULT_ERROR,
    }
}
