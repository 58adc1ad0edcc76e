use thiserror::Error;
use wasm_bindgen::JsValue;

/// Setup failures of the page shell. Per-frame problems never surface here;
/// the frame is skipped instead.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("invalid page config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid page setting: {0}")]
    Setting(String),
    #[error("invalid reconnect instant: {0:?}")]
    InvalidReconnect(String),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl PageError {
    pub fn js(err: JsValue) -> Self {
        PageError::Js(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub(crate) fn console_warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

pub(crate) fn console_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}
