// error.rs - Engine errors
//
// Every failure here is recoverable by rendering nothing. Callers log the
// error and fall back to a degraded (static) background.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no global window")]
    MissingWindow,

    #[error("window has no document")]
    MissingDocument,

    #[error("no element with id `{0}`")]
    CanvasNotFound(String),

    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),

    #[error("2d drawing context unavailable")]
    ContextUnavailable,

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    #[error("unknown theme `{0}`")]
    UnknownTheme(String),

    #[error("js error: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl From<JsValue> for EngineError {
    fn from(value: JsValue) -> Self {
        EngineError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
