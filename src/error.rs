use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackdropError {
    #[error("no canvas element to draw on")]
    SurfaceUnavailable,
    #[error("canvas has no 2d rendering context")]
    ContextUnavailable,
    #[error("frame scheduling failed: {0}")]
    Scheduler(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for BackdropError {
    fn from(value: JsValue) -> Self {
        BackdropError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<BackdropError> for JsValue {
    fn from(err: BackdropError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
