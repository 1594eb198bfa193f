use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WidgetError {
    #[error("required element not found: {0}")]
    Missing(&'static str),

    #[error("browser call failed: {0}")]
    Js(String),

    #[error("runtime lacks {0}")]
    Unsupported(&'static str),
}

impl From<JsValue> for WidgetError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        WidgetError::Js(message)
    }
}

pub type WidgetResult<T> = Result<T, WidgetError>;
