use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum ModalError {
    #[error("No global window")]
    NoWindow,
    #[error("Window has no document")]
    NoDocument,
    #[error("Document has no body")]
    NoBody,
    #[error("Missing element #{0}")]
    MissingElement(String),
    #[error("Failed to attach {event} listener: {message}")]
    Listener { event: &'static str, message: String },
    #[error("Invalid modal config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<ModalError> for JsValue {
    fn from(e: ModalError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Render a javascript exception for logs and error messages.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
