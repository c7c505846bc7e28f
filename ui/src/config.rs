use serde::Deserialize;

use crate::error::ModalError;

/// Element ids, class names and behavior switches for the modal.
///
/// Every field has a default matching the markup shipped in `index.html`, so
/// overrides only need to name what differs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub open_trigger_id: String,
    pub close_trigger_id: String,
    pub modal_id: String,
    /// Class toggled on the modal element while it is open
    pub open_class: String,
    /// Value written to the body's `overflow` while the modal is open
    pub scroll_lock: String,
    pub dismiss_key: String,
    pub close_on_backdrop: bool,
    pub close_on_escape: bool,
    pub log_filter: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            open_trigger_id: "open-modal".into(),
            close_trigger_id: "close-modal".into(),
            modal_id: "modal".into(),
            open_class: "modal--open".into(),
            scroll_lock: "hidden".into(),
            dismiss_key: "Escape".into(),
            close_on_backdrop: true,
            close_on_escape: true,
            log_filter: "error,modal_ui=debug".into(),
        }
    }
}

impl ModalConfig {
    /// Parse a JSON object of overrides on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, ModalError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Config baked in at build time via the `MODAL_CONFIG` environment
    /// variable, falling back to the defaults when it is unset.
    pub fn from_build_env() -> Result<Self, ModalError> {
        match option_env!("MODAL_CONFIG") {
            Some(json) if !json.trim().is_empty() => Self::from_json(json),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_markup() {
        let config = ModalConfig::default();
        assert_eq!(config.open_trigger_id, "open-modal");
        assert_eq!(config.close_trigger_id, "close-modal");
        assert_eq!(config.modal_id, "modal");
        assert_eq!(config.open_class, "modal--open");
        assert_eq!(config.scroll_lock, "hidden");
        assert_eq!(config.dismiss_key, "Escape");
        assert!(config.close_on_backdrop);
        assert!(config.close_on_escape);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = ModalConfig::from_json(
            r#"{"modal_id": "dialog", "close_on_escape": false}"#,
        )
        .unwrap();
        assert_eq!(config.modal_id, "dialog");
        assert!(!config.close_on_escape);
        assert_eq!(config.open_trigger_id, "open-modal");
        assert_eq!(config.open_class, "modal--open");
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(
            ModalConfig::from_json("{}").unwrap(),
            ModalConfig::default()
        );
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = ModalConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ModalError::Config(_)));
        assert!(err.to_string().starts_with("Invalid modal config"));
    }
}
