//! A single modal dialog driven by native DOM event listeners.
//!
//! The page ships the markup (see `index.html`); this crate looks up the open
//! trigger, close trigger and modal container by id, and toggles the modal's
//! open class and the body scroll lock in response to clicks and the Escape
//! key.

mod config;
mod controller;
mod error;
pub mod logs;
mod state;

pub use config::ModalConfig;
pub use controller::{ModalBindings, ModalController};
pub use error::ModalError;
pub use state::{Interaction, ModalState, Transition, dispatch};

/// Read the build-time config, initialize logging and install the controller
/// on the current page.
pub fn start() -> Result<ModalBindings, ModalError> {
    let config = match ModalConfig::from_build_env() {
        Ok(config) => config,
        Err(e) => {
            logs::init_logging(&ModalConfig::default().log_filter);
            return Err(e);
        }
    };
    logs::init_logging(&config.log_filter);
    ModalController::install(config)
}
