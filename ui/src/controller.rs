use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent};

use crate::config::ModalConfig;
use crate::error::{ModalError, describe_js};
use crate::state::{Interaction, ModalState, Transition, dispatch};

/// Toggles a single modal element and the body scroll lock.
///
/// The modal's open class is the source of truth for its state; the
/// controller reads it back instead of keeping a copy.
pub struct ModalController {
    config: ModalConfig,
    modal: Element,
    body: HtmlElement,
}

impl ModalController {
    /// Look up the configured elements in the current page and attach the
    /// event listeners.
    pub fn install(config: ModalConfig) -> Result<ModalBindings, ModalError> {
        let document = web_sys::window()
            .ok_or(ModalError::NoWindow)?
            .document()
            .ok_or(ModalError::NoDocument)?;
        Self::install_in(&document, config)
    }

    /// Like [`ModalController::install`], for an explicit document.
    ///
    /// Every element is looked up before any listener is attached, so a
    /// missing element leaves the page untouched.
    pub fn install_in(
        document: &Document,
        config: ModalConfig,
    ) -> Result<ModalBindings, ModalError> {
        let open_trigger = find_element(document, &config.open_trigger_id)?;
        let close_trigger = find_element(document, &config.close_trigger_id)?;
        let modal = find_element(document, &config.modal_id)?;
        let body = document.body().ok_or(ModalError::NoBody)?;

        let controller = Rc::new(ModalController {
            config,
            modal: modal.clone(),
            body,
        });
        let mut bindings = ModalBindings {
            controller: controller.clone(),
            listeners: Vec::with_capacity(4),
        };

        bindings.listen(open_trigger.into(), "click", {
            let controller = controller.clone();
            move |_| controller.handle(Interaction::OpenClicked)
        })?;

        bindings.listen(close_trigger.into(), "click", {
            let controller = controller.clone();
            move |_| controller.handle(Interaction::CloseClicked)
        })?;

        bindings.listen(modal.clone().into(), "click", {
            let controller = controller.clone();
            move |e: Event| {
                let on_container = e
                    .target()
                    .as_ref()
                    .and_then(|target| target.dyn_ref::<Element>())
                    == Some(&modal);
                controller.handle(Interaction::OverlayClicked { on_container })
            }
        })?;

        bindings.listen(document.clone().into(), "keydown", {
            let controller = controller.clone();
            move |e: Event| {
                if let Some(e) = e.dyn_ref::<KeyboardEvent>() {
                    controller.handle(Interaction::KeyPressed(e.key()));
                }
            }
        })?;

        tracing::info!(
            modal = %controller.config.modal_id,
            "Modal controller installed"
        );
        Ok(bindings)
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.modal.class_list().contains(&self.config.open_class)
    }

    pub fn state(&self) -> ModalState {
        if self.is_open() {
            ModalState::Open
        } else {
            ModalState::Closed
        }
    }

    /// Show the modal and lock background scrolling.
    pub fn open_modal(&self) {
        if let Err(e) = self.modal.class_list().add_1(&self.config.open_class) {
            tracing::error!("Failed to add open class: {}", describe_js(&e));
        }
        self.set_body_overflow(&self.config.scroll_lock);
    }

    /// Hide the modal and clear the scroll lock.
    pub fn close_modal(&self) {
        if let Err(e) =
            self.modal.class_list().remove_1(&self.config.open_class)
        {
            tracing::error!("Failed to remove open class: {}", describe_js(&e));
        }
        // Cleared rather than restored; a pre-existing body overflow is lost.
        self.set_body_overflow("");
    }

    pub fn apply(&self, transition: Transition) {
        match transition {
            Transition::Open => self.open_modal(),
            Transition::Close => self.close_modal(),
        }
    }

    /// Route an interaction through [`dispatch`] and apply the result.
    pub fn handle(&self, interaction: Interaction) {
        let state = self.state();
        match dispatch(state, &interaction, &self.config) {
            Some(transition) => {
                tracing::debug!(?state, ?interaction, ?transition, "Modal transition");
                self.apply(transition);
            }
            None => {
                tracing::trace!(?state, ?interaction, "Interaction ignored");
            }
        }
    }

    fn set_body_overflow(&self, value: &str) {
        if let Err(e) = self.body.style().set_property("overflow", value) {
            tracing::error!("Failed to set body overflow: {}", describe_js(&e));
        }
    }
}

fn find_element(document: &Document, id: &str) -> Result<Element, ModalError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ModalError::MissingElement(id.to_string()))
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        // Rust owns the closure, JS only holds a pointer to it, so the
        // listener has to go before the closure is freed.
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// The attached listeners of an installed [`ModalController`].
///
/// Dropping this removes every listener again. Call
/// [`ModalBindings::keep_alive`] to keep them for the lifetime of the page.
pub struct ModalBindings {
    controller: Rc<ModalController>,
    listeners: Vec<Listener>,
}

impl ModalBindings {
    pub fn controller(&self) -> &ModalController {
        &self.controller
    }

    /// Leak the listeners so they stay attached after this goes out of scope.
    pub fn keep_alive(self) {
        std::mem::forget(self);
    }

    fn listen(
        &mut self,
        target: EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), ModalError> {
        let callback =
            Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);

        target
            .add_event_listener_with_callback(
                event,
                callback.as_ref().unchecked_ref(),
            )
            .map_err(|e| ModalError::Listener {
                event,
                message: describe_js(&e),
            })?;

        self.listeners.push(Listener {
            target,
            event,
            callback,
        });
        Ok(())
    }
}
