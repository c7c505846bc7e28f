use crate::config::ModalConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open)
    }
}

/// A user input, reduced to what the modal cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    OpenClicked,
    CloseClicked,
    /// A click that reached the modal container. `on_container` is true only
    /// when the container itself was the event target, i.e. the backdrop and
    /// not some content nested inside it.
    OverlayClicked { on_container: bool },
    KeyPressed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Open,
    Close,
}

impl Transition {
    /// State after applying this transition, whatever the state before.
    pub fn target(&self) -> ModalState {
        match self {
            Transition::Open => ModalState::Open,
            Transition::Close => ModalState::Closed,
        }
    }
}

/// Decide which transition, if any, an interaction triggers.
///
/// Open and close clicks always yield their transition, even when the modal
/// is already in that state; applying them again is a no-op. The dismiss key
/// only closes an open modal.
pub fn dispatch(
    state: ModalState,
    interaction: &Interaction,
    config: &ModalConfig,
) -> Option<Transition> {
    match interaction {
        Interaction::OpenClicked => Some(Transition::Open),
        Interaction::CloseClicked => Some(Transition::Close),
        Interaction::OverlayClicked { on_container } => {
            (*on_container && config.close_on_backdrop)
                .then_some(Transition::Close)
        }
        Interaction::KeyPressed(key) => (config.close_on_escape
            && state.is_open()
            && *key == config.dismiss_key)
            .then_some(Transition::Close),
    }
}
