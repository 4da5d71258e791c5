use engine_logging::{engine_info, engine_warn};
use enhancer_core::{update, Effect, Msg, PickedFile, UiState, UiViewModel};

use crate::bindings::{verify_bindings, BindingError, InitializationError, Slot, UiBindings, UiCommand};
use crate::render::render;

/// Owns the UI state and renders it into a set of bindings. Effects returned
/// from the `on_*`/`dispatch` calls are for the platform to run.
pub struct Controller<B: UiBindings> {
    bindings: B,
    state: UiState,
}

impl<B: UiBindings> Controller<B> {
    /// Verifies every slot, then renders the initial view. Nothing is
    /// touched when a slot is missing.
    pub fn attach(bindings: B) -> Result<Self, InitializationError> {
        verify_bindings(&bindings)?;
        let mut controller = Self {
            bindings,
            state: UiState::new(),
        };
        controller.render_view();
        engine_info!("UI controller attached");
        Ok(controller)
    }

    pub fn on_file_selected(&mut self, file: Option<PickedFile>) -> Vec<Effect> {
        self.dispatch(Msg::FileSelected(file))
    }

    pub fn on_submit(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::EnhanceClicked)
    }

    pub fn update_log(&mut self, message: impl Into<String>) {
        self.state.update_log(message);
        self.state.consume_dirty();
        self.render_view();
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        if was_dirty {
            self.render_view();
        }
        effects
    }

    pub fn view(&self) -> UiViewModel {
        self.state.view()
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn bindings(&self) -> &B {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut B {
        &mut self.bindings
    }

    fn render_view(&mut self) {
        for command in render(&self.state.view()) {
            let Err(err) = self.bindings.apply(&command) else {
                continue;
            };
            match (&command, err) {
                (UiCommand::SetText { slot: Slot::Log, text }, BindingError::Missing(_)) => {
                    engine_info!("Log: {}", text);
                }
                (command, err) => {
                    engine_warn!("Render of {:?} failed: {}", command.slot(), err);
                }
            }
        }
    }
}
