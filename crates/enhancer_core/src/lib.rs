//! Enhancer core: pure UI state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, PickedFile};
pub use state::{
    Pane, RequestId, SelectedFile, SelectionId, UiState, ENHANCED_ALT, ORIGINAL_ALT,
    ORIGINAL_PLACEHOLDER, RESULT_PLACEHOLDER,
};
pub use update::{
    update, STATUS_ENHANCING, STATUS_NO_FILE, STATUS_READY, STATUS_SELECTED, STATUS_SUCCESS,
};
pub use view_model::{PaneView, UiViewModel, NO_FILE_LABEL};
