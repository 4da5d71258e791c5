use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};

use crate::{Effect, Msg, Pane, UiState};

pub const STATUS_READY: &str = "Select an underwater image to begin.";
pub const STATUS_SELECTED: &str = "Image selected. Click \"Enhance Image\" to process.";
pub const STATUS_NO_FILE: &str = "Please select an image first.";
pub const STATUS_ENHANCING: &str = "Enhancing image... This may take a moment.";
pub const STATUS_SUCCESS: &str = "Enhancement successful!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: UiState, msg: Msg) -> (UiState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(Some(file)) => {
            // A new selection supersedes whatever the previous one started.
            let mut effects = Vec::with_capacity(2);
            if let Some(request) = state.abandon_request() {
                engine_info!("Abandoning request {} after new file selection", request);
                effects.push(Effect::AbandonRequest { request });
            }
            let selection = state.select(file.name.clone(), file.bytes.clone());
            state.update_log(STATUS_SELECTED);
            engine_debug!(
                "Selected file '{}' ({} bytes) as selection {}",
                file.name,
                file.bytes.len(),
                selection
            );
            effects.push(Effect::DecodePreview {
                selection,
                name: file.name,
                bytes: file.bytes,
            });
            effects
        }
        Msg::FileSelected(None) => {
            if state.selection().is_some() {
                state.clear_selection();
            }
            Vec::new()
        }
        Msg::PreviewDecoded { selection, src } => {
            if state.is_current_selection(selection) {
                state.set_original(Pane::Image { src });
            } else {
                engine_debug!("Dropping stale preview for selection {}", selection);
            }
            Vec::new()
        }
        Msg::PreviewFailed { selection, reason } => {
            if state.is_current_selection(selection) {
                engine_warn!("Preview decode failed: {}", reason);
                state.set_original(Pane::Placeholder);
                state.update_log(format!("Could not preview image: {reason}"));
            }
            Vec::new()
        }
        Msg::EnhanceClicked => {
            let Some(file) = state.selection().cloned() else {
                state.update_log(STATUS_NO_FILE);
                return (state, Vec::new());
            };
            let (request, superseded) = state.begin_request();
            state.update_log(STATUS_ENHANCING);
            let mut effects = Vec::with_capacity(2);
            if let Some(request) = superseded {
                engine_info!("Request {} superseded by a new submission", request);
                effects.push(Effect::AbandonRequest { request });
            }
            effects.push(Effect::PostEnhance {
                request,
                name: file.name,
                bytes: file.bytes,
            });
            effects
        }
        Msg::EnhanceSucceeded { request, image } => {
            if state.finish_request(request) {
                state.set_result(Pane::Image { src: image });
                state.update_log(STATUS_SUCCESS);
            } else {
                engine_debug!("Ignoring late success for request {}", request);
            }
            Vec::new()
        }
        Msg::EnhanceFailed { request, message } => {
            if state.finish_request(request) {
                engine_error!("Enhancement Error: {}", message);
                state.set_result(Pane::Placeholder);
                state.update_log(format!("Error: {message}"));
            } else {
                engine_debug!("Ignoring late failure for request {}: {}", request, message);
            }
            Vec::new()
        }
    };

    (state, effects)
}
