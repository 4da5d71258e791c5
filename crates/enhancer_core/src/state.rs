use std::sync::Arc;

use crate::view_model::{PaneView, UiViewModel, NO_FILE_LABEL};
use crate::update::STATUS_READY;

pub type SelectionId = u64;
pub type RequestId = u64;

pub const ORIGINAL_PLACEHOLDER: &str = "Waiting for image...";
pub const RESULT_PLACEHOLDER: &str = "Result will appear here.";
pub const ORIGINAL_ALT: &str = "Original underwater image";
pub const ENHANCED_ALT: &str = "Enhanced underwater image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub id: SelectionId,
    pub name: String,
    pub bytes: Arc<[u8]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pane {
    Placeholder,
    Loading,
    Image { src: String },
}

/// Controller-owned UI state. Submit is enabled iff a file is selected and
/// the loading indicator is shown iff a request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    selection: Option<SelectedFile>,
    status: String,
    original: Pane,
    result: Pane,
    in_flight: Option<RequestId>,
    next_selection: SelectionId,
    next_request: RequestId,
    dirty: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selection: None,
            status: STATUS_READY.to_string(),
            original: Pane::Placeholder,
            result: Pane::Placeholder,
            in_flight: None,
            next_selection: 1,
            next_request: 1,
            dirty: false,
        }
    }
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> UiViewModel {
        UiViewModel {
            file_name: self
                .selection
                .as_ref()
                .map(|file| file.name.clone())
                .unwrap_or_else(|| NO_FILE_LABEL.to_string()),
            submit_enabled: self.selection.is_some(),
            status: self.status.clone(),
            original: pane_view(&self.original, ORIGINAL_PLACEHOLDER, ORIGINAL_ALT),
            result: pane_view(&self.result, RESULT_PLACEHOLDER, ENHANCED_ALT),
            spinner_visible: self.in_flight.is_some(),
            dirty: self.dirty,
        }
    }

    pub fn selection(&self) -> Option<&SelectedFile> {
        self.selection.as_ref()
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    pub fn original_pane(&self) -> &Pane {
        &self.original
    }

    pub fn result_pane(&self) -> &Pane {
        &self.result
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Replaces the one-line status log.
    pub fn update_log(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.dirty = true;
    }

    pub(crate) fn select(&mut self, name: String, bytes: Arc<[u8]>) -> SelectionId {
        let id = self.next_selection;
        self.next_selection += 1;
        self.selection = Some(SelectedFile { id, name, bytes });
        self.dirty = true;
        id
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection = None;
        self.dirty = true;
    }

    pub(crate) fn is_current_selection(&self, id: SelectionId) -> bool {
        self.selection.as_ref().is_some_and(|file| file.id == id)
    }

    pub(crate) fn set_original(&mut self, pane: Pane) {
        self.original = pane;
        self.dirty = true;
    }

    pub(crate) fn set_result(&mut self, pane: Pane) {
        self.result = pane;
        self.dirty = true;
    }

    /// Starts a new request; returns it together with any request it replaces.
    pub(crate) fn begin_request(&mut self) -> (RequestId, Option<RequestId>) {
        let id = self.next_request;
        self.next_request += 1;
        let superseded = self.in_flight.replace(id);
        self.result = Pane::Loading;
        self.dirty = true;
        (id, superseded)
    }

    /// Clears the in-flight marker if `id` is the current request.
    pub(crate) fn finish_request(&mut self, id: RequestId) -> bool {
        if self.in_flight == Some(id) {
            self.in_flight = None;
            self.dirty = true;
            true
        } else {
            false
        }
    }

    pub(crate) fn abandon_request(&mut self) -> Option<RequestId> {
        let abandoned = self.in_flight.take();
        if abandoned.is_some() {
            self.result = Pane::Placeholder;
            self.dirty = true;
        }
        abandoned
    }
}

fn pane_view(pane: &Pane, placeholder: &str, alt: &str) -> PaneView {
    match pane {
        Pane::Placeholder | Pane::Loading => PaneView::Placeholder {
            text: placeholder.to_string(),
        },
        Pane::Image { src } => PaneView::Image {
            src: src.clone(),
            alt: alt.to_string(),
        },
    }
}
