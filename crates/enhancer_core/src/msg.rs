use std::sync::Arc;

/// A file handed over by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl PickedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The file input changed; `None` when the picker was cleared.
    FileSelected(Option<PickedFile>),
    /// Preview decode finished for a selection.
    PreviewDecoded {
        selection: crate::SelectionId,
        src: String,
    },
    /// Preview decode failed for a selection.
    PreviewFailed {
        selection: crate::SelectionId,
        reason: String,
    },
    /// User clicked the enhance button.
    EnhanceClicked,
    /// The endpoint returned an enhanced image reference.
    EnhanceSucceeded {
        request: crate::RequestId,
        image: String,
    },
    /// The request failed (server or transport); `message` is user facing.
    EnhanceFailed {
        request: crate::RequestId,
        message: String,
    },
}
