use thiserror::Error;

use crate::PreviewError;

pub type SelectionId = u64;
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PreviewReady {
        selection: SelectionId,
        result: Result<String, PreviewError>,
    },
    EnhanceCompleted {
        request: RequestId,
        result: Result<EnhancedImage, EnhanceError>,
    },
}

/// Successful reply from the enhancement endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedImage {
    /// Displayable image reference (data URI or URL).
    pub src: String,
}

/// Failure of a single enhancement attempt. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnhanceError {
    /// Non-2xx reply; `message` comes from the JSON body when present.
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

