use std::sync::Arc;

use crate::{RequestId, SelectionId};

/// Side effects requested by [`crate::update`]; the platform layer runs them
/// and feeds the outcome back as a [`crate::Msg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Turn the selected bytes into a displayable preview source.
    DecodePreview {
        selection: SelectionId,
        name: String,
        bytes: Arc<[u8]>,
    },
    /// Upload the file to the enhancement endpoint.
    PostEnhance {
        request: RequestId,
        name: String,
        bytes: Arc<[u8]>,
    },
    /// A request was superseded; its outcome will be ignored.
    AbandonRequest { request: RequestId },
}
