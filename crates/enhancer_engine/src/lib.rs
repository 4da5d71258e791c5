//! Enhancer engine: upload to the enhancement endpoint and effect execution.
mod enhance;
#[cfg(not(target_arch = "wasm32"))]
mod engine;
mod preview;
mod types;

pub use enhance::{resolve_image_ref, EnhanceSettings, Enhancer, ReqwestEnhancer};
#[cfg(not(target_arch = "wasm32"))]
pub use engine::EngineHandle;
pub use preview::{encode_data_uri, sniff_mime, PreviewError};
pub use types::{EngineEvent, EnhanceError, EnhancedImage, RequestId, SelectionId};
