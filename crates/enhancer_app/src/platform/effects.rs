use std::time::Duration;

use engine_logging::engine_info;
use enhancer_core::{Effect, Msg};
use enhancer_engine::{EngineEvent, EngineHandle, EnhanceSettings};

/// Runs core effects on the background engine and turns engine events back
/// into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: EnhanceSettings) -> std::io::Result<Self> {
        Ok(Self::with_engine(EngineHandle::new(settings)?))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::DecodePreview {
                    selection,
                    name,
                    bytes,
                } => self.engine.decode_preview(selection, name, bytes),
                Effect::PostEnhance {
                    request,
                    name,
                    bytes,
                } => {
                    engine_info!(
                        "PostEnhance request={} name={} bytes={}",
                        request,
                        name,
                        bytes.len()
                    );
                    self.engine.enhance(request, name, bytes);
                }
                Effect::AbandonRequest { request } => self.engine.abandon(request),
            }
        }
    }

    pub fn try_next(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }

    pub fn next_timeout(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PreviewReady {
            selection,
            result: Ok(src),
        } => Msg::PreviewDecoded { selection, src },
        EngineEvent::PreviewReady {
            selection,
            result: Err(err),
        } => Msg::PreviewFailed {
            selection,
            reason: err.to_string(),
        },
        EngineEvent::EnhanceCompleted {
            request,
            result: Ok(image),
        } => Msg::EnhanceSucceeded {
            request,
            image: image.src,
        },
        EngineEvent::EnhanceCompleted {
            request,
            result: Err(err),
        } => Msg::EnhanceFailed {
            request,
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use enhancer_engine::{EnhanceError, EnhancedImage, PreviewError};

    use super::*;

    #[test]
    fn server_error_becomes_failure_message() {
        let msg = map_event(EngineEvent::EnhanceCompleted {
            request: 3,
            result: Err(EnhanceError::Server {
                status: 500,
                message: "bad image".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Msg::EnhanceFailed {
                request: 3,
                message: "bad image".to_string()
            }
        );
    }

    #[test]
    fn enhanced_image_source_is_forwarded() {
        let msg = map_event(EngineEvent::EnhanceCompleted {
            request: 1,
            result: Ok(EnhancedImage {
                src: "data:image/png;base64,AAAA".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Msg::EnhanceSucceeded {
                request: 1,
                image: "data:image/png;base64,AAAA".to_string()
            }
        );
    }

    #[test]
    fn preview_error_becomes_reason() {
        let msg = map_event(EngineEvent::PreviewReady {
            selection: 2,
            result: Err(PreviewError::Empty),
        });
        assert_eq!(
            msg,
            Msg::PreviewFailed {
                selection: 2,
                reason: "file is empty".to_string()
            }
        );
    }
}
