use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn, with_request_context};

use crate::{
    encode_data_uri, EngineEvent, EnhanceSettings, Enhancer, ReqwestEnhancer, RequestId,
    SelectionId,
};

enum EngineCommand {
    DecodePreview {
        selection: SelectionId,
        name: String,
        bytes: Arc<[u8]>,
    },
    Enhance {
        request: RequestId,
        name: String,
        bytes: Arc<[u8]>,
    },
    Abandon {
        request: RequestId,
    },
}

/// Runs decode and upload work on a background tokio runtime and reports
/// results as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EnhanceSettings) -> std::io::Result<Self> {
        let enhancer = ReqwestEnhancer::new(settings)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
        Self::with_enhancer(Arc::new(enhancer))
    }

    pub fn with_enhancer(enhancer: Arc<dyn Enhancer + Send + Sync>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            let mut uploads: HashMap<RequestId, tokio::task::JoinHandle<()>> = HashMap::new();
            while let Ok(command) = cmd_rx.recv() {
                uploads.retain(|_, task| !task.is_finished());
                match command {
                    EngineCommand::DecodePreview {
                        selection,
                        name,
                        bytes,
                    } => {
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = encode_data_uri(&name, &bytes);
                            let _ = event_tx.send(EngineEvent::PreviewReady { selection, result });
                        });
                    }
                    EngineCommand::Enhance {
                        request,
                        name,
                        bytes,
                    } => {
                        let enhancer = enhancer.clone();
                        let event_tx = event_tx.clone();
                        let task = runtime.spawn(async move {
                            let result = enhancer.enhance(&name, &bytes).await;
                            with_request_context(request, || match &result {
                                Ok(_) => engine_info!("Enhancement finished"),
                                Err(err) => engine_warn!("Enhancement failed: {}", err),
                            });
                            let _ = event_tx.send(EngineEvent::EnhanceCompleted { request, result });
                        });
                        uploads.insert(request, task);
                    }
                    EngineCommand::Abandon { request } => {
                        if let Some(task) = uploads.remove(&request) {
                            task.abort();
                            with_request_context(request, || engine_debug!("Upload aborted"));
                        }
                    }
                }
            }
            // Handle dropped; outstanding uploads die with the runtime.
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn decode_preview(&self, selection: SelectionId, name: impl Into<String>, bytes: Arc<[u8]>) {
        let _ = self.cmd_tx.send(EngineCommand::DecodePreview {
            selection,
            name: name.into(),
            bytes,
        });
    }

    pub fn enhance(&self, request: RequestId, name: impl Into<String>, bytes: Arc<[u8]>) {
        let _ = self.cmd_tx.send(EngineCommand::Enhance {
            request,
            name: name.into(),
            bytes,
        });
    }

    pub fn abandon(&self, request: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Abandon { request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
