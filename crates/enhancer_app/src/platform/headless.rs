use std::time::{Duration, Instant};

use engine_logging::engine_warn;
use enhancer_core::{Effect, Msg, PickedFile};

use super::effects::EffectRunner;
use crate::bindings::InitializationError;
use crate::controller::Controller;
use crate::memory::MemoryDocument;

/// Drives the controller against an in-memory document, running effects on
/// the native engine. The caller's thread plays the UI event loop.
pub struct HeadlessApp {
    controller: Controller<MemoryDocument>,
    runner: EffectRunner,
    pending_previews: usize,
}

impl HeadlessApp {
    pub fn new(runner: EffectRunner) -> Result<Self, InitializationError> {
        Self::with_document(MemoryDocument::complete(), runner)
    }

    pub fn with_document(
        document: MemoryDocument,
        runner: EffectRunner,
    ) -> Result<Self, InitializationError> {
        Ok(Self {
            controller: Controller::attach(document)?,
            runner,
            pending_previews: 0,
        })
    }

    pub fn select_file(&mut self, file: Option<PickedFile>) {
        let effects = self.controller.on_file_selected(file);
        self.run(effects);
    }

    pub fn click_enhance(&mut self) {
        let effects = self.controller.on_submit();
        self.run(effects);
    }

    /// Processes engine replies until nothing is outstanding. Returns `false`
    /// if `timeout` elapsed first; `None` waits indefinitely.
    pub fn settle(&mut self, timeout: Option<Duration>) -> bool {
        let deadline = timeout.map(|t| Instant::now() + t);
        while self.is_busy() {
            let wait = match deadline {
                Some(deadline) => match deadline.checked_duration_since(Instant::now()) {
                    Some(left) if !left.is_zero() => left,
                    _ => {
                        engine_warn!("Headless app did not settle in time");
                        return false;
                    }
                },
                None => Duration::from_millis(250),
            };
            if let Some(msg) = self.runner.next_timeout(wait) {
                self.dispatch(msg);
            }
        }
        true
    }

    pub fn dispatch(&mut self, msg: Msg) {
        if matches!(msg, Msg::PreviewDecoded { .. } | Msg::PreviewFailed { .. }) {
            self.pending_previews = self.pending_previews.saturating_sub(1);
        }
        let effects = self.controller.dispatch(msg);
        self.run(effects);
    }

    pub fn controller(&self) -> &Controller<MemoryDocument> {
        &self.controller
    }

    pub fn document(&self) -> &MemoryDocument {
        self.controller.bindings()
    }

    fn is_busy(&self) -> bool {
        self.pending_previews > 0 || self.controller.state().in_flight().is_some()
    }

    fn run(&mut self, effects: Vec<Effect>) {
        self.pending_previews += effects
            .iter()
            .filter(|effect| matches!(effect, Effect::DecodePreview { .. }))
            .count();
        self.runner.run(effects);
    }
}
