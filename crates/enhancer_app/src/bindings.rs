//! Named UI slots and the capability interface the controller renders into.

use engine_logging::engine_error;
use thiserror::Error;

/// Every element the controller needs, keyed by what it is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    FileInput,
    FileName,
    EnhanceButton,
    OriginalBox,
    EnhancedBox,
    Log,
    Spinner,
}

impl Slot {
    pub const ALL: [Slot; 7] = [
        Slot::FileInput,
        Slot::FileName,
        Slot::EnhanceButton,
        Slot::OriginalBox,
        Slot::EnhancedBox,
        Slot::Log,
        Slot::Spinner,
    ];

    /// DOM id of the element backing this slot.
    pub fn element_id(self) -> &'static str {
        match self {
            Slot::FileInput => "file-input",
            Slot::FileName => "file-name",
            Slot::EnhanceButton => "enhance-btn",
            Slot::OriginalBox => "original-image-box",
            Slot::EnhancedBox => "enhanced-image-box",
            Slot::Log => "log",
            Slot::Spinner => "spinner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    SetText { slot: Slot, text: String },
    SetEnabled { slot: Slot, enabled: bool },
    /// Replace the slot's content with a single image.
    ShowImage { slot: Slot, src: String, alt: String },
    /// Replace the slot's content with a text placeholder.
    ShowPlaceholder { slot: Slot, text: String },
    SetVisible { slot: Slot, visible: bool },
}

impl UiCommand {
    pub fn slot(&self) -> Slot {
        match self {
            UiCommand::SetText { slot, .. }
            | UiCommand::SetEnabled { slot, .. }
            | UiCommand::ShowImage { slot, .. }
            | UiCommand::ShowPlaceholder { slot, .. }
            | UiCommand::SetVisible { slot, .. } => *slot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitializationError {
    #[error("Critical Error: HTML element with id \"{0}\" was not found. The application cannot start.")]
    MissingElement(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("element \"{}\" is not available", .0.element_id())]
    Missing(Slot),
    #[error("element \"{id}\" rejected update: {reason}")]
    Rejected { id: &'static str, reason: String },
}

/// What the controller needs from a document.
pub trait UiBindings {
    fn has_slot(&self, slot: Slot) -> bool;
    fn apply(&mut self, command: &UiCommand) -> Result<(), BindingError>;
}

/// Checks every slot up front so a broken page binds nothing at all.
pub fn verify_bindings(bindings: &dyn UiBindings) -> Result<(), InitializationError> {
    for slot in Slot::ALL {
        if !bindings.has_slot(slot) {
            let err = InitializationError::MissingElement(slot.element_id());
            engine_error!("{}", err);
            return Err(err);
        }
    }
    Ok(())
}
