//! Image enhancer UI controller.
//!
//! The controller renders [`enhancer_core`] state into any [`UiBindings`]
//! implementation. Native builds ship a headless driver; the browser app is
//! behind `--features web` on a wasm32 target.
pub mod bindings;
pub mod controller;
pub mod memory;
pub mod pick_sequence;
pub mod render;

#[cfg(not(target_arch = "wasm32"))]
pub mod platform;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;

pub use bindings::{
    verify_bindings, BindingError, InitializationError, Slot, UiBindings, UiCommand,
};
pub use controller::Controller;
pub use memory::{MemoryDocument, MemoryElement, MemoryNode};
pub use pick_sequence::PickSequence;
