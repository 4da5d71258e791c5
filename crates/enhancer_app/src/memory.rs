//! In-memory document used by the headless driver and by tests.

use std::collections::BTreeMap;

use crate::bindings::{BindingError, Slot, UiBindings, UiCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryNode {
    Text(String),
    Image { src: String, alt: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryElement {
    pub children: Vec<MemoryNode>,
    pub enabled: bool,
    pub visible: bool,
}

impl Default for MemoryElement {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            enabled: true,
            visible: true,
        }
    }
}

impl MemoryElement {
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                MemoryNode::Text(text) => Some(text.as_str()),
                MemoryNode::Image { .. } => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: BTreeMap<Slot, MemoryElement>,
    applied: Vec<UiCommand>,
}

impl MemoryDocument {
    /// A document with every slot present.
    pub fn complete() -> Self {
        let elements = Slot::ALL
            .into_iter()
            .map(|slot| (slot, MemoryElement::default()))
            .collect();
        Self {
            elements,
            applied: Vec::new(),
        }
    }

    pub fn without(slot: Slot) -> Self {
        let mut doc = Self::complete();
        doc.remove(slot);
        doc
    }

    /// Drops an element, e.g. to simulate a page script removing it.
    pub fn remove(&mut self, slot: Slot) -> Option<MemoryElement> {
        self.elements.remove(&slot)
    }

    pub fn element(&self, slot: Slot) -> Option<&MemoryElement> {
        self.elements.get(&slot)
    }

    pub fn text(&self, slot: Slot) -> Option<String> {
        self.element(slot).map(MemoryElement::text)
    }

    pub fn image_sources(&self, slot: Slot) -> Vec<String> {
        self.element(slot)
            .map(|el| {
                el.children
                    .iter()
                    .filter_map(|node| match node {
                        MemoryNode::Image { src, .. } => Some(src.clone()),
                        MemoryNode::Text(_) => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_enabled(&self, slot: Slot) -> bool {
        self.element(slot).is_some_and(|el| el.enabled)
    }

    pub fn is_visible(&self, slot: Slot) -> bool {
        self.element(slot).is_some_and(|el| el.visible)
    }

    /// Every command applied so far, in order.
    pub fn applied(&self) -> &[UiCommand] {
        &self.applied
    }
}

impl UiBindings for MemoryDocument {
    fn has_slot(&self, slot: Slot) -> bool {
        self.elements.contains_key(&slot)
    }

    fn apply(&mut self, command: &UiCommand) -> Result<(), BindingError> {
        let slot = command.slot();
        let element = self
            .elements
            .get_mut(&slot)
            .ok_or(BindingError::Missing(slot))?;
        match command {
            UiCommand::SetText { text, .. } | UiCommand::ShowPlaceholder { text, .. } => {
                element.children = vec![MemoryNode::Text(text.clone())];
            }
            UiCommand::ShowImage { src, alt, .. } => {
                element.children = vec![MemoryNode::Image {
                    src: src.clone(),
                    alt: alt.clone(),
                }];
            }
            UiCommand::SetEnabled { enabled, .. } => element.enabled = *enabled,
            UiCommand::SetVisible { visible, .. } => element.visible = *visible,
        }
        self.applied.push(command.clone());
        Ok(())
    }
}
