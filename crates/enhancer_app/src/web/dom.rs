use std::collections::BTreeMap;

use wasm_bindgen::{JsCast, JsValue};

use crate::bindings::{BindingError, Slot, UiBindings, UiCommand};

/// Real DOM elements, looked up once by id.
pub(super) struct DomBindings {
    document: web_sys::Document,
    elements: BTreeMap<Slot, web_sys::Element>,
}

impl DomBindings {
    pub(super) fn lookup(document: &web_sys::Document) -> Self {
        let elements = Slot::ALL
            .into_iter()
            .filter_map(|slot| {
                document
                    .get_element_by_id(slot.element_id())
                    .map(|el| (slot, el))
            })
            .collect();
        Self {
            document: document.clone(),
            elements,
        }
    }

    pub(super) fn element(&self, slot: Slot) -> Option<&web_sys::Element> {
        self.elements.get(&slot)
    }

    fn replace_children(
        &self,
        slot: Slot,
        parent: &web_sys::Element,
        tag: &str,
    ) -> Result<web_sys::Element, BindingError> {
        parent.set_inner_html("");
        let child = self
            .document
            .create_element(tag)
            .map_err(|err| rejected(slot, err))?;
        parent
            .append_child(&child)
            .map_err(|err| rejected(slot, err))?;
        Ok(child)
    }
}

impl UiBindings for DomBindings {
    fn has_slot(&self, slot: Slot) -> bool {
        self.elements.contains_key(&slot)
    }

    fn apply(&mut self, command: &UiCommand) -> Result<(), BindingError> {
        let slot = command.slot();
        let element = self.element(slot).ok_or(BindingError::Missing(slot))?;
        match command {
            UiCommand::SetText { text, .. } => element.set_text_content(Some(text)),
            UiCommand::SetEnabled { enabled, .. } => {
                match element.dyn_ref::<web_sys::HtmlButtonElement>() {
                    Some(button) => button.set_disabled(!enabled),
                    None if *enabled => element
                        .remove_attribute("disabled")
                        .map_err(|err| rejected(slot, err))?,
                    None => element
                        .set_attribute("disabled", "")
                        .map_err(|err| rejected(slot, err))?,
                }
            }
            UiCommand::ShowImage { src, alt, .. } => {
                let img = self
                    .replace_children(slot, element, "img")?
                    .dyn_into::<web_sys::HtmlImageElement>()
                    .map_err(|_| rejected(slot, JsValue::from_str("img cast failed")))?;
                img.set_src(src);
                img.set_alt(alt);
            }
            UiCommand::ShowPlaceholder { text, .. } => {
                let p = self.replace_children(slot, element, "p")?;
                p.set_text_content(Some(text));
            }
            UiCommand::SetVisible { visible, .. } => {
                let html = element
                    .dyn_ref::<web_sys::HtmlElement>()
                    .ok_or_else(|| rejected(slot, JsValue::from_str("not an HTML element")))?;
                html.style()
                    .set_property("display", if *visible { "block" } else { "none" })
                    .map_err(|err| rejected(slot, err))?;
            }
        }
        Ok(())
    }
}

fn rejected(slot: Slot, err: JsValue) -> BindingError {
    BindingError::Rejected {
        id: slot.element_id(),
        reason: format!("{err:?}"),
    }
}
