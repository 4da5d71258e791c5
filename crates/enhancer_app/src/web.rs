//! Browser entry point: binds the page's elements and runs effects with
//! `spawn_local`.

mod console;
mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use engine_logging::{engine_debug, engine_error};
use enhancer_core::{Effect, Msg, PickedFile};
use enhancer_engine::{encode_data_uri, EnhanceSettings, Enhancer, ReqwestEnhancer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::bindings::Slot;
use crate::controller::Controller;
use crate::pick_sequence::PickSequence;
use dom::DomBindings;

struct WebApp {
    controller: RefCell<Controller<DomBindings>>,
    enhancer: ReqwestEnhancer,
    picks: PickSequence,
}

pub fn start() {
    console::install();
    if let Err(err) = try_start() {
        engine_error!("Enhancer UI failed to start: {}", err);
    }
}

fn try_start() -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    // A missing element was already reported; the page stays inert.
    let Ok(controller) = Controller::attach(DomBindings::lookup(&document)) else {
        return Ok(());
    };

    let origin = window
        .location()
        .origin()
        .map_err(|_| "location: origin unavailable".to_string())?;
    let enhancer = ReqwestEnhancer::new(EnhanceSettings::with_endpoint(format!(
        "{origin}/enhance"
    )))
    .map_err(|err| err.to_string())?;

    let app = Rc::new(WebApp {
        controller: RefCell::new(controller),
        enhancer,
        picks: PickSequence::new(),
    });
    bind_file_input(&app)?;
    bind_enhance_button(&app)?;
    Ok(())
}

fn bind_file_input(app: &Rc<WebApp>) -> Result<(), String> {
    let input = element(app, Slot::FileInput)?;
    let app = app.clone();
    let on_change = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let file = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let ticket = app.picks.begin();
        let Some(file) = file else {
            dispatch(&app, Msg::FileSelected(None));
            return;
        };
        let app = app.clone();
        spawn_local(async move {
            let name = file.name();
            let read = read_file_bytes(&file).await;
            if !app.picks.is_latest(ticket) {
                engine_debug!("Dropping read of {} superseded by a later pick", name);
                return;
            }
            match read {
                Ok(bytes) => dispatch(&app, Msg::FileSelected(Some(PickedFile::new(name, bytes)))),
                Err(err) => {
                    engine_error!("Reading {} failed: {}", name, err);
                    app.controller
                        .borrow_mut()
                        .update_log(format!("Error: could not read {name}"));
                }
            }
        });
    }) as Box<dyn FnMut(_)>);
    input
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .map_err(|_| "file input: add_event_listener failed".to_string())?;
    on_change.forget();
    Ok(())
}

fn bind_enhance_button(app: &Rc<WebApp>) -> Result<(), String> {
    let button = element(app, Slot::EnhanceButton)?;
    let app = app.clone();
    let on_click = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        dispatch(&app, Msg::EnhanceClicked);
    }) as Box<dyn FnMut(_)>);
    button
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|_| "enhance button: add_event_listener failed".to_string())?;
    on_click.forget();
    Ok(())
}

fn element(app: &WebApp, slot: Slot) -> Result<web_sys::Element, String> {
    app.controller
        .borrow()
        .bindings()
        .element(slot)
        .cloned()
        .ok_or_else(|| format!("element \"{}\" missing", slot.element_id()))
}

fn dispatch(app: &Rc<WebApp>, msg: Msg) {
    let effects = app.controller.borrow_mut().dispatch(msg);
    for effect in effects {
        run_effect(app, effect);
    }
}

fn run_effect(app: &Rc<WebApp>, effect: Effect) {
    match effect {
        Effect::DecodePreview {
            selection,
            name,
            bytes,
        } => {
            let app = app.clone();
            spawn_local(async move {
                let msg = match encode_data_uri(&name, &bytes) {
                    Ok(src) => Msg::PreviewDecoded { selection, src },
                    Err(err) => Msg::PreviewFailed {
                        selection,
                        reason: err.to_string(),
                    },
                };
                dispatch(&app, msg);
            });
        }
        Effect::PostEnhance {
            request,
            name,
            bytes,
        } => {
            let app = app.clone();
            spawn_local(async move {
                let msg = match app.enhancer.enhance(&name, &bytes).await {
                    Ok(image) => Msg::EnhanceSucceeded {
                        request,
                        image: image.src,
                    },
                    Err(err) => Msg::EnhanceFailed {
                        request,
                        message: err.to_string(),
                    },
                };
                dispatch(&app, msg);
            });
        }
        Effect::AbandonRequest { request } => {
            // fetch keeps running; the core drops its reply by request id.
            engine_debug!("Request {} abandoned", request);
        }
    }
}

async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "file: read failed".to_string())?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
