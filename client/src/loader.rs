use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, File, HtmlImageElement, Url, Window};

use annotboard_shared::DecodeTicket;

use crate::dom::debug_log;
use crate::state::{PendingDecode, State};
use crate::surface::mount;

#[derive(Clone)]
pub struct LoadHooks {
    pub mounted: Rc<dyn Fn()>,
    pub failed: Rc<dyn Fn()>,
}

fn discard(pending: PendingDecode) {
    pending.image.set_onload(None);
    pending.image.set_onerror(None);
    let _ = Url::revoke_object_url(&pending.url);
}

fn take_current(state_rc: &Rc<RefCell<State>>, ticket: DecodeTicket) -> Option<PendingDecode> {
    let mut state = state_rc.borrow_mut();
    if !state.tickets.is_current(ticket) {
        debug_log(state.debug, "Dropping decode from a superseded selection");
        return None;
    }
    match state.pending.as_ref() {
        Some(pending) if pending.ticket == ticket => state.pending.take(),
        _ => None,
    }
}

pub fn begin_decode(
    state_rc: &Rc<RefCell<State>>,
    window: &Window,
    document: &Document,
    file: &File,
    hooks: LoadHooks,
) -> Result<(), JsValue> {
    let url = Url::create_object_url_with_blob(file)?;
    let image = HtmlImageElement::new()?;
    let ticket = {
        let mut state = state_rc.borrow_mut();
        if let Some(previous) = state.pending.take() {
            discard(previous);
        }
        debug_log(
            state.debug,
            &format!("Decoding {} ({} bytes)", file.name(), file.size()),
        );
        state.tickets.issue()
    };

    let onload = {
        let state_rc = state_rc.clone();
        let window = window.clone();
        let document = document.clone();
        let hooks = hooks.clone();
        Closure::<dyn FnMut(Event)>::new(move |_| {
            let Some(pending) = take_current(&state_rc, ticket) else {
                return;
            };
            let image = pending.image.clone();
            discard(pending);
            match mount(&state_rc, &window, &document, image) {
                Ok(()) => (hooks.mounted)(),
                Err(err) => {
                    web_sys::console::error_2(&"Failed to mount image".into(), &err);
                    (hooks.failed)();
                }
            }
        })
    };
    let onerror = {
        let state_rc = state_rc.clone();
        Closure::<dyn FnMut(Event)>::new(move |_| {
            let Some(pending) = take_current(&state_rc, ticket) else {
                return;
            };
            web_sys::console::warn_1(&"Could not decode the selected image".into());
            discard(pending);
            (hooks.failed)();
        })
    };

    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    image.set_src(&url);
    state_rc.borrow_mut().pending = Some(PendingDecode {
        ticket,
        url,
        image,
        onload,
        onerror,
    });
    Ok(())
}
