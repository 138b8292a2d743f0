use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, HtmlCanvasElement, HtmlElement,
    HtmlInputElement, KeyboardEvent,
};

use annotboard_shared::{DecodeTickets, PointerMode, ToolState, ToolbarAction};

use crate::dom::{debug_enabled, debug_log, get_element, read_config, set_hidden, set_status};
use crate::loader::{begin_decode, LoadHooks};
use crate::state::State;
use crate::surface::{clear_selection, refresh_cursor, remove_selected, unmount};
use crate::toolbar::{render_toolbar, toolbar_action_from_event};

fn document_ready_state(document: &Document) -> Option<String> {
    js_sys::Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

fn sync_toolbar(document: &Document, toolbar_el: &HtmlElement, state: &State) {
    render_toolbar(document, toolbar_el, &state.tools, state.pointer_mode);
    refresh_cursor(state);
}

fn is_text_input(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|element| matches!(element.tag_name().as_str(), "INPUT" | "TEXTAREA"))
        .unwrap_or(false)
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let debug = debug_enabled(&window);
    let config = read_config(&document);
    debug_log(debug, &format!("Annotboard starting config={config:?}"));

    let canvas: HtmlCanvasElement = get_element(&document, "surface")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    let file_input: HtmlInputElement = get_element(&document, "file")?;
    let toolbar_el: HtmlElement = get_element(&document, "tools")?;
    let status_el = document
        .get_element_by_id("status")
        .ok_or_else(|| JsValue::from_str("Missing status element"))?;

    let state = Rc::new(RefCell::new(State {
        canvas,
        ctx,
        config,
        debug,
        tools: ToolState::default(),
        pointer_mode: PointerMode::Draw,
        tickets: DecodeTickets::default(),
        pending: None,
        surface: None,
        active_pointer: None,
    }));

    set_hidden(&toolbar_el, true);
    set_status(&status_el, "idle", "Choose an image to annotate.");
    sync_toolbar(&document, &toolbar_el, &state.borrow());

    let hooks = {
        let document = document.clone();
        let toolbar_el = toolbar_el.clone();
        let status_el = status_el.clone();
        let state = state.clone();
        let failed_status = status_el.clone();
        LoadHooks {
            mounted: Rc::new(move || {
                set_hidden(&toolbar_el, false);
                sync_toolbar(&document, &toolbar_el, &state.borrow());
                set_status(&status_el, "ready", "Drag on the image to annotate.");
            }),
            failed: Rc::new(move || {
                set_status(&failed_status, "error", "Could not read that image.");
            }),
        }
    };

    {
        let change_state = state.clone();
        let file_input_cb = file_input.clone();
        let window_cb = window.clone();
        let document_cb = document.clone();
        let status_el = status_el.clone();
        let onchange = Closure::<dyn FnMut(Event)>::new(move |_| {
            let Some(file) = file_input_cb.files().and_then(|list| list.get(0)) else {
                return;
            };
            set_status(&status_el, "loading", "Loading image...");
            if let Err(err) =
                begin_decode(&change_state, &window_cb, &document_cb, &file, hooks.clone())
            {
                web_sys::console::error_2(&"Failed to start decode".into(), &err);
                (hooks.failed)();
            }
        });
        file_input.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())?;
        onchange.forget();
    }

    {
        let tool_state = state.clone();
        let toolbar_el_cb = toolbar_el.clone();
        let document_cb = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(action) = toolbar_action_from_event(&event) else {
                return;
            };
            let mut state = tool_state.borrow_mut();
            let state = &mut *state;
            if action.apply(&mut state.tools, &mut state.pointer_mode) {
                sync_toolbar(&document_cb, &toolbar_el_cb, state);
            }
        });
        toolbar_el.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let key_state = state.clone();
        let toolbar_el_cb = toolbar_el.clone();
        let document_cb = document.clone();
        let onkeydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if event.meta_key() || event.ctrl_key() || event.alt_key() || is_text_input(&event) {
                return;
            }
            let mut state = key_state.borrow_mut();
            if !state.is_mounted() {
                return;
            }
            let key = event.key();
            match key.as_str() {
                "Escape" => {
                    clear_selection(&mut state);
                }
                "Delete" | "Backspace" => {
                    if remove_selected(&mut state) > 0 {
                        event.prevent_default();
                    }
                }
                _ => {
                    let Some(action) = ToolbarAction::from_key(&key) else {
                        return;
                    };
                    let state = &mut *state;
                    if action.apply(&mut state.tools, &mut state.pointer_mode) {
                        sync_toolbar(&document_cb, &toolbar_el_cb, state);
                    }
                }
            }
        });
        window.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref())?;
        onkeydown.forget();
    }

    {
        let hide_state = state.clone();
        let onpagehide = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = hide_state.borrow_mut();
            unmount(&mut state);
        });
        window.add_event_listener_with_callback("pagehide", onpagehide.as_ref().unchecked_ref())?;
        onpagehide.forget();
    }

    Ok(())
}
