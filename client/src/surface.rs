use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, PointerEvent, Window};

use annotboard_shared::{DisplaySize, Gesture, Scene, ShapeId, ToolState};

use crate::dom::{debug_log, event_modifiers, event_to_point, set_canvas_cursor, size_canvas};
use crate::render::{build_pixelated, redraw};
use crate::state::{Background, State, Surface, SurfaceListeners};

// Any of these ends the gesture held by the captured pointer.
const RELEASE_EVENTS: [&str; 3] = ["pointerup", "pointercancel", "lostpointercapture"];

#[derive(Serialize)]
struct SceneSummary<'a> {
    tools: &'a ToolState,
    shapes: usize,
    selected: &'a [ShapeId],
}

fn log_scene(state: &State, what: &str) {
    if !state.debug {
        return;
    }
    let Some(scene) = state.scene() else {
        return;
    };
    let summary = SceneSummary {
        tools: &state.tools,
        shapes: scene.shapes().len(),
        selected: scene.selection().ids(),
    };
    if let Ok(json) = serde_json::to_string(&summary) {
        web_sys::console::log_1(&format!("{what} {json}").into());
    }
}

pub fn mount(
    state_rc: &Rc<RefCell<State>>,
    window: &Window,
    document: &Document,
    image: HtmlImageElement,
) -> Result<(), JsValue> {
    let mut state = state_rc.borrow_mut();
    let size = DisplaySize::fit(
        image.natural_width() as f64,
        image.natural_height() as f64,
        state.config.max_display_width,
    )
    .ok_or_else(|| JsValue::from_str("Image has no size"))?;
    let pixelated = build_pixelated(document, &image, &size, state.config.pixel_size)?;

    unmount(&mut state);
    size_canvas(window, &state.canvas, &state.ctx, &size);
    let listeners = attach_listeners(state_rc, &state.canvas)?;

    debug_log(
        state.debug,
        &format!(
            "Mounting surface natural={}x{} display={}x{}",
            size.natural_width, size.natural_height, size.width, size.height
        ),
    );
    let scene = Scene::new(size.width, size.height, state.config.clone());
    state.surface = Some(Surface {
        scene,
        background: Background {
            image,
            pixelated,
            size,
        },
        listeners: Some(listeners),
    });
    set_canvas_cursor(&state.canvas, state.pointer_mode, false);
    redraw(&state);
    Ok(())
}

pub fn unmount(state: &mut State) {
    let Some(surface) = state.surface.take() else {
        return;
    };
    if let Some(listeners) = surface.listeners.as_ref() {
        detach_listeners(&state.canvas, listeners);
    }
    if let Some(pointer_id) = state.active_pointer.take() {
        let _ = state.canvas.release_pointer_capture(pointer_id);
    }
    debug_log(state.debug, "Unmounted surface");
    redraw(state);
}

fn attach_listeners(
    state_rc: &Rc<RefCell<State>>,
    canvas: &HtmlCanvasElement,
) -> Result<SurfaceListeners, JsValue> {
    let down = {
        let state_rc = state_rc.clone();
        Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            on_pointer_down(&state_rc, &event);
        })
    };
    let moved = {
        let state_rc = state_rc.clone();
        Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            on_pointer_move(&state_rc, &event);
        })
    };
    let up = {
        let state_rc = state_rc.clone();
        Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            on_pointer_up(&state_rc, &event);
        })
    };
    canvas.add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref())?;
    canvas.add_event_listener_with_callback("pointermove", moved.as_ref().unchecked_ref())?;
    for name in RELEASE_EVENTS {
        canvas.add_event_listener_with_callback(name, up.as_ref().unchecked_ref())?;
    }
    Ok(SurfaceListeners { down, moved, up })
}

fn detach_listeners(canvas: &HtmlCanvasElement, listeners: &SurfaceListeners) {
    let remove = |name: &str, callback: &Closure<dyn FnMut(PointerEvent)>| {
        let _ = canvas.remove_event_listener_with_callback(name, callback.as_ref().unchecked_ref());
    };
    remove("pointerdown", &listeners.down);
    remove("pointermove", &listeners.moved);
    for name in RELEASE_EVENTS {
        remove(name, &listeners.up);
    }
}

fn on_pointer_down(state_rc: &Rc<RefCell<State>>, event: &PointerEvent) {
    if event.button() != 0 {
        return;
    }
    let mut state = state_rc.borrow_mut();
    if state.active_pointer.is_some() {
        return;
    }
    let Some(point) = event_to_point(&state.canvas, event) else {
        return;
    };
    event.prevent_default();
    let tools = state.tools;
    let mode = state.pointer_mode;
    let Some(scene) = state.scene_mut() else {
        return;
    };
    scene.pointer_down(point, event_modifiers(event), &tools, mode);
    let dragging = matches!(
        scene.gesture(),
        Gesture::Moving { .. } | Gesture::Scaling { .. }
    );
    let pointer_id = event.pointer_id();
    let _ = state.canvas.set_pointer_capture(pointer_id);
    state.active_pointer = Some(pointer_id);
    set_canvas_cursor(&state.canvas, mode, dragging);
    redraw(&state);
}

fn on_pointer_move(state_rc: &Rc<RefCell<State>>, event: &PointerEvent) {
    let mut state = state_rc.borrow_mut();
    if state.active_pointer != Some(event.pointer_id()) {
        return;
    }
    let Some(point) = event_to_point(&state.canvas, event) else {
        return;
    };
    let changed = match state.scene_mut() {
        Some(scene) => scene.pointer_move(point),
        None => false,
    };
    if changed {
        redraw(&state);
    }
}

fn on_pointer_up(state_rc: &Rc<RefCell<State>>, event: &PointerEvent) {
    let mut state = state_rc.borrow_mut();
    if state.active_pointer != Some(event.pointer_id()) {
        return;
    }
    state.active_pointer = None;
    let _ = state.canvas.release_pointer_capture(event.pointer_id());
    let changed = match state.scene_mut() {
        Some(scene) => scene.pointer_up(),
        None => false,
    };
    set_canvas_cursor(&state.canvas, state.pointer_mode, false);
    if changed {
        redraw(&state);
        log_scene(&state, "Gesture finished");
    }
}

pub fn clear_selection(state: &mut State) {
    let changed = match state.scene_mut() {
        Some(scene) => scene.clear_selection(),
        None => false,
    };
    if changed {
        redraw(state);
    }
}

pub fn remove_selected(state: &mut State) -> usize {
    let removed = match state.scene_mut() {
        Some(scene) => scene.remove_selected(),
        None => return 0,
    };
    if !removed.is_empty() {
        redraw(state);
        log_scene(state, "Removed shapes");
    }
    removed.len()
}

pub fn refresh_cursor(state: &State) {
    set_canvas_cursor(&state.canvas, state.pointer_mode, false);
    log_scene(state, "Tools changed");
}
