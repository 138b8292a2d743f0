use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, PointerEvent, Window};

use annotboard_shared::geometry::normalize_point;
use annotboard_shared::{DisplaySize, Modifiers, Point, PointerMode, SurfaceConfig};

pub const CONFIG_ELEMENT_ID: &str = "annotboardConfig";

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

pub fn debug_enabled(window: &Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1")
        || search.contains("debug=true")
        || search.contains("log=1")
        || search.contains("log=true")
}

pub fn debug_log(enabled: bool, message: &str) {
    if enabled {
        web_sys::console::log_1(&message.into());
    }
}

pub fn read_config(document: &Document) -> SurfaceConfig {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return SurfaceConfig::default();
    };
    let text = element.text_content().unwrap_or_default();
    match SurfaceConfig::from_json(&text) {
        Ok(config) => config,
        Err(err) => {
            web_sys::console::warn_1(&format!("Ignoring config: {err}").into());
            SurfaceConfig::default()
        }
    }
}

pub fn set_status(status_el: &Element, state: &str, text: &str) {
    let _ = status_el.set_attribute("data-state", state);
    status_el.set_text_content(Some(text));
}

pub fn set_hidden(element: &HtmlElement, hidden: bool) {
    if hidden {
        let _ = element.set_attribute("hidden", "");
    } else {
        let _ = element.remove_attribute("hidden");
    }
}

pub fn set_canvas_cursor(canvas: &HtmlCanvasElement, mode: PointerMode, dragging: bool) {
    let cursor = match mode {
        PointerMode::Draw => "crosshair",
        PointerMode::Select if dragging => "grabbing",
        PointerMode::Select => "default",
    };
    let _ = canvas.style().set_property("cursor", cursor);
}

pub fn size_canvas(
    window: &Window,
    canvas: &HtmlCanvasElement,
    ctx: &web_sys::CanvasRenderingContext2d,
    size: &DisplaySize,
) {
    let dpr = window.device_pixel_ratio().max(1.0);
    canvas.set_width((size.width * dpr).round() as u32);
    canvas.set_height((size.height * dpr).round() as u32);
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", size.width));
    let _ = style.set_property("height", &format!("{}px", size.height));
    let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
}

pub fn event_to_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Option<Point> {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    normalize_point(Point::new(
        event.client_x() as f64 - rect.left(),
        event.client_y() as f64 - rect.top(),
    ))
}

pub fn event_modifiers(event: &PointerEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
    }
}
