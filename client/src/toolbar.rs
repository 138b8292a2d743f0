use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement};

use annotboard_shared::{
    PointerMode, ShapeKind, StrokeColor, StrokeWidth, ToolState, ToolbarAction,
};

fn append_button(
    document: &Document,
    parent: &HtmlElement,
    tool: &str,
    value: &str,
    label: &str,
    active: bool,
    class_extra: &str,
) {
    let Ok(element) = document.create_element("button") else {
        return;
    };
    let Ok(button) = element.dyn_into::<HtmlButtonElement>() else {
        return;
    };
    let _ = button.set_attribute("type", "button");
    let _ = button.set_attribute("data-tool", tool);
    let _ = button.set_attribute("data-value", value);
    let _ = button.set_attribute("aria-pressed", if active { "true" } else { "false" });
    let mut class_name = String::from("tool");
    if !class_extra.is_empty() {
        class_name.push(' ');
        class_name.push_str(class_extra);
    }
    if active {
        class_name.push_str(" active");
    }
    let _ = button.set_attribute("class", &class_name);
    button.set_text_content(Some(label));
    let _ = parent.append_child(&button);
}

pub fn render_toolbar(
    document: &Document,
    toolbar_el: &HtmlElement,
    tools: &ToolState,
    mode: PointerMode,
) {
    toolbar_el.set_inner_html("");
    for shape in ShapeKind::ALL {
        append_button(
            document,
            toolbar_el,
            "shape",
            shape.key(),
            shape.label(),
            mode == PointerMode::Draw && tools.shape == shape,
            "",
        );
    }
    append_button(
        document,
        toolbar_el,
        "mode",
        "select",
        "Select",
        mode == PointerMode::Select,
        "",
    );
    for (index, color) in StrokeColor::ALL.into_iter().enumerate() {
        let extra = if index == 0 { "ml20 swatch" } else { "swatch" };
        append_button(
            document,
            toolbar_el,
            "color",
            color.css(),
            "",
            tools.color == color,
            extra,
        );
        if let Ok(Some(node)) =
            toolbar_el.query_selector(&format!("[data-value=\"{}\"]", color.css()))
        {
            if let Ok(button) = node.dyn_into::<HtmlElement>() {
                let _ = button.style().set_property("background", color.css());
                let _ = button.set_attribute("aria-label", &format!("Use {}", color.css()));
            }
        }
    }
    for (index, width) in StrokeWidth::ALL.into_iter().enumerate() {
        let extra = if index == 0 { "ml20" } else { "" };
        append_button(
            document,
            toolbar_el,
            "width",
            width.key(),
            width.label(),
            tools.stroke_width == width,
            extra,
        );
    }
}

pub fn toolbar_action_from_event(event: &Event) -> Option<ToolbarAction> {
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(element) = current {
        if let (Some(tool), Some(value)) = (
            element.get_attribute("data-tool"),
            element.get_attribute("data-value"),
        ) {
            return match tool.as_str() {
                "shape" => ShapeKind::from_key(&value).map(ToolbarAction::Shape),
                "color" => StrokeColor::from_css(&value).map(ToolbarAction::Color),
                "width" => StrokeWidth::from_key(&value).map(ToolbarAction::Width),
                "mode" if value == "select" => Some(ToolbarAction::Mode(PointerMode::Select)),
                _ => None,
            };
        }
        current = element.parent_element();
    }
    None
}
