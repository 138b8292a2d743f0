use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, ImageData};

use annotboard_shared::geometry::handles;
use annotboard_shared::pixelate::pixelate;
use annotboard_shared::shape::{ArrowShape, MosaicPatch, RectangleShape};
use annotboard_shared::{AnnotationShape, Bounds, DisplaySize, Geometry, Scene};

use crate::state::{Background, State};

pub fn build_pixelated(
    document: &Document,
    image: &HtmlImageElement,
    size: &DisplaySize,
    pixel_size: u32,
) -> Result<HtmlCanvasElement, JsValue> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    let width = size.width.round().max(1.0) as u32;
    let height = size.height.round().max(1.0) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing offscreen canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        image,
        0.0,
        0.0,
        width as f64,
        height as f64,
    )?;
    let data = ctx.get_image_data(0.0, 0.0, width as f64, height as f64)?;
    let mut pixels = data.data().0;
    if !pixelate(&mut pixels, width, height, pixel_size) {
        return Err(JsValue::from_str("Unexpected image data length"));
    }
    let pixelated =
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(pixels.as_slice()), width, height)?;
    ctx.put_image_data(&pixelated, 0.0, 0.0)?;
    Ok(canvas)
}

pub fn redraw(state: &State) {
    let ctx = &state.ctx;
    let width = state.canvas.width() as f64;
    let height = state.canvas.height() as f64;
    ctx.save();
    let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    ctx.clear_rect(0.0, 0.0, width, height);
    ctx.restore();

    let Some(surface) = state.surface.as_ref() else {
        return;
    };
    let background = &surface.background;
    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
        &background.image,
        0.0,
        0.0,
        background.size.width,
        background.size.height,
    );
    for shape in surface.scene.shapes().iter().filter(|shape| !shape.is_empty()) {
        draw_shape(ctx, background, shape);
    }
    draw_marquee(ctx, &surface.scene);
    draw_selection_overlay(ctx, &surface.scene);
}

fn draw_shape(
    ctx: &CanvasRenderingContext2d,
    background: &Background,
    shape: &AnnotationShape,
) {
    match &shape.geometry {
        Geometry::Rectangle(rect) => draw_rectangle(ctx, rect),
        Geometry::Arrow(arrow) => draw_arrow(ctx, arrow),
        Geometry::Mosaic(patch) => draw_mosaic(ctx, background, patch),
    }
}

fn draw_rectangle(ctx: &CanvasRenderingContext2d, rect: &RectangleShape) {
    ctx.save();
    ctx.set_stroke_style_str(rect.color.css());
    ctx.set_line_width(rect.stroke_width);
    ctx.set_line_join("miter");
    ctx.stroke_rect(
        rect.origin.x,
        rect.origin.y,
        rect.width * rect.scale_x,
        rect.height * rect.scale_y,
    );
    ctx.restore();
}

fn draw_arrow(ctx: &CanvasRenderingContext2d, arrow: &ArrowShape) {
    let color = arrow.color.css();
    ctx.save();
    let _ = ctx.translate(arrow.origin.x, arrow.origin.y);
    let _ = ctx.rotate(arrow.angle_degrees.to_radians());
    ctx.set_stroke_style_str(color);
    ctx.set_fill_style_str(color);
    ctx.set_line_width(arrow.stroke_width);
    ctx.set_line_cap("butt");
    ctx.begin_path();
    ctx.move_to(0.0, 0.0);
    ctx.line_to(arrow.length, 0.0);
    ctx.stroke();

    let half = arrow.pointer_width / 2.0;
    ctx.begin_path();
    ctx.move_to(arrow.length, 0.0);
    ctx.line_to(arrow.length - arrow.pointer_length, half);
    ctx.line_to(arrow.length - arrow.pointer_length, -half);
    ctx.close_path();
    ctx.fill();
    ctx.stroke();
    ctx.restore();
}

fn draw_mosaic(ctx: &CanvasRenderingContext2d, background: &Background, patch: &MosaicPatch) {
    if patch.width == 0.0 || patch.height == 0.0 {
        return;
    }
    ctx.save();
    let _ = ctx.translate(patch.origin.x, patch.origin.y);
    ctx.begin_path();
    ctx.rect(0.0, 0.0, patch.width, patch.height);
    ctx.clip();
    let _ = ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
        &background.pixelated,
        patch.source_offset.x,
        patch.source_offset.y,
        background.size.width,
        background.size.height,
    );
    ctx.restore();
}

fn draw_marquee(ctx: &CanvasRenderingContext2d, scene: &Scene) {
    let Some(area) = scene.marquee() else {
        return;
    };
    ctx.save();
    ctx.set_fill_style_str("rgba(0, 161, 255, 0.3)");
    ctx.set_stroke_style_str("rgba(0, 161, 255, 0.85)");
    ctx.set_line_width(1.0);
    let _ = ctx.set_line_dash(&js_sys::Array::of2(&4.into(), &4.into()));
    ctx.fill_rect(area.min_x, area.min_y, area.width(), area.height());
    ctx.stroke_rect(area.min_x, area.min_y, area.width(), area.height());
    ctx.restore();
}

fn draw_selection_overlay(ctx: &CanvasRenderingContext2d, scene: &Scene) {
    let Some(bounds) = scene.selection_bounds() else {
        return;
    };
    ctx.save();
    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str("rgb(0, 161, 255)");
    for shape in scene.shapes() {
        if scene.selection().contains(shape.id) {
            outline(ctx, &shape.bounds());
        }
    }
    let _ = ctx.set_line_dash(&js_sys::Array::of2(&3.into(), &3.into()));
    outline(ctx, &bounds);
    let _ = ctx.set_line_dash(&js_sys::Array::new());
    let size = scene.config().handle_size;
    for handle in handles(&bounds) {
        draw_handle(ctx, handle.position.x, handle.position.y, size);
    }
    ctx.restore();
}

fn outline(ctx: &CanvasRenderingContext2d, bounds: &Bounds) {
    ctx.stroke_rect(bounds.min_x, bounds.min_y, bounds.width(), bounds.height());
}

fn draw_handle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, size: f64) {
    let half = size / 2.0;
    ctx.set_fill_style_str("#fff");
    ctx.fill_rect(x - half, y - half, size, size);
    ctx.stroke_rect(x - half, y - half, size, size);
}
