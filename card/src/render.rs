//! Rendering: paints a [`CardLayout`] onto a 2D canvas context.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It receives a finished projection
//! and produces pixels; it does not mutate any editor state. The same entry
//! point serves the live preview (at the display's device pixel ratio) and the
//! export bitmap (at the export policy's ratio).
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::color::with_alpha;
use crate::consts::{
    CARD_BACKGROUND, CARD_BORDER, CARD_RADIUS, CELL_BACKGROUND, CELL_RADIUS, GLOW_BLUR, LABEL_FONT, TITLE_FONT,
    VALUE_FONT, VALUE_TEXT_COLOR,
};
use crate::export::device_pixels;
use crate::layout::{CardLayout, CellLayout, Rect};

/// Opacity of the soft halo drawn behind each cell's border.
const BORDER_HALO_ALPHA: f64 = 0.35;

/// Fetch the 2D context of `canvas`.
///
/// # Errors
///
/// Returns `Err` if the browser refuses a 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?;
    ctx.dyn_into::<CanvasRenderingContext2d>().map_err(JsValue::from)
}

/// Size the canvas backing store for `layout` at `pixel_ratio`.
pub fn fit_canvas(canvas: &HtmlCanvasElement, layout: &CardLayout, pixel_ratio: f64) {
    canvas.set_width(device_pixels(layout.width, pixel_ratio));
    canvas.set_height(device_pixels(layout.height, pixel_ratio));
}

/// Draw the whole card.
///
/// The context is expected to back a canvas sized by [`fit_canvas`] with the
/// same `pixel_ratio`.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(ctx: &CanvasRenderingContext2d, layout: &CardLayout, pixel_ratio: f64) -> Result<(), JsValue> {
    ctx.set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, layout.width, layout.height);

    draw_background(ctx, layout)?;
    draw_title(ctx, layout, pixel_ratio)?;
    for cell in &layout.cells {
        draw_cell(ctx, cell, pixel_ratio)?;
    }
    Ok(())
}

fn draw_background(ctx: &CanvasRenderingContext2d, layout: &CardLayout) -> Result<(), JsValue> {
    let card = Rect::new(0.5, 0.5, (layout.width - 1.0).max(0.0), (layout.height - 1.0).max(0.0));
    rounded_rect_path(ctx, card, CARD_RADIUS)?;
    ctx.set_fill_style_str(CARD_BACKGROUND);
    ctx.fill();
    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str(CARD_BORDER);
    ctx.stroke();
    Ok(())
}

fn draw_title(ctx: &CanvasRenderingContext2d, layout: &CardLayout, pixel_ratio: f64) -> Result<(), JsValue> {
    let title = &layout.title;
    ctx.save();
    ctx.set_font(TITLE_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("alphabetic");
    ctx.set_fill_style_str(&title.color);

    // Outer halo in the glow color, inner halo in the title's own color.
    set_glow(ctx, &title.glow, pixel_ratio);
    ctx.fill_text(&title.text, title.anchor.x, title.anchor.y)?;
    set_glow(ctx, &title.color, pixel_ratio);
    ctx.fill_text(&title.text, title.anchor.x, title.anchor.y)?;

    ctx.restore();
    Ok(())
}

fn draw_cell(ctx: &CanvasRenderingContext2d, cell: &CellLayout, pixel_ratio: f64) -> Result<(), JsValue> {
    ctx.save();

    rounded_rect_path(ctx, cell.rect, CELL_RADIUS)?;
    ctx.set_shadow_color(&with_alpha(&cell.color, CARD_BORDER, BORDER_HALO_ALPHA));
    ctx.set_shadow_blur(GLOW_BLUR * 2.0 * pixel_ratio);
    ctx.set_fill_style_str(CELL_BACKGROUND);
    ctx.fill();
    clear_glow(ctx);
    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str(&cell.color);
    ctx.stroke();

    let max_w = cell.text_width();
    ctx.set_text_align("left");
    ctx.set_text_baseline("alphabetic");

    let label = cell.label_origin();
    ctx.set_font(LABEL_FONT);
    ctx.set_fill_style_str(&cell.color);
    set_glow(ctx, &cell.color, pixel_ratio);
    ctx.fill_text_with_max_width(&cell.label, label.x, label.y, max_w)?;

    let value = cell.value_origin();
    ctx.set_font(VALUE_FONT);
    ctx.set_fill_style_str(VALUE_TEXT_COLOR);
    set_glow(ctx, &cell.glow, pixel_ratio);
    ctx.fill_text_with_max_width(&cell.value, value.x, value.y, max_w)?;

    ctx.restore();
    Ok(())
}

fn set_glow(ctx: &CanvasRenderingContext2d, color: &str, pixel_ratio: f64) {
    ctx.set_shadow_offset_x(0.0);
    ctx.set_shadow_offset_y(0.0);
    // Shadow blur ignores the current transform.
    ctx.set_shadow_blur(GLOW_BLUR * pixel_ratio);
    ctx.set_shadow_color(color);
}

fn clear_glow(ctx: &CanvasRenderingContext2d) {
    ctx.set_shadow_blur(0.0);
    ctx.set_shadow_color("transparent");
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, r: Rect, radius: f64) -> Result<(), JsValue> {
    let radius = radius.min(r.width * 0.5).min(r.height * 0.5).max(0.0);
    ctx.begin_path();
    ctx.move_to(r.x + radius, r.y);
    ctx.arc_to(r.right(), r.y, r.right(), r.bottom(), radius)?;
    ctx.arc_to(r.right(), r.bottom(), r.x, r.bottom(), radius)?;
    ctx.arc_to(r.x, r.bottom(), r.x, r.y, radius)?;
    ctx.arc_to(r.x, r.y, r.right(), r.y, radius)?;
    ctx.close_path();
    Ok(())
}
