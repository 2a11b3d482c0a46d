//! Canvas drawing for the viewer: the per-frame draw pass and the
//! rounded-rectangle path primitive.
//!
//! The 2d context type is platform-owned, so the rounded-rect path is a
//! free function over the context rather than an extension of the type.
//! Fallible context calls are swallowed per call with `.ok()`; a failed
//! draw loses that frame, never the loop.

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::model::Button;
use crate::state::Viewport;

/// Image layer lifecycle. The load is the viewer's only async boundary;
/// the render tick checks this every frame and never draws the image
/// before the load signal has fired.
#[derive(Clone, Debug)]
pub enum ImageLayer {
    Loading,
    Ready(HtmlImageElement),
    /// Load failed; drawn as a visible placeholder instead of silently
    /// rendering nothing forever.
    Failed,
}

/// Trace a rounded-rectangle path: four arc segments joining the corners,
/// then close. The caller brackets this with begin_path/fill.
pub fn draw_rounded_rect(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    r: f64,
) {
    ctx.set_stroke_style_str("#555");
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r).ok();
    ctx.arc_to(x + w, y + h, x, y + h, r).ok();
    ctx.arc_to(x, y + h, x, y, r).ok();
    ctx.arc_to(x, y, x + w, y, r).ok();
    ctx.close_path();
}

fn draw_button(ctx: &CanvasRenderingContext2d, button: &Button) {
    ctx.begin_path();
    ctx.set_fill_style_str(button.fill_style());
    draw_rounded_rect(ctx, button.x, button.y, button.w, button.h, button.r);
    ctx.fill();
    ctx.close_path();
}

fn draw_placeholder(ctx: &CanvasRenderingContext2d, vp: &Viewport) {
    ctx.set_fill_style_str("#e8e8e8");
    ctx.fill_rect(vp.origin_x, vp.origin_y, vp.visible_width, vp.visible_height);
    ctx.set_fill_style_str("#888");
    ctx.set_font("14px sans-serif");
    ctx.set_text_align("center");
    ctx.fill_text(
        "Floor plan failed to load",
        vp.origin_x + vp.visible_width * 0.5,
        vp.origin_y + vp.visible_height * 0.5,
    )
    .ok();
    ctx.set_text_align("start");
}

/// One full frame: clear the visible rectangle, fill the background, draw
/// the image layer, then every button in collection order (later buttons
/// paint over earlier ones on overlap).
pub fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    vp: &Viewport,
    image: &ImageLayer,
    buttons: &[Button],
) {
    ctx.clear_rect(vp.origin_x, vp.origin_y, vp.visible_width, vp.visible_height);
    ctx.set_fill_style_str("#fff");
    ctx.fill_rect(vp.origin_x, vp.origin_y, vp.visible_width, vp.visible_height);

    match image {
        // Natural-size draw anchored at the image-space origin; the zoom
        // transform on the context does the scaling.
        ImageLayer::Ready(img) => {
            ctx.draw_image_with_html_image_element(img, 0.0, 0.0).ok();
        }
        ImageLayer::Failed => draw_placeholder(ctx, vp),
        ImageLayer::Loading => {}
    }

    for button in buttons {
        draw_button(ctx, button);
    }
}
