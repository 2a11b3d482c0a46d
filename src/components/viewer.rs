use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, WheelEvent};
use yew::prelude::*;

use crate::model::ViewerConfig;
use crate::render::{ImageLayer, draw_frame};
use crate::state::{Attachment, Viewport, ZoomDirection};

use super::viewer_controls::ViewerControls;

type WheelClosure = Closure<dyn FnMut(WheelEvent)>;

#[derive(Properties, PartialEq, Clone)]
pub struct ViewerProps {
    pub config: ViewerConfig,
}

/// Canvas viewer: draws the floor plan and its zone buttons, zooms at the
/// cursor on wheel, resets on demand. A config change (window resize)
/// tears the running instance down and installs a fresh one.
#[function_component(Viewer)]
pub fn viewer(props: &ViewerProps) -> Html {
    let canvas_ref = use_node_ref();
    let viewport = {
        let cfg = props.config.clone();
        use_mut_ref(move || {
            Viewport::new(
                cfg.width,
                cfg.height,
                cfg.min_scale,
                cfg.max_scale,
                cfg.zoom_intensity,
            )
        })
    };
    let image = use_mut_ref(|| ImageLayer::Loading);
    // Single owner of the live wheel listener and scheduled frame.
    let attachment = use_mut_ref(Attachment::<WheelClosure, i32>::default);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>); // current draw closure

    // Mount / config-change effect: (re)install the whole instance.
    {
        let canvas_ref = canvas_ref.clone();
        let viewport = viewport.clone();
        let image = image.clone();
        let attachment = attachment.clone();
        let draw_ref_setup = draw_ref.clone();
        use_effect_with(props.config.clone(), move |config| {
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");
            canvas.set_width(config.width as u32);
            canvas.set_height(config.height as u32);

            // Previous instance's listener and frame go first; duplicates
            // would stack transforms on the shared context.
            {
                let canvas_td = canvas.clone();
                let window_td = window.clone();
                let (listeners, frames) = attachment.borrow_mut().teardown(
                    |cb: &WheelClosure| {
                        let _ = canvas_td.remove_event_listener_with_callback(
                            "wheel",
                            cb.as_ref().unchecked_ref(),
                        );
                    },
                    |id| {
                        let _ = window_td.cancel_animation_frame(*id);
                    },
                );
                if listeners + frames > 0 {
                    log::debug!("replaced viewer: {listeners} listener(s), {frames} frame(s)");
                }
            }

            // Fresh view state; setting the canvas size also resets the
            // context state, but don't rely on it.
            *viewport.borrow_mut() = Viewport::new(
                config.width,
                config.height,
                config.min_scale,
                config.max_scale,
                config.zoom_intensity,
            );
            if let Some(ctx) = context_of(&canvas) {
                ctx.reset_transform().ok();
            }

            // Image load: the one async boundary. The draw pass skips the
            // image layer until onload fires; onerror flips it to the
            // placeholder instead of hanging blank forever.
            *image.borrow_mut() = ImageLayer::Loading;
            let img = HtmlImageElement::new().expect("image element");
            let onload = {
                let image = image.clone();
                let img_el = img.clone();
                Closure::wrap(Box::new(move || {
                    log::debug!("floor plan loaded");
                    *image.borrow_mut() = ImageLayer::Ready(img_el.clone());
                }) as Box<dyn FnMut()>)
            };
            let onerror = {
                let image = image.clone();
                let url = config.image_url.clone();
                Closure::wrap(Box::new(move || {
                    log::error!("floor plan failed to load: {url}");
                    *image.borrow_mut() = ImageLayer::Failed;
                }) as Box<dyn FnMut()>)
            };
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            img.set_src(&config.image_url);

            // Draw closure
            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let viewport = viewport.clone();
                let image = image.clone();
                let buttons = config.buttons.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let Some(ctx) = context_of(&canvas) else {
                        return;
                    };
                    draw_frame(&ctx, &viewport.borrow(), &image.borrow(), &buttons);
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());
            (draw_closure)();

            // RAF loop: redraws every frame and reschedules unconditionally
            // until teardown cancels the pending handle.
            let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                Rc::new(RefCell::new(None));
            {
                let closure_cell_clone = closure_cell.clone();
                let draw_ref_loop = draw_ref_setup.clone();
                let window_loop = window.clone();
                let attachment_loop = attachment.clone();
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    if let Some(f) = &*draw_ref_loop.borrow() {
                        f();
                    }
                    if let Ok(id) = window_loop.request_animation_frame(
                        closure_cell_clone
                            .borrow()
                            .as_ref()
                            .unwrap()
                            .as_ref()
                            .unchecked_ref(),
                    ) {
                        attachment_loop.borrow_mut().set_frame(id);
                    }
                }) as Box<dyn FnMut()>));
                if let Ok(id) = window.request_animation_frame(
                    closure_cell
                        .borrow()
                        .as_ref()
                        .unwrap()
                        .as_ref()
                        .unchecked_ref(),
                ) {
                    attachment.borrow_mut().set_frame(id);
                }
            }

            // Wheel zoom, anchored at the cursor. The transform sequence
            // from the zoom step is applied to the context in order; the
            // next tick draws under the accumulated transform.
            let wheel_cb: WheelClosure = {
                let viewport = viewport.clone();
                let canvas_wheel = canvas.clone();
                Closure::wrap(Box::new(move |e: WheelEvent| {
                    e.prevent_default();
                    let Some(ctx) = context_of(&canvas_wheel) else {
                        return;
                    };
                    let cursor_x = e.offset_x() as f64;
                    let cursor_y = e.offset_y() as f64;
                    let dir = ZoomDirection::from_delta_y(e.delta_y());
                    let mut vp = viewport.borrow_mut();
                    if let Some(step) = vp.zoom_at(cursor_x, cursor_y, dir) {
                        ctx.translate(step.pre_translate.0, step.pre_translate.1).ok();
                        ctx.scale(step.factor, step.factor).ok();
                        ctx.translate(step.post_translate.0, step.post_translate.1).ok();
                    }
                }) as Box<dyn FnMut(WheelEvent)>)
            };
            canvas
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .ok();
            attachment.borrow_mut().set_listener(wheel_cb);

            // Cleanup
            let canvas_cleanup = canvas.clone();
            let window_cleanup = window.clone();
            let attachment_cleanup = attachment.clone();
            move || {
                let (listeners, frames) = attachment_cleanup.borrow_mut().teardown(
                    |cb: &WheelClosure| {
                        let _ = canvas_cleanup.remove_event_listener_with_callback(
                            "wheel",
                            cb.as_ref().unchecked_ref(),
                        );
                    },
                    |id| {
                        let _ = window_cleanup.cancel_animation_frame(*id);
                    },
                );
                log::debug!("viewer teardown: {listeners} listener(s), {frames} frame(s)");
                let _keep_alive = (&closure_cell, &onload, &onerror);
            }
        });
    }

    // Reset view button
    let reset_cb: Callback<()> = {
        let canvas_ref = canvas_ref.clone();
        let viewport = viewport.clone();
        let draw_ref = draw_ref.clone();
        Callback::from(move |()| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                if let Some(ctx) = context_of(&canvas) {
                    let mut vp = viewport.borrow_mut();
                    // Full-canvas clear under the old transform, then back
                    // to identity and the canonical view.
                    ctx.clear_rect(vp.origin_x, vp.origin_y, vp.width(), vp.height());
                    ctx.reset_transform().ok();
                    vp.reset();
                }
                if let Some(f) = &*draw_ref.borrow() {
                    f();
                }
            }
        })
    };

    html! {
        <div style="position:relative; display:inline-block;">
            <canvas ref={canvas_ref} style="border:1px solid #30363d; display:block;" />
            <ViewerControls on_reset={reset_cb} />
        </div>
    }
}

fn context_of(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
}
