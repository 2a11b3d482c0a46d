use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use super::viewer::Viewer;
use crate::model::ViewerConfig;

/// Top-level component. Owns the viewer config; a window resize discards
/// the running viewer and rebuilds it at 70% of the window width x 500.
#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(|| ViewerConfig::with_size(500.0, 500.0));

    {
        let config = config.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let resize_cb = {
                let config = config.clone();
                Closure::wrap(Box::new(move || {
                    let width = web_sys::window()
                        .and_then(|w| w.inner_width().ok())
                        .and_then(|v| v.as_f64())
                        .unwrap_or(500.0);
                    config.set(ViewerConfig::with_size(width * 0.7, 500.0));
                }) as Box<dyn FnMut()>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();
            let window_clone = window.clone();
            move || {
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                let _keep_alive = &resize_cb;
            }
        });
    }

    html! {
        <div style="padding:12px;">
            <h2>{ "Reading room seat map" }</h2>
            <Viewer config={(*config).clone()} />
        </div>
    }
}
