use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ViewerControlsProps {
    pub on_reset: Callback<()>,
}

#[function_component(ViewerControls)]
pub fn viewer_controls(props: &ViewerControlsProps) -> Html {
    let reset = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; left:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:6px; align-items:center;">
        <button onclick={reset} id="resetBtn">{ "Reset view" }</button>
    </div>}
}
