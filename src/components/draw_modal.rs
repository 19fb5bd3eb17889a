use yew::prelude::*;

use crate::session::{DrawStatus, DrawView};

#[derive(Properties, PartialEq, Clone)]
pub struct DrawModalProps {
    pub draw: DrawView,
    pub on_finish: Callback<()>,
}

#[function_component(DrawModal)]
pub fn draw_modal(props: &DrawModalProps) -> Html {
    let draw = &props.draw;
    if !draw.visible {
        return html! {};
    }
    let finish_cb = {
        let cb = props.on_finish.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let ball_style = if draw.winner_marker {
        "width:120px; height:120px; border-radius:50%; display:flex; align-items:center; justify-content:center; font-size:48px; font-weight:700; background:#FFD700; color:#161b22; box-shadow:0 0 32px #FFD700;"
    } else {
        "width:120px; height:120px; border-radius:50%; display:flex; align-items:center; justify-content:center; font-size:48px; font-weight:700; background:#1c2128; color:#fff; border:2px solid #30363d;"
    };
    let status_color = match draw.status {
        DrawStatus::Won => "#FFD700",
        _ => "#fff",
    };
    html! {
        <div id="order-modal" style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.7); z-index:50;">
            <div style="background:#161b22; border:1px solid #30363d; border-radius:14px; padding:24px 32px; min-width:280px; display:flex; flex-direction:column; align-items:center; gap:16px;">
                <div id="lucky-ball" style={ball_style}>
                    { draw.number.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string()) }
                </div>
                <div id="draw-status" style={format!("font-size:16px; color:{};", status_color)}>{ draw.status.text() }</div>
                if draw.finish_visible {
                    <button id="btn-finish" onclick={finish_cb}>{"Finish"}</button>
                }
            </div>
        </div>
    }
}
