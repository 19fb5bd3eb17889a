use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsBarProps {
    pub selected: usize,
    pub remaining: usize,
    pub pay_enabled: bool,
    pub pay_label: String,
    pub direct_price: String,
    pub on_pay: Callback<()>,
    pub on_direct_purchase: Callback<()>,
}

#[function_component]
pub fn StatsBar(props: &StatsBarProps) -> Html {
    let pay_cb = {
        let cb = props.on_pay.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let buy_cb = {
        let cb = props.on_direct_purchase.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="display:flex; flex-direction:column; gap:8px; padding:10px 14px;">
        <div style="display:flex; justify-content:space-between; font-size:13px; opacity:0.85;">
            <span>{ format!("Selected: {}", props.selected) }</span>
            <span>{ format!("Remaining: {}", props.remaining) }</span>
        </div>
        <button id="btn-koko-pay" onclick={pay_cb} disabled={!props.pay_enabled}
            style="padding:12px; font-size:16px; font-weight:600; background:#FF2E93; color:#fff; border:none; border-radius:10px;">
            { props.pay_label.clone() }
        </button>
        <button onclick={buy_cb} style="padding:8px; font-size:13px;">
            { format!("Buy full set {}", props.direct_price) }
        </button>
    </div>}
}
