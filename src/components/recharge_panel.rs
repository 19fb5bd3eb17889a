use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct RechargePanelProps {
    /// Returns true when the amount was accepted, which clears the input.
    pub on_recharge: Callback<String, bool>,
}

#[function_component(RechargePanel)]
pub fn recharge_panel(props: &RechargePanelProps) -> Html {
    let amount = use_state(String::new);
    let oninput = {
        let amount = amount.clone();
        Callback::from(move |e: InputEvent| {
            amount.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let submit = {
        let amount = amount.clone();
        let cb = props.on_recharge.clone();
        Callback::from(move |_| {
            if cb.emit((*amount).clone()) {
                amount.set(String::new());
            }
        })
    };
    html! {<div style="display:flex; gap:8px; padding:10px 14px;">
        <input id="recharge-input" type="number" min="1" placeholder="Amount"
            value={(*amount).clone()} {oninput}
            style="flex:1; padding:8px; background:#0e1116; color:#fff; border:1px solid #30363d; border-radius:8px;" />
        <button onclick={submit}>{"Recharge"}</button>
    </div>}
}
