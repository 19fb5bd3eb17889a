use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Properties, PartialEq, Clone)]
pub struct RegistrationModalProps {
    pub show: bool,
    pub on_submit: Callback<RegistrationForm>,
    pub on_close: Callback<()>,
}

fn field_input(value: &UseStateHandle<String>) -> Callback<InputEvent> {
    let value = value.clone();
    Callback::from(move |e: InputEvent| {
        value.set(e.target_unchecked_into::<HtmlInputElement>().value());
    })
}

#[function_component(RegistrationModal)]
pub fn registration_modal(props: &RegistrationModalProps) -> Html {
    let name = use_state(String::new);
    let phone = use_state(String::new);
    let email = use_state(String::new);
    if !props.show {
        return html! {};
    }
    let submit_cb = {
        let cb = props.on_submit.clone();
        let (name, phone, email) = (name.clone(), phone.clone(), email.clone());
        Callback::from(move |_| {
            cb.emit(RegistrationForm {
                name: (*name).clone(),
                phone: (*phone).clone(),
                email: (*email).clone(),
            })
        })
    };
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let input_style = "padding:8px; background:#0e1116; color:#fff; border:1px solid #30363d; border-radius:8px;";
    html! {<div id="reg-modal" style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:60;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:300px; display:flex; flex-direction:column; gap:10px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Register"}</h3>
                <button onclick={close_cb} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <input id="reg-name" placeholder="Name" style={input_style} value={(*name).clone()} oninput={field_input(&name)} />
            <input id="reg-phone" placeholder="Phone" style={input_style} value={(*phone).clone()} oninput={field_input(&phone)} />
            <input id="reg-email" placeholder="Email" style={input_style} value={(*email).clone()} oninput={field_input(&email)} />
            <button onclick={submit_cb}>{"Submit"}</button>
            <div style="font-size:11px; opacity:0.7;">{"Registration is required before recharging."}</div>
        </div>
    </div>}
}
