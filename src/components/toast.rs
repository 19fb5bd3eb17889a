use yew::prelude::*;

use crate::session::{Notice, NoticeKind};

#[derive(Properties, PartialEq, Clone)]
pub struct ToastProps {
    pub notice: Option<Notice>,
}

#[function_component]
pub fn Toast(props: &ToastProps) -> Html {
    let Some(notice) = &props.notice else {
        return html! {};
    };
    let border = match notice.kind {
        NoticeKind::Info => "#2ea043",
        NoticeKind::Error => "#f85149",
    };
    html! {
        <div id="toast" style={format!("position:fixed; left:50%; bottom:32px; transform:translateX(-50%); background:rgba(0,0,0,0.85); border:1px solid {}; color:#fff; padding:8px 16px; border-radius:20px; font-size:13px; z-index:100;", border)}>
            { notice.text.clone() }
        </div>
    }
}
