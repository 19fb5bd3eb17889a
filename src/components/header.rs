use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HeaderProps {
    pub balance: String,
    pub points: String,
    pub total: String,
}

#[function_component]
pub fn Header(props: &HeaderProps) -> Html {
    let cell_style = "display:flex; flex-direction:column; align-items:center; gap:2px;";
    let label_style = "font-size:11px; opacity:0.7; text-transform:uppercase; letter-spacing:0.06em;";
    let value_style = "font-size:18px; font-weight:600; font-variant-numeric:tabular-nums;";
    html! {
        <div id="top-bar" style="display:flex; justify-content:space-around; align-items:center; padding:10px 14px; background:rgba(22,27,34,0.95); border-bottom:1px solid #30363d;">
            <div style={cell_style}>
                <span style={label_style}>{"Balance"}</span>
                <span style={format!("{} color:#00F0FF;", value_style)}>{ props.balance.clone() }</span>
            </div>
            <div style={cell_style}>
                <span style={label_style}>{"Points"}</span>
                <span style={format!("{} color:#FFD700;", value_style)}>{ props.points.clone() }</span>
            </div>
            <div style={cell_style}>
                <span style={label_style}>{"Total"}</span>
                <span style={format!("{} color:#FF2E93;", value_style)}>{ props.total.clone() }</span>
            </div>
        </div>
    }
}
