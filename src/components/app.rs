use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use super::{
    draw_modal::DrawModal, grid::Grid, header::Header, recharge_panel::RechargePanel,
    registration_modal::{RegistrationForm, RegistrationModal}, stats_bar::StatsBar, toast::Toast,
};
use crate::browser::{self, ConfettiCannon, WebScheduler};
use crate::config::GameConfig;
use crate::draw::DrawSink;
use crate::session::SessionController;
use crate::util::format_currency;

pub type BrowserSession = SessionController<WebScheduler, ConfettiCannon>;

/// Wraps a session mutation so the component re-renders after it.
fn session_action<IN: 'static, OUT: 'static>(
    session: &Rc<RefCell<BrowserSession>>,
    force: &UseForceUpdateHandle,
    f: impl Fn(&mut BrowserSession, IN) -> OUT + 'static,
) -> Callback<IN, OUT> {
    let session = session.clone();
    let force = force.clone();
    Callback::from(move |input: IN| {
        let out = f(&mut session.borrow_mut(), input);
        force.force_update();
        out
    })
}

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub config: GameConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let force = use_force_update();
    let session = use_mut_ref(|| {
        SessionController::new(
            props.config.clone(),
            WebScheduler::default(),
            ConfettiCannon,
            browser::seeded_rng(),
        )
    });

    // Route draw timer callbacks back into the session; cancel them on unmount.
    {
        let session = session.clone();
        let force = force.clone();
        use_effect_with((), move |_| {
            let weak = Rc::downgrade(&session);
            let sink: DrawSink = Rc::new(move |signal| {
                if let Some(session) = weak.upgrade() {
                    session.borrow_mut().handle_signal(signal);
                    force.force_update();
                }
            });
            session.borrow_mut().connect(sink);
            move || session.borrow_mut().on_reset()
        });
    }

    let view = session.borrow().view();
    let notice_ms = session.borrow().config().notice_ms;
    let direct_price = format_currency(session.borrow().config().direct_purchase_price);

    // Auto-dismiss the current notice; a newer notice restarts the countdown.
    {
        let session = session.clone();
        let force = force.clone();
        let seq = view.notice.as_ref().map(|n| n.seq);
        use_effect_with(seq, move |seq| {
            let window = web_sys::window();
            let mut timeout = None;
            if let (Some(seq), Some(win)) = (*seq, &window) {
                let cb = Closure::once_into_js(move || {
                    session.borrow_mut().dismiss_notice(seq);
                    force.force_update();
                });
                timeout = win
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        cb.unchecked_ref(),
                        notice_ms as i32,
                    )
                    .ok();
            }
            move || {
                if let (Some(id), Some(win)) = (timeout, window) {
                    win.clear_timeout_with_handle(id);
                }
            }
        });
    }

    let on_toggle = session_action(&session, &force, |s, (idx, on): (usize, bool)| {
        if let Ok(true) = s.toggle_cell(idx, on) {
            browser::vibrate(5);
        }
    });
    let on_recharge = session_action(&session, &force, |s, amount: String| {
        s.on_recharge(&amount).is_ok()
    });
    let on_register = session_action(&session, &force, |s, form: RegistrationForm| {
        let _ = s.on_register(&form.name, &form.phone, &form.email);
    });
    let on_close_registration = session_action(&session, &force, |s, _: ()| {
        s.close_registration();
    });
    let on_pay = session_action(&session, &force, |s, _: ()| {
        let _ = s.on_pay();
    });
    let on_direct_purchase = session_action(&session, &force, |s, _: ()| {
        let _ = s.on_direct_purchase();
    });
    let on_finish = session_action(&session, &force, |s, _: ()| s.on_reset());

    html! {
        <div id="root" style="max-width:480px; margin:0 auto; min-height:100vh; background:#0e1116; color:#c9d1d9;">
            <Header
                balance={view.balance_display.clone()}
                points={view.points_display.clone()}
                total={format_currency(view.current_cost)}
            />
            <RechargePanel {on_recharge} />
            <Grid selected={view.selected.clone()} {on_toggle} />
            <StatsBar
                selected={view.selected_count}
                remaining={view.remaining_count}
                pay_enabled={view.pay_enabled}
                pay_label={view.pay_label.clone()}
                {direct_price}
                {on_pay}
                {on_direct_purchase}
            />
            <DrawModal draw={view.draw.clone()} {on_finish} />
            <RegistrationModal
                show={view.registration_open}
                on_submit={on_register}
                on_close={on_close_registration}
            />
            <Toast notice={view.notice.clone()} />
        </div>
    }
}
