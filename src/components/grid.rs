use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::TouchEvent;
use yew::prelude::*;

use crate::state::{DragState, Pointer};

#[derive(Properties, PartialEq, Clone)]
pub struct GridProps {
    pub selected: Vec<bool>,
    /// Emits `(index, desired membership)` for every cell the pointer paints.
    pub on_toggle: Callback<(usize, bool)>,
}

// Resolves the cell under the first touch point to its index
fn cell_under_touch(e: &TouchEvent) -> Option<usize> {
    let touch = e.touches().get(0)?;
    let document = web_sys::window()?.document()?;
    let target = document.element_from_point(touch.client_x() as f32, touch.client_y() as f32)?;
    let cell = target.closest(".grid-cell").ok()??;
    cell.get_attribute("data-idx")?.parse().ok()
}

fn begin_drag(
    drag: &Rc<RefCell<DragState>>,
    pointer: Pointer,
    selected: &[bool],
    idx: usize,
    on_toggle: &Callback<(usize, bool)>,
) {
    let currently = selected.get(idx).copied().unwrap_or(false);
    let target = drag.borrow_mut().begin(pointer, idx, currently);
    if let Some(on) = target {
        on_toggle.emit((idx, on));
    }
}

fn continue_drag(drag: &Rc<RefCell<DragState>>, idx: usize, on_toggle: &Callback<(usize, bool)>) {
    let next = drag.borrow().enter();
    if let Some(on) = next {
        on_toggle.emit((idx, on));
    }
}

#[function_component(Grid)]
pub fn grid(props: &GridProps) -> Html {
    let drag = use_mut_ref(DragState::default);

    // Releasing anywhere on the page ends a drag.
    {
        let drag = drag.clone();
        use_effect_with((), move |_| {
            let document = web_sys::window().and_then(|w| w.document());
            let end_cb = Closure::wrap(Box::new(move |_e: web_sys::Event| {
                drag.borrow_mut().end();
            }) as Box<dyn FnMut(_)>);
            if let Some(doc) = &document {
                for ev in ["mouseup", "touchend", "touchcancel"] {
                    let _ = doc.add_event_listener_with_callback(ev, end_cb.as_ref().unchecked_ref());
                }
            }
            move || {
                if let Some(doc) = &document {
                    for ev in ["mouseup", "touchend", "touchcancel"] {
                        let _ = doc.remove_event_listener_with_callback(
                            ev,
                            end_cb.as_ref().unchecked_ref(),
                        );
                    }
                }
                drop(end_cb);
            }
        });
    }

    let ontouchstart = {
        let drag = drag.clone();
        let selected = props.selected.clone();
        let cb = props.on_toggle.clone();
        Callback::from(move |e: TouchEvent| {
            // Stops the emulated mouse events a tap would otherwise produce.
            e.prevent_default();
            if let Some(idx) = cell_under_touch(&e) {
                begin_drag(&drag, Pointer::Touch, &selected, idx, &cb);
            }
        })
    };
    let ontouchmove = {
        let drag = drag.clone();
        let cb = props.on_toggle.clone();
        Callback::from(move |e: TouchEvent| {
            e.prevent_default();
            if let Some(idx) = cell_under_touch(&e) {
                continue_drag(&drag, idx, &cb);
            }
        })
    };

    let cells = props.selected.iter().enumerate().map(|(idx, &on)| {
        let onmousedown = {
            let drag = drag.clone();
            let selected = props.selected.clone();
            let cb = props.on_toggle.clone();
            Callback::from(move |_: MouseEvent| {
                begin_drag(&drag, Pointer::Mouse, &selected, idx, &cb)
            })
        };
        let onmouseenter = {
            let drag = drag.clone();
            let cb = props.on_toggle.clone();
            Callback::from(move |_: MouseEvent| continue_drag(&drag, idx, &cb))
        };
        let style = if on {
            "aspect-ratio:1; display:flex; align-items:center; justify-content:center; border-radius:6px; font-size:13px; user-select:none; background:#FF2E93; color:#fff; border:1px solid #FF2E93;"
        } else {
            "aspect-ratio:1; display:flex; align-items:center; justify-content:center; border-radius:6px; font-size:13px; user-select:none; background:#1c2128; color:#c9d1d9; border:1px solid #30363d;"
        };
        html! {
            <div class={classes!("grid-cell", on.then_some("selected"))} data-idx={idx.to_string()}
                {style} {onmousedown} {onmouseenter}>
                { idx + 1 }
            </div>
        }
    });

    // Scrolling is disabled on the grid (touch-action) so touch drags paint cells instead.
    let columns = (props.selected.len() as f64).sqrt().ceil().max(1.0) as usize;
    let grid_style = format!(
        "display:grid; grid-template-columns:repeat({columns}, 1fr); gap:6px; padding:10px 14px; touch-action:none;"
    );
    html! {
        <div id="grid-root" {ontouchstart} {ontouchmove} style={grid_style}>
            { for cells }
        </div>
    }
}
