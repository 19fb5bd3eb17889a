//! Browser-backed implementations of the game's seams: timers, confetti,
//! console logging and entropy.

use std::cell::Cell;
use std::io;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use crate::config::GameConfig;
use crate::draw::schedule::{CompleteFn, Schedule, Scheduler, TickFn};
use crate::effects::{Celebration, ConfettiBurst, EffectError};

/// `setInterval`/`setTimeout` scheduler. Holds the interval closure so it lives
/// exactly as long as the task; one-shot callbacks are handed to JS.
#[derive(Default)]
pub struct WebScheduler {
    interval: Option<(i32, Closure<dyn FnMut()>)>,
    interval_id: Rc<Cell<Option<i32>>>,
    timeout_id: Rc<Cell<Option<i32>>>,
}

impl Scheduler for WebScheduler {
    fn start(&mut self, schedule: Schedule, mut on_tick: TickFn, on_complete: CompleteFn) {
        self.cancel();
        let Some(window) = web_sys::window() else {
            warn!("no window, draw timer not started");
            return;
        };
        if schedule.ticks == 0 {
            let timeout_id = self.timeout_id.clone();
            let cb = Closure::once_into_js(move || {
                timeout_id.set(None);
                on_complete();
            });
            let id = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.unchecked_ref(),
                schedule.period_ms as i32,
            );
            self.timeout_id.set(id.ok());
            return;
        }

        let interval_id = self.interval_id.clone();
        let timeout_id = self.timeout_id.clone();
        let window_cb = window.clone();
        let mut fired = 0u32;
        let mut on_complete = Some(on_complete);
        let tick = Closure::wrap(Box::new(move || {
            if fired >= schedule.ticks {
                return;
            }
            fired += 1;
            on_tick();
            if fired < schedule.ticks {
                return;
            }
            if let Some(id) = interval_id.take() {
                window_cb.clear_interval_with_handle(id);
            }
            // Completion runs outside this closure so it may restart the scheduler.
            if let Some(done) = on_complete.take() {
                let fired_id = timeout_id.clone();
                let cb = Closure::once_into_js(move || {
                    fired_id.set(None);
                    done();
                });
                let id = window_cb
                    .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), 0);
                timeout_id.set(id.ok());
            }
        }) as Box<dyn FnMut()>);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            schedule.period_ms as i32,
        ) {
            Ok(id) => {
                self.interval_id.set(Some(id));
                self.interval = Some((id, tick));
            }
            Err(err) => warn!(?err, "setInterval failed"),
        }
    }

    fn cancel(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some((id, _closure)) = self.interval.take() {
            window.clear_interval_with_handle(id);
        }
        self.interval_id.set(None);
        if let Some(id) = self.timeout_id.take() {
            window.clear_timeout_with_handle(id);
        }
    }

    fn is_active(&self) -> bool {
        self.interval_id.get().is_some() || self.timeout_id.get().is_some()
    }
}

/// Calls the page-global `confetti(options)` function.
pub struct ConfettiCannon;

fn js_error(value: JsValue) -> EffectError {
    EffectError(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

impl Celebration for ConfettiCannon {
    fn celebrate(&self, burst: &ConfettiBurst) -> Result<(), EffectError> {
        let window = web_sys::window().ok_or_else(|| EffectError("no window".into()))?;
        let func = js_sys::Reflect::get(&window, &JsValue::from_str("confetti")).map_err(js_error)?;
        let func: js_sys::Function = func
            .dyn_into()
            .map_err(|_| EffectError("confetti is not loaded".into()))?;
        let json = serde_json::to_string(burst).map_err(|e| EffectError(e.to_string()))?;
        let options = js_sys::JSON::parse(&json).map_err(js_error)?;
        func.call1(&JsValue::NULL, &options).map_err(js_error)?;
        Ok(())
    }
}

/// Buffers one formatted event and prints it on drop.
#[derive(Default)]
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
    }
}

pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let res = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(ConsoleWriter::default)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init();
    if let Err(err) = res {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger not installed: {err}")));
    }
}

/// Reads an optional `<script id="game-config" type="application/json">` override.
pub fn load_config() -> GameConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("game-config"))
        .and_then(|el| el.text_content());
    match raw {
        Some(raw) if !raw.trim().is_empty() => match GameConfig::from_json(&raw) {
            Ok(cfg) => cfg,
            Err(err) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!("{err}, using defaults")));
                GameConfig::default()
            }
        },
        _ => GameConfig::default(),
    }
}

pub fn seeded_rng() -> SmallRng {
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let now = js_sys::Date::now() as u64;
    SmallRng::seed_from_u64(noise ^ (now << 20))
}

/// Short haptic pulse, where the device supports it.
pub fn vibrate(ms: u32) {
    if let Some(window) = web_sys::window() {
        let _ = window.navigator().vibrate_with_duration(ms);
    }
}
