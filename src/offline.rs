//! Offline support: registration of the service worker and management of the
//! versioned cache it serves from. The worker script (`static/sw.js`) only
//! answers fetches; filling and pruning caches happens here.

use js_sys::{Array, Promise};
use tracing::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Cache, CacheStorage, ServiceWorkerRegistration};

/// Bump when the asset list changes so older caches are pruned.
pub const CACHE_NAME: &str = "koko-pwa-v2-github";

pub const SERVICE_WORKER_URL: &str = "./sw.js";

/// Pre-fetched into [`CACHE_NAME`] once the worker is registered. The worker
/// serves these (and anything else cached) before falling back to the network.
pub const ASSETS: &[&str] = &[
    "./",
    "./index.html",
    "https://cdn.jsdelivr.net/npm/canvas-confetti@1.6.0/dist/confetti.browser.min.js",
];

/// Cache names to delete when the current worker activates.
pub fn stale_caches<'a>(existing: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    existing.into_iter().filter(|name| *name != CACHE_NAME).collect()
}

// Runs `ok` when the promise resolves and logs a rejection. JS owns both closures.
fn on_settled(promise: &Promise, step: &'static str, ok: impl FnOnce(JsValue) + 'static) {
    let ok = Closure::once(ok);
    let failed = Closure::once(move |err: JsValue| {
        warn!(?err, step, "offline step failed");
    });
    let _ = promise.then2(&ok, &failed);
    ok.forget();
    failed.forget();
}

/// Fills the current cache and drops every older one.
fn refresh_cache(caches: CacheStorage) {
    let assets: Array = ASSETS.iter().map(|a| JsValue::from_str(a)).collect();
    on_settled(&caches.open(CACHE_NAME), "open cache", move |cache| {
        let cache: Cache = cache.unchecked_into();
        on_settled(
            &cache.add_all_with_str_sequence(&assets),
            "cache assets",
            |_| info!(cache = CACHE_NAME, assets = ASSETS.len(), "offline assets cached"),
        );
    });
    let storage = caches.clone();
    on_settled(&caches.keys(), "list caches", move |keys| {
        let names: Vec<String> = Array::from(&keys).iter().filter_map(|k| k.as_string()).collect();
        for name in stale_caches(names.iter().map(String::as_str)) {
            info!(name, "removing stale cache");
            let _ = storage.delete(name);
        }
    });
}

/// Registers the offline worker, then refreshes the asset cache. Failure only
/// costs offline support.
pub fn register_service_worker() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let container = window.navigator().service_worker();
    if container.is_undefined() {
        warn!("service workers unsupported");
        return;
    }
    let caches = match window.caches() {
        Ok(caches) => caches,
        Err(err) => {
            warn!(?err, "cache storage unavailable");
            return;
        }
    };
    on_settled(
        &container.register(SERVICE_WORKER_URL),
        "register service worker",
        move |reg| {
            let scope = reg
                .dyn_into::<ServiceWorkerRegistration>()
                .map(|r| r.scope())
                .unwrap_or_default();
            info!(%scope, "service worker registered");
            refresh_cache(caches);
        },
    );
}
