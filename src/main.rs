mod browser;
mod components;
mod config;
mod draw;
mod effects;
mod error;
mod offline;
mod pricing;
mod session;
mod state;
mod util;

use components::{App, AppProps};

fn main() {
    let config = browser::load_config();
    browser::init_logging(&config.log_filter);
    tracing::info!(cells = config.total_cells, "starting");
    yew::Renderer::<App>::with_props(AppProps { config }).render();
    offline::register_service_worker();
}
