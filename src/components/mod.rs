pub mod app;
pub mod draw_modal;
pub mod grid;
pub mod header;
pub mod recharge_panel;
pub mod registration_modal;
pub mod stats_bar;
pub mod toast;

pub use app::{App, AppProps};
