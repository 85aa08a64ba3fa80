use wasm_bindgen_futures::spawn_local;

use crate::elements::app_root::app_root;
use crate::screen::Screen;
use crate::state::App;

pub mod browser_clock;
pub mod connect_fetch;
pub mod constants;
pub mod dialog;
pub mod elements;
pub mod local_storage;
pub mod records;
pub mod screen;
pub mod state;
pub mod utils;

/// Mounts the application for `R` on `<body>` and restores any saved session.
pub fn run<R: Screen>() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let app = App::<R>::new();
    dominator::append_dom(&dominator::body(), app_root(app.clone()));

    spawn_local(async move {
        if let Err(err) = app.controller.start().await {
            log::error!("start: {:?}", err);
            app.failure(&err);
        }
    });
}
