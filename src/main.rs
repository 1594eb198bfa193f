use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod app;
mod config;
mod error;
mod timers;
mod utils;

mod components {
    pub mod header;
    pub mod hero_carousel;
    pub mod micro;
    pub mod mobile_menu;
    pub mod privacy_modal;
    pub mod scroll_reveal;
    pub mod scroll_to_top;
    pub mod smooth_scroll;
    pub mod whatsapp;
}

mod forms {
    pub mod dom;
    pub mod quote;
    pub mod success;
    pub mod validation;
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(app::init);
        let _ = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
    } else {
        info!("document already parsed, starting now");
        app::init();
    }
}
