use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::config;
use crate::error::WidgetResult;
use crate::timers::{debounce, BrowserScheduler};
use crate::utils;

pub fn is_visible(offset: f64) -> bool {
    offset > config::SCROLL_TOP_VISIBLE_AFTER
}

const BUTTON_STYLE: &str = "position: fixed; bottom: 100px; right: 30px; width: 50px; height: 50px; \
    background: linear-gradient(135deg, #0A2463 0%, #1E3A8A 100%); color: white; border: none; \
    border-radius: 50%; font-size: 1.25rem; cursor: pointer; transition: all 0.3s ease; \
    z-index: 1020; box-shadow: 0 4px 15px rgba(10, 36, 99, 0.3);";

#[function_component(ScrollToTop)]
pub fn scroll_to_top() -> Html {
    let visible = use_state(|| is_visible(utils::scroll_y()));

    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let mut update = debounce(BrowserScheduler, config::SCROLL_TOP_DEBOUNCE_MS, move || {
                    visible.set(is_visible(utils::scroll_y()));
                });
                let scroll_callback = Closure::<dyn FnMut()>::new(move || update());
                if let Some(window) = &window {
                    let _ = window.add_event_listener_with_callback(
                        "scroll",
                        scroll_callback.as_ref().unchecked_ref(),
                    );
                }
                move || {
                    if let Some(window) = window {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            scroll_callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    let onclick = Callback::from(|_: MouseEvent| utils::scroll_to_smooth(0.0));

    let style = if *visible {
        format!("{} opacity: 1; visibility: visible;", BUTTON_STYLE)
    } else {
        format!("{} opacity: 0; visibility: hidden;", BUTTON_STYLE)
    };

    html! {
        <button class="scroll-to-top" aria-label="Voltar ao topo" {style} {onclick}>
            <i class="fas fa-arrow-up"></i>
        </button>
    }
}

/// Mounts the button into its own host at the end of the body.
pub fn init() -> WidgetResult<()> {
    let document = utils::document()?;
    let host = document.create_element("div")?;
    host.set_class_name("scroll-to-top-host");
    utils::body()?.append_child(&host)?;
    yew::Renderer::<ScrollToTop>::with_root(host).render();
    debug!("scroll to top mounted");
    Ok(())
}
