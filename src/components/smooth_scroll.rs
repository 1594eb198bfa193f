use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Element, MouseEvent};

use crate::components::mobile_menu::MobileMenu;
use crate::config;
use crate::error::WidgetResult;
use crate::utils;

/// Element id an in-page link points at, if the link should be intercepted.
pub fn fragment_id(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some("") | None => None,
        Some(id) => Some(id),
    }
}

fn handle_click(event: &MouseEvent, menu: Option<&MobileMenu>) -> WidgetResult<()> {
    let Some(link) = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest("a[href^=\"#\"]").ok().flatten())
    else {
        return Ok(());
    };
    let Some(href) = link.get_attribute("href") else {
        return Ok(());
    };
    let Some(id) = fragment_id(&href) else {
        return Ok(());
    };

    event.prevent_default();

    let document = utils::document()?;
    let Some(target) = document.get_element_by_id(id) else {
        debug!("no section for #{}", id);
        return Ok(());
    };
    utils::smooth_scroll_to(Some(&target), config::SCROLL_OFFSET);

    let history = utils::window()?.history()?;
    history.push_state_with_url(&JsValue::NULL, "", Some(&href))?;

    if let Some(menu) = menu {
        menu.close();
    }
    Ok(())
}

pub fn init(menu: Option<Rc<MobileMenu>>) -> WidgetResult<()> {
    let document = utils::document()?;
    utils::listen(&document, "click", move |event: MouseEvent| {
        if let Err(e) = handle_click(&event, menu.as_deref()) {
            warn!("smooth scroll failed: {}", e);
        }
    })?;
    debug!("smooth scroll attached");
    Ok(())
}
