use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent, Node};

use crate::config;
use crate::error::WidgetResult;
use crate::timers::{debounce, BrowserScheduler};
use crate::utils;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MenuEvent {
    Toggle,
    LinkPressed,
    Close,
    OutsideClick,
    Escape,
    Resized { width: f64 },
}

/// Next open/closed state for an event.
pub fn transition(open: bool, event: MenuEvent) -> bool {
    match event {
        MenuEvent::Toggle => !open,
        MenuEvent::LinkPressed
        | MenuEvent::Close
        | MenuEvent::OutsideClick
        | MenuEvent::Escape => false,
        MenuEvent::Resized { width } => open && width <= config::MOBILE_BREAKPOINT,
    }
}

pub fn icon_class(open: bool) -> &'static str {
    if open {
        "fas fa-times"
    } else {
        "fas fa-bars"
    }
}

pub struct MobileMenu {
    toggle: Element,
    panel: Element,
    body: HtmlElement,
    open: Cell<bool>,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn handle(&self, event: MenuEvent) {
        let open = transition(self.open.get(), event);
        if open != self.open.get() {
            self.open.set(open);
            self.render();
        }
    }

    pub fn close(&self) {
        self.handle(MenuEvent::Close);
    }

    fn render(&self) {
        let open = self.open.get();
        utils::set_class(&self.panel, "active", open);
        utils::set_class(&self.body, "menu-open", open);
        let _ = self
            .toggle
            .set_attribute("aria-expanded", if open { "true" } else { "false" });
        if let Some(icon) = utils::select_in(&self.toggle, "i") {
            icon.set_class_name(icon_class(open));
        }
    }

    fn contains(&self, target: Option<&Node>) -> bool {
        self.panel.contains(target) || self.toggle.contains(target)
    }
}

pub fn init() -> WidgetResult<Rc<MobileMenu>> {
    let toggle = utils::require("#nav-toggle")?;
    let panel = utils::require("#nav-menu")?;
    let menu = Rc::new(MobileMenu {
        toggle: toggle.clone(),
        panel,
        body: utils::body()?,
        open: Cell::new(false),
    });

    {
        let menu = menu.clone();
        utils::listen(&toggle, "click", move |_: MouseEvent| {
            menu.handle(MenuEvent::Toggle);
        })?;
    }

    for link in utils::select_all(".nav__link") {
        let menu = menu.clone();
        utils::listen(&link, "click", move |_: MouseEvent| {
            menu.handle(MenuEvent::LinkPressed);
        })?;
    }

    let document = utils::document()?;
    {
        let menu = menu.clone();
        utils::listen(&document, "click", move |event: MouseEvent| {
            if !menu.is_open() {
                return;
            }
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            if !menu.contains(target.as_ref()) {
                menu.handle(MenuEvent::OutsideClick);
            }
        })?;
    }
    {
        let menu = menu.clone();
        utils::listen(&document, "keydown", move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                menu.handle(MenuEvent::Escape);
            }
        })?;
    }
    {
        let resized = menu.clone();
        let mut on_resize = debounce(BrowserScheduler, config::RESIZE_DEBOUNCE_MS, move || {
            resized.handle(MenuEvent::Resized {
                width: utils::inner_width(),
            });
        });
        let window = utils::window()?;
        utils::listen(&window, "resize", move |_: web_sys::Event| on_resize())?;
    }

    debug!("mobile menu attached");
    Ok(menu)
}
