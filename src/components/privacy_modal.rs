use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, HtmlElement, KeyboardEvent, MouseEvent};

use crate::config;
use crate::error::WidgetResult;
use crate::timers::{BrowserScheduler, Scheduler};
use crate::utils;

const OPENERS: &str = "#open-privacy-modal, #open-privacy-modal-footer, [href=\"#politica-privacidade\"]";
const CLOSERS: &str = "#close-privacy-modal, #close-privacy-modal-btn";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ModalEvent {
    Open,
    Close,
    Escape,
    /// `on_overlay` is false when the click started inside the dialog.
    OverlayClick { on_overlay: bool },
}

/// Next open/closed state for an event.
pub fn transition(open: bool, event: ModalEvent) -> bool {
    match event {
        ModalEvent::Open => true,
        ModalEvent::Close | ModalEvent::Escape => false,
        ModalEvent::OverlayClick { on_overlay } => open && !on_overlay,
    }
}

pub struct PrivacyModal {
    modal: Element,
    body: HtmlElement,
    open: Cell<bool>,
}

impl PrivacyModal {
    /// Applies an event; the DOM is only touched when the state changes.
    pub fn handle(&self, event: ModalEvent) {
        let open = transition(self.open.get(), event);
        if open == self.open.get() {
            return;
        }
        self.open.set(open);
        if open {
            self.show();
        } else {
            self.hide();
        }
    }

    fn show(&self) {
        utils::add_class(&self.modal, "active");
        utils::add_class(&self.body, "modal-open");
        let _ = self.modal.set_attribute("aria-hidden", "false");

        // Focus lands on the close button once the dialog is painted.
        if let Some(close) = utils::select_in(&self.modal, "#close-privacy-modal") {
            BrowserScheduler.after(config::MODAL_FOCUS_DELAY_MS, move || utils::focus(&close));
        }
    }

    fn hide(&self) {
        utils::remove_class(&self.modal, "active");
        utils::remove_class(&self.body, "modal-open");
        let _ = self.modal.set_attribute("aria-hidden", "true");
    }
}

/// Overlay clicks close only when they hit the overlay itself, not the dialog inside it.
pub fn is_overlay_hit(target: Option<&EventTarget>, overlay: &Element) -> bool {
    target
        .and_then(|t| t.dyn_ref::<Element>())
        .map_or(false, |el| el == overlay)
}

pub fn init() -> WidgetResult<()> {
    let modal = utils::require("#privacy-modal")?;
    let controller = Rc::new(PrivacyModal {
        modal,
        body: utils::body()?,
        open: Cell::new(false),
    });

    for opener in utils::select_all(OPENERS) {
        let controller = controller.clone();
        utils::listen(&opener, "click", move |event: MouseEvent| {
            event.prevent_default();
            controller.handle(ModalEvent::Open);
        })?;
    }

    for closer in utils::select_all(CLOSERS) {
        let controller = controller.clone();
        utils::listen(&closer, "click", move |_: MouseEvent| {
            controller.handle(ModalEvent::Close)
        })?;
    }

    if let Some(overlay) = utils::select("#privacy-modal-overlay") {
        let controller = controller.clone();
        let target_overlay = overlay.clone();
        utils::listen(&overlay, "click", move |event: MouseEvent| {
            controller.handle(ModalEvent::OverlayClick {
                on_overlay: is_overlay_hit(event.target().as_ref(), &target_overlay),
            });
        })?;
    }

    let document = utils::document()?;
    utils::listen(&document, "keydown", move |event: KeyboardEvent| {
        if event.key() == "Escape" {
            controller.handle(ModalEvent::Escape);
        }
    })?;

    debug!("privacy modal attached");
    Ok(())
}
