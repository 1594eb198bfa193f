use std::cell::RefCell;

use log::debug;
use web_sys::Element;

use crate::config;
use crate::error::WidgetResult;
use crate::timers::{debounce, BrowserScheduler};
use crate::utils;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderLook {
    pub scrolled: bool,
    pub hidden: bool,
}

/// Remembers only the previous scroll sample.
#[derive(Debug, Default)]
pub struct HeaderState {
    last_offset: f64,
}

impl HeaderState {
    pub fn observe(&mut self, offset: f64) -> HeaderLook {
        let look = HeaderLook {
            scrolled: offset > config::HEADER_SCROLL_THRESHOLD,
            hidden: offset > self.last_offset && offset > config::HEADER_HIDE_DEPTH,
        };
        self.last_offset = offset;
        look
    }
}

fn paint(header: &Element, look: HeaderLook) {
    utils::set_class(header, "scrolled", look.scrolled);
    utils::set_class(header, "header-hidden", look.hidden);
}

pub fn init() -> WidgetResult<()> {
    let header = utils::require(".header")?;
    let window = utils::window()?;
    let state = RefCell::new(HeaderState::default());

    let mut on_scroll = debounce(BrowserScheduler, config::HEADER_DEBOUNCE_MS, move || {
        let look = state.borrow_mut().observe(utils::scroll_y());
        paint(&header, look);
    });
    utils::listen(&window, "scroll", move |_: web_sys::Event| on_scroll())?;

    debug!("dynamic header attached");
    Ok(())
}
