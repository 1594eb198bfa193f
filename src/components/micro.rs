use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use web_sys::{Element, MouseEvent};

use crate::components::scroll_reveal;
use crate::config;
use crate::error::WidgetResult;
use crate::timers::{BrowserScheduler, Scheduler};
use crate::utils;

const STYLE_ID: &str = "ripple-styles";
const RIPPLE_TARGETS: &str = ".btn, .insurance-card__link, .nav__link";

const SHARED_STYLES: &str = r#"
    .btn {
        position: relative;
        overflow: hidden;
    }
    .ripple {
        position: absolute;
        border-radius: 50%;
        background: rgba(255, 255, 255, 0.5);
        transform: scale(0);
        animation: ripple-animation 0.6s ease-out;
        pointer-events: none;
    }
    @keyframes ripple-animation {
        to {
            transform: scale(4);
            opacity: 0;
        }
    }
    @keyframes slideInUp {
        from {
            opacity: 0;
            transform: translateY(30px);
        }
        to {
            opacity: 1;
            transform: translateY(0);
        }
    }
    .whatsapp-float.clicked {
        animation: bounce 0.3s ease-out;
    }
    @keyframes bounce {
        0%, 100% { transform: scale(1); }
        50% { transform: scale(0.9); }
    }
"#;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub diameter: f64,
    pub left: f64,
    pub top: f64,
}

impl Ripple {
    /// Circle as wide as the control's larger side, centred on the click.
    pub fn at(width: f64, height: f64, click_x: f64, click_y: f64, rect_left: f64, rect_top: f64) -> Self {
        let diameter = width.max(height);
        let radius = diameter / 2.0;
        Ripple {
            diameter,
            left: click_x - rect_left - radius,
            top: click_y - rect_top - radius,
        }
    }
}

/// The ripple attached to one control. A new click evicts the previous one.
#[derive(Debug)]
pub struct RippleSlot<T> {
    current: Option<T>,
}

impl<T: PartialEq> RippleSlot<T> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Stores `ripple` and hands back the one it displaces, which must be detached.
    pub fn replace(&mut self, ripple: T) -> Option<T> {
        self.current.replace(ripple)
    }

    /// Called when a ripple's animation ends. A ripple that was already
    /// evicted leaves the newer one in place.
    pub fn expire(&mut self, ripple: &T) {
        if self.current.as_ref() == Some(ripple) {
            self.current = None;
        }
    }

    #[cfg(test)]
    fn attached(&self) -> usize {
        usize::from(self.current.is_some())
    }
}

/// Reads the leading integer of a `data-target` value, so `"1500+"` counts to 1500.
pub fn parse_target(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CounterFrame {
    Show(i64),
    Done(i64),
}

/// Counts from zero to `target` in fixed increments.
#[derive(Clone, Debug)]
pub struct Counter {
    target: i64,
    increment: f64,
    current: f64,
}

impl Counter {
    pub fn new(target: i64) -> Self {
        let frames = f64::from(config::COUNTER_DURATION_MS) / f64::from(config::COUNTER_FRAME_MS);
        Self {
            target,
            increment: target as f64 / frames,
            current: 0.0,
        }
    }

    pub fn step(&mut self) -> CounterFrame {
        self.current += self.increment;
        if self.current < self.target as f64 {
            CounterFrame::Show(self.current.ceil() as i64)
        } else {
            CounterFrame::Done(self.target)
        }
    }
}

fn inject_styles() -> WidgetResult<()> {
    let document = utils::document()?;
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(SHARED_STYLES));
    if let Some(head) = document.head() {
        head.append_child(&style)?;
    }
    Ok(())
}

fn spawn_ripple(
    control: &Element,
    event: &MouseEvent,
    slot: &Rc<RefCell<RippleSlot<Element>>>,
) -> WidgetResult<()> {
    let rect = control.get_bounding_client_rect();
    let ripple = Ripple::at(
        f64::from(control.client_width()),
        f64::from(control.client_height()),
        f64::from(event.client_x()),
        f64::from(event.client_y()),
        rect.left(),
        rect.top(),
    );

    let span = utils::document()?.create_element("span")?;
    span.set_class_name("ripple");
    let size = format!("{}px", ripple.diameter);
    utils::set_style(&span, "width", &size);
    utils::set_style(&span, "height", &size);
    utils::set_style(&span, "left", &format!("{}px", ripple.left));
    utils::set_style(&span, "top", &format!("{}px", ripple.top));
    if let Some(old) = slot.borrow_mut().replace(span.clone()) {
        old.remove();
    }
    control.append_child(&span)?;

    let slot = slot.clone();
    BrowserScheduler.after(config::RIPPLE_LIFETIME_MS, move || {
        slot.borrow_mut().expire(&span);
        span.remove();
    });
    Ok(())
}

fn run_counter(element: Element, mut counter: Counter) {
    match counter.step() {
        CounterFrame::Show(value) => {
            element.set_text_content(Some(&value.to_string()));
            BrowserScheduler.after(config::COUNTER_FRAME_MS, move || run_counter(element, counter));
        }
        CounterFrame::Done(value) => {
            element.set_text_content(Some(&value.to_string()));
        }
    }
}

fn attach_counters() -> WidgetResult<usize> {
    let counters = utils::select_all("[data-target]");
    if counters.is_empty() {
        return Ok(0);
    }
    let observer = scroll_reveal::observe(config::COUNTER_THRESHOLD, |batch, observer| {
        for (element, intersecting) in batch {
            if !intersecting {
                continue;
            }
            observer.unobserve(&element);
            let target = element
                .get_attribute("data-target")
                .and_then(|raw| parse_target(&raw));
            match target {
                Some(target) => run_counter(element, Counter::new(target)),
                None => warn!("counter without numeric data-target"),
            }
        }
    })?;
    for counter in &counters {
        observer.observe(counter);
    }
    Ok(counters.len())
}

pub fn init() -> WidgetResult<()> {
    inject_styles()?;

    for control in utils::select_all(RIPPLE_TARGETS) {
        let target = control.clone();
        let slot = Rc::new(RefCell::new(RippleSlot::new()));
        utils::listen(&control, "click", move |event: MouseEvent| {
            if let Err(e) = spawn_ripple(&target, &event, &slot) {
                warn!("ripple failed: {}", e);
            }
        })?;
    }

    // Counters stay static where the observer is unavailable.
    match attach_counters() {
        Ok(count) => debug!("micro interactions attached, {} counters", count),
        Err(e) => debug!("counters disabled: {}", e),
    }
    Ok(())
}
