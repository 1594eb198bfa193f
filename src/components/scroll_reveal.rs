use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config;
use crate::error::{WidgetError, WidgetResult};
use crate::timers::{BrowserScheduler, Scheduler};
use crate::utils;

const REVEAL_SELECTOR: &str =
    ".animate-on-scroll, .insurance-card, .differential-item, .pillar, .contact-info, .testimonial-card";

/// Hands out stagger delays and makes sure nothing is revealed twice.
pub struct RevealTracker<K> {
    step_ms: u32,
    revealed: Vec<K>,
}

impl<K: PartialEq + Clone> RevealTracker<K> {
    pub fn new(step_ms: u32) -> Self {
        Self {
            step_ms,
            revealed: Vec::new(),
        }
    }

    /// `batch` is one observer callback: each target with its intersecting flag.
    /// The delay is the entry's position in the batch times the step.
    pub fn admit(&mut self, batch: &[(K, bool)]) -> Vec<(K, u32)> {
        let mut due = Vec::new();
        for (index, (key, intersecting)) in batch.iter().enumerate() {
            if !*intersecting || self.revealed.contains(key) {
                continue;
            }
            self.revealed.push(key.clone());
            due.push((key.clone(), index as u32 * self.step_ms));
        }
        due
    }

    #[cfg(test)]
    pub fn revealed(&self) -> usize {
        self.revealed.len()
    }
}

pub fn observer_supported() -> bool {
    match utils::window() {
        Ok(window) => js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver"))
            .unwrap_or(false),
        Err(_) => false,
    }
}

/// Builds an observer whose callback receives the entries as `(target, intersecting)`.
pub fn observe<F>(threshold: f64, mut on_batch: F) -> WidgetResult<IntersectionObserver>
where
    F: FnMut(Vec<(Element, bool)>, &IntersectionObserver) + 'static,
{
    if !observer_supported() {
        return Err(WidgetError::Unsupported("IntersectionObserver"));
    }
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            let batch = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| (entry.target(), entry.is_intersecting()))
                .collect();
            on_batch(batch, &observer);
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_root_margin("0px");
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    Ok(observer)
}

pub fn init() -> WidgetResult<()> {
    let elements = utils::select_all(REVEAL_SELECTOR);
    if elements.is_empty() {
        return Err(WidgetError::Missing(REVEAL_SELECTOR));
    }

    if !observer_supported() {
        for element in &elements {
            utils::add_class(element, "reveal");
            utils::add_class(element, "active");
        }
        debug!("no IntersectionObserver, revealed {} elements", elements.len());
        return Ok(());
    }

    let tracker = Rc::new(RefCell::new(RevealTracker::new(config::ANIMATION_DELAY_MS)));
    let observer = observe(config::REVEAL_THRESHOLD, move |batch, observer| {
        let due = tracker.borrow_mut().admit(&batch);
        for (element, delay) in due {
            observer.unobserve(&element);
            BrowserScheduler.after(delay, move || utils::add_class(&element, "active"));
        }
    })?;

    for element in &elements {
        utils::add_class(element, "reveal");
        observer.observe(element);
    }
    debug!("scroll reveal watching {} elements", elements.len());
    Ok(())
}
