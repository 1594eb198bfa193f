use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;
use web_sys::{Element, KeyboardEvent, MouseEvent, TouchEvent};

use crate::config;
use crate::error::{WidgetError, WidgetResult};
use crate::timers::{Autoplay, BrowserScheduler, Scheduler};
use crate::utils;

/// Index of the active slide, always in `[0, count)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideIndex {
    current: usize,
    count: usize,
}

impl SlideIndex {
    pub fn new(count: usize) -> Self {
        Self { current: 0, count }
    }

    #[cfg(test)]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Past the end wraps to the first slide, before the start to the last.
    pub fn show(&mut self, requested: isize) -> usize {
        self.current = if requested >= self.count as isize {
            0
        } else if requested < 0 {
            self.count.saturating_sub(1)
        } else {
            requested as usize
        };
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.show(self.current as isize + 1)
    }

    pub fn prev(&mut self) -> usize {
        self.show(self.current as isize - 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swipe {
    Next,
    Prev,
}

/// Leftward drags advance, rightward drags go back; short drags are ignored.
pub fn swipe_direction(start_x: f64, end_x: f64) -> Option<Swipe> {
    if end_x < start_x - config::SWIPE_THRESHOLD {
        Some(Swipe::Next)
    } else if end_x > start_x + config::SWIPE_THRESHOLD {
        Some(Swipe::Prev)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug)]
enum Nav {
    Next,
    Prev,
    To(usize),
}

/// Slides and dots in lockstep with the index.
struct Deck {
    slides: Vec<Element>,
    dots: Vec<Element>,
    index: SlideIndex,
}

impl Deck {
    fn go(&mut self, nav: Nav) {
        let active = match nav {
            Nav::Next => self.index.next(),
            Nav::Prev => self.index.prev(),
            Nav::To(k) => self.index.show(k as isize),
        };
        for (i, slide) in self.slides.iter().enumerate() {
            utils::set_class(slide, "active", i == active);
        }
        for (i, dot) in self.dots.iter().enumerate() {
            utils::set_class(dot, "active", i == active);
        }
    }
}

pub struct HeroCarousel<S: Scheduler> {
    deck: Rc<RefCell<Deck>>,
    autoplay: RefCell<Autoplay<S>>,
}

impl<S: Scheduler> HeroCarousel<S> {
    fn start_autoplay(&self) {
        let deck: Weak<RefCell<Deck>> = Rc::downgrade(&self.deck);
        self.autoplay.borrow_mut().start(move || {
            if let Some(deck) = deck.upgrade() {
                deck.borrow_mut().go(Nav::Next);
            }
        });
    }

    fn stop_autoplay(&self) {
        self.autoplay.borrow_mut().stop();
    }

    /// Manual navigation also resets the autoplay phase.
    fn navigate(&self, nav: Nav) {
        self.deck.borrow_mut().go(nav);
        self.stop_autoplay();
        self.start_autoplay();
    }
}

pub fn init() -> WidgetResult<()> {
    let container = utils::require(".hero__carousel")?;
    let slides = utils::select_all(".carousel__slide");
    if slides.is_empty() {
        return Err(WidgetError::Missing(".carousel__slide"));
    }
    let dots = utils::select_all(".carousel__dot");
    let count = slides.len();

    let carousel = Rc::new(HeroCarousel {
        deck: Rc::new(RefCell::new(Deck {
            slides,
            dots: dots.clone(),
            index: SlideIndex::new(count),
        })),
        autoplay: RefCell::new(Autoplay::new(BrowserScheduler, config::AUTOPLAY_MS)),
    });

    let buttons = [
        (".carousel__btn--prev", Nav::Prev),
        (".carousel__btn--next", Nav::Next),
    ];
    for (selector, nav) in buttons {
        if let Some(button) = utils::select(selector) {
            let carousel = carousel.clone();
            utils::listen(&button, "click", move |_: MouseEvent| carousel.navigate(nav))?;
        }
    }

    for (i, dot) in dots.iter().enumerate() {
        let carousel = carousel.clone();
        utils::listen(dot, "click", move |_: MouseEvent| carousel.navigate(Nav::To(i)))?;
    }

    let document = utils::document()?;
    {
        let carousel = carousel.clone();
        utils::listen(&document, "keydown", move |event: KeyboardEvent| {
            match event.key().as_str() {
                "ArrowLeft" => carousel.navigate(Nav::Prev),
                "ArrowRight" => carousel.navigate(Nav::Next),
                _ => {}
            }
        })?;
    }

    {
        let carousel = carousel.clone();
        utils::listen(&container, "mouseenter", move |_: MouseEvent| carousel.stop_autoplay())?;
    }
    {
        let carousel = carousel.clone();
        utils::listen(&container, "mouseleave", move |_: MouseEvent| carousel.start_autoplay())?;
    }

    let touch_start = Rc::new(RefCell::new(0.0_f64));
    {
        let touch_start = touch_start.clone();
        utils::listen(&container, "touchstart", move |event: TouchEvent| {
            if let Some(touch) = event.changed_touches().get(0) {
                *touch_start.borrow_mut() = f64::from(touch.screen_x());
            }
        })?;
    }
    {
        let carousel = carousel.clone();
        utils::listen(&container, "touchend", move |event: TouchEvent| {
            let Some(touch) = event.changed_touches().get(0) else {
                return;
            };
            match swipe_direction(*touch_start.borrow(), f64::from(touch.screen_x())) {
                Some(Swipe::Next) => carousel.navigate(Nav::Next),
                Some(Swipe::Prev) => carousel.navigate(Nav::Prev),
                None => {}
            }
        })?;
    }

    carousel.start_autoplay();
    debug!("hero carousel attached with {} slides", count);
    Ok(())
}
