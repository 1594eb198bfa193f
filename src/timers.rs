//! Timer plumbing shared by every controller.
//!
//! Handles cancel their timer when dropped, so "replace the handle" is the
//! same thing as "clear the previous timer". Work that must run regardless of
//! what happens to the caller is detached with [`TimerHandle::forget`].

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};

pub trait TimerHandle {
    /// Lets the timer run to completion without keeping the handle around.
    fn forget(self);
}

pub trait Scheduler: Clone + 'static {
    type Handle: TimerHandle + 'static;

    fn once<F>(&self, millis: u32, callback: F) -> Self::Handle
    where
        F: FnOnce() + 'static;

    fn every<F>(&self, millis: u32, callback: F) -> Self::Handle
    where
        F: FnMut() + 'static;

    fn after<F>(&self, millis: u32, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.once(millis, callback).forget();
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

pub enum BrowserTimer {
    Timeout(Timeout),
    Interval(Interval),
}

impl TimerHandle for BrowserTimer {
    fn forget(self) {
        match self {
            BrowserTimer::Timeout(timeout) => {
                timeout.forget();
            }
            BrowserTimer::Interval(interval) => {
                interval.forget();
            }
        }
    }
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserTimer;

    fn once<F>(&self, millis: u32, callback: F) -> BrowserTimer
    where
        F: FnOnce() + 'static,
    {
        BrowserTimer::Timeout(Timeout::new(millis, callback))
    }

    fn every<F>(&self, millis: u32, callback: F) -> BrowserTimer
    where
        F: FnMut() + 'static,
    {
        BrowserTimer::Interval(Interval::new(millis, callback))
    }
}

/// Wraps `f` so it only runs once `wait` ms have passed without another call.
/// Every call cancels whatever was still pending.
pub fn debounce<S, F>(scheduler: S, wait: u32, f: F) -> impl FnMut()
where
    S: Scheduler,
    F: Fn() + 'static,
{
    let f = Rc::new(f);
    let pending: Rc<RefCell<Option<S::Handle>>> = Rc::new(RefCell::new(None));
    move || {
        let f = f.clone();
        let handle = scheduler.once(wait, move || (*f)());
        // Dropping the previous handle clears its timer.
        pending.borrow_mut().replace(handle);
    }
}

/// Owns at most one recurring timer.
pub struct Autoplay<S: Scheduler> {
    scheduler: S,
    period: u32,
    timer: Option<S::Handle>,
}

impl<S: Scheduler> Autoplay<S> {
    pub fn new(scheduler: S, period: u32) -> Self {
        Self {
            scheduler,
            period,
            timer: None,
        }
    }

    pub fn start<F>(&mut self, tick: F)
    where
        F: FnMut() + 'static,
    {
        self.stop();
        self.timer = Some(self.scheduler.every(self.period, tick));
    }

    pub fn stop(&mut self) {
        self.timer = None;
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }
}

#[cfg(test)]
pub use manual::ManualScheduler;


#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let hits = Rc::new(Cell::new(0));
        let hits_clone = hits.clone();
        (hits, move || hits_clone.set(hits_clone.get() + 1))
    }

    #[test]
    fn debounce_runs_once_after_quiet_period() {
        let scheduler = ManualScheduler::new();
        let (hits, bump) = counter();
        let mut debounced = debounce(scheduler.clone(), 100, bump);

        debounced();
        scheduler.advance(60);
        debounced();
        scheduler.advance(60);
        debounced();
        scheduler.advance(99);
        assert_eq!(hits.get(), 0);

        scheduler.advance(1);
        assert_eq!(hits.get(), 1);

        scheduler.advance(1_000);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn debounce_keeps_only_one_pending_timer() {
        let scheduler = ManualScheduler::new();
        let (_, bump) = counter();
        let mut debounced = debounce(scheduler.clone(), 250, bump);
        for _ in 0..5 {
            debounced();
        }
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn autoplay_restart_replaces_previous_timer() {
        let scheduler = ManualScheduler::new();
        let (hits, bump) = counter();
        let bump = Rc::new(bump);
        let mut autoplay = Autoplay::new(scheduler.clone(), 5000);

        let first = bump.clone();
        autoplay.start(move || (*first)());
        let second = bump.clone();
        autoplay.start(move || (*second)());

        assert_eq!(scheduler.pending(), 1);
        scheduler.advance(5000);
        assert_eq!(hits.get(), 1);
        scheduler.advance(5000);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn autoplay_stop_cancels() {
        let scheduler = ManualScheduler::new();
        let (hits, bump) = counter();
        let mut autoplay = Autoplay::new(scheduler.clone(), 5000);
        autoplay.start(bump);
        assert!(autoplay.is_running());
        autoplay.stop();
        assert!(!autoplay.is_running());
        scheduler.advance(20_000);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn detached_timeouts_still_fire() {
        let scheduler = ManualScheduler::new();
        let (hits, bump) = counter();
        scheduler.after(1500, bump);
        scheduler.advance(1500);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn nested_scheduling_fires_in_order() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = log.clone();
            let inner = scheduler.clone();
            scheduler.after(100, move || {
                log.borrow_mut().push(100);
                let log = log.clone();
                inner.after(50, move || log.borrow_mut().push(150));
            });
        }
        {
            let log = log.clone();
            scheduler.after(120, move || log.borrow_mut().push(120));
        }
        scheduler.advance(200);
        assert_eq!(*log.borrow(), vec![100, 120, 150]);
    }
}
