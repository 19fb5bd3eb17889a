//! Scheduled-task seam between the draw engine and whatever clock drives it.
//!
//! The browser drives it with `setInterval`/`setTimeout` (see `crate::browser`);
//! tests drive it by hand with [`manual::ManualScheduler`].

/// Shape of one scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub period_ms: u32,
    /// `on_tick` fires this many times, then `on_complete` once.
    /// Zero means a plain delay of one period.
    pub ticks: u32,
}

impl Schedule {
    pub const fn ticks(period_ms: u32, ticks: u32) -> Self {
        Self { period_ms, ticks }
    }

    pub const fn delay(ms: u32) -> Self {
        Self {
            period_ms: ms,
            ticks: 0,
        }
    }
}

pub type TickFn = Box<dyn FnMut()>;
pub type CompleteFn = Box<dyn FnOnce()>;

/// Owns at most one pending task at a time.
pub trait Scheduler {
    /// Starts a task, cancelling whatever was pending before.
    fn start(&mut self, schedule: Schedule, on_tick: TickFn, on_complete: CompleteFn);

    /// Drops the pending task. No callback of it may run afterwards.
    fn cancel(&mut self);

    fn is_active(&self) -> bool;
}


#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::manual::ManualScheduler;
    use super::*;

    #[test]
    fn ticks_then_completes_once() {
        let mut clock = ManualScheduler::new();
        let ticks = Rc::new(Cell::new(0));
        let done = Rc::new(Cell::new(0));
        let (t, d) = (ticks.clone(), done.clone());
        clock.start(
            Schedule::ticks(60, 3),
            Box::new(move || t.set(t.get() + 1)),
            Box::new(move || d.set(d.get() + 1)),
        );
        assert_eq!(clock.run_until_idle(), 4);
        assert_eq!(ticks.get(), 3);
        assert_eq!(done.get(), 1);
        assert!(!clock.is_active());
    }

    #[test]
    fn cancel_silences_pending_callbacks() {
        let mut clock = ManualScheduler::new();
        let ticks = Rc::new(Cell::new(0));
        let t = ticks.clone();
        clock.start(
            Schedule::ticks(60, 5),
            Box::new(move || t.set(t.get() + 1)),
            Box::new(|| panic!("completed after cancel")),
        );
        clock.advance();
        clock.cancel();
        assert!(!clock.advance());
        assert_eq!(ticks.get(), 1);
        assert_eq!(clock.cancelled(), 1);
    }

    #[test]
    fn delay_only_completes() {
        let mut clock = ManualScheduler::new();
        let done = Rc::new(Cell::new(false));
        let d = done.clone();
        clock.start(
            Schedule::delay(500),
            Box::new(|| panic!("delay ticked")),
            Box::new(move || d.set(true)),
        );
        assert_eq!(clock.run_until_idle(), 1);
        assert!(done.get());
    }
}
