//! Draw engine: `Idle -> Committed -> Animating -> Resolved -> Idle`.
//!
//! The engine owns the scheduler that drives its animation. Scheduled callbacks
//! never touch the engine directly; they emit a [`DrawSignal`] tagged with the
//! [`DrawId`] of the draw that scheduled them, and the owner feeds that signal
//! back in. Signals from an earlier draw are ignored, so a reset cannot be
//! followed by a stale tick or outcome.

pub mod rigging;
pub mod schedule;

use std::collections::BTreeSet;
use std::rc::Rc;

use rand::Rng;
use tracing::{debug, info};

use crate::config::DrawTiming;
use crate::error::GameError;
use schedule::{Schedule, Scheduler};

/// Generation number of one draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawSignal {
    Tick(DrawId),
    AnimationDone(DrawId),
    Revealed(DrawId),
}

/// Receiver for scheduled callbacks, provided by whoever owns the engine.
pub type DrawSink = Rc<dyn Fn(DrawSignal)>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    /// 1-based labels frozen at commit time.
    pub committed: BTreeSet<u32>,
    pub winning: u32,
    pub is_win: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawPhase {
    Idle,
    Committed {
        committed: BTreeSet<u32>,
    },
    Animating {
        committed: BTreeSet<u32>,
        ticks: u32,
        shown: Option<u32>,
    },
    Resolved {
        outcome: DrawOutcome,
        reported: bool,
    },
}

pub struct DrawEngine<S: Scheduler> {
    phase: DrawPhase,
    generation: u64,
    timing: DrawTiming,
    total_cells: usize,
    scheduler: S,
}

impl<S: Scheduler> DrawEngine<S> {
    pub fn new(scheduler: S, timing: DrawTiming, total_cells: usize) -> Self {
        Self {
            phase: DrawPhase::Idle,
            generation: 0,
            timing,
            total_cells,
            scheduler,
        }
    }

    pub fn phase(&self) -> &DrawPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, DrawPhase::Idle)
    }

    pub fn current_id(&self) -> DrawId {
        DrawId(self.generation)
    }

    /// Label currently on the ball: the rolling number while animating,
    /// the winner once resolved.
    pub fn shown_number(&self) -> Option<u32> {
        match &self.phase {
            DrawPhase::Animating { shown, .. } => *shown,
            DrawPhase::Resolved { outcome, .. } => Some(outcome.winning),
            _ => None,
        }
    }

    /// The outcome, once it has been reported to the owner.
    pub fn reported_outcome(&self) -> Option<&DrawOutcome> {
        match &self.phase {
            DrawPhase::Resolved {
                outcome,
                reported: true,
            } => Some(outcome),
            _ => None,
        }
    }

    /// Whether `committed` could start a draw right now.
    pub fn can_commit(&self, committed: &BTreeSet<u32>) -> Result<(), GameError> {
        if !self.is_idle() {
            return Err(GameError::DrawInProgress);
        }
        if committed.is_empty() {
            return Err(GameError::EmptySelection);
        }
        Ok(())
    }

    /// Freezes the labels for a new draw.
    pub fn commit(&mut self, committed: BTreeSet<u32>) -> Result<DrawId, GameError> {
        self.can_commit(&committed)?;
        self.generation += 1;
        debug!(draw = self.generation, cells = committed.len(), "draw committed");
        self.phase = DrawPhase::Committed { committed };
        Ok(self.current_id())
    }

    /// Starts the rolling animation for the committed draw.
    pub fn animate(&mut self, sink: DrawSink) -> Result<DrawId, GameError> {
        let committed = match std::mem::replace(&mut self.phase, DrawPhase::Idle) {
            DrawPhase::Committed { committed } => committed,
            DrawPhase::Idle => return Err(GameError::EmptySelection),
            other => {
                self.phase = other;
                return Err(GameError::DrawInProgress);
            }
        };
        let id = self.current_id();
        let tick_sink = sink.clone();
        self.scheduler.start(
            Schedule::ticks(self.timing.tick_ms, self.timing.ticks),
            Box::new(move || tick_sink(DrawSignal::Tick(id))),
            Box::new(move || sink(DrawSignal::AnimationDone(id))),
        );
        self.phase = DrawPhase::Animating {
            committed,
            ticks: 0,
            shown: None,
        };
        Ok(id)
    }

    /// Rolls the display number. Has no bearing on the outcome.
    pub fn tick<R: Rng + ?Sized>(&mut self, id: DrawId, rng: &mut R) -> Option<u32> {
        if id != self.current_id() {
            return None;
        }
        let limit = self.timing.ticks;
        let total = self.total_cells;
        match &mut self.phase {
            DrawPhase::Animating { ticks, shown, .. } if *ticks < limit => {
                *ticks += 1;
                let label = rigging::random_label(rng, total);
                *shown = Some(label);
                Some(label)
            }
            _ => None,
        }
    }

    /// Picks the winner once every tick has run and schedules the reveal.
    pub fn finish_animation<R: Rng + ?Sized>(
        &mut self,
        id: DrawId,
        rng: &mut R,
        sink: DrawSink,
    ) -> Option<u32> {
        if id != self.current_id() {
            return None;
        }
        let ready = matches!(
            &self.phase,
            DrawPhase::Animating { ticks, .. } if *ticks >= self.timing.ticks
        );
        if !ready {
            return None;
        }
        let DrawPhase::Animating { committed, .. } =
            std::mem::replace(&mut self.phase, DrawPhase::Idle)
        else {
            return None;
        };
        let winning = rigging::pick_winner(rng, &committed, self.total_cells);
        let is_win = committed.contains(&winning);
        info!(draw = id.0, winning, is_win, "draw resolved");
        self.phase = DrawPhase::Resolved {
            outcome: DrawOutcome {
                committed,
                winning,
                is_win,
            },
            reported: false,
        };
        self.scheduler.start(
            Schedule::delay(self.timing.reveal_delay_ms),
            Box::new(|| {}),
            Box::new(move || sink(DrawSignal::Revealed(id))),
        );
        Some(winning)
    }

    /// Hands the outcome over exactly once after the reveal delay.
    pub fn report(&mut self, id: DrawId) -> Option<DrawOutcome> {
        if id != self.current_id() {
            return None;
        }
        match &mut self.phase {
            DrawPhase::Resolved { outcome, reported } if !*reported => {
                *reported = true;
                Some(outcome.clone())
            }
            _ => None,
        }
    }

    /// Returns to `Idle` from any phase, cancelling pending callbacks.
    pub fn reset(&mut self) {
        if self.scheduler.is_active() {
            self.scheduler.cancel();
        }
        if !self.is_idle() {
            // Invalidate every signal already handed out.
            self.generation += 1;
            debug!(draw = self.generation, "draw reset");
        }
        self.phase = DrawPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::schedule::manual::ManualScheduler;
    use super::*;

    struct Rig {
        engine: DrawEngine<ManualScheduler>,
        clock: ManualScheduler,
        signals: Rc<RefCell<Vec<DrawSignal>>>,
        rng: SmallRng,
    }

    impl Rig {
        fn new() -> Self {
            let clock = ManualScheduler::new();
            let timing = DrawTiming {
                tick_ms: 60,
                ticks: 30,
                reveal_delay_ms: 500,
            };
            Self {
                engine: DrawEngine::new(clock.clone(), timing, 64),
                clock,
                signals: Rc::new(RefCell::new(Vec::new())),
                rng: SmallRng::seed_from_u64(9),
            }
        }

        fn sink(&self) -> DrawSink {
            let signals = self.signals.clone();
            Rc::new(move |s| signals.borrow_mut().push(s))
        }

        /// Fires one scheduled callback and feeds its signal back.
        fn step(&mut self) -> Option<DrawSignal> {
            if !self.clock.advance() {
                return None;
            }
            let sig = self.signals.borrow_mut().pop()?;
            match sig {
                DrawSignal::Tick(id) => {
                    self.engine.tick(id, &mut self.rng);
                }
                DrawSignal::AnimationDone(id) => {
                    let sink = self.sink();
                    self.engine.finish_animation(id, &mut self.rng, sink);
                }
                DrawSignal::Revealed(_) => {}
            }
            Some(sig)
        }
    }

    fn labels(xs: &[u32]) -> BTreeSet<u32> {
        xs.iter().copied().collect()
    }

    #[test]
    fn full_cycle_reports_once() {
        let mut rig = Rig::new();
        let id = rig.engine.commit(labels(&[3, 6, 16, 26, 36, 46, 56])).unwrap();
        assert!(matches!(rig.engine.phase(), DrawPhase::Committed { .. }));
        let sink = rig.sink();
        rig.engine.animate(sink).unwrap();

        let mut ticks = 0;
        while let Some(sig) = rig.step() {
            match sig {
                DrawSignal::Tick(_) => {
                    ticks += 1;
                    assert!(rig.engine.shown_number().is_some());
                }
                DrawSignal::AnimationDone(_) => {
                    assert_eq!(ticks, 30);
                    assert!(matches!(rig.engine.phase(), DrawPhase::Resolved { .. }));
                    assert!(rig.engine.reported_outcome().is_none());
                    assert_eq!(rig.clock.pending(), Some(Schedule::delay(500)));
                }
                DrawSignal::Revealed(rid) => assert_eq!(rid, id),
            }
        }
        let outcome = rig.engine.report(id).unwrap();
        assert!(outcome.is_win);
        assert_eq!(rig.engine.report(id), None);
        assert_eq!(rig.engine.reported_outcome(), Some(&outcome));
    }

    #[test]
    fn empty_commit_never_leaves_idle() {
        let mut rig = Rig::new();
        assert_eq!(rig.engine.commit(BTreeSet::new()), Err(GameError::EmptySelection));
        assert!(rig.engine.is_idle());
    }

    #[test]
    fn second_commit_is_rejected_while_busy() {
        let mut rig = Rig::new();
        rig.engine.commit(labels(&[1])).unwrap();
        assert_eq!(rig.engine.commit(labels(&[2])), Err(GameError::DrawInProgress));
    }

    #[test]
    fn resolution_waits_for_every_tick() {
        let mut rig = Rig::new();
        let id = rig.engine.commit(labels(&[1])).unwrap();
        let sink = rig.sink();
        rig.engine.animate(sink.clone()).unwrap();
        rig.engine.tick(id, &mut rig.rng);
        assert_eq!(rig.engine.finish_animation(id, &mut rig.rng, sink), None);
        assert!(matches!(rig.engine.phase(), DrawPhase::Animating { ticks: 1, .. }));
    }

    #[test]
    fn reset_mid_animation_silences_stale_ticks() {
        let mut rig = Rig::new();
        let id = rig.engine.commit(labels(&[1, 2])).unwrap();
        let sink = rig.sink();
        rig.engine.animate(sink.clone()).unwrap();
        for _ in 0..5 {
            rig.step();
        }
        rig.engine.reset();
        assert!(rig.engine.is_idle());
        assert!(!rig.clock.advance());
        assert_eq!(rig.clock.cancelled(), 1);

        // A late signal from the old draw changes nothing.
        assert_eq!(rig.engine.tick(id, &mut rig.rng), None);
        assert_eq!(rig.engine.finish_animation(id, &mut rig.rng, sink), None);
        assert_eq!(rig.engine.report(id), None);
        assert!(rig.engine.is_idle());
    }

    #[test]
    fn reset_after_reveal_has_nothing_to_cancel() {
        let mut rig = Rig::new();
        let id = rig.engine.commit(labels(&[3])).unwrap();
        let sink = rig.sink();
        rig.engine.animate(sink).unwrap();
        while rig.step().is_some() {}
        assert!(rig.engine.report(id).is_some());
        assert!(!rig.clock.is_active());
        rig.engine.reset();
        assert!(rig.engine.is_idle());
        assert_eq!(rig.clock.cancelled(), 0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut rig = Rig::new();
        rig.engine.commit(labels(&[4])).unwrap();
        rig.engine.reset();
        let after_one = (rig.engine.phase().clone(), rig.engine.current_id());
        rig.engine.reset();
        assert_eq!((rig.engine.phase().clone(), rig.engine.current_id()), after_one);
    }

    #[test]
    fn new_draw_after_reset_gets_fresh_id() {
        let mut rig = Rig::new();
        let first = rig.engine.commit(labels(&[4])).unwrap();
        rig.engine.reset();
        let second = rig.engine.commit(labels(&[4])).unwrap();
        assert_ne!(first, second);
    }
}
