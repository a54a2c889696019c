//! Platform abstraction layer
//!
//! Handles the host side of the cage:
//! - Turning frame callbacks into fixed-rate ticks
//! - Cancelling a scheduled loop on teardown
//! - Browser bindings (wasm32 only)

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rand::Rng;
use rand_pcg::Pcg32;

use crate::sim::{CageSnapshot, CageState, FrameClock, TickInput, tick};

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Cancel flag shared between a loop and the callbacks it scheduled
///
/// Cloning shares the flag. Once cancelled it stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    cancelled: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Drives a cage from host frame callbacks
///
/// Holds the latest driver input, runs whole ticks per frame and keeps the
/// snapshot from the last completed tick.
#[derive(Debug)]
pub struct CageLoop<R: Rng = Pcg32> {
    state: CageState<R>,
    clock: FrameClock,
    input: TickInput,
    handle: LoopHandle,
    snapshot: CageSnapshot,
}

impl<R: Rng> CageLoop<R> {
    pub fn new(state: CageState<R>) -> Self {
        let snapshot = state.snapshot();
        Self {
            state,
            clock: FrameClock::default(),
            input: TickInput::default(),
            handle: LoopHandle::new(),
            snapshot,
        }
    }

    /// Replace the frame clock (e.g. a different tick rate)
    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    /// Handle for callbacks scheduled on behalf of this loop
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub fn set_agitated(&mut self, agitated: bool) {
        self.input.agitated = agitated;
    }

    pub fn set_target_count(&mut self, target_count: i64) {
        self.input.target_count = target_count;
    }

    pub fn input(&self) -> &TickInput {
        &self.input
    }

    /// Host frame callback: run the ticks owed for `dt` seconds
    ///
    /// Returns the number of ticks run; always 0 after teardown.
    pub fn frame(&mut self, dt: f32) -> u32 {
        if self.handle.is_cancelled() {
            return 0;
        }

        let ticks = self.clock.advance(dt);
        for _ in 0..ticks {
            tick(&mut self.state, &self.input);
        }
        if ticks > 0 {
            self.snapshot = self.state.snapshot();
        }
        ticks
    }

    /// Run exactly one tick, ignoring wall time (test clocks, manual stepping)
    pub fn step(&mut self) -> bool {
        if self.handle.is_cancelled() {
            return false;
        }
        tick(&mut self.state, &self.input);
        self.snapshot = self.state.snapshot();
        true
    }

    /// Copy of the state after the last completed tick
    pub fn snapshot(&self) -> CageSnapshot {
        self.snapshot.clone()
    }

    pub fn state(&self) -> &CageState<R> {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_cancelled()
    }

    /// Tear down: no tick runs after this, including already-scheduled ones
    pub fn dispose(&mut self) {
        if !self.handle.is_cancelled() {
            self.handle.cancel();
            log::info!("Cage loop stopped after {} ticks", self.state.time_ticks());
        }
    }
}

/// Body of one scheduled frame callback
///
/// The callback holds only a weak reference, so a queued frame never keeps a
/// torn-down cage alive. Returns true if the loop should reschedule itself.
pub fn run_scheduled_frame<R: Rng>(
    cage: &Weak<RefCell<CageLoop<R>>>,
    handle: &LoopHandle,
    dt: f32,
) -> bool {
    if handle.is_cancelled() {
        return false;
    }
    let Some(cage) = cage.upgrade() else {
        return false;
    };
    cage.borrow_mut().frame(dt);
    !handle.is_cancelled()
}

impl<R: Rng> Drop for CageLoop<R> {
    fn drop(&mut self) {
        self.handle.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> CageLoop {
        let mut cage = CageLoop::new(CageState::new(8));
        cage.set_target_count(5);
        cage
    }

    #[test]
    fn test_frames_run_ticks() {
        let mut cage = driver();
        assert!(cage.snapshot().is_empty());

        let ticks = cage.frame(crate::consts::SIM_DT);
        assert_eq!(ticks, 1);
        assert_eq!(cage.snapshot().len(), 5);
        assert_eq!(cage.snapshot().tick, 1);
    }

    #[test]
    fn test_snapshot_tracks_input() {
        let mut cage = driver();
        cage.set_agitated(true);
        cage.step();
        assert!(cage.snapshot().regime.is_agitated());

        cage.set_target_count(30);
        cage.step();
        assert_eq!(cage.snapshot().len(), 25);
    }

    #[test]
    fn test_dispose_stops_ticks() {
        let mut cage = driver();
        cage.step();
        cage.dispose();

        assert!(!cage.is_running());
        assert!(!cage.step());
        assert_eq!(cage.frame(1.0), 0);
        assert_eq!(cage.state().time_ticks(), 1);
    }

    #[test]
    fn test_pending_callback_is_noop_after_teardown() {
        // Simulate a host scheduler holding one queued frame callback
        let cage = Rc::new(RefCell::new(driver()));
        let handle = cage.borrow().handle();
        let queued = {
            let cage = cage.clone();
            move || {
                if handle.is_cancelled() {
                    return false;
                }
                cage.borrow_mut().step()
            }
        };

        cage.borrow_mut().dispose();
        assert!(!queued());
        assert_eq!(cage.borrow().state().time_ticks(), 0);
    }

    #[test]
    fn test_per_frame_clock_matches_display_frames() {
        let mut cage = driver().with_clock(FrameClock::per_frame());
        // Tiny and huge frame times alike run exactly one tick
        assert_eq!(cage.frame(1.0 / 144.0), 1);
        assert_eq!(cage.frame(0.25), 1);
        assert_eq!(cage.state().time_ticks(), 2);
    }

    #[test]
    fn test_scheduled_frame_releases_dropped_cage() {
        let cage = Rc::new(RefCell::new(driver()));
        let handle = cage.borrow().handle();
        let weak = Rc::downgrade(&cage);

        assert!(run_scheduled_frame(&weak, &handle, crate::consts::SIM_DT));
        assert_eq!(cage.borrow().state().time_ticks(), 1);

        // Dropping the owner frees the cage; the queued callback does nothing
        drop(cage);
        assert!(weak.upgrade().is_none());
        assert!(!run_scheduled_frame(&weak, &handle, crate::consts::SIM_DT));
    }

    #[test]
    fn test_scheduled_frame_stops_after_dispose() {
        let cage = Rc::new(RefCell::new(driver()));
        let handle = cage.borrow().handle();
        let weak = Rc::downgrade(&cage);

        cage.borrow_mut().dispose();
        assert!(!run_scheduled_frame(&weak, &handle, crate::consts::SIM_DT));
        assert_eq!(cage.borrow().state().time_ticks(), 0);
    }

    #[test]
    fn test_handle_clones_share_flag() {
        let a = LoopHandle::new();
        let b = a.clone();
        b.cancel();
        assert!(a.is_cancelled());
    }
}
