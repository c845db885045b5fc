//! Frame driver
//!
//! Runs `GameSession::step` from a host frame callback (`requestAnimationFrame`
//! in the browser). Steps are fixed at `SIM_DT`; each host frame feeds its
//! elapsed time into an accumulator and runs as many steps as fit.
//!
//! The host facility is abstracted behind `FrameScheduler`, so the loop can be
//! driven synchronously by `ManualScheduler` in tests and headless runs.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{Direction, GameEvent, GameSession, autopilot_intent};

/// Identifies a requested frame so it can be cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Called once with the host timestamp (milliseconds)
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Called after every driven frame with the session and the events of all
/// steps run in that frame. Must not call back into the `GameLoop`.
pub type PresentHook = Box<dyn FnMut(&GameSession, &[GameEvent])>;

/// Host facility that runs a callback on the next visual frame
pub trait FrameScheduler {
    fn request_frame(&mut self, callback: FrameCallback) -> FrameHandle;
    /// Cancelling an already-fired or unknown handle is a no-op
    fn cancel_frame(&mut self, handle: FrameHandle);
}

struct PendingFrame {
    token: u64,
    handle: FrameHandle,
}

struct Driver<S> {
    session: GameSession,
    scheduler: S,
    pending: Option<PendingFrame>,
    next_token: u64,
    accumulator: f32,
    last_time: Option<f64>,
    paused: bool,
    /// The current pause came from `auto_pause`, not the player
    auto_paused: bool,
    autopilot: bool,
    frame_events: Vec<GameEvent>,
    on_present: Option<PresentHook>,
}

impl<S: FrameScheduler> Driver<S> {
    fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                self.scheduler.cancel_frame(pending.handle);
                true
            }
            None => false,
        }
    }

    /// Run simulation steps for a host frame at `time` (ms)
    fn advance(&mut self, time: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => (((time - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => SIM_DT,
        };
        self.last_time = Some(time);
        self.accumulator += dt;
        self.frame_events.clear();

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS && self.session.is_running() {
            if self.autopilot {
                let intent = autopilot_intent(&self.session);
                self.session.set_player_intent(intent);
            }
            self.session.step();
            self.frame_events.extend_from_slice(&self.session.events);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS || !self.session.is_running() {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    fn present(&mut self) {
        if let Some(hook) = self.on_present.as_mut() {
            hook(&self.session, &self.frame_events);
        }
    }
}

/// Shared handle to a session and the loop driving it
pub struct GameLoop<S> {
    inner: Rc<RefCell<Driver<S>>>,
}

impl<S> Clone for GameLoop<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: FrameScheduler + 'static> GameLoop<S> {
    pub fn new(session: GameSession, scheduler: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Driver {
                session,
                scheduler,
                pending: None,
                next_token: 0,
                accumulator: 0.0,
                last_time: None,
                paused: false,
                auto_paused: false,
                autopilot: false,
                frame_events: Vec::new(),
                on_present: None,
            })),
        }
    }

    pub fn set_present_hook(&self, hook: PresentHook) {
        self.inner.borrow_mut().on_present = Some(hook);
    }

    /// Reset the session and start a fresh loop (also used after game over)
    pub fn start(&self) {
        {
            let mut driver = self.inner.borrow_mut();
            driver.cancel_pending();
            driver.session.start();
            driver.accumulator = 0.0;
            driver.last_time = None;
            driver.paused = false;
            driver.auto_paused = false;
            driver.frame_events.clear();
        }
        self.schedule();
    }

    pub fn restart(&self) {
        self.start();
    }

    /// Start a fresh run with a new seed
    pub fn start_with_seed(&self, seed: u64) {
        self.inner.borrow_mut().session.seed = seed;
        self.start();
    }

    /// Stop scheduling frames. Idempotent.
    pub fn stop(&self) {
        if self.inner.borrow_mut().cancel_pending() {
            log::info!("Frame loop stopped");
        }
    }

    /// Suspend a running loop; the session keeps its state
    pub fn pause(&self) {
        if self.suspend(false) {
            log::info!("Paused");
        }
    }

    /// Pause on behalf of the host (tab hidden, window blurred). A later
    /// `auto_resume` undoes only this kind of pause.
    pub fn auto_pause(&self) {
        if self.suspend(true) {
            log::info!("Auto-paused");
        }
    }

    pub fn resume(&self) {
        {
            let mut driver = self.inner.borrow_mut();
            if !driver.paused {
                return;
            }
            driver.paused = false;
            driver.auto_paused = false;
            // Don't count the time spent paused
            driver.last_time = None;
            driver.accumulator = 0.0;
            if !driver.session.is_running() {
                return;
            }
            log::info!("Resumed");
        }
        self.schedule();
    }

    /// Resume only if the pause came from `auto_pause`
    pub fn auto_resume(&self) {
        if self.inner.borrow().auto_paused {
            self.resume();
        }
    }

    pub fn toggle_pause(&self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.inner.borrow().paused
    }

    /// True while a frame callback is outstanding
    pub fn is_scheduled(&self) -> bool {
        self.inner.borrow().pending.is_some()
    }

    /// Record the player's intent for the next step
    pub fn set_intent(&self, direction: Direction) {
        self.inner.borrow_mut().session.set_player_intent(direction);
    }

    pub fn set_autopilot(&self, enabled: bool) {
        self.inner.borrow_mut().autopilot = enabled;
    }

    /// Flip idle/demo mode, returning the new state
    pub fn toggle_autopilot(&self) -> bool {
        let mut driver = self.inner.borrow_mut();
        driver.autopilot = !driver.autopilot;
        if !driver.autopilot {
            driver.session.set_player_intent(Direction::Stop);
        }
        log::info!("Autopilot: {}", driver.autopilot);
        driver.autopilot
    }

    /// Read the session
    pub fn with_session<R>(&self, f: impl FnOnce(&GameSession) -> R) -> R {
        f(&self.inner.borrow().session)
    }

    fn suspend(&self, auto: bool) -> bool {
        let mut driver = self.inner.borrow_mut();
        if driver.paused || !driver.session.is_running() {
            return false;
        }
        driver.paused = true;
        driver.auto_paused = auto;
        driver.cancel_pending();
        true
    }

    fn schedule(&self) {
        let mut driver = self.inner.borrow_mut();
        driver.next_token += 1;
        let token = driver.next_token;

        let weak: Weak<RefCell<Driver<S>>> = Rc::downgrade(&self.inner);
        let callback: FrameCallback = Box::new(move |time| {
            if let Some(inner) = weak.upgrade() {
                GameLoop { inner }.on_frame(token, time);
            }
        });
        let handle = driver.scheduler.request_frame(callback);
        driver.pending = Some(PendingFrame { token, handle });
    }

    fn on_frame(&self, token: u64, time: f64) {
        let keep_going = {
            let mut guard = self.inner.borrow_mut();
            let driver = &mut *guard;
            // Stale callback from a cancelled or superseded frame
            if driver.pending.as_ref().map(|p| p.token) != Some(token) {
                return;
            }
            driver.pending = None;
            if driver.paused || !driver.session.is_running() {
                return;
            }
            driver.advance(time);
            driver.present();
            driver.session.is_running()
        };

        if keep_going {
            self.schedule();
        } else {
            log::info!("Frame loop finished");
        }
    }
}

/// Scheduler that queues callbacks until fired by hand
///
/// Clones share the same queue, so a test can keep one clone while the
/// `GameLoop` owns another.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<VecDeque<(FrameHandle, FrameCallback)>>>,
    next_handle: Rc<Cell<u64>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of outstanding frame requests
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Fire the oldest outstanding request. Returns false if none was queued.
    pub fn fire_next(&self, time: f64) -> bool {
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some((_, callback)) => {
                callback(time);
                true
            }
            None => false,
        }
    }

    /// Fire frames `frame_ms` apart starting at `start_ms` until nothing is
    /// queued or `max_frames` have run. Returns the number of frames fired.
    pub fn run(&self, start_ms: f64, frame_ms: f64, max_frames: usize) -> usize {
        let mut fired = 0;
        while fired < max_frames && self.fire_next(start_ms + fired as f64 * frame_ms) {
            fired += 1;
        }
        fired
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self, callback: FrameCallback) -> FrameHandle {
        let id = self.next_handle.get() + 1;
        self.next_handle.set(id);
        let handle = FrameHandle(id);
        self.queue.borrow_mut().push_back((handle, callback));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(h, _)| *h != handle);
    }
}
