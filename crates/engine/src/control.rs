//! Fetch control: at most one fetch in flight, cooperative abort
//!
//! ```text
//!            try_begin()             abort()
//!   Idle ───────────────▶ Fetching ──────────▶ AbortRequested
//!    ▲                       │                      │
//!    └──────── finish() ─────┴──────────────────────┘
//! ```
//!
//! `try_begin` never blocks: a caller that finds a fetch in flight backs off
//! immediately. `abort` is the only blocking transition; it waits on a
//! condition variable until the fetch loop notices the request and finishes.

use parking_lot::{Condvar, Mutex};

/// Caller-visible state of the fetch loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// No fetch running
    Idle,
    /// A fetch is producing results
    Fetching,
    /// A fetch is running but has been asked to stop at its next pull
    AbortRequested,
}

/// Shared fetch state guarded by a single mutex
#[derive(Debug)]
pub struct FetchControl {
    phase: Mutex<FetchPhase>,
    idle: Condvar,
}

impl Default for FetchControl {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchControl {
    /// Create an idle control
    pub fn new() -> Self {
        FetchControl {
            phase: Mutex::new(FetchPhase::Idle),
            idle: Condvar::new(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> FetchPhase {
        *self.phase.lock()
    }

    /// True while a fetch is in flight (including one being aborted)
    pub fn is_fetching(&self) -> bool {
        self.phase() != FetchPhase::Idle
    }

    /// Claim the right to fetch; `false` if a fetch is already in flight
    pub fn try_begin(&self) -> bool {
        let mut phase = self.phase.lock();
        if *phase != FetchPhase::Idle {
            return false;
        }
        *phase = FetchPhase::Fetching;
        true
    }

    /// Polled by the fetch loop before every pull
    pub fn abort_requested(&self) -> bool {
        self.phase() == FetchPhase::AbortRequested
    }

    /// Release the claim taken by [`try_begin`](Self::try_begin) and wake waiters
    pub fn finish(&self) {
        let mut phase = self.phase.lock();
        *phase = FetchPhase::Idle;
        self.idle.notify_all();
    }

    /// Ask an in-flight fetch to stop and wait until it has
    ///
    /// Returns `true` if a fetch was running. When this returns, no fetch is
    /// in flight.
    pub fn abort(&self) -> bool {
        let mut phase = self.phase.lock();
        if *phase == FetchPhase::Idle {
            return false;
        }
        *phase = FetchPhase::AbortRequested;
        while *phase != FetchPhase::Idle {
            self.idle.wait(&mut phase);
        }
        true
    }

    /// Block until no fetch is in flight
    pub fn wait_idle(&self) {
        let mut phase = self.phase.lock();
        while *phase != FetchPhase::Idle {
            self.idle.wait(&mut phase);
        }
    }
}
