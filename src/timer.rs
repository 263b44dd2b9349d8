//! Elapsed time accounting

use std::convert::TryFrom;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};


/// Source of monotonic time
///
pub trait Clock {
    /// Retrieve the time passed since some fixed origin
    ///
    fn now(&self) -> Duration;
}


/// Clock following the system's monotonic clock
///
#[derive(Copy, Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {origin: Instant::now()}
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}


/// Clock which only advances when told to
///
/// Clones share the same time. Hosts may use this clock to drive sessions from
/// their own ticks.
///
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Advance the clock by the given duration
    ///
    pub fn advance(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    /// Advance the clock by the given number of seconds
    ///
    pub fn advance_secs(&self, seconds: u64) {
        self.advance(Duration::from_secs(seconds))
    }

    /// Set the clock to the given time
    ///
    pub fn set(&self, now: Duration) {
        let nanos = u64::try_from(now.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.store(nanos, Ordering::Relaxed)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }
}


/// Timer accruing time only while running
///
/// Time accrued in earlier runs is retained when the timer is stopped and
/// started again.
///
#[derive(Clone, Debug)]
pub struct Timer<C> {
    clock: C,
    accrued: Duration,
    running_since: Option<Duration>,
}

impl<C: Clock> Timer<C> {
    /// Create a new, stopped timer
    ///
    pub fn new(clock: C) -> Self {
        Self::resume_from(clock, 0)
    }

    /// Create a stopped timer with some time already accrued
    ///
    pub fn resume_from(clock: C, seconds: u64) -> Self {
        Self {clock, accrued: Duration::from_secs(seconds), running_since: None}
    }

    /// Start accruing time
    ///
    /// Starting a running timer has no effect.
    ///
    pub fn start(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(self.clock.now())
        }
    }

    /// Stop accruing time
    ///
    /// Stopping a stopped timer has no effect.
    ///
    pub fn stop(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accrued += self.clock.now().checked_sub(since).unwrap_or_default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Retrieve the total time accrued, including the current run
    ///
    pub fn elapsed(&self) -> Duration {
        let current = self
            .running_since
            .and_then(|since| self.clock.now().checked_sub(since))
            .unwrap_or_default();
        self.accrued + current
    }

    /// Retrieve the total time accrued in whole seconds
    ///
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
