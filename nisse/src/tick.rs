//! Polling clock.
//!
//! A timer interrupt advances the tick, the main loop runs one keyboard task
//! per new tick. Declare the clock as a `static` so the interrupt can reach it.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// Length of one polling tick
pub const TICK_MS: u32 = 16;

/// Tick counter shared with the timer interrupt
pub struct PollClock {
    ticks: Mutex<CriticalSectionRawMutex, Cell<u16>>,
}

impl Default for PollClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PollClock {
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(Cell::new(0)),
        }
    }

    /// Advance by one tick, called from the timer interrupt
    pub fn on_interrupt(&self) {
        self.ticks.lock(|t| t.set(t.get().wrapping_add(1)));
    }

    pub fn now(&self) -> u16 {
        self.ticks.lock(|t| t.get())
    }

    pub fn reset(&self) {
        self.ticks.lock(|t| t.set(0));
    }
}

/// Remembers the last tick the main loop acted on
#[derive(Debug, Default, Clone)]
pub struct PollGate {
    last: u16,
}

impl PollGate {
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Returns `true` once per new tick of `clock`
    pub fn poll(&mut self, clock: &PollClock) -> bool {
        let now = clock.now();
        if now == self.last {
            return false;
        }
        let missed = now.wrapping_sub(self.last).wrapping_sub(1);
        if missed > 0 {
            trace!("Missed {} poll ticks", missed);
        }
        self.last = now;
        true
    }
}
