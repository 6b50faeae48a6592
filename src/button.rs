/*
 * Push button sampling.
 *
 * The button is wired active-low against a pull-up, so a press reads as
 * `Level::Low`. Mechanical contacts chatter for a few milliseconds when they
 * close; a press only counts when the previous accepted press is more than
 * the debounce delay in the past.
 */

use crate::config::DEBOUNCE_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// Debounce bookkeeping for one active-low button.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay_ms: u64,
    /// Timestamp (ms) of the last accepted press.
    last_accepted_at: u64,
    /// True only for the sample that accepted a press.
    pressed: bool,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            last_accepted_at: 0,
            pressed: false,
        }
    }

    /// Feed one raw sample. Returns true iff this sample registers a new press.
    pub fn sample(&mut self, level: Level, now_ms: u64) -> bool {
        let since_last = now_ms.saturating_sub(self.last_accepted_at);
        self.pressed = level == Level::Low && since_last > self.delay_ms;
        if self.pressed {
            self.last_accepted_at = now_ms;
        }
        self.pressed
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn last_accepted_at(&self) -> u64 {
        self.last_accepted_at
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_MS)
    }
}
