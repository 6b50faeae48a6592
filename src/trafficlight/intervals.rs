/*
 * Phase durations and the policies that produce them.
 *
 * A fixed policy hands out the same set of durations forever. A dynamic policy
 * derives them from a potentiometer reading every tick, so turning the knob
 * stretches or shrinks the whole cycle while it runs. Only the dynamic set can
 * be nudged by the push button; the fixed set is a hard guarantee.
 */

use super::Phase;
use crate::config::{
    BUTTON_STEP_MS, DYNAMIC_GREEN_RANGE, DYNAMIC_RED_RANGE, DYNAMIC_YELLOW_RANGE, MIN_RED_MS,
    POT_RANGE,
};

/// An inclusive range of integers used on either side of a remap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub low: u32,
    pub high: u32,
}

impl Span {
    pub const fn new(low: u32, high: u32) -> Self {
        Span { low, high }
    }

    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.low, self.high)
    }

    pub fn is_empty(&self) -> bool {
        self.high <= self.low
    }
}

/// Linear interpolation of `value` from `from` onto `to`. The value is clamped
/// into `from` first, so the result is always inside `to`. Degenerate spans
/// map everything onto `to.low`.
pub fn remap(value: u32, from: Span, to: Span) -> u32 {
    if from.is_empty() || to.is_empty() {
        return to.low;
    }
    let offset = u64::from(from.clamp(value) - from.low);
    let scaled = offset * u64::from(to.high - to.low) / u64::from(from.high - from.low);
    // `scaled` never exceeds `to.high - to.low`, so this fits in u32
    to.low + scaled as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    pub red_ms: u32,
    pub yellow_ms: u32,
    pub green_ms: u32,
}

impl Intervals {
    pub const fn new(red_ms: u32, yellow_ms: u32, green_ms: u32) -> Self {
        Intervals {
            red_ms,
            yellow_ms,
            green_ms,
        }
    }

    /// How long `phase` lasts. Both yellow phases share one duration.
    pub fn for_phase(&self, phase: Phase) -> u64 {
        u64::from(match phase {
            Phase::Red => self.red_ms,
            Phase::YellowRising | Phase::YellowFalling => self.yellow_ms,
            Phase::Green => self.green_ms,
        })
    }

    pub fn cycle_ms(&self) -> u64 {
        u64::from(self.red_ms) + 2 * u64::from(self.yellow_ms) + u64::from(self.green_ms)
    }

    pub fn shorten_red(&mut self) {
        self.red_ms = self.red_ms.saturating_sub(BUTTON_STEP_MS).max(MIN_RED_MS);
    }

    // No upper bound on green dwell.
    pub fn lengthen_green(&mut self) {
        self.green_ms = self.green_ms.saturating_add(BUTTON_STEP_MS);
    }
}

/// Remap tables for the potentiometer driven policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapTable {
    pub input: Span,
    pub red: Span,
    pub yellow: Span,
    pub green: Span,
}

impl RemapTable {
    pub const fn standard() -> Self {
        RemapTable {
            input: POT_RANGE,
            red: DYNAMIC_RED_RANGE,
            yellow: DYNAMIC_YELLOW_RANGE,
            green: DYNAMIC_GREEN_RANGE,
        }
    }

    /// One raw sample drives all three durations, so they move in lockstep.
    pub fn intervals(&self, raw: u16) -> Intervals {
        let raw = u32::from(raw);
        Intervals {
            red_ms: remap(raw, self.input, self.red),
            yellow_ms: remap(raw, self.input, self.yellow),
            green_ms: remap(raw, self.input, self.green),
        }
    }
}

impl Default for RemapTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Durations for a raw potentiometer reading on the standard 0..=1000 scale.
pub fn compute_intervals(raw: u16) -> Intervals {
    RemapTable::standard().intervals(raw)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalPolicy {
    Fixed(Intervals),
    Dynamic(RemapTable),
}

impl IntervalPolicy {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, IntervalPolicy::Dynamic(_))
    }

    /// Starting durations, before the first analog sample is taken.
    pub fn initial(&self) -> Intervals {
        match self {
            IntervalPolicy::Fixed(intervals) => *intervals,
            IntervalPolicy::Dynamic(table) => table.intervals(0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IntervalPolicy::Fixed(_) => "fixed",
            IntervalPolicy::Dynamic(_) => "potentiometer",
        }
    }
}
