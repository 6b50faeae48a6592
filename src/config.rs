/*
 * Compile-time configuration of the controller.
 *
 * There is no configuration file. Timings are constants, the interval variant
 * is picked with Cargo features, and whatever the firmware assembles is
 * checked once by `ControllerConfig::validate` before the controller starts.
 */

use thiserror::Error;

use crate::lights::Lamp;
use crate::trafficlight::intervals::{IntervalPolicy, Intervals, RemapTable, Span};
use enum_ordinalize::Ordinalize;

pub const FIXED_INTERVALS: Intervals = Intervals::new(6000, 2000, 4000);
pub const ALTERNATE_FIXED_INTERVALS: Intervals = Intervals::new(5000, 2000, 5000);

pub const POT_RANGE: Span = Span::new(0, 1000);
pub const DYNAMIC_RED_RANGE: Span = Span::new(5000, 60000);
pub const DYNAMIC_YELLOW_RANGE: Span = Span::new(2000, 10000);
pub const DYNAMIC_GREEN_RANGE: Span = Span::new(5000, 60000);

/// Full scale of the 12-bit ADC on the board.
pub const ADC_RANGE: Span = Span::new(0, 4095);

pub const DEBOUNCE_MS: u64 = 50;
pub const BUTTON_STEP_MS: u32 = 2000;
pub const MIN_RED_MS: u32 = 2000;

pub const BUZZER_HZ: u32 = 1000;
pub const BUZZER_PULSE_MS: u64 = 100;
pub const BUZZER_GAP_MS: u64 = 200;

/// Shortest cycle that fits the green and the red buzz, every pulse followed
/// by a gap.
pub const MIN_CYCLE_MS: u64 = 4 * (BUZZER_PULSE_MS + BUZZER_GAP_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("fixed interval for {0} is zero")]
    ZeroInterval(&'static str),
    #[error("remap span for {0} is empty or inverted")]
    EmptySpan(&'static str),
    #[error("debounce delay must be non-zero")]
    ZeroDebounce,
    #[error("cycle of {0} ms is too short for the buzzer")]
    CycleTooShort(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub policy: IntervalPolicy,
    pub debounce_ms: u64,
    /// Lamps wired so that a low pin lights them.
    pub active_lows: [bool; Lamp::VARIANT_COUNT],
}

impl ControllerConfig {
    pub const fn fixed(intervals: Intervals) -> Self {
        ControllerConfig {
            policy: IntervalPolicy::Fixed(intervals),
            debounce_ms: DEBOUNCE_MS,
            active_lows: [false; Lamp::VARIANT_COUNT],
        }
    }

    pub const fn dynamic(table: RemapTable) -> Self {
        ControllerConfig {
            policy: IntervalPolicy::Dynamic(table),
            debounce_ms: DEBOUNCE_MS,
            active_lows: [false; Lamp::VARIANT_COUNT],
        }
    }

    /// The configuration selected by the enabled Cargo features.
    pub const fn from_features() -> Self {
        if cfg!(feature = "potentiometer") {
            Self::dynamic(RemapTable::standard())
        } else if cfg!(feature = "alternate-timing") {
            Self::fixed(ALTERNATE_FIXED_INTERVALS)
        } else {
            Self::fixed(FIXED_INTERVALS)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }

        match &self.policy {
            IntervalPolicy::Fixed(intervals) => {
                let named = [
                    ("red", intervals.red_ms),
                    ("yellow", intervals.yellow_ms),
                    ("green", intervals.green_ms),
                ];
                if let Some((name, _)) = named.iter().find(|(_, ms)| *ms == 0) {
                    return Err(ConfigError::ZeroInterval(*name));
                }
                if intervals.cycle_ms() < MIN_CYCLE_MS {
                    return Err(ConfigError::CycleTooShort(intervals.cycle_ms()));
                }
            }
            IntervalPolicy::Dynamic(table) => {
                let spans = [
                    ("input", table.input),
                    ("red", table.red),
                    ("yellow", table.yellow),
                    ("green", table.green),
                ];
                if let Some((name, _)) = spans.iter().find(|(_, span)| span.is_empty()) {
                    return Err(ConfigError::EmptySpan(*name));
                }
                if table.red.low == 0 || table.yellow.low == 0 || table.green.low == 0 {
                    return Err(ConfigError::ZeroInterval("remap low end"));
                }
                let shortest = Intervals::new(table.red.low, table.yellow.low, table.green.low);
                if shortest.cycle_ms() < MIN_CYCLE_MS {
                    return Err(ConfigError::CycleTooShort(shortest.cycle_ms()));
                }
            }
        }

        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::fixed(FIXED_INTERVALS)
    }
}
