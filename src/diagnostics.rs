/*
 * Diagnostic events of the controller and their text rendering.
 *
 * Every event renders as a single human-readable line. The text is meant for
 * a person watching the serial console, nothing parses it.
 */

use core::fmt::{self, Write};

use heapless::String;

use crate::trafficlight::Phase;
use crate::trafficlight::intervals::Intervals;

/// Longest line `render_line` produces without truncation.
pub const LINE_CAPACITY: usize = 96;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Started { policy: &'static str },
    IntervalsComputed { raw: u16, intervals: Intervals },
    ButtonPressed { phase: Phase },
    IntervalNudged { phase: Phase, interval_ms: u32 },
    PhaseChanged { from: Phase, to: Phase },
    BuzzFinished { count: u8 },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Started { policy } => write!(f, "controller started, {policy} intervals"),
            Event::IntervalsComputed { raw, intervals } => write!(
                f,
                "potentiometer {raw}: red {}ms yellow {}ms green {}ms",
                intervals.red_ms, intervals.yellow_ms, intervals.green_ms
            ),
            Event::ButtonPressed { phase } => write!(f, "button pressed during {}", phase.name()),
            Event::IntervalNudged {
                phase: Phase::Red,
                interval_ms,
            } => write!(f, "red shortened by button to {interval_ms}ms"),
            Event::IntervalNudged { phase, interval_ms } => {
                write!(f, "{} lengthened by button to {interval_ms}ms", phase.name())
            }
            Event::PhaseChanged { from, to } => {
                write!(f, "changed from {} to {}", from.name(), to.name())
            }
            Event::BuzzFinished { count } => write!(f, "buzzer sounded {count} time(s)"),
        }
    }
}

/// Render `event` into a fixed-size line, truncating if it does not fit.
pub fn render_line(event: &Event) -> String<LINE_CAPACITY> {
    let mut line = Truncating(String::new());
    // Truncating never reports an error
    let _ = write!(line, "{event}");
    line.0
}

struct Truncating(String<LINE_CAPACITY>);

impl Write for Truncating {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_change_line() {
        let line = render_line(&Event::PhaseChanged {
            from: Phase::YellowFalling,
            to: Phase::Red,
        });
        assert_eq!(line.as_str(), "changed from yellow (before red) to red");
    }

    #[test]
    fn intervals_line() {
        let line = render_line(&Event::IntervalsComputed {
            raw: 500,
            intervals: Intervals::new(32500, 6000, 32500),
        });
        assert_eq!(
            line.as_str(),
            "potentiometer 500: red 32500ms yellow 6000ms green 32500ms"
        );
    }

    #[test]
    fn nudge_lines() {
        let red = Event::IntervalNudged {
            phase: Phase::Red,
            interval_ms: 3000,
        };
        let green = Event::IntervalNudged {
            phase: Phase::Green,
            interval_ms: 7000,
        };
        assert_eq!(red.to_string(), "red shortened by button to 3000ms");
        assert_eq!(green.to_string(), "green lengthened by button to 7000ms");
    }

    #[test]
    fn buzz_line() {
        assert_eq!(
            render_line(&Event::BuzzFinished { count: 3 }).as_str(),
            "buzzer sounded 3 time(s)"
        );
    }

    #[test]
    fn every_line_fits() {
        let worst = Event::IntervalsComputed {
            raw: u16::MAX,
            intervals: Intervals::new(u32::MAX, u32::MAX, u32::MAX),
        };
        assert_eq!(render_line(&worst).as_str(), worst.to_string());
    }
}
