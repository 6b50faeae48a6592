pub mod intervals;
use intervals::Intervals;

use enum_ordinalize::Ordinalize;

use crate::buzzer::BuzzPattern;
use crate::lights::{Lamp, Lights};

/// The phases of the light, in cycle order. The ordinal of each variant is
/// its position in the cycle, so the successor is simply the next ordinal.
#[derive(Ordinalize, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Phase {
    Red,
    YellowRising,
    Green,
    YellowFalling,
}

impl Phase {
    /*
     * Determine the next phase, without changing the phase that we are in.
     */
    pub fn next(self) -> Phase {
        Phase::VARIANTS[(self.ordinal() + 1) % Phase::VARIANT_COUNT]
    }

    pub fn lamp(self) -> Lamp {
        match self {
            Phase::Red => Lamp::Red,
            Phase::YellowRising | Phase::YellowFalling => Lamp::Yellow,
            Phase::Green => Lamp::Green,
        }
    }

    /// The buzzer pattern announcing that this phase has just started.
    pub fn entry_buzz(self) -> Option<BuzzPattern> {
        match self {
            Phase::Green => Some(BuzzPattern::new(1)),
            Phase::Red => Some(BuzzPattern::new(3)),
            Phase::YellowRising | Phase::YellowFalling => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Red => "red",
            Phase::YellowRising => "yellow (after red)",
            Phase::Green => "green",
            Phase::YellowFalling => "yellow (before red)",
        }
    }
}

/// A phase change that happened during a call to [`TrafficLight::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    pub at: u64,
}

#[derive(Debug)]
pub struct TrafficLight {
    phase: Phase,
    phase_started_at: u64,
}

impl TrafficLight {
    pub fn new(now: u64) -> Self {
        TrafficLight {
            phase: Phase::Red,
            phase_started_at: now,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phase_started_at(&self) -> u64 {
        self.phase_started_at
    }

    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.phase_started_at)
    }

    /*
     * Move to the next phase once the current one has lasted for its
     * interval. At most one step is taken per call, so a late call never
     * skips a phase.
     */
    pub fn advance(&mut self, now: u64, intervals: &Intervals) -> Option<Transition> {
        if self.elapsed(now) < intervals.for_phase(self.phase) {
            return None;
        }

        let transition = Transition {
            from: self.phase,
            to: self.phase.next(),
            at: now,
        };
        self.phase = transition.to;
        self.phase_started_at = now;
        Some(transition)
    }

    pub fn lights(&self) -> Lights {
        Lights::only(self.phase.lamp())
    }

    pub fn red(&self) -> bool {
        self.lights().is_on(Lamp::Red)
    }

    pub fn yellow(&self) -> bool {
        self.lights().is_on(Lamp::Yellow)
    }

    pub fn green(&self) -> bool {
        self.lights().is_on(Lamp::Green)
    }
}
