/*
 * The traffic light controller.
 *
 * One tick does, in order: refresh the intervals from the potentiometer (when
 * the policy is dynamic), sample the button and nudge the current interval,
 * advance the buzzer, move to the next phase when the current one is over,
 * and finally drive the lamps for the phase we ended up in.
 *
 * Because the nudge is applied before the phase check, a button press that
 * shortens red below the time already spent in red ends red on that very
 * tick.
 */

use crate::button::Debouncer;
use crate::buzzer::{BuzzPattern, Buzzer};
use crate::capabilities::{AnalogInput, ButtonInput, EventSink, LampOutputs, ToneOutput};
use crate::config::{ConfigError, ControllerConfig};
use crate::diagnostics::Event;
use crate::lights::{Lamp, Lights};
use crate::trafficlight::intervals::{IntervalPolicy, Intervals};
use crate::trafficlight::{Phase, TrafficLight, Transition};
use enum_ordinalize::Ordinalize;

/// Everything the controller drives or samples.
pub struct Board<L, B, A, T, S> {
    pub lamps: L,
    pub button: B,
    pub analog: A,
    pub tone: T,
    pub sink: S,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub lights: Lights,
    pub buzz: Option<BuzzPattern>,
    pub button_pressed: bool,
    pub transition: Option<Transition>,
}

pub struct Controller<L, B, A, T, S>
where
    L: LampOutputs,
    B: ButtonInput,
    A: AnalogInput,
    T: ToneOutput,
    S: EventSink,
{
    lamps: L,
    button: B,
    analog: A,
    sink: S,
    buzzer: Buzzer<T>,
    light: TrafficLight,
    policy: IntervalPolicy,
    intervals: Intervals,
    debouncer: Debouncer,
    active_lows: [bool; Lamp::VARIANT_COUNT],
}

impl<L, B, A, T, S> Controller<L, B, A, T, S>
where
    L: LampOutputs,
    B: ButtonInput,
    A: AnalogInput,
    T: ToneOutput,
    S: EventSink,
{
    /// Start in red at `now`, with the lamps already showing red.
    pub fn new(
        config: ControllerConfig,
        board: Board<L, B, A, T, S>,
        now: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut controller = Controller {
            lamps: board.lamps,
            button: board.button,
            analog: board.analog,
            sink: board.sink,
            buzzer: Buzzer::new(board.tone),
            light: TrafficLight::new(now),
            policy: config.policy,
            intervals: config.policy.initial(),
            debouncer: Debouncer::new(config.debounce_ms),
            active_lows: config.active_lows,
        };
        controller.sink.record(Event::Started {
            policy: controller.policy.name(),
        });
        controller.show();
        Ok(controller)
    }

    pub fn tick(&mut self, now: u64) -> TickOutcome {
        self.refresh_intervals();
        let button_pressed = self.handle_button(now);

        if let Some(done) = self.buzzer.update(now) {
            self.buzz_finished(done);
        }

        let transition = self.light.advance(now, &self.intervals);
        let mut buzz = None;
        if let Some(transition) = transition {
            self.sink.record(Event::PhaseChanged {
                from: transition.from,
                to: transition.to,
            });
            buzz = transition.to.entry_buzz();
            if let Some(pattern) = buzz {
                if let Some(done) = self.buzzer.start(pattern, now) {
                    self.buzz_finished(done);
                }
            }
        }

        TickOutcome {
            lights: self.show(),
            buzz,
            button_pressed,
            transition,
        }
    }

    fn refresh_intervals(&mut self) {
        if let IntervalPolicy::Dynamic(table) = self.policy {
            let raw = self.analog.read();
            self.intervals = table.intervals(raw);
            self.sink.record(Event::IntervalsComputed {
                raw,
                intervals: self.intervals,
            });
        }
    }

    /*
     * Only the dynamic interval set is nudged: red gets shorter, down to a
     * floor, and green gets longer. Presses during yellow count as presses
     * but change nothing.
     */
    fn handle_button(&mut self, now: u64) -> bool {
        let level = self.button.level();
        if !self.debouncer.sample(level, now) {
            return false;
        }

        let phase = self.light.phase();
        self.sink.record(Event::ButtonPressed { phase });

        if self.policy.is_dynamic() {
            let nudged = match phase {
                Phase::Red => {
                    self.intervals.shorten_red();
                    Some(self.intervals.red_ms)
                }
                Phase::Green => {
                    self.intervals.lengthen_green();
                    Some(self.intervals.green_ms)
                }
                Phase::YellowRising | Phase::YellowFalling => None,
            };
            if let Some(interval_ms) = nudged {
                self.sink.record(Event::IntervalNudged { phase, interval_ms });
            }
        }

        true
    }

    fn buzz_finished(&mut self, pattern: BuzzPattern) {
        self.sink.record(Event::BuzzFinished {
            count: pattern.count(),
        });
    }

    fn show(&mut self) -> Lights {
        let lights = self.light.lights();
        self.lamps.show(lights.levels(&self.active_lows));
        lights
    }

    pub fn phase(&self) -> Phase {
        self.light.phase()
    }

    pub fn phase_started_at(&self) -> u64 {
        self.light.phase_started_at()
    }

    pub fn intervals(&self) -> Intervals {
        self.intervals
    }

    pub fn policy(&self) -> IntervalPolicy {
        self.policy
    }

    pub fn buzzer(&self) -> &Buzzer<T> {
        &self.buzzer
    }

    pub fn lamps(&self) -> &L {
        &self.lamps
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn button_mut(&mut self) -> &mut B {
        &mut self.button
    }

    pub fn analog_mut(&mut self) -> &mut A {
        &mut self.analog
    }
}
