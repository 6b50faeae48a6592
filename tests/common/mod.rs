#![allow(dead_code)]

use crossing::capabilities::{AnalogInput, ButtonInput, EventSink, LampOutputs, ToneOutput};
use crossing::{Board, Controller, ControllerConfig, Event, Level};

#[derive(Default)]
pub struct FakeLamps {
    pub levels: Option<[Level; 3]>,
    pub writes: usize,
}

impl LampOutputs for FakeLamps {
    fn show(&mut self, levels: [Level; 3]) {
        self.levels = Some(levels);
        self.writes += 1;
    }
}

pub struct FakeButton {
    pub level: Level,
}

impl Default for FakeButton {
    fn default() -> Self {
        FakeButton { level: Level::High }
    }
}

impl ButtonInput for FakeButton {
    fn level(&mut self) -> Level {
        self.level
    }
}

#[derive(Default)]
pub struct FakeKnob {
    pub raw: u16,
}

impl AnalogInput for FakeKnob {
    fn read(&mut self) -> u16 {
        self.raw
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneCall {
    On(u32),
    Off,
}

#[derive(Default)]
pub struct FakeBuzzer {
    pub calls: Vec<ToneCall>,
}

impl ToneOutput for FakeBuzzer {
    fn tone(&mut self, hz: u32) {
        self.calls.push(ToneCall::On(hz));
    }

    fn silence(&mut self) {
        self.calls.push(ToneCall::Off);
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<Event>,
}

impl EventSink for RecordingSink {
    fn record(&mut self, event: Event) {
        self.events.push(event);
    }
}

pub type TestController = Controller<FakeLamps, FakeButton, FakeKnob, FakeBuzzer, RecordingSink>;

pub fn controller(config: ControllerConfig, raw: u16) -> TestController {
    let board = Board {
        lamps: FakeLamps::default(),
        button: FakeButton::default(),
        analog: FakeKnob { raw },
        tone: FakeBuzzer::default(),
        sink: RecordingSink::default(),
    };
    Controller::new(config, board, 0).expect("test config is valid")
}

/// One sample of the buzzer state taken after a tick.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub now: u64,
    pub sounding: bool,
}

/// Tick every `step` ms from `from` up to and including `to`.
pub fn run(controller: &mut TestController, from: u64, to: u64, step: u64) -> Vec<Sample> {
    let mut samples = Vec::new();
    let mut now = from;
    while now <= to {
        controller.tick(now);
        samples.push(Sample {
            now,
            sounding: controller.buzzer().is_sounding(),
        });
        now += step;
    }
    samples
}

/// (start, end) of every stretch of samples during which the buzzer sounded.
pub fn pulses(samples: &[Sample]) -> Vec<(u64, u64)> {
    let mut pulses = Vec::new();
    let mut since = None;
    for sample in samples {
        match (since, sample.sounding) {
            (None, true) => since = Some(sample.now),
            (Some(start), false) => {
                pulses.push((start, sample.now));
                since = None;
            }
            _ => {}
        }
    }
    pulses
}

pub fn phase_changes(controller: &TestController) -> Vec<(crossing::Phase, crossing::Phase)> {
    controller
        .sink()
        .events
        .iter()
        .filter_map(|event| match event {
            Event::PhaseChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

/// Pulse counts of every buzz that played out, in order.
pub fn finished_buzzes(controller: &TestController) -> Vec<u8> {
    controller
        .sink()
        .events
        .iter()
        .filter_map(|event| match event {
            Event::BuzzFinished { count } => Some(*count),
            _ => None,
        })
        .collect()
}
