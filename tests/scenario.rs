mod common;

use common::{ToneCall, controller, finished_buzzes, phase_changes, pulses, run};
use crossing::config::{ALTERNATE_FIXED_INTERVALS, FIXED_INTERVALS};
use crossing::trafficlight::intervals::Span;
use crossing::{ControllerConfig, Event, Intervals, Level, Phase, RemapTable};

#[test]
fn full_cycle_with_fixed_intervals() {
    let mut controller = controller(ControllerConfig::fixed(FIXED_INTERVALS), 0);

    let mut expect = |now: u64, phase: Phase, buzz: Option<u8>| {
        let outcome = controller.tick(now);
        assert_eq!(controller.phase(), phase, "at {now}ms");
        assert_eq!(outcome.buzz.map(|b| b.count()), buzz, "at {now}ms");
    };

    expect(5999, Phase::Red, None);
    expect(6000, Phase::YellowRising, None);
    expect(7999, Phase::YellowRising, None);
    expect(8000, Phase::Green, Some(1));
    expect(11999, Phase::Green, None);
    expect(12000, Phase::YellowFalling, None);
    expect(13999, Phase::YellowFalling, None);
    expect(14000, Phase::Red, Some(3));

    assert_eq!(FIXED_INTERVALS.cycle_ms(), 14000);
}

#[test]
fn alternate_timing_cycle() {
    let mut controller = controller(ControllerConfig::fixed(ALTERNATE_FIXED_INTERVALS), 0);
    run(&mut controller, 0, 14000, 10);
    assert_eq!(
        phase_changes(&controller),
        [
            (Phase::Red, Phase::YellowRising),
            (Phase::YellowRising, Phase::Green),
            (Phase::Green, Phase::YellowFalling),
            (Phase::YellowFalling, Phase::Red),
        ]
    );
    assert_eq!(controller.phase_started_at(), 14000);
}

#[test]
fn green_buzzes_once_and_red_three_times() {
    let mut controller = controller(ControllerConfig::fixed(FIXED_INTERVALS), 0);
    let samples = run(&mut controller, 0, 15000, 1);

    assert_eq!(
        pulses(&samples),
        [
            (8000, 8100),
            (14000, 14100),
            (14300, 14400),
            (14600, 14700),
        ]
    );

    let tones: Vec<_> = controller
        .buzzer()
        .tone()
        .calls
        .iter()
        .filter(|call| matches!(call, ToneCall::On(_)))
        .collect();
    assert_eq!(tones, [&ToneCall::On(1000); 4]);
    assert_eq!(controller.buzzer().tone().calls.last(), Some(&ToneCall::Off));

    assert_eq!(finished_buzzes(&controller), [1, 3]);
}

#[test]
fn lights_keep_updating_while_buzzing() {
    let mut controller = controller(ControllerConfig::fixed(FIXED_INTERVALS), 0);
    run(&mut controller, 0, 14000, 1000);
    let writes_before = controller.lamps().writes;

    run(&mut controller, 14001, 14700, 1);
    assert_eq!(controller.lamps().writes, writes_before + 700);
    assert_eq!(controller.lamps().levels, Some([Level::High, Level::Low, Level::Low]));
}

#[test]
fn debounce_window_between_presses() {
    let mut controller = controller(ControllerConfig::fixed(FIXED_INTERVALS), 0);

    controller.button_mut().level = Level::Low;
    assert!(controller.tick(1000).button_pressed);
    assert!(!controller.tick(1040).button_pressed);

    let mut controller = common::controller(ControllerConfig::fixed(FIXED_INTERVALS), 0);
    controller.button_mut().level = Level::Low;
    assert!(controller.tick(1000).button_pressed);
    assert!(controller.tick(1060).button_pressed);
}

#[test]
fn red_never_drops_below_the_floor() {
    let mut table = RemapTable::standard();
    table.red = Span::new(1000, 3000);
    let mut controller = controller(ControllerConfig::dynamic(table), 1000);
    controller.button_mut().level = Level::Low;

    let mut now = 0;
    while controller.phase() == Phase::Red {
        now += 60;
        assert!(controller.tick(now).button_pressed, "at {now}ms");
        assert_eq!(controller.intervals().red_ms, 2000, "at {now}ms");
    }
    assert_eq!(now, 2040);
    assert!(controller.sink().events.contains(&Event::IntervalNudged {
        phase: Phase::Red,
        interval_ms: 2000
    }));
}

#[test]
fn buzz_requested_while_buzzing_plays_after_it() {
    let mut controller = controller(ControllerConfig::fixed(Intervals::new(6000, 20, 20)), 0);
    let samples = run(&mut controller, 0, 8000, 1);

    assert_eq!(
        pulses(&samples),
        [
            (6020, 6120),
            (6320, 6420),
            (6620, 6720),
            (6920, 7020),
        ]
    );
    assert_eq!(finished_buzzes(&controller), [1, 3]);
}

#[test]
fn knob_changes_take_effect_on_the_next_tick() {
    let mut controller = controller(ControllerConfig::dynamic(RemapTable::standard()), 0);
    controller.tick(1);
    assert_eq!(controller.intervals(), Intervals::new(5000, 2000, 5000));

    controller.analog_mut().raw = 1000;
    controller.tick(4000);
    assert_eq!(controller.phase(), Phase::Red);
    controller.tick(5000);
    assert_eq!(controller.phase(), Phase::Red, "red now lasts 60s");

    controller.analog_mut().raw = 0;
    controller.tick(5001);
    assert_eq!(controller.phase(), Phase::YellowRising);
}

#[test]
fn intervals_are_reported_every_tick() {
    let mut controller = controller(ControllerConfig::dynamic(RemapTable::standard()), 500);
    run(&mut controller, 1, 10, 1);
    let snapshots = controller
        .sink()
        .events
        .iter()
        .filter(|event| {
            matches!(
                event,
                Event::IntervalsComputed {
                    raw: 500,
                    intervals: Intervals {
                        red_ms: 32500,
                        yellow_ms: 6000,
                        green_ms: 32500
                    }
                }
            )
        })
        .count();
    assert_eq!(snapshots, 10);
}
