/*
 * The I/O module for the traffic light.
 *
 * This module binds the controller's capability traits to the pins of the
 * DESPI-M02 board. The intention is for this module to be the only part of
 * the program that is device-specific.
 *
 * Lamps, button and buzzer are driven straight from the control loop. The
 * diagnostic stream is handed over to a separate task through channels, so a
 * slow serial line never holds up the lights.
 */

use crossing::capabilities::{AnalogInput, ButtonInput, EventSink, LampOutputs, ToneOutput};
use crossing::config::{ADC_RANGE, POT_RANGE};
use crossing::diagnostics::{Event, render_line};
use crossing::trafficlight::intervals::remap;
use crossing::{Lamp, Level};
use defmt::warn;
use embassy_futures::select::{Either, select};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{self, Output};
use embassy_stm32::mode::Async;
use embassy_stm32::peripherals::TIM1;
use embassy_stm32::time::hz;
use embassy_stm32::timer::simple_pwm::SimplePwm;
use embassy_stm32::usart::Uart;
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use enum_ordinalize::Ordinalize;

pub const CHANNEL_CAPACITY: usize = 8;

static EVENTS: Channel<ThreadModeRawMutex, Event, CHANNEL_CAPACITY> = Channel::new();
// Interval snapshots arrive every tick; only the latest one is worth printing.
static INTERVALS: Signal<ThreadModeRawMutex, Event> = Signal::new();

pub struct LampPins {
    outputs: [Output<'static>; Lamp::VARIANT_COUNT],
}

impl LampPins {
    pub fn new(red: Output<'static>, yellow: Output<'static>, green: Output<'static>) -> Self {
        LampPins {
            outputs: [red, yellow, green],
        }
    }
}

impl LampOutputs for LampPins {
    fn show(&mut self, levels: [Level; Lamp::VARIANT_COUNT]) {
        for (output, level) in self.outputs.iter_mut().zip(levels) {
            output.set_level(match level {
                Level::High => gpio::Level::High,
                Level::Low => gpio::Level::Low,
            });
        }
    }
}

pub struct Button {
    input: ExtiInput<'static>,
}

impl Button {
    pub fn new(input: ExtiInput<'static>) -> Self {
        Button { input }
    }
}

impl ButtonInput for Button {
    fn level(&mut self) -> Level {
        Level::from(self.input.is_high())
    }
}

/// The most recent potentiometer sample. The ADC is read asynchronously by
/// the control loop, which stores the raw 12-bit value here before ticking.
#[derive(Default)]
pub struct SampledPot {
    raw: u16,
}

impl SampledPot {
    pub fn set_raw(&mut self, raw: u16) {
        self.raw = raw;
    }
}

impl AnalogInput for SampledPot {
    fn read(&mut self) -> u16 {
        // POT_RANGE tops out at 1000, well inside u16
        remap(u32::from(self.raw), ADC_RANGE, POT_RANGE) as u16
    }
}

pub struct PwmBuzzer {
    pwm: SimplePwm<'static, TIM1>,
}

impl PwmBuzzer {
    pub fn new(pwm: SimplePwm<'static, TIM1>) -> Self {
        PwmBuzzer { pwm }
    }
}

impl ToneOutput for PwmBuzzer {
    fn tone(&mut self, frequency: u32) {
        self.pwm.set_frequency(hz(frequency));
        let mut channel = self.pwm.ch1();
        channel.set_duty_cycle_percent(50);
        channel.enable();
    }

    fn silence(&mut self) {
        self.pwm.ch1().disable();
    }
}

/// Hands diagnostic events over to `log_task`.
pub struct SerialSink;

impl EventSink for SerialSink {
    fn record(&mut self, event: Event) {
        match event {
            Event::IntervalsComputed { .. } => INTERVALS.signal(event),
            _ => {
                if EVENTS.try_send(event).is_err() {
                    warn!("diagnostic line dropped, serial log is behind");
                }
            }
        }
    }
}

/*
 * Write one line per diagnostic event to the serial console. Discrete events
 * take precedence over interval snapshots.
 */
#[embassy_executor::task]
pub async fn log_task(mut usart: Uart<'static, Async>) -> ! {
    loop {
        let event = match select(EVENTS.receive(), INTERVALS.wait()).await {
            Either::First(event) => event,
            Either::Second(event) => event,
        };

        let line = render_line(&event);
        if usart.write(line.as_bytes()).await.is_err() || usart.write(b"\r\n").await.is_err() {
            warn!("serial write failed");
        }
    }
}
