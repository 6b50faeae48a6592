/*
 * What the controller needs from the board.
 *
 * The controller never touches a peripheral directly. The firmware's board
 * module implements these traits on top of the HAL; tests implement them with
 * plain structs that record what happened.
 */

use crate::button::Level;
use crate::diagnostics::Event;
use crate::lights::Lamp;
use enum_ordinalize::Ordinalize;

/// The red, yellow and green output lines, in `Lamp` order.
pub trait LampOutputs {
    fn show(&mut self, levels: [Level; Lamp::VARIANT_COUNT]);
}

/// The push button line. Reads `Level::Low` while pressed.
pub trait ButtonInput {
    fn level(&mut self) -> Level;
}

/// The potentiometer, scaled to 0..=1000.
pub trait AnalogInput {
    fn read(&mut self) -> u16;
}

/// A PWM output driving a piezo buzzer.
pub trait ToneOutput {
    fn tone(&mut self, hz: u32);
    fn silence(&mut self);
}

/// Receives the controller's diagnostic events.
pub trait EventSink {
    fn record(&mut self, event: Event);
}

/// Stands in for a potentiometer on boards that do not have one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnalog;

impl AnalogInput for NoAnalog {
    fn read(&mut self) -> u16 {
        0
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: Event) {}
}
