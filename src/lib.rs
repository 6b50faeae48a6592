/*
 * Timed traffic light controller.
 *
 * Everything in this crate is independent of the board: the firmware binary
 * binds the capability traits to real pins and feeds the controller the
 * current time. That keeps the whole state machine testable on the host.
 */

#![cfg_attr(not(test), no_std)]

pub mod button;
pub mod buzzer;
pub mod capabilities;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod lights;
pub mod trafficlight;

pub use button::{Debouncer, Level};
pub use buzzer::{BuzzPattern, Buzzer};
pub use config::{ConfigError, ControllerConfig};
pub use controller::{Board, Controller, TickOutcome};
pub use diagnostics::Event;
pub use lights::{Lamp, Lights};
pub use trafficlight::intervals::{IntervalPolicy, Intervals, RemapTable, compute_intervals};
pub use trafficlight::{Phase, TrafficLight, Transition};
