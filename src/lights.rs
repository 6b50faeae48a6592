/*
 * The lamps of the signal head and how their desired state maps onto pin
 * levels.
 *
 * The control logic only ever talks about lamps being on or off. Whether a
 * lamp lights up on a high or a low pin is a wiring detail that is applied at
 * the very end, when the desired state is turned into output levels. This
 * keeps the state machine free of active-low special cases.
 */

use enum_ordinalize::Ordinalize;

use crate::button::Level;

#[derive(Ordinalize, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Lamp {
    Red,
    Yellow,
    Green,
}

/// Desired on/off state of every lamp, indexed by `Lamp` ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lights {
    on: [bool; Lamp::VARIANT_COUNT],
}

impl Lights {
    pub const fn dark() -> Self {
        Lights {
            on: [false; Lamp::VARIANT_COUNT],
        }
    }

    pub fn only(lamp: Lamp) -> Self {
        let mut lights = Self::dark();
        lights.on[lamp.ordinal()] = true;
        lights
    }

    pub fn is_on(&self, lamp: Lamp) -> bool {
        self.on[lamp.ordinal()]
    }

    pub fn lit_count(&self) -> usize {
        self.on.iter().filter(|on| **on).count()
    }

    /*
     * Turn the desired lamp state into pin levels, inverting the lamps that
     * are wired active-low.
     */
    pub fn levels(
        &self,
        active_lows: &[bool; Lamp::VARIANT_COUNT],
    ) -> [Level; Lamp::VARIANT_COUNT] {
        let mut levels = [Level::Low; Lamp::VARIANT_COUNT];
        for i in 0..Lamp::VARIANT_COUNT {
            let mut high = self.on[i];
            if active_lows[i] {
                high = !high;
            }
            levels[i] = Level::from(high);
        }
        levels
    }
}

impl Default for Lights {
    fn default() -> Self {
        Self::dark()
    }
}
