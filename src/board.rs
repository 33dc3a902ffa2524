use anyhow::{bail, Result};
use esp_idf_hal::gpio::{AnyOutputPin, OutputPin, Pins};

use crate::config::OUTPUT_PINS;

/// Typed pin for a configured GPIO number (see [`OUTPUT_PINS`])
pub fn output_pin(pins: Pins, gpio: i32) -> Result<AnyOutputPin> {
    let pin = match gpio {
        0 => pins.gpio0.downgrade_output(),
        1 => pins.gpio1.downgrade_output(),
        2 => pins.gpio2.downgrade_output(),
        3 => pins.gpio3.downgrade_output(),
        4 => pins.gpio4.downgrade_output(),
        5 => pins.gpio5.downgrade_output(),
        6 => pins.gpio6.downgrade_output(),
        7 => pins.gpio7.downgrade_output(),
        8 => pins.gpio8.downgrade_output(),
        9 => pins.gpio9.downgrade_output(),
        10 => pins.gpio10.downgrade_output(),
        18 => pins.gpio18.downgrade_output(),
        19 => pins.gpio19.downgrade_output(),
        20 => pins.gpio20.downgrade_output(),
        21 => pins.gpio21.downgrade_output(),
        n => bail!("GPIO{n} is not an output pin (expected one of {OUTPUT_PINS:?})"),
    };
    Ok(pin)
}
