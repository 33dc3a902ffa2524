use core::num::NonZeroU8;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::ws2812::{TimingTable, MAX_CHANNELS};

/// ESP32-C3 GPIOs that can drive the data line (11..=17 are wired to flash)
pub const OUTPUT_PINS: [i32; 15] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 18, 19, 20, 21];

/// Strip wiring and driver settings
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct PixelsConfig {
    pub pixel_count: usize,
    /// 3 for RGB, 4 for RGBW
    pub channels: usize,
    /// GPIO number of the data line, one of [`OUTPUT_PINS`]
    pub pin: i32,
    pub rmt_channel: u8,
    /// Divider applied to the 80MHz RMT source clock
    pub clock_divider: u8,
    pub frame_delay_ms: u64,
}

impl Default for PixelsConfig {
    fn default() -> Self {
        Self {
            pixel_count: 100,
            channels: 3,
            pin: 0,
            rmt_channel: 1,
            clock_divider: 4,
            frame_delay_ms: 20,
        }
    }
}

impl PixelsConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pixel_count == 0 {
            bail!("pixel_count must be positive");
        }
        if self.channels == 0 || self.channels > MAX_CHANNELS {
            bail!(
                "channels must be between 1 and {MAX_CHANNELS} (got {})",
                self.channels
            );
        }
        if !OUTPUT_PINS.contains(&self.pin) {
            bail!("Invalid GPIO pin: {}", self.pin);
        }
        self.timing()?;
        Ok(())
    }

    pub fn clock_divider(&self) -> Result<NonZeroU8> {
        NonZeroU8::new(self.clock_divider)
            .ok_or_else(|| anyhow::anyhow!("clock_divider must be non-zero"))
    }

    /// Tick table for the configured divider, rejecting dividers too coarse
    /// to separate zero and one bits
    pub fn timing(&self) -> Result<TimingTable> {
        TimingTable::checked(self.clock_divider()?).ok_or_else(|| {
            anyhow::anyhow!(
                "clock_divider {} is too coarse for ws2812 timing",
                self.clock_divider
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = PixelsConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.timing().unwrap(), TimingTable::default());
    }

    #[test]
    fn test_partial_json() {
        let c = PixelsConfig::from_json(r#"{"pixel_count": 60, "pin": 5}"#).unwrap();
        assert_eq!(c.pixel_count, 60);
        assert_eq!(c.pin, 5);
        assert_eq!(c.channels, 3);
        assert_eq!(c.rmt_channel, 1);
    }

    #[test]
    fn test_invalid() {
        assert!(PixelsConfig::from_json(r#"{"pixel_count": 0}"#).is_err());
        assert!(PixelsConfig::from_json(r#"{"channels": 9}"#).is_err());
        assert!(PixelsConfig::from_json(r#"{"clock_divider": 0}"#).is_err());
        assert!(PixelsConfig::from_json(r#"{"pin": -1}"#).is_err());
        assert!(PixelsConfig::from_json(r#"{"pin": 12}"#).is_err());
        assert!(PixelsConfig::from_json(r#"{"pin": 26}"#).is_err());
        assert!(PixelsConfig::from_json("not json").is_err());
        assert!(PixelsConfig {
            clock_divider: 0,
            ..Default::default()
        }
        .timing()
        .is_err());
    }

    #[test]
    fn test_clock_divider_limits() {
        let c = PixelsConfig::from_json(r#"{"clock_divider": 28}"#).unwrap();
        let t = c.timing().unwrap();
        assert!(t.zero.high < t.one.high);
        assert!(PixelsConfig::from_json(r#"{"clock_divider": 1}"#).is_ok());
        assert!(PixelsConfig::from_json(r#"{"clock_divider": 29}"#).is_err());
        assert!(PixelsConfig::from_json(r#"{"clock_divider": 30}"#).is_err());
        assert!(PixelsConfig::from_json(r#"{"clock_divider": 255}"#).is_err());
    }

    #[test]
    fn test_output_pins() {
        for pin in OUTPUT_PINS {
            let c = PixelsConfig {
                pin,
                ..Default::default()
            };
            assert!(c.validate().is_ok(), "pin {pin}");
        }
    }
}
