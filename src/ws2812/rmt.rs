use anyhow::Result;
use core::num::NonZeroU8;
use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::rmt::{
    config::TransmitConfig, PinState, Pulse, PulseTicks, RmtChannel, TxRmtDriver,
    VariableLengthSignal,
};
use esp_idf_hal::units::Hertz;

use crate::ws2812::{Level, PulseOutput};

impl From<Level> for PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::High => PinState::High,
            Level::Low => PinState::Low,
        }
    }
}

// Pulse output on an RMT transmit channel. The channel is held for the
// lifetime of the driver and uninstalled when it drops.
pub struct RmtOutput<'d> {
    tx: TxRmtDriver<'d>,
    signal: VariableLengthSignal,
}

impl<'d> RmtOutput<'d> {
    pub fn new<C: RmtChannel>(
        channel: impl Peripheral<P = C> + 'd,
        pin: impl Peripheral<P = impl OutputPin> + 'd,
        clock_divider: NonZeroU8,
    ) -> Result<Self> {
        let config = TransmitConfig::new().clock_divider(clock_divider.get());
        let tx = TxRmtDriver::new(channel, pin, &config)?;
        log::info!(
            "RMT output: clock divider {} ({:?})",
            clock_divider,
            tx.counter_clock()?
        );
        Ok(Self {
            tx,
            signal: VariableLengthSignal::new(),
        })
    }

    pub fn counter_clock(&self) -> Result<Hertz> {
        Ok(self.tx.counter_clock()?)
    }
}

impl PulseOutput for RmtOutput<'_> {
    fn emit(&mut self, ticks: &[u16], start: Level) -> Result<()> {
        self.signal.clear();
        let mut level = start;
        for &t in ticks {
            let pulse = Pulse::new(level.into(), PulseTicks::new(t)?);
            self.signal.push([&pulse])?;
            level = !level;
        }
        self.tx.start_blocking(&self.signal)?;
        Ok(())
    }
}

impl Drop for RmtOutput<'_> {
    fn drop(&mut self) {
        log::info!("RMT output released");
    }
}
