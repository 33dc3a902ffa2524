mod colour;
mod encode;
mod error;
mod output;
mod pixels;
#[cfg(target_os = "espidf")]
mod rmt;

use core::num::NonZeroU8;

pub use colour::{Colour, MAX_CHANNELS};
pub use encode::{encode, encode_into, BITS_PER_CHANNEL, TICKS_PER_CHANNEL};
pub use error::{Error, Mismatch, Result};
pub use output::{Level, PulseOutput};
pub use pixels::{Assignment, PixelRange, Pixels};
#[cfg(target_os = "espidf")]
pub use rmt::RmtOutput;

// ws2812 timings (ns)
const T0H: u64 = 350;
const T0L: u64 = 800;
const T1H: u64 = 700;
const T1L: u64 = 600;
const RESET: u64 = 51_000;

/// RMT source clock (APB)
pub const APB_CLOCK_HZ: u32 = 80_000_000;

/// Default divider gives a 50ns tick
pub const DEFAULT_CLOCK_DIVIDER: NonZeroU8 = match NonZeroU8::new(4) {
    Some(d) => d,
    None => unreachable!(),
};

// RMT item duration field is 15 bits
const MAX_TICKS: u64 = 0x7fff;

/// High/low tick counts for a single encoded bit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PulsePair {
    pub high: u16,
    pub low: u16,
}

/// Tick counts used by the encoder, fixed for a given peripheral clock.
///
/// Durations are truncated to whole ticks and clamped to what an RMT item can
/// hold (at least one tick, at most 32767).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingTable {
    pub zero: PulsePair,
    pub one: PulsePair,
    pub reset: u16,
}

impl TimingTable {
    pub const fn new(clock_divider: NonZeroU8) -> Self {
        Self::with_source_clock(APB_CLOCK_HZ, clock_divider)
    }

    pub const fn with_source_clock(source_hz: u32, clock_divider: NonZeroU8) -> Self {
        let tick_hz = source_hz as u64 / clock_divider.get() as u64;
        Self {
            zero: PulsePair {
                high: ticks(T0H, tick_hz),
                low: ticks(T0L, tick_hz),
            },
            one: PulsePair {
                high: ticks(T1H, tick_hz),
                low: ticks(T1L, tick_hz),
            },
            reset: ticks(RESET, tick_hz),
        }
    }

    /// As [`new`](Self::new) but `None` when the divider is too coarse for
    /// the strip to tell a zero bit from a one bit.
    pub const fn checked(clock_divider: NonZeroU8) -> Option<Self> {
        Self::checked_with_source_clock(APB_CLOCK_HZ, clock_divider)
    }

    /// Every pulse must land in `1..=32767` ticks without clamping, and the
    /// one bit must stay high longer than the zero bit.
    pub const fn checked_with_source_clock(
        source_hz: u32,
        clock_divider: NonZeroU8,
    ) -> Option<Self> {
        let tick_hz = source_hz as u64 / clock_divider.get() as u64;
        let raw = [T0H, T0L, T1H, T1L, RESET];
        let mut i = 0;
        while i < raw.len() {
            let t = raw[i] * tick_hz / 1_000_000_000;
            if t == 0 || t > MAX_TICKS {
                return None;
            }
            i += 1;
        }
        let table = Self::with_source_clock(source_hz, clock_divider);
        if table.zero.high >= table.one.high {
            return None;
        }
        Some(table)
    }

    /// Tick length in nanoseconds (may be fractional for odd dividers)
    pub fn tick_ns(source_hz: u32, clock_divider: NonZeroU8) -> f64 {
        1e9 * clock_divider.get() as f64 / source_hz as f64
    }
}

impl Default for TimingTable {
    fn default() -> Self {
        Self::new(DEFAULT_CLOCK_DIVIDER)
    }
}

const fn ticks(nanos: u64, tick_hz: u64) -> u16 {
    let t = nanos * tick_hz / 1_000_000_000;
    if t == 0 {
        1
    } else if t > MAX_TICKS {
        MAX_TICKS as u16
    } else {
        t as u16
    }
}
