use core::ops::Not;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Hardware that can emit a sequence of timed pulses on one pin.
///
/// Acquiring the channel is the implementor's constructor and releasing it is
/// its `Drop`. `emit` blocks until the whole sequence has been sent.
pub trait PulseOutput {
    /// Emit `ticks` as pulse durations, starting at `start` and alternating
    /// level after each value.
    fn emit(&mut self, ticks: &[u16], start: Level) -> anyhow::Result<()>;
}

impl<T: PulseOutput + ?Sized> PulseOutput for &mut T {
    fn emit(&mut self, ticks: &[u16], start: Level) -> anyhow::Result<()> {
        (**self).emit(ticks, start)
    }
}

impl<T: PulseOutput + ?Sized> PulseOutput for Box<T> {
    fn emit(&mut self, ticks: &[u16], start: Level) -> anyhow::Result<()> {
        (**self).emit(ticks, start)
    }
}
