use core::iter::StepBy;
use core::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};

use crate::ws2812::{encode, encode_into, TICKS_PER_CHANNEL};
use crate::ws2812::{Colour, Error, Level, Mismatch, PulseOutput, Result, TimingTable};

/// Slice-style selection of pixel positions: `start..stop` stepping by `step`.
///
/// Open ends resolve against the buffer length. Bounds past the end of the
/// buffer are rejected rather than clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRange {
    start: Option<usize>,
    stop: Option<usize>,
    step: usize,
}

impl PixelRange {
    pub const fn new(start: Option<usize>, stop: Option<usize>, step: usize) -> Self {
        Self { start, stop, step }
    }

    pub const fn all() -> Self {
        Self::new(None, None, 1)
    }

    pub const fn step_by(self, step: usize) -> Self {
        Self { step, ..self }
    }

    fn resolve(&self, len: usize) -> Result<StepBy<Range<usize>>> {
        if self.step == 0 {
            return Err(Mismatch::ZeroStep.into());
        }
        let start = self.start.unwrap_or(0);
        let stop = self.stop.unwrap_or(len);
        for index in [start, stop] {
            if index > len {
                return Err(Error::InvalidIndex { index, len });
            }
        }
        // start >= stop selects nothing
        Ok((start..stop.max(start)).step_by(self.step))
    }
}

impl From<Range<usize>> for PixelRange {
    fn from(r: Range<usize>) -> Self {
        Self::new(Some(r.start), Some(r.end), 1)
    }
}

impl From<RangeInclusive<usize>> for PixelRange {
    fn from(r: RangeInclusive<usize>) -> Self {
        Self::new(Some(*r.start()), Some(r.end().saturating_add(1)), 1)
    }
}

impl From<RangeFrom<usize>> for PixelRange {
    fn from(r: RangeFrom<usize>) -> Self {
        Self::new(Some(r.start), None, 1)
    }
}

impl From<RangeTo<usize>> for PixelRange {
    fn from(r: RangeTo<usize>) -> Self {
        Self::new(None, Some(r.end), 1)
    }
}

impl From<RangeFull> for PixelRange {
    fn from(_: RangeFull) -> Self {
        Self::all()
    }
}

/// What a range assignment writes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Assignment {
    /// Same colour at every position
    Broadcast(Colour),
    /// Position `k` of the range gets `colours[k % colours.len()]`
    Sequence(Vec<Colour>),
}

impl From<Colour> for Assignment {
    fn from(colour: Colour) -> Self {
        Self::Broadcast(colour)
    }
}

impl From<Vec<Colour>> for Assignment {
    fn from(colours: Vec<Colour>) -> Self {
        Self::Sequence(colours)
    }
}

// Colour and its encoding live together so they can't drift apart
struct Pixel {
    colour: Colour,
    train: Box<[u16]>,
}

/// Pixel buffer bound to one pulse output.
///
/// Every pixel keeps its last written colour for readback and the pulse
/// train that encodes it, so `write` only has to concatenate.
pub struct Pixels<O: PulseOutput> {
    output: O,
    timing: TimingTable,
    channels: usize,
    pixels: Vec<Pixel>,
    frame: Vec<u16>,
}

impl<O: PulseOutput> Pixels<O> {
    pub fn new(output: O, pixel_count: usize, channels: usize, timing: TimingTable) -> Result<Self> {
        if pixel_count == 0 {
            return Err(Error::InvalidConfig("pixel count must be positive"));
        }
        let off = Colour::off(channels)?;
        let train = encode(&off, &timing).into_boxed_slice();
        let pixels = (0..pixel_count)
            .map(|_| Pixel {
                colour: off.clone(),
                train: train.clone(),
            })
            .collect();
        log::info!("Pixels: {pixel_count} x {channels} channels, timing {timing:?}");
        Ok(Self {
            output,
            timing,
            channels,
            pixels,
            frame: Vec::with_capacity(pixel_count * channels * TICKS_PER_CHANNEL),
        })
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn timing(&self) -> &TimingTable {
        &self.timing
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn set(&mut self, index: usize, colour: impl Into<Colour>) -> Result<()> {
        let colour = colour.into();
        let len = self.len();
        if index >= len {
            return Err(Error::InvalidIndex { index, len });
        }
        self.check_colour(&colour)?;
        let pixel = &mut self.pixels[index];
        encode_into(&colour, &self.timing, &mut pixel.train);
        pixel.colour = colour;
        Ok(())
    }

    /// Assign a range of pixels. Nothing is written unless the whole
    /// assignment is valid.
    pub fn set_range(
        &mut self,
        range: impl Into<PixelRange>,
        assignment: impl Into<Assignment>,
    ) -> Result<()> {
        let indices = range.into().resolve(self.len())?;
        match assignment.into() {
            Assignment::Broadcast(colour) => {
                self.check_colour(&colour)?;
                let train = encode(&colour, &self.timing);
                for i in indices {
                    let pixel = &mut self.pixels[i];
                    pixel.colour.clone_from(&colour);
                    pixel.train.copy_from_slice(&train);
                }
            }
            Assignment::Sequence(colours) => {
                if colours.is_empty() {
                    return Err(Mismatch::EmptySequence.into());
                }
                for colour in &colours {
                    self.check_colour(colour)?;
                }
                let trains = colours
                    .iter()
                    .map(|c| encode(c, &self.timing))
                    .collect::<Vec<_>>();
                for (k, i) in indices.enumerate() {
                    let n = k % colours.len();
                    let pixel = &mut self.pixels[i];
                    pixel.colour.clone_from(&colours[n]);
                    pixel.train.copy_from_slice(&trains[n]);
                }
            }
        }
        Ok(())
    }

    /// Broadcast `colour` to every pixel
    pub fn fill(&mut self, colour: impl Into<Colour>) -> Result<()> {
        self.set_range(PixelRange::all(), Assignment::Broadcast(colour.into()))
    }

    pub fn get(&self, index: usize) -> Result<&Colour> {
        self.pixels
            .get(index)
            .map(|p| &p.colour)
            .ok_or(Error::InvalidIndex {
                index,
                len: self.len(),
            })
    }

    pub fn get_range(&self, range: impl Into<PixelRange>) -> Result<Vec<Colour>> {
        let indices = range.into().resolve(self.len())?;
        Ok(indices.map(|i| self.pixels[i].colour.clone()).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Colour> + '_ {
        self.pixels.iter().map(|p| &p.colour)
    }

    /// Cached encoding of the pixel at `index`
    pub fn pulse_train(&self, index: usize) -> Result<&[u16]> {
        self.pixels
            .get(index)
            .map(|p| &*p.train)
            .ok_or(Error::InvalidIndex {
                index,
                len: self.len(),
            })
    }

    /// Send the whole buffer, blocking until the output has finished.
    ///
    /// The frame starts high and its final low is stretched to the reset gap
    /// so the strip latches whatever the last bit was.
    pub fn write(&mut self) -> Result<()> {
        self.frame.clear();
        for pixel in &self.pixels {
            self.frame.extend_from_slice(&pixel.train);
        }
        if let Some(last) = self.frame.last_mut() {
            *last = self.timing.reset;
        }
        log::debug!("write: {} ticks", self.frame.len());
        self.output
            .emit(&self.frame, Level::High)
            .map_err(Error::PeripheralFailure)
    }

    /// Give up the buffer and hand back the output
    pub fn release(self) -> O {
        self.output
    }

    fn check_colour(&self, colour: &Colour) -> Result<()> {
        if colour.channels() != self.channels {
            return Err(Mismatch::Channels {
                expected: self.channels,
                found: colour.channels(),
            }
            .into());
        }
        Ok(())
    }
}
