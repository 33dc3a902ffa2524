use core::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::ws2812::{Error, Result};

/// Largest channel count a single pixel can carry
pub const MAX_CHANNELS: usize = 8;

const CHANNELS_MSG: &str = "channel count must be 1..=8";

/// Raw per-channel intensities for one pixel, in wire order.
///
/// The channel count is not part of the type; [`Pixels`](crate::ws2812::Pixels)
/// checks it against the buffer on every assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "heapless::Vec<u8, MAX_CHANNELS>")]
pub struct Colour(heapless::Vec<u8, MAX_CHANNELS>);

impl Colour {
    /// All channels off
    pub fn off(channels: usize) -> Result<Self> {
        Self::check_channels(channels)?;
        Self::from_slice(&[0; MAX_CHANNELS][..channels])
    }

    pub fn from_slice(channels: &[u8]) -> Result<Self> {
        Self::check_channels(channels.len())?;
        heapless::Vec::from_slice(channels)
            .map(Self)
            .map_err(|_| Error::InvalidConfig(CHANNELS_MSG))
    }

    pub fn channels(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    fn check_channels(channels: usize) -> Result<()> {
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(Error::InvalidConfig(CHANNELS_MSG));
        }
        Ok(())
    }
}

impl Deref for Colour {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Colour {
    type Error = Error;

    fn try_from(channels: &[u8]) -> Result<Self> {
        Self::from_slice(channels)
    }
}

impl TryFrom<heapless::Vec<u8, MAX_CHANNELS>> for Colour {
    type Error = Error;

    fn try_from(channels: heapless::Vec<u8, MAX_CHANNELS>) -> Result<Self> {
        Self::check_channels(channels.len())?;
        Ok(Self(channels))
    }
}

// Infallible for the common layouts

impl From<[u8; 3]> for Colour {
    fn from(rgb: [u8; 3]) -> Self {
        Self(heapless::Vec::from_iter(rgb))
    }
}

impl From<[u8; 4]> for Colour {
    fn from(rgbw: [u8; 4]) -> Self {
        Self(heapless::Vec::from_iter(rgbw))
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::from([r, g, b])
    }
}

impl From<(u8, u8, u8, u8)> for Colour {
    fn from((r, g, b, w): (u8, u8, u8, u8)) -> Self {
        Self::from([r, g, b, w])
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Colour {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_slice() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off() {
        assert_eq!(Colour::off(3).unwrap(), [0, 0, 0]);
        assert_eq!(Colour::off(4).unwrap().channels(), 4);
        assert!(matches!(Colour::off(0), Err(Error::InvalidConfig(_))));
        assert!(matches!(Colour::off(9), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_from_slice() {
        let c = Colour::from_slice(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(c.channels(), 5);
        assert_eq!(&*c, &[1, 2, 3, 4, 5]);
        assert!(Colour::try_from(&[0u8; 9][..]).is_err());
        assert!(Colour::try_from(&[0u8; 0][..]).is_err());
    }

    #[test]
    fn test_tuple_and_array_agree() {
        assert_eq!(Colour::from((1, 2, 3)), Colour::from([1, 2, 3]));
        assert_eq!(Colour::from((1, 2, 3, 4)), [1, 2, 3, 4]);
        assert_ne!(Colour::from([1, 2, 3]), Colour::from([1, 2, 3, 0]));
    }

    #[test]
    fn test_json() {
        let c: Colour = serde_json::from_str("[10,20,30]").unwrap();
        assert_eq!(c, [10, 20, 30]);
        assert_eq!(serde_json::to_string(&c).unwrap(), "[10,20,30]");
        assert!(serde_json::from_str::<Colour>("[]").is_err());
        assert!(serde_json::from_str::<Colour>("[1,2,3,4,5,6,7,8,9]").is_err());
    }
}
