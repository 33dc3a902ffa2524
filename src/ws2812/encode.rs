use crate::ws2812::{PulsePair, TimingTable};

pub const BITS_PER_CHANNEL: usize = 8;

/// Tick values per channel: one high and one low per bit
pub const TICKS_PER_CHANNEL: usize = BITS_PER_CHANNEL * 2;

/// Encode a colour as alternating high/low tick counts, channels in order and
/// each channel MSB first.
pub fn encode(colour: &[u8], timing: &TimingTable) -> Vec<u16> {
    let mut train = vec![0; colour.len() * TICKS_PER_CHANNEL];
    encode_into(colour, timing, &mut train);
    train
}

/// As [`encode`] but writes into an existing train.
///
/// `train` must hold exactly `colour.len() * TICKS_PER_CHANNEL` values.
pub fn encode_into(colour: &[u8], timing: &TimingTable, train: &mut [u16]) {
    debug_assert_eq!(train.len(), colour.len() * TICKS_PER_CHANNEL);
    for (channel, ticks) in colour.iter().zip(train.chunks_exact_mut(TICKS_PER_CHANNEL)) {
        for (i, pair) in ticks.chunks_exact_mut(2).enumerate() {
            let PulsePair { high, low } = if (channel >> (7 - i)) & 1 == 0 {
                timing.zero
            } else {
                timing.one
            };
            pair[0] = high;
            pair[1] = low;
        }
    }
}
