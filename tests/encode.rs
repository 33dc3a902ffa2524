#[cfg(test)]
mod tests {
    use core::num::NonZeroU8;

    use neopixel::ws2812::{encode, PulsePair, TimingTable, TICKS_PER_CHANNEL};

    fn pairs(train: &[u16]) -> Vec<PulsePair> {
        train
            .chunks(2)
            .map(|p| PulsePair {
                high: p[0],
                low: p[1],
            })
            .collect()
    }

    #[test]
    fn test_length_independent_of_content() {
        let t = TimingTable::default();
        for channels in 1..=8 {
            for v in [0x00, 0x55, 0xff] {
                let train = encode(&vec![v; channels], &t);
                assert_eq!(train.len(), channels * 8 * 2);
                assert_eq!(train.len(), channels * TICKS_PER_CHANNEL);
            }
        }
    }

    #[test]
    fn test_all_zero_and_all_one() {
        let t = TimingTable::default();
        assert!(pairs(&encode(&[0, 0, 0], &t)).iter().all(|p| *p == t.zero));
        assert!(pairs(&encode(&[255, 255, 255, 255], &t))
            .iter()
            .all(|p| *p == t.one));
    }

    #[test]
    fn test_bit_order() {
        let t = TimingTable::default();
        let (z, o) = (t.zero, t.one);
        // channels in order, each MSB first
        assert_eq!(
            pairs(&encode(&[0b1010_0000, 0b0000_0011], &t)),
            [o, z, o, z, z, z, z, z, z, z, z, z, z, z, o, o]
        );
    }

    #[test]
    fn test_uses_given_timing() {
        let t = TimingTable::new(NonZeroU8::new(1).unwrap());
        assert_eq!(&encode(&[0x80], &t)[..4], &[56, 48, 28, 64]);
    }

    #[test]
    fn test_deterministic() {
        let t = TimingTable::default();
        assert_eq!(encode(&[12, 34, 56], &t), encode(&[12, 34, 56], &t));
        assert_ne!(encode(&[12, 34, 56], &t), encode(&[12, 34, 57], &t));
    }
}
