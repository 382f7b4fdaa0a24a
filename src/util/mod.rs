//! Deterministic pseudo-random streams for benchmarks, fuzzing and
//! regression tests. This is a test and bench helper, not part of the
//! quantile API.

/// A SplitMix64 generator. Seeding it twice with the same value replays the
/// exact same stream on every platform.
#[derive(Debug, Clone, Copy)]
pub struct SplitMix64 {
    seed: u64,
}

impl SplitMix64 {
    /// Create a generator from `seed`.
    pub fn new(seed: u64) -> SplitMix64 {
        SplitMix64 { seed }
    }

    /// Next 64 uniformly distributed bits.
    pub fn next_u64(&mut self) -> u64 {
        // implementation inspired by
        // https://github.com/astocko/xorshift/blob/master/src/splitmix64.rs
        use std::num::Wrapping as w;

        let mut z = w(self.seed) + w(0x9E37_79B9_7F4A_7C15_u64);
        self.seed = z.0;
        z = (z ^ (z >> 30)) * w(0xBF58_476D_1CE4_E5B9_u64);
        z = (z ^ (z >> 27)) * w(0x94D0_49BB_1331_11EB_u64);
        (z ^ (z >> 31)).0
    }

    /// Uniform sample from [0, 1), built from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Exponentially distributed sample with mean `scale`, by inversion of
    /// the CDF.
    pub fn next_exp(&mut self, scale: f64) -> f64 {
        -(1.0 - self.next_f64()).ln() * scale
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn replays_from_seed() {
        let mut lhs = SplitMix64::new(1972);
        let mut rhs = SplitMix64::new(1972);
        for _ in 0..100 {
            assert_eq!(lhs.next_u64(), rhs.next_u64());
        }
    }

    #[test]
    fn known_exponential_prefix() {
        let mut rng = SplitMix64::new(99);
        let expected = [303.1754392964875, 32.169701593635615, 1800.3546494551097];
        for e in &expected {
            assert!((rng.next_exp(1000.0) - e).abs() < 1e-9);
        }
    }

    #[test]
    fn uniform_stays_in_unit_interval() {
        let mut rng = SplitMix64::new(0);
        for _ in 0..10_000 {
            let u = rng.next_f64();
            assert!((0.0..1.0).contains(&u));
        }
    }
}
