//! Injected sources of uniform randomness.
//!
//! Generation never reaches for a global RNG; callers hand in a
//! [`UniformSource`].

use rand::Rng;

/// A source of uniformly distributed floats in `[0, 1)`.
pub trait UniformSource {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f32;
}

/// Adapts any [`rand::Rng`] into a [`UniformSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> UniformSource for RngSource<R> {
    fn next_unit(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}

/// Returns the same value forever. Values outside `[0, 1)` are clamped.
#[derive(Debug, Clone, Copy)]
pub struct ConstantSource(pub f32);

impl UniformSource for ConstantSource {
    fn next_unit(&mut self) -> f32 {
        self.0.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

/// Cycles through a fixed list of values.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceSource {
    /// Create a source that replays `values` in order, wrapping at the end.
    /// An empty list behaves like a constant zero.
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl UniformSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rng_source_stays_in_unit_interval() {
        let mut source = RngSource(ChaCha8Rng::seed_from_u64(7));
        for _ in 0..10_000 {
            let v = source.next_unit();
            assert!((0.0..1.0).contains(&v), "value {v} outside [0, 1)");
        }
    }

    #[test]
    fn test_constant_source_repeats() {
        let mut source = ConstantSource(0.25);
        assert_eq!(source.next_unit(), 0.25);
        assert_eq!(source.next_unit(), 0.25);
    }

    #[test]
    fn test_constant_source_clamps_one() {
        let mut source = ConstantSource(1.0);
        assert!(source.next_unit() < 1.0);
    }

    #[test]
    fn test_sequence_source_wraps() {
        let mut source = SequenceSource::new(vec![0.1, 0.2, 0.3]);
        let drawn: Vec<f32> = (0..5).map(|_| source.next_unit()).collect();
        assert_eq!(drawn, vec![0.1, 0.2, 0.3, 0.1, 0.2]);
    }

    #[test]
    fn test_empty_sequence_is_zero() {
        let mut source = SequenceSource::new(Vec::new());
        assert_eq!(source.next_unit(), 0.0);
    }
}
