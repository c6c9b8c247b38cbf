//! Scripted random source for testing.

use std::collections::VecDeque;

use crate::random::RandomSource;

/// A `RandomSource` replaying fixed draws.
///
/// `next_f64` pops from the float script and `next_index` from the index
/// script. An exhausted script keeps answering its fallback value, so a test
/// only scripts the draws it cares about.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    floats: VecDeque<f64>,
    indices: VecDeque<usize>,
    float_fallback: f64,
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRandom {
    /// Floats fall back to `0.99` (never a keyword or important draw), indices to `0`.
    pub fn new() -> Self {
        Self {
            floats: VecDeque::new(),
            indices: VecDeque::new(),
            float_fallback: 0.99,
        }
    }

    /// Every float draw returns `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            float_fallback: value,
            ..Self::new()
        }
    }

    pub fn with_floats(mut self, floats: impl IntoIterator<Item = f64>) -> Self {
        self.floats.extend(floats);
        self
    }

    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        self.floats.pop_front().unwrap_or(self.float_fallback)
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0).min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_then_fallback() {
        let mut random = ScriptedRandom::new()
            .with_floats([0.1, 0.2])
            .with_indices([4, 1]);
        assert_eq!(random.next_f64(), 0.1);
        assert_eq!(random.next_f64(), 0.2);
        assert_eq!(random.next_f64(), 0.99);
        assert_eq!(random.next_index(3), 2);
        assert_eq!(random.next_index(3), 1);
        assert_eq!(random.next_index(3), 0);
    }

    #[test]
    fn test_constant() {
        let mut random = ScriptedRandom::constant(0.0);
        assert_eq!(random.next_f64(), 0.0);
        assert_eq!(random.next_f64(), 0.0);
    }
}
