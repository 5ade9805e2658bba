/// Simple Linear Congruential Generator for reproducible randomize/shuffle.
///
/// Seeded explicitly so a session can be replayed; avoids adding the rand
/// crate as a dependency. Outputs are taken from the high bits, which are
/// the well-mixed part of an LCG state.
#[derive(Debug, Clone)]
pub(crate) struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        // Knuth MMIX multiplier and increment
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform integer in `0..max`. `max` must be non-zero.
    pub(crate) fn next_usize(&mut self, max: usize) -> usize {
        ((self.next() >> 33) as usize) % max
    }

    /// Uniform float in `[0, 1)`.
    pub(crate) fn next_f64(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }
}
