use rand::SeedableRng;

/// Per-worker stream of independent uniforms in [0, 1). Workers sampling in
/// parallel must each own their own `Rng`; sharing one stream across threads
/// would correlate their samples.
pub struct Rng {
    rng: rand::rngs::SmallRng,
}

impl Rng {
    pub fn new() -> Self {
        Self {
            rng: rand::rngs::SmallRng::from_entropy(),
        }
    }

    /// Deterministic stream, mainly for reproducible Monte Carlo tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: rand::rngs::SmallRng::seed_from_u64(seed),
        }
    }

    pub fn uniform_1d(&mut self) -> f32 {
        rand::Rng::gen(&mut self.rng)
    }

    pub fn uniform_2d(&mut self) -> (f32, f32) {
        (self.uniform_1d(), self.uniform_1d())
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new()
    }
}
