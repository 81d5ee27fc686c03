/// Deterministic xorshift generator for synthetic page geometry.
#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform value in `[0, 1]`.
    fn unit(&mut self) -> f64 {
        self.next_u64() as f64 / u64::MAX as f64
    }

    pub fn gen_f64(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.unit()
    }
}
