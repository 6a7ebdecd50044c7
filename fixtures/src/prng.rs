//! Linear congruential generator used for reproducible device fixtures.

const MULTIPLIER: u64 = 1_664_525;
const INCREMENT: u64 = 1_013_904_223;
const MODULUS: u64 = 1 << 32;

/// Deterministic stream of floats in `[0, 1)`.
///
/// `state' = (state * 1664525 + 1013904223) mod 2^32`, output `state' / 2^32`.
/// Two generators built from the same seed yield the same sequence.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed derived from an organization id: the sum of its UTF-16 code units.
    ///
    /// Ids whose code units sum to the same value share a device set.
    pub fn for_org(org_id: &str) -> Self {
        Self::new(org_seed(org_id))
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT)) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// `floor(next * n)`, always `< n`.
    pub fn next_index(&mut self, n: usize) -> usize {
        ((self.next_f64() * n as f64) as usize).min(n.saturating_sub(1))
    }
}

pub fn org_seed(org_id: &str) -> u64 {
    org_id.encode_utf16().map(u64::from).sum()
}
