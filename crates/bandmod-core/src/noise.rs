//! Seeded noise sources for random LFO waveforms.
//!
//! Both generators are deterministic for a given seed so renders can be
//! reproduced bit-for-bit.

/// Seed substituted for zero, which would lock either generator at zero.
const FALLBACK_SEED: u32 = 0x1234_5678;

const PN_MASK: u32 = 0x1FFF_FFFF;
const PN_FEEDBACK_BIT: u32 = 0x1000_0000;
const PN_SCALE: f32 = 1.0 / (1u32 << 28) as f32;

/// Uniform white noise in \[−1, 1\] from a xorshift32 generator.
///
/// # Example
///
/// ```rust
/// use bandmod_core::WhiteNoise;
///
/// let mut a = WhiteNoise::new(7);
/// let mut b = WhiteNoise::new(7);
/// assert_eq!(a.next_sample(), b.next_sample());
/// ```
#[derive(Debug, Clone)]
pub struct WhiteNoise {
    state: u32,
}

impl WhiteNoise {
    /// Create a generator from `seed` (zero is replaced by a fixed seed).
    pub fn new(seed: u32) -> Self {
        let mut noise = Self { state: 0 };
        noise.reseed(seed);
        noise
    }

    /// Restart the sequence from `seed`.
    pub fn reseed(&mut self, seed: u32) {
        self.state = if seed == 0 { FALLBACK_SEED } else { seed };
    }

    /// Next sample in \[−1, 1\].
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        (self.state as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}

/// Quasi-random pseudo-noise sequence from a 29-bit LFSR.
///
/// Feedback is the XOR of bits 1, 2, 28 and 29 (counting from 1 at the LSB),
/// shifted in at bit 29. Output is `register / 2^28 − 1`, so it lands in
/// \[−1, 1\]. Consecutive values are strongly correlated, which gives the
/// stepped "quasi-random" character.
///
/// # Example
///
/// ```rust
/// use bandmod_core::PnSequence;
///
/// let mut pn = PnSequence::new(1);
/// let v = pn.next_sample();
/// assert!((-1.0..=1.0).contains(&v));
/// ```
#[derive(Debug, Clone)]
pub struct PnSequence {
    register: u32,
}

impl PnSequence {
    /// Create a sequence from `seed`, masked to 29 bits.
    ///
    /// A seed with no bits inside the mask is replaced by a fixed seed.
    pub fn new(seed: u32) -> Self {
        let mut pn = Self { register: 0 };
        pn.reseed(seed);
        pn
    }

    /// Restart the sequence from `seed`.
    pub fn reseed(&mut self, seed: u32) {
        let masked = seed & PN_MASK;
        self.register = if masked == 0 {
            FALLBACK_SEED & PN_MASK
        } else {
            masked
        };
    }

    /// Current register contents.
    pub fn register(&self) -> u32 {
        self.register
    }

    /// Advance one step and return the next value in \[−1, 1\].
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let r = self.register;
        let feedback = (r ^ (r >> 1) ^ (r >> 27) ^ (r >> 28)) & 1;
        self.register = (r >> 1) | if feedback == 1 { PN_FEEDBACK_BIT } else { 0 };
        self.register as f32 * PN_SCALE - 1.0
    }
}
