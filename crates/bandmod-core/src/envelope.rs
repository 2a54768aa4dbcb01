//! Peak detector driving [`EnvelopeFilter`](crate::EnvelopeFilter).

use libm::expf;

const MIN_ATTACK_MS: f32 = 0.1;
const MIN_RELEASE_MS: f32 = 1.0;

/// One-pole smoothing coefficient for a time constant of `ms`.
fn smoothing(ms: f32, sample_rate: f32) -> f32 {
    expf(-1000.0 / (ms * sample_rate))
}

/// Rectifying peak follower with separate attack and release.
///
/// Attack is clamped to at least 0.1 ms and release to at least 1 ms.
///
/// # Example
///
/// ```rust
/// use bandmod_core::EnvelopeFollower;
///
/// let mut env = EnvelopeFollower::with_times(48000.0, 8.0, 80.0);
/// assert!(env.process(-0.5) > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    level: f32,
    attack_ms: f32,
    release_ms: f32,
    attack: f32,
    release: f32,
    sample_rate: f32,
}

impl EnvelopeFollower {
    /// Create a follower at `sample_rate` with the given times in ms.
    pub fn with_times(sample_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        let attack_ms = attack_ms.max(MIN_ATTACK_MS);
        let release_ms = release_ms.max(MIN_RELEASE_MS);
        Self {
            level: 0.0,
            attack_ms,
            release_ms,
            attack: smoothing(attack_ms, sample_rate),
            release: smoothing(release_ms, sample_rate),
            sample_rate,
        }
    }

    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.attack_ms = attack_ms.max(MIN_ATTACK_MS);
        self.attack = smoothing(self.attack_ms, self.sample_rate);
    }

    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.release_ms = release_ms.max(MIN_RELEASE_MS);
        self.release = smoothing(self.release_ms, self.sample_rate);
    }

    /// Recompute both coefficients for a new rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.attack = smoothing(self.attack_ms, sample_rate);
        self.release = smoothing(self.release_ms, sample_rate);
    }

    /// Track `input` and return the new level.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let rectified = input.abs();
        let coeff = if rectified > self.level {
            self.attack
        } else {
            self.release
        };
        self.level = rectified + coeff * (self.level - rectified);
        self.level
    }

    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}
