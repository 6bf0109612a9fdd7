//! Deterministic simulation RNG and the random-source seam used by the
//! warning engine.
//!
//! `SimRng` wraps `ChaCha8Rng` so identical seeds produce identical warning
//! outcomes across platforms. Engines never touch a global RNG; they take a
//! `&mut impl RandomSource`, which tests satisfy with `ScriptedRandom`.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Beta, Distribution};

/// Default seed used when no explicit seed is provided.
const DEFAULT_SEED: u64 = 42;

// ---------------------------------------------------------------------------
// RandomSource
// ---------------------------------------------------------------------------

/// Source of the random draws the warning pipeline needs.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Draw from `Beta(alpha, beta)`.
    fn beta(&mut self, alpha: f64, beta: f64) -> f64;
}

/// Mean of `Beta(alpha, beta)`, used when the parameters are degenerate.
fn beta_mean(alpha: f64, beta: f64) -> f64 {
    let total = alpha + beta;
    if total > 0.0 && total.is_finite() {
        (alpha / total).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

// ---------------------------------------------------------------------------
// Serializable snapshot of ChaCha8Rng state
// ---------------------------------------------------------------------------

#[derive(Encode, Decode)]
struct RngSnapshot {
    seed: [u8; 32],
    word_pos: u128,
    stream: u64,
}

impl RngSnapshot {
    fn from_rng(rng: &ChaCha8Rng) -> Self {
        Self {
            seed: rng.get_seed(),
            word_pos: rng.get_word_pos(),
            stream: rng.get_stream(),
        }
    }

    fn to_rng(&self) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::from_seed(self.seed);
        rng.set_stream(self.stream);
        rng.set_word_pos(self.word_pos);
        rng
    }
}

// ---------------------------------------------------------------------------
// SimRng resource
// ---------------------------------------------------------------------------

/// Deterministic RNG resource for all simulation randomness.
#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl SimRng {
    /// Create a new `SimRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl RandomSource for SimRng {
    fn uniform(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    fn beta(&mut self, alpha: f64, beta: f64) -> f64 {
        match Beta::new(alpha, beta) {
            Ok(dist) => dist.sample(&mut self.0),
            Err(e) => {
                warn!(
                    "SimRng: invalid Beta({}, {}), using the mean instead: {}",
                    alpha, beta, e
                );
                beta_mean(alpha, beta)
            }
        }
    }
}

impl crate::Saveable for SimRng {
    const SAVE_KEY: &'static str = "sim_rng";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        let snapshot = RngSnapshot::from_rng(&self.0);
        Some(bitcode::encode(&snapshot))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        match bitcode::decode::<RngSnapshot>(bytes) {
            Ok(snapshot) => Self(snapshot.to_rng()),
            Err(e) => {
                warn!(
                    "SimRng: failed to decode save data, falling back to default: {}",
                    e
                );
                Self::default()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptedRandom
// ---------------------------------------------------------------------------

/// Replays a fixed sequence of draws, cycling when it runs out.
///
/// Both `uniform` and `beta` consume the next value, so a test can script the
/// exact branch a warning call takes. An empty script always yields 0.5.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }

    fn next_value(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.5;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self) -> f64 {
        self.next_value()
    }

    fn beta(&mut self, _alpha: f64, _beta: f64) -> f64 {
        self.next_value()
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct SimRngPlugin;

impl Plugin for SimRngPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimRng>();
    }
}
