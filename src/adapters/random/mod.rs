//! Placeholder headline predictor.
//!
//! Draws a uniform score in `0..=99` per call and ignores the questionnaire.
//! No trained model backs the headline number.

use std::sync::Mutex;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::{HealthQuestionnaire, HeadlinePrediction};
use crate::ports::RiskPredictor;

/// Uniform random [`RiskPredictor`].
pub struct RandomPredictor {
    rng: Mutex<ChaCha20Rng>,
}

impl RandomPredictor {
    /// Predictor seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::from_entropy()),
        }
    }

    /// Deterministic predictor for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskPredictor for RandomPredictor {
    fn predict(&self, _questionnaire: &HealthQuestionnaire) -> HeadlinePrediction {
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        HeadlinePrediction::new(rng.gen_range(0..=HeadlinePrediction::MAX))
    }
}
