//! Predictor port: source of the headline risk percentage.

use crate::domain::{HealthQuestionnaire, HeadlinePrediction};

/// Produces the headline prediction for a questionnaire.
///
/// The headline is shown next to the factor analysis but is not derived
/// from it; implementations may ignore the questionnaire entirely.
pub trait RiskPredictor: Send + Sync {
    fn predict(&self, questionnaire: &HealthQuestionnaire) -> HeadlinePrediction;
}
