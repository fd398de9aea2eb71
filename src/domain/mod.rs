//! Domain layer: questionnaire, rule-based analysis and scoring.
//!
//! Everything here is pure and synchronous. Persistence and the headline
//! predictor live behind the ports.

pub mod analyzer;
mod assessment;
mod health_score;
mod questionnaire;
mod risk;

pub use analyzer::{analyze_risk_factors, bmi_level, BmiCategory};
pub use assessment::{uuid_v4, Assessment, DoctorReview, HeadlinePrediction, ReviewStatus};
pub use health_score::{
    tier_for, HealthScore, ScoreBreakdown, BIOMETRIC_FACTORS, LIFESTYLE_FACTORS, MEDICAL_FACTORS,
};
pub use questionnaire::{
    AgeCategory, Answer, GeneralHealth, HealthQuestionnaire, Race, Sex, BMI_RANGE, DAYS_RANGE,
    SLEEP_RANGE,
};
pub use risk::{FactorValue, RiskFactor, RiskLevel, RiskTrend};
