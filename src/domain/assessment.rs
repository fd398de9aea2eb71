//! Assessment records and doctor reviews.
//!
//! An assessment bundles one questionnaire submission with its analysis,
//! the headline prediction shown to the patient, and an optional review.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::health_score::HealthScore;
use super::questionnaire::HealthQuestionnaire;
use super::risk::{RiskFactor, RiskLevel};

/// Headline risk percentage shown to the patient.
///
/// Produced by a `RiskPredictor`, independently of the factor analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlinePrediction {
    /// 0-99
    pub score: u8,
}

impl HeadlinePrediction {
    pub const MAX: u8 = 99;

    /// Create a prediction, clamping into range.
    #[must_use]
    pub fn new(score: u8) -> Self {
        Self {
            score: score.min(Self::MAX),
        }
    }

    /// Band for the headline: above 75 high, above 50 moderate.
    #[must_use]
    pub fn band(&self) -> RiskLevel {
        if self.score > 75 {
            RiskLevel::High
        } else if self.score > 50 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Where an assessment sits in the doctor review workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Reviewed,
    NeedsFollowup,
}

impl ReviewStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::NeedsFollowup => "needs_followup",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "reviewed" => Ok(Self::Reviewed),
            "needs_followup" | "needs_follow_up" => Ok(Self::NeedsFollowup),
            other => Err(format!("Unknown review status '{other}'")),
        }
    }
}

/// A doctor's review of one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorReview {
    pub doctor_id: String,
    pub doctor_name: String,
    pub notes: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub prescribed_medications: Vec<String>,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
    pub status: ReviewStatus,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub action_items: Vec<String>,
    pub review_date: DateTime<Utc>,
}

impl DoctorReview {
    /// Start a review dated now, marked reviewed at the given risk.
    #[must_use]
    pub fn new(
        doctor_id: impl Into<String>,
        doctor_name: impl Into<String>,
        notes: impl Into<String>,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            doctor_id: doctor_id.into(),
            doctor_name: doctor_name.into(),
            notes: notes.into(),
            recommendations: Vec::new(),
            prescribed_medications: Vec::new(),
            follow_up_date: None,
            status: ReviewStatus::Reviewed,
            risk_level,
            action_items: Vec::new(),
            review_date: Utc::now(),
        }
    }

    /// Check the review can be recorded.
    ///
    /// # Errors
    /// Returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.doctor_id.trim().is_empty() {
            errors.push("Doctor id is required".to_string());
        }
        if self.doctor_name.trim().is_empty() {
            errors.push("Doctor name is required".to_string());
        }
        if self.notes.trim().is_empty() {
            errors.push("Review notes are required".to_string());
        }
        if self.status == ReviewStatus::Pending {
            errors.push("A review must conclude as reviewed or needs_followup".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// One submitted questionnaire and everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub patient_id: String,
    pub questionnaire: HealthQuestionnaire,
    pub prediction: HeadlinePrediction,
    pub risk_factors: Vec<RiskFactor>,
    pub health_score: HealthScore,
    pub status: ReviewStatus,
    pub review: Option<DoctorReview>,
    pub created_at: DateTime<Utc>,
}

impl Assessment {
    /// Create a pending assessment with a fresh id.
    #[must_use]
    pub fn new(
        patient_id: impl Into<String>,
        questionnaire: HealthQuestionnaire,
        prediction: HeadlinePrediction,
        risk_factors: Vec<RiskFactor>,
        health_score: HealthScore,
    ) -> Self {
        Self {
            id: uuid_v4(),
            patient_id: patient_id.into(),
            questionnaire,
            prediction,
            risk_factors,
            health_score,
            status: ReviewStatus::Pending,
            review: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a review, taking its status.
    pub fn apply_review(&mut self, review: DoctorReview) {
        self.status = review.status;
        self.review = Some(review);
    }

    #[must_use]
    pub fn is_reviewed(&self) -> bool {
        self.status != ReviewStatus::Pending
    }
}

/// Random v4 UUID from a ChaCha20 CSPRNG.
#[must_use]
pub fn uuid_v4() -> String {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    let mut bytes: [u8; 16] = ChaCha20Rng::from_entropy().gen();
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analyzer::analyze_risk_factors;

    fn sample() -> Assessment {
        let q = HealthQuestionnaire::default();
        let factors = analyze_risk_factors(&q);
        let score = HealthScore::from_factors(&factors);
        Assessment::new("patient-1", q, HeadlinePrediction::new(42), factors, score)
    }

    #[test]
    fn test_headline_bands() {
        assert_eq!(HeadlinePrediction::new(0).band(), RiskLevel::Low);
        assert_eq!(HeadlinePrediction::new(50).band(), RiskLevel::Low);
        assert_eq!(HeadlinePrediction::new(51).band(), RiskLevel::Medium);
        assert_eq!(HeadlinePrediction::new(75).band(), RiskLevel::Medium);
        assert_eq!(HeadlinePrediction::new(76).band(), RiskLevel::High);
        assert_eq!(HeadlinePrediction::new(200).score, 99);
    }

    #[test]
    fn test_new_assessment_is_pending() {
        let a = sample();
        assert_eq!(a.status, ReviewStatus::Pending);
        assert!(a.review.is_none());
        assert!(!a.is_reviewed());
        assert_eq!(a.health_score.factor_count(), a.risk_factors.len());
    }

    #[test]
    fn test_apply_review_takes_status() {
        let mut a = sample();
        let mut review = DoctorReview::new("doc-7", "Dr. Rivera", "Repeat lipid panel", RiskLevel::Medium);
        review.status = ReviewStatus::NeedsFollowup;

        a.apply_review(review);
        assert_eq!(a.status, ReviewStatus::NeedsFollowup);
        assert!(a.is_reviewed());
    }

    #[test]
    fn test_review_validation() {
        let ok = DoctorReview::new("doc-7", "Dr. Rivera", "Looks fine", RiskLevel::Low);
        assert!(ok.validate().is_ok());

        let mut bad = DoctorReview::new(" ", "", "", RiskLevel::Low);
        bad.status = ReviewStatus::Pending;
        let errors = bad.validate().expect_err("Should reject");
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_review_status_parsing() {
        assert_eq!("reviewed".parse::<ReviewStatus>(), Ok(ReviewStatus::Reviewed));
        assert_eq!(
            "needs-followup".parse::<ReviewStatus>(),
            Ok(ReviewStatus::NeedsFollowup)
        );
        assert!("done".parse::<ReviewStatus>().is_err());

        let json = serde_json::to_string(&ReviewStatus::NeedsFollowup).expect("Should serialize");
        assert_eq!(json, "\"needs_followup\"");
    }

    #[test]
    fn test_assessment_json_roundtrip() {
        let a = sample();
        let json = serde_json::to_string(&a).expect("Should serialize");
        assert!(json.contains("\"riskFactors\""));
        assert!(json.contains("\"healthScore\""));

        let back: Assessment = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(back, a);
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36);
        assert_eq!(&id1[14..15], "4");
    }
}
