//! Assessment service: questionnaire in, persisted assessment out.
//!
//! Orchestrates validation, rule-based analysis, scoring, the headline
//! predictor and storage, and owns the doctor review workflow.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::adapters::StorageError;
use crate::domain::{
    analyze_risk_factors, Assessment, DoctorReview, HealthQuestionnaire, HealthScore, RiskFactor,
    RiskTrend,
};
use crate::ports::{AssessmentPage, RiskPredictor, Storage};
use crate::{CardiowiseError, Result};

/// Factor analysis and score without a prediction or persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskPreview {
    pub risk_factors: Vec<RiskFactor>,
    pub health_score: HealthScore,
}

/// A patient's two most recent assessments and the direction of travel.
#[derive(Debug, Clone, Serialize)]
pub struct PatientSummary {
    pub patient_id: String,
    pub current: Option<Assessment>,
    pub previous: Option<Assessment>,
    /// `Increasing` means risk went up (health score dropped).
    pub trend: RiskTrend,
}

/// Service for creating, querying and reviewing assessments.
pub struct AssessmentService<P, S>
where
    P: RiskPredictor,
    S: Storage,
{
    predictor: Arc<P>,
    storage: Arc<S>,
}

impl<P, S> AssessmentService<P, S>
where
    P: RiskPredictor,
    S: Storage,
    S::Error: Into<StorageError>,
{
    pub fn new(predictor: Arc<P>, storage: Arc<S>) -> Self {
        Self { predictor, storage }
    }

    /// Analyze and score without validating or saving.
    ///
    /// Total over any questionnaire, including out-of-range readings.
    #[must_use]
    pub fn preview(&self, questionnaire: &HealthQuestionnaire) -> RiskPreview {
        let risk_factors = analyze_risk_factors(questionnaire);
        let health_score = HealthScore::from_factors(&risk_factors);
        RiskPreview {
            risk_factors,
            health_score,
        }
    }

    /// Run the full pipeline for one submission.
    ///
    /// A storage failure is logged and the assessment is still returned.
    ///
    /// # Errors
    /// Returns `Validation` if the patient id is blank or any reading is out
    /// of range.
    pub fn assess(
        &self,
        patient_id: &str,
        questionnaire: HealthQuestionnaire,
    ) -> Result<Assessment> {
        let patient_id = patient_id.trim();
        if patient_id.is_empty() {
            return Err(CardiowiseError::Validation("Patient id is required".to_string()));
        }
        questionnaire
            .validate()
            .map_err(|errors| CardiowiseError::Validation(errors.join("; ")))?;

        tracing::debug!("Analyzing questionnaire...");
        let RiskPreview {
            risk_factors,
            health_score,
        } = self.preview(&questionnaire);

        let prediction = self.predictor.predict(&questionnaire);
        let assessment = Assessment::new(
            patient_id,
            questionnaire,
            prediction,
            risk_factors,
            health_score,
        );

        if let Err(e) = self.storage.save_assessment(&assessment) {
            let e: StorageError = e.into();
            tracing::warn!("Failed to save assessment: {e}");
        }

        tracing::info!(
            id = %assessment.id,
            factors = assessment.risk_factors.len(),
            overall = assessment.health_score.overall,
            prediction = assessment.prediction.score,
            "Assessment complete"
        );

        Ok(assessment)
    }

    /// # Errors
    /// Returns `NotFound` if no assessment has this id.
    pub fn get(&self, id: &str) -> Result<Assessment> {
        self.storage
            .load_assessment(id)
            .map_err(storage_err)?
            .ok_or_else(|| CardiowiseError::NotFound(format!("assessment {id}")))
    }

    /// # Errors
    /// Returns error if storage operation fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<Assessment>> {
        self.storage.load_recent_assessments(limit).map_err(storage_err)
    }

    /// # Errors
    /// Returns error if storage operation fails.
    pub fn patient_history(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<Assessment>> {
        self.storage
            .load_patient_assessments(patient_id.trim(), limit)
            .map_err(storage_err)
    }

    /// # Errors
    /// Returns error if storage operation fails.
    pub fn page(&self, offset: usize, limit: usize) -> Result<AssessmentPage> {
        self.storage
            .load_assessments_paginated(offset, limit)
            .map_err(storage_err)
    }

    /// # Errors
    /// Returns error if storage operation fails.
    pub fn count(&self) -> Result<usize> {
        self.storage.count_assessments().map_err(storage_err)
    }

    /// Record a doctor's review and move the assessment to the review's status.
    ///
    /// # Errors
    /// Returns `Validation` for an incomplete or still-pending review and
    /// `NotFound` for an unknown assessment.
    pub fn submit_review(
        &self,
        assessment_id: &str,
        review: DoctorReview,
    ) -> Result<Assessment> {
        review
            .validate()
            .map_err(|errors| CardiowiseError::Validation(errors.join("; ")))?;

        let mut assessment = self.get(assessment_id)?;
        let stored = self
            .storage
            .save_review(assessment_id, &review)
            .map_err(storage_err)?;
        if !stored {
            return Err(CardiowiseError::NotFound(format!("assessment {assessment_id}")));
        }

        tracing::info!(id = %assessment_id, status = %review.status, "Review recorded");
        assessment.apply_review(review);
        Ok(assessment)
    }

    /// # Errors
    /// Returns `NotFound` if nothing was deleted.
    pub fn delete(&self, id: &str) -> Result<()> {
        if self.storage.delete_assessment(id).map_err(storage_err)? {
            tracing::info!(id = %id, "Deleted assessment");
            Ok(())
        } else {
            Err(CardiowiseError::NotFound(format!("assessment {id}")))
        }
    }

    /// Remove every stored assessment.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn clear_all(&self) -> Result<usize> {
        let removed = self.count()?;
        self.storage.clear_all().map_err(storage_err)?;
        tracing::warn!(removed, "Cleared assessment history");
        Ok(removed)
    }

    /// Latest two assessments for a patient with the risk trend between them.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn patient_summary(&self, patient_id: &str) -> Result<PatientSummary> {
        let mut latest = self.patient_history(patient_id, 2)?.into_iter();
        let current = latest.next();
        let previous = latest.next();

        let trend = match (&current, &previous) {
            (Some(now), Some(before)) => {
                trend_between(before.health_score.overall, now.health_score.overall)
            }
            _ => RiskTrend::Stable,
        };

        Ok(PatientSummary {
            patient_id: patient_id.trim().to_string(),
            current,
            previous,
            trend,
        })
    }
}

/// Read a questionnaire from a JSON file. Missing fields take the form defaults.
///
/// # Errors
/// Returns `Io` if the file cannot be read and `Serialization` if it is not a
/// questionnaire.
pub fn load_questionnaire(path: &Path) -> Result<HealthQuestionnaire> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Risk trend from one overall health score to the next.
#[must_use]
pub fn trend_between(before: u8, after: u8) -> RiskTrend {
    match after.cmp(&before) {
        std::cmp::Ordering::Less => RiskTrend::Increasing,
        std::cmp::Ordering::Greater => RiskTrend::Decreasing,
        std::cmp::Ordering::Equal => RiskTrend::Stable,
    }
}

fn storage_err<E: Into<StorageError>>(e: E) -> CardiowiseError {
    CardiowiseError::Storage(e.into())
}
