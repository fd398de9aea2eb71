//! Dashboard service: aggregate counters for the doctor and admin views.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::adapters::StorageError;
use crate::domain::{Assessment, ReviewStatus, RiskLevel};
use crate::ports::Storage;
use crate::{CardiowiseError, Result};

/// Assessments per health-score tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl RiskDistribution {
    fn add(&mut self, tier: RiskLevel) {
        match tier {
            RiskLevel::High => self.high += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::Low => self.low += 1,
        }
        self.total += 1;
    }

    /// Share of `count` in the total, 0-100.
    #[must_use]
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DoctorOverview {
    pub total_assessments: usize,
    pub high_risk_assessments: usize,
    pub assessments_today: usize,
    pub pending_reviews: usize,
    pub risk_distribution: RiskDistribution,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdminOverview {
    pub total_assessments: usize,
    pub distinct_patients: usize,
    pub reviewed_assessments: usize,
    /// Mean overall health score; `None` without assessments.
    pub average_health_score: Option<f64>,
    /// Mean headline prediction; `None` without assessments.
    pub average_prediction: Option<f64>,
}

/// Read-only aggregates over stored assessments.
pub struct DashboardService<S: Storage> {
    storage: Arc<S>,
}

impl<S> DashboardService<S>
where
    S: Storage,
    S::Error: Into<StorageError>,
{
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    fn all(&self) -> Result<Vec<Assessment>> {
        self.storage
            .load_all_assessments()
            .map_err(|e| CardiowiseError::Storage(e.into()))
    }

    /// Counters for the doctor dashboard. "Today" is the UTC date given.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn doctor_overview(&self, today: NaiveDate) -> Result<DoctorOverview> {
        let assessments = self.all()?;
        let overview = doctor_overview(&assessments, today);

        tracing::debug!(
            total = overview.total_assessments,
            high = overview.high_risk_assessments,
            pending = overview.pending_reviews,
            "Computed doctor overview"
        );
        Ok(overview)
    }

    /// # Errors
    /// Returns error if storage operation fails.
    pub fn admin_overview(&self) -> Result<AdminOverview> {
        Ok(admin_overview(&self.all()?))
    }
}

/// Doctor counters over an in-memory list.
#[must_use]
pub fn doctor_overview(assessments: &[Assessment], today: NaiveDate) -> DoctorOverview {
    let mut overview = DoctorOverview {
        total_assessments: assessments.len(),
        ..Default::default()
    };

    for a in assessments {
        let tier = a.health_score.tier();
        overview.risk_distribution.add(tier);
        if tier == RiskLevel::High {
            overview.high_risk_assessments += 1;
        }
        if a.created_at.date_naive() == today {
            overview.assessments_today += 1;
        }
        if a.status == ReviewStatus::Pending {
            overview.pending_reviews += 1;
        }
    }

    overview
}

/// Admin counters over an in-memory list.
#[must_use]
pub fn admin_overview(assessments: &[Assessment]) -> AdminOverview {
    let n = assessments.len();
    let mean = |f: fn(&Assessment) -> f64| -> Option<f64> {
        (n > 0).then(|| assessments.iter().map(f).sum::<f64>() / n as f64)
    };

    AdminOverview {
        total_assessments: n,
        distinct_patients: assessments
            .iter()
            .map(|a| a.patient_id.as_str())
            .collect::<HashSet<_>>()
            .len(),
        reviewed_assessments: assessments.iter().filter(|a| a.is_reviewed()).count(),
        average_health_score: mean(|a| f64::from(a.health_score.overall)),
        average_prediction: mean(|a| f64::from(a.prediction.score)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteStorage;
    use crate::domain::{
        analyze_risk_factors, Answer, DoctorReview, GeneralHealth, HeadlinePrediction,
        HealthQuestionnaire, HealthScore,
    };
    use chrono::{Duration, Utc};

    fn assessment(patient: &str, q: HealthQuestionnaire, prediction: u8) -> Assessment {
        let factors = analyze_risk_factors(&q);
        let score = HealthScore::from_factors(&factors);
        Assessment::new(patient, q, HeadlinePrediction::new(prediction), factors, score)
    }

    fn healthy() -> HealthQuestionnaire {
        HealthQuestionnaire {
            bmi: 22.0,
            ..Default::default()
        }
    }

    fn overweight() -> HealthQuestionnaire {
        HealthQuestionnaire::default()
    }

    fn unwell() -> HealthQuestionnaire {
        HealthQuestionnaire {
            bmi: 34.0,
            smoking: Answer::Yes,
            physical_health: 20,
            gen_health: GeneralHealth::Poor,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_overviews() {
        let today = Utc::now().date_naive();
        assert_eq!(doctor_overview(&[], today), DoctorOverview::default());

        let admin = admin_overview(&[]);
        assert_eq!(admin.total_assessments, 0);
        assert!(admin.average_health_score.is_none());
        assert!(admin.average_prediction.is_none());
    }

    #[test]
    fn test_doctor_overview_tiers() {
        let today = Utc::now().date_naive();
        let smoker = HealthQuestionnaire {
            smoking: Answer::Yes,
            ..healthy()
        };
        let mut old = assessment("a", overweight(), 20);
        old.created_at = Utc::now() - Duration::days(3);
        let list = vec![
            assessment("a", healthy(), 10),
            old,
            assessment("c", smoker, 40),
            assessment("b", unwell(), 90),
        ];

        let overall: Vec<u8> = list.iter().map(|a| a.health_score.overall).collect();
        assert_eq!(overall, vec![97, 87, 70, 50]);

        let overview = doctor_overview(&list, today);
        assert_eq!(overview.total_assessments, 4);
        assert_eq!(overview.assessments_today, 3);
        assert_eq!(overview.pending_reviews, 4);
        assert_eq!(overview.high_risk_assessments, 1);
        assert_eq!(
            overview.risk_distribution,
            RiskDistribution {
                high: 1,
                medium: 1,
                low: 2,
                total: 4
            }
        );
    }

    #[test]
    fn test_admin_overview_from_storage() {
        let storage = Arc::new(SqliteStorage::in_memory().expect("Should create db"));
        let service = DashboardService::new(Arc::clone(&storage));

        let first = assessment("a", healthy(), 10);
        let second = assessment("a", overweight(), 30);
        let third = assessment("b", unwell(), 50);
        for a in [&first, &second, &third] {
            storage.save_assessment(a).expect("Should save");
        }
        let review = DoctorReview::new("doc", "Dr. Lund", "Fine", RiskLevel::Low);
        storage.save_review(&first.id, &review).expect("Should review");

        let admin = service.admin_overview().expect("Should aggregate");
        assert_eq!(admin.total_assessments, 3);
        assert_eq!(admin.distinct_patients, 2);
        assert_eq!(admin.reviewed_assessments, 1);
        assert_eq!(admin.average_prediction, Some(30.0));

        let expected = f64::from(
            u16::from(first.health_score.overall)
                + u16::from(second.health_score.overall)
                + u16::from(third.health_score.overall),
        ) / 3.0;
        assert_eq!(admin.average_health_score, Some(expected));

        let doctor = service
            .doctor_overview(Utc::now().date_naive())
            .expect("Should aggregate");
        assert_eq!(doctor.pending_reviews, 2);
    }

    #[test]
    fn test_distribution_percent() {
        let d = RiskDistribution {
            high: 1,
            medium: 1,
            low: 2,
            total: 4,
        };
        assert_eq!(d.percent(d.low), 50.0);
        assert_eq!(RiskDistribution::default().percent(0), 0.0);
    }
}
