//! Health score aggregation over a risk factor list.

use serde::{Deserialize, Serialize};

use super::risk::{RiskFactor, RiskLevel};

/// Factor names counted toward the lifestyle category.
pub const LIFESTYLE_FACTORS: [&str; 4] = [
    "Smoking",
    "Alcohol Consumption",
    "Physical Activity",
    "Sleep Pattern",
];

/// Factor names counted toward the medical category.
pub const MEDICAL_FACTORS: [&str; 5] = [
    "Heart Disease",
    "Stroke",
    "Diabetes",
    "Asthma",
    "Kidney Disease",
];

/// Factor names counted toward the biometric category.
pub const BIOMETRIC_FACTORS: [&str; 3] = ["BMI", "Physical Health", "Mental Health"];

/// Score for a category with no matching factors.
const EMPTY_CATEGORY_SCORE: u8 = 100;

/// Per-category scores, 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub lifestyle: u8,
    pub medical: u8,
    pub biometric: u8,
}

/// Aggregate 0-100 health score derived from a risk factor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScore {
    pub overall: u8,
    pub breakdown: ScoreBreakdown,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
}

impl HealthScore {
    /// Reduce a factor list to a health score.
    ///
    /// Factors are bucketed by exact name; names outside every bucket still
    /// count toward the severity tallies.
    #[must_use]
    pub fn from_factors(factors: &[RiskFactor]) -> Self {
        let breakdown = ScoreBreakdown {
            lifestyle: category_score(factors, &LIFESTYLE_FACTORS),
            medical: category_score(factors, &MEDICAL_FACTORS),
            biometric: category_score(factors, &BIOMETRIC_FACTORS),
        };

        let sum = f64::from(breakdown.lifestyle)
            + f64::from(breakdown.medical)
            + f64::from(breakdown.biometric);
        let overall = round_score(sum / 3.0);

        let count = |level: RiskLevel| factors.iter().filter(|f| f.level == level).count();

        Self {
            overall,
            breakdown,
            high_risk_count: count(RiskLevel::High),
            medium_risk_count: count(RiskLevel::Medium),
            low_risk_count: count(RiskLevel::Low),
        }
    }

    /// Total number of factors tallied.
    #[must_use]
    pub fn factor_count(&self) -> usize {
        self.high_risk_count + self.medium_risk_count + self.low_risk_count
    }

    /// Coarse tier for the overall score: 80+ low, 60+ medium, else high.
    #[must_use]
    pub fn tier(&self) -> RiskLevel {
        tier_for(self.overall)
    }
}

/// Tier a 0-100 health score (higher is healthier).
#[must_use]
pub fn tier_for(score: u8) -> RiskLevel {
    if score >= 80 {
        RiskLevel::Low
    } else if score >= 60 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

fn category_score(factors: &[RiskFactor], members: &[&str]) -> u8 {
    let scores: Vec<f64> = factors
        .iter()
        .filter(|f| members.contains(&f.name.as_str()))
        .map(|f| f64::from(f.score))
        .collect();

    if scores.is_empty() {
        return EMPTY_CATEGORY_SCORE;
    }

    round_score(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Round half up and clamp into 0-100.
fn round_score(value: f64) -> u8 {
    (value + 0.5).floor().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analyzer::analyze_risk_factors;
    use crate::domain::questionnaire::{AgeCategory, Answer, HealthQuestionnaire, Sex};
    use crate::domain::risk::{FactorValue, RiskTrend};

    fn factor(name: &str, level: RiskLevel, score: u8) -> RiskFactor {
        RiskFactor {
            name: name.to_string(),
            level,
            value: FactorValue::Text(String::new()),
            trend: RiskTrend::Stable,
            score,
            recommendation: String::new(),
            details: Vec::new(),
        }
    }

    #[test]
    fn test_empty_list_is_perfect() {
        let score = HealthScore::from_factors(&[]);
        assert_eq!(score.overall, 100);
        assert_eq!(
            score.breakdown,
            ScoreBreakdown {
                lifestyle: 100,
                medical: 100,
                biometric: 100
            }
        );
        assert_eq!(score.factor_count(), 0);
    }

    #[test]
    fn test_lifestyle_defaults_without_lifestyle_factors() {
        let factors = vec![
            factor("BMI", RiskLevel::High, 30),
            factor("Mental Health", RiskLevel::High, 30),
            factor("Multiple Health Conditions", RiskLevel::High, 30),
        ];
        let score = HealthScore::from_factors(&factors);

        assert_eq!(score.breakdown.lifestyle, 100);
        assert_eq!(score.breakdown.biometric, 30);
        assert_eq!(score.high_risk_count, 3);
    }

    #[test]
    fn test_category_means_round() {
        // (20 + 60 + 60) / 3 = 46.67
        let factors = vec![
            factor("Smoking", RiskLevel::High, 20),
            factor("Alcohol Consumption", RiskLevel::Medium, 60),
            factor("Sleep Pattern", RiskLevel::Medium, 60),
            factor("BMI", RiskLevel::Low, 90),
        ];
        let score = HealthScore::from_factors(&factors);

        assert_eq!(score.breakdown.lifestyle, 47);
        assert_eq!(score.breakdown.medical, 100);
        assert_eq!(score.breakdown.biometric, 90);
        // (47 + 100 + 90) / 3 = 79
        assert_eq!(score.overall, 79);
        assert_eq!(score.tier(), RiskLevel::Medium);
        assert_eq!(
            (score.high_risk_count, score.medium_risk_count, score.low_risk_count),
            (1, 2, 1)
        );
    }

    #[test]
    fn test_halves_round_up() {
        let factors = vec![
            factor("BMI", RiskLevel::Medium, 60),
            factor("Physical Health", RiskLevel::High, 30),
            factor("Mental Health", RiskLevel::High, 30),
            factor("Smoking", RiskLevel::High, 20),
            factor("Sleep Pattern", RiskLevel::Medium, 60),
        ];
        let score = HealthScore::from_factors(&factors);

        assert_eq!(score.breakdown.biometric, 40);
        assert_eq!(score.breakdown.lifestyle, 40);
        // (40 + 100 + 40) / 3 = 60
        assert_eq!(score.overall, 60);

        let odd = vec![factor("BMI", RiskLevel::Medium, 60), factor("Mental Health", RiskLevel::High, 31)];
        assert_eq!(HealthScore::from_factors(&odd).breakdown.biometric, 46);
    }

    #[test]
    fn test_analyzer_output_never_fills_medical() {
        let q = HealthQuestionnaire {
            heart_disease: Answer::Yes,
            stroke: Answer::Yes,
            diabetic: Answer::Yes,
            kidney_disease: Answer::Yes,
            asthma: Answer::Yes,
            ..Default::default()
        };
        let score = HealthScore::from_factors(&analyze_risk_factors(&q));
        assert_eq!(score.breakdown.medical, 100);
    }

    #[test]
    fn test_end_to_end_score() {
        let q = HealthQuestionnaire {
            bmi: 32.0,
            smoking: Answer::Yes,
            physical_activity: Answer::No,
            age_category: AgeCategory::From45To49,
            sex: Sex::Male,
            sleep_time: 5.0,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&q);
        let score = HealthScore::from_factors(&factors);

        // lifestyle: Smoking 20 + Sleep 60 -> 40; biometric: BMI 30
        assert_eq!(score.breakdown.lifestyle, 40);
        assert_eq!(score.breakdown.biometric, 30);
        // (40 + 100 + 30) / 3 = 56.67
        assert_eq!(score.overall, 57);
        assert_eq!(score.tier(), RiskLevel::High);
        assert_eq!(score.high_risk_count, 4);
        assert_eq!(score.medium_risk_count, 3);
        assert_eq!(score.low_risk_count, 0);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(tier_for(100), RiskLevel::Low);
        assert_eq!(tier_for(80), RiskLevel::Low);
        assert_eq!(tier_for(79), RiskLevel::Medium);
        assert_eq!(tier_for(60), RiskLevel::Medium);
        assert_eq!(tier_for(59), RiskLevel::High);
    }
}
