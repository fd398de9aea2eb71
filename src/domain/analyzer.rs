//! Rule-based risk factor analysis.
//!
//! Every rule is evaluated independently and in a fixed order, so one answer
//! can contribute to several factors (smoking appears both in the lifestyle
//! cluster and on its own). The analysis is total: any well-typed
//! questionnaire produces a list, including out-of-range numeric readings,
//! which are compared against the same thresholds.

use super::questionnaire::{Answer, GeneralHealth, HealthQuestionnaire, Sex};
use super::risk::{FactorValue, RiskFactor, RiskLevel, RiskTrend};

pub const AGE: &str = "Age";
pub const GENDER_RISK: &str = "Gender Risk";
pub const BMI: &str = "BMI";
pub const MULTIPLE_CONDITIONS: &str = "Multiple Health Conditions";
pub const MULTIPLE_LIFESTYLE_RISKS: &str = "Multiple Lifestyle Risks";
pub const SMOKING: &str = "Smoking";
pub const ALCOHOL: &str = "Alcohol Consumption";
pub const MOBILITY: &str = "Physical Activity & Mobility";
pub const MENTAL_PHYSICAL: &str = "Mental-Physical Health Impact";
pub const PHYSICAL_HEALTH: &str = "Physical Health";
pub const MENTAL_HEALTH: &str = "Mental Health";
pub const SLEEP: &str = "Sleep Pattern";
pub const OVERALL_HEALTH: &str = "Overall Health Status";
pub const RESPIRATORY: &str = "Respiratory Health";
pub const CHRONIC_DISEASE: &str = "Chronic Disease Management";

/// Poor-health day count above which a reading is flagged.
const POOR_DAYS_THRESHOLD: i32 = 14;

/// BMI weight category, split at 18.5 / 25 / 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::NormalWeight
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::NormalWeight => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    #[must_use]
    pub fn score(self) -> u8 {
        match self {
            Self::Underweight => 40,
            Self::NormalWeight => 90,
            Self::Overweight => 60,
            Self::Obese => 30,
        }
    }
}

/// Severity for a BMI reading.
///
/// This partition does not line up with [`BmiCategory`]: exactly 30 is
/// "Obese" but only medium severity.
#[must_use]
pub fn bmi_level(bmi: f64) -> RiskLevel {
    if bmi < 18.5 || bmi > 30.0 {
        RiskLevel::High
    } else if bmi < 25.0 {
        RiskLevel::Low
    } else {
        RiskLevel::Medium
    }
}

fn factor(
    name: &str,
    level: RiskLevel,
    score: u8,
    value: impl Into<String>,
    recommendation: impl Into<String>,
    details: Vec<String>,
) -> RiskFactor {
    RiskFactor {
        name: name.to_string(),
        level,
        value: FactorValue::Text(value.into()),
        trend: RiskTrend::Stable,
        score,
        recommendation: recommendation.into(),
        details,
    }
}

fn lines<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Analyze a questionnaire into an ordered list of risk factors.
///
/// BMI is always present; every other factor is conditional.
#[must_use]
pub fn analyze_risk_factors(q: &HealthQuestionnaire) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    let age = q.age_category.lower_bound();
    if let Some(f) = age_factor(q, age) {
        factors.push(f);
    }
    if let Some(f) = gender_factor(q) {
        factors.push(f);
    }
    factors.push(bmi_factor(q.bmi));

    if let Some(f) = conditions_factor(q) {
        factors.push(f);
    }
    if let Some(f) = lifestyle_cluster_factor(q) {
        factors.push(f);
    }

    if q.smoking.is_yes() {
        factors.push(factor(
            SMOKING,
            RiskLevel::High,
            20,
            "Active Smoker",
            "Smoking significantly increases heart disease risk. Consider smoking cessation programs, nicotine replacement therapy, or medications to help quit.",
            lines([
                "Major risk factor for heart disease",
                "Increases blood pressure and heart rate",
                "Damages blood vessels",
            ]),
        ));
    }

    if q.alcohol_drinking.is_yes() {
        factors.push(factor(
            ALCOHOL,
            RiskLevel::Medium,
            60,
            "Regular Drinker",
            "Limit alcohol intake to recommended levels (1 drink/day for women, 2 for men). Consider alcohol reduction program if needed.",
            lines([
                "Increases risk of cardiovascular events",
                "Recommendation for alcohol reduction",
                "Limit intake to recommended levels",
            ]),
        ));
    }

    if let Some(f) = mobility_factor(q) {
        factors.push(f);
    }

    factors.extend(poor_health_factors(q.mental_health, q.physical_health));

    if let Some(f) = sleep_factor(q.sleep_time) {
        factors.push(f);
    }
    if let Some(f) = general_health_factor(q.gen_health) {
        factors.push(f);
    }

    if q.asthma.is_yes() {
        factors.push(factor(
            RESPIRATORY,
            RiskLevel::Medium,
            60,
            "Asthma Present",
            "Asthma can impact heart health. Ensure proper asthma management and discuss cardiovascular implications with your healthcare provider.",
            lines([
                "Asthma can impact heart health",
                "Recommend proper asthma management",
                "Focus on respiratory health",
            ]),
        ));
    }

    if let Some(f) = chronic_disease_factor(q) {
        factors.push(f);
    }

    factors
}

fn age_factor(q: &HealthQuestionnaire, age: u32) -> Option<RiskFactor> {
    if age >= 65 {
        Some(factor(
            AGE,
            RiskLevel::High,
            30,
            q.age_category.label(),
            "Age is a significant risk factor. Regular cardiovascular check-ups are essential.",
            lines([
                "Higher risk of cardiovascular events",
                "Need for more frequent health monitoring",
                "Important to maintain active lifestyle",
            ]),
        ))
    } else if age >= 45 {
        Some(factor(
            AGE,
            RiskLevel::Medium,
            60,
            q.age_category.label(),
            "Consider more frequent health screenings and preventive care.",
            lines([
                "Increasing risk with age",
                "Focus on preventive measures",
                "Regular health check-ups recommended",
            ]),
        ))
    } else {
        None
    }
}

/// The bracket counts as "over N" when it includes ages above N, so a
/// 45-49 man is over 45 while a 40-44 man is not.
fn gender_factor(q: &HealthQuestionnaire) -> Option<RiskFactor> {
    match q.sex {
        Sex::Male if q.age_category.reaches_past(45) => Some(factor(
            GENDER_RISK,
            RiskLevel::Medium,
            60,
            "Male over 45",
            "Men over 45 have increased heart disease risk. Regular stress tests recommended.",
            lines([
                "Increased risk of cardiovascular events",
                "Focus on regular health monitoring",
                "Recommendation for stress tests",
            ]),
        )),
        Sex::Female if q.age_category.reaches_past(55) => Some(factor(
            GENDER_RISK,
            RiskLevel::Medium,
            60,
            "Female over 55",
            "Post-menopausal women have increased cardiovascular risk. Consider hormone and heart health evaluation.",
            lines([
                "Increased risk of cardiovascular events",
                "Focus on hormone and heart health",
                "Recommendation for hormone evaluation",
            ]),
        )),
        _ => None,
    }
}

fn bmi_factor(bmi: f64) -> RiskFactor {
    let level = bmi_level(bmi);
    let category = BmiCategory::from_bmi(bmi);

    let recommendation = match level {
        RiskLevel::High if bmi > 30.0 => {
            "Your BMI indicates obesity. Consider consulting a healthcare provider about weight management strategies and cardiovascular health."
        }
        RiskLevel::High => {
            "Your BMI is below normal range. Consult a healthcare provider about healthy weight gain and potential underlying conditions."
        }
        RiskLevel::Medium => {
            "Your BMI indicates overweight. Focus on balanced diet, portion control, and regular exercise."
        }
        RiskLevel::Low => "Maintain your healthy BMI through continued healthy lifestyle habits.",
    };

    factor(
        BMI,
        level,
        category.score(),
        format!("{bmi} ({})", category.label()),
        recommendation,
        vec![
            format!("Current BMI: {bmi}"),
            format!("Category: {}", category.label()),
            "BMI is a key indicator of cardiovascular health".to_string(),
        ],
    )
}

/// Names of the answers that are `Yes`, in the given order.
fn present(items: &[(Answer, &'static str)]) -> Vec<&'static str> {
    items
        .iter()
        .filter(|(answer, _)| answer.is_yes())
        .map(|(_, name)| *name)
        .collect()
}

fn conditions_factor(q: &HealthQuestionnaire) -> Option<RiskFactor> {
    let conditions = present(&[
        (q.heart_disease, "Heart Disease"),
        (q.stroke, "Stroke"),
        (q.diabetic, "Diabetes"),
        (q.kidney_disease, "Kidney Disease"),
    ]);
    if conditions.is_empty() {
        return None;
    }

    let joined = conditions.join(", ");
    Some(factor(
        MULTIPLE_CONDITIONS,
        RiskLevel::High,
        30,
        joined.clone(),
        format!(
            "Having multiple conditions ({joined}) significantly increases cardiovascular risk. Coordinate care between specialists and maintain strict medication adherence."
        ),
        vec![
            format!("Conditions: {joined}"),
            "Multiple conditions increase risk".to_string(),
            "Coordinate care between specialists".to_string(),
        ],
    ))
}

fn lifestyle_cluster_factor(q: &HealthQuestionnaire) -> Option<RiskFactor> {
    let inactive = Answer::from(q.physical_activity.is_no());
    let risks = present(&[
        (q.smoking, "Smoking"),
        (q.alcohol_drinking, "Alcohol"),
        (inactive, "Physical Inactivity"),
    ]);
    if risks.len() < 2 {
        return None;
    }

    let joined = risks.join(", ");
    Some(factor(
        MULTIPLE_LIFESTYLE_RISKS,
        RiskLevel::High,
        30,
        joined.clone(),
        "Multiple lifestyle risk factors significantly increase heart disease risk. Consider lifestyle modification program or health coaching.",
        vec![
            format!("Lifestyle risks: {joined}"),
            "Multiple lifestyle risks increase risk".to_string(),
            "Recommend lifestyle modification".to_string(),
        ],
    ))
}

fn mobility_factor(q: &HealthQuestionnaire) -> Option<RiskFactor> {
    let inactive = Answer::from(q.physical_activity.is_no());
    let issues = present(&[
        (inactive, "Physical Inactivity"),
        (q.diff_walking, "Walking Difficulty"),
    ]);
    if issues.is_empty() {
        return None;
    }

    let joined = issues.join(", ");
    Some(factor(
        MOBILITY,
        RiskLevel::High,
        30,
        joined.clone(),
        "Limited mobility and physical activity increase health risks. Consider adapted exercise programs, physical therapy, or supervised fitness training.",
        vec![
            format!("Mobility issues: {joined}"),
            "Limited mobility increases risk".to_string(),
            "Recommend adapted exercise programs".to_string(),
        ],
    ))
}

/// Combined factor when both counts are high, otherwise one per high count.
fn poor_health_factors(mental: i32, physical: i32) -> Vec<RiskFactor> {
    if mental > POOR_DAYS_THRESHOLD && physical > POOR_DAYS_THRESHOLD {
        return vec![factor(
            MENTAL_PHYSICAL,
            RiskLevel::High,
            30,
            format!("Mental: {mental} days, Physical: {physical} days"),
            "Strong correlation between mental and physical health issues. Consider integrated health approach with both mental health support and physical therapy.",
            lines([
                "Strong correlation between mental and physical health",
                "Recommend integrated health approach",
                "Focus on mental and physical health",
            ]),
        )];
    }

    let mut out = Vec::new();
    if physical > POOR_DAYS_THRESHOLD {
        out.push(factor(
            PHYSICAL_HEALTH,
            RiskLevel::High,
            30,
            format!("{physical} days of poor health"),
            format!(
                "{physical} days of poor physical health per month indicates need for comprehensive medical evaluation and treatment plan."
            ),
            lines([
                "Poor physical health indicates need for medical evaluation",
                "Recommend comprehensive medical evaluation",
                "Focus on physical health",
            ]),
        ));
    }
    if mental > POOR_DAYS_THRESHOLD {
        out.push(factor(
            MENTAL_HEALTH,
            RiskLevel::High,
            30,
            format!("{mental} days of poor health"),
            format!(
                "{mental} days of poor mental health per month. Consider professional mental health support and stress management techniques."
            ),
            lines([
                "Poor mental health indicates need for mental health support",
                "Recommend professional mental health support",
                "Focus on mental health",
            ]),
        ));
    }
    out
}

fn sleep_factor(hours: f64) -> Option<RiskFactor> {
    if !(hours < 6.0 || hours > 9.0) {
        return None;
    }

    let category = if hours < 6.0 { "Insufficient" } else { "Excessive" };
    Some(factor(
        SLEEP,
        RiskLevel::Medium,
        60,
        format!("{hours} hours ({category})"),
        format!(
            "{category} sleep duration can impact cardiovascular health. Aim for 7-9 hours nightly. Consider sleep study or consultation with sleep specialist."
        ),
        vec![
            format!("Sleep duration: {hours} hours"),
            format!("Category: {category}"),
            "Sleep is important for cardiovascular health".to_string(),
        ],
    ))
}

fn general_health_factor(rating: GeneralHealth) -> Option<RiskFactor> {
    let (level, score) = match rating {
        GeneralHealth::Poor => (RiskLevel::High, 30),
        GeneralHealth::Fair => (RiskLevel::Medium, 60),
        _ => return None,
    };

    let label = rating.label();
    Some(factor(
        OVERALL_HEALTH,
        level,
        score,
        label,
        format!(
            "{label} self-rated health often indicates underlying issues. Schedule comprehensive health evaluation and discuss lifestyle improvements with healthcare provider."
        ),
        vec![
            format!("Health self-assessment: {label}"),
            "Poor health indicates underlying issues".to_string(),
            "Recommend comprehensive health evaluation".to_string(),
        ],
    ))
}

fn chronic_disease_factor(q: &HealthQuestionnaire) -> Option<RiskFactor> {
    let conditions = present(&[
        (q.heart_disease, "Heart Disease"),
        (q.kidney_disease, "Kidney Disease"),
        (q.skin_cancer, "Skin Cancer"),
    ]);
    if conditions.is_empty() {
        return None;
    }

    let joined = conditions.join(", ");
    Some(factor(
        CHRONIC_DISEASE,
        RiskLevel::High,
        30,
        joined.clone(),
        "Multiple chronic conditions require coordinated care. Work with your healthcare team to manage all conditions effectively.",
        vec![
            format!("Chronic conditions: {joined}"),
            "Multiple chronic conditions require coordinated care".to_string(),
            "Recommend working with healthcare team".to_string(),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::AgeCategory;

    fn find<'a>(factors: &'a [RiskFactor], name: &str) -> &'a RiskFactor {
        factors
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("missing factor {name}"))
    }

    fn names(factors: &[RiskFactor]) -> Vec<&str> {
        factors.iter().map(|f| f.name.as_str()).collect()
    }

    fn text(value: &FactorValue) -> &str {
        match value {
            FactorValue::Text(s) => s,
            FactorValue::Number(_) => panic!("expected text value"),
        }
    }

    #[test]
    fn test_bmi_band_boundaries() {
        let cases = [
            (18.4, BmiCategory::Underweight, 40, RiskLevel::High),
            (18.5, BmiCategory::NormalWeight, 90, RiskLevel::Low),
            (24.9, BmiCategory::NormalWeight, 90, RiskLevel::Low),
            (25.0, BmiCategory::Overweight, 60, RiskLevel::Medium),
            (29.9, BmiCategory::Overweight, 60, RiskLevel::Medium),
            (30.0, BmiCategory::Obese, 30, RiskLevel::Medium),
            (30.1, BmiCategory::Obese, 30, RiskLevel::High),
        ];

        for (bmi, category, score, level) in cases {
            let q = HealthQuestionnaire {
                bmi,
                ..Default::default()
            };
            let factors = analyze_risk_factors(&q);
            let f = find(&factors, BMI);

            assert_eq!(BmiCategory::from_bmi(bmi), category, "bmi {bmi}");
            assert_eq!(f.score, score, "bmi {bmi}");
            assert_eq!(f.level, level, "bmi {bmi}");
            assert_eq!(text(&f.value), format!("{bmi} ({})", category.label()));
        }
    }

    #[test]
    fn test_all_clear_yields_only_bmi() {
        let factors = analyze_risk_factors(&HealthQuestionnaire::default());
        assert_eq!(names(&factors), vec![BMI]);
        assert_eq!(factors[0].trend, RiskTrend::Stable);
        assert_eq!(text(&factors[0].value), "25 (Overweight)");
    }

    #[test]
    fn test_all_conditions_fire_both_clusters() {
        let q = HealthQuestionnaire {
            heart_disease: Answer::Yes,
            stroke: Answer::Yes,
            diabetic: Answer::Yes,
            kidney_disease: Answer::Yes,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&q);

        let multiple = find(&factors, MULTIPLE_CONDITIONS);
        assert_eq!(
            text(&multiple.value),
            "Heart Disease, Stroke, Diabetes, Kidney Disease"
        );
        assert_eq!(multiple.level, RiskLevel::High);

        let chronic = find(&factors, CHRONIC_DISEASE);
        assert_eq!(text(&chronic.value), "Heart Disease, Kidney Disease");
        assert_eq!(chronic.score, 30);
    }

    #[test]
    fn test_combined_mental_physical() {
        let q = HealthQuestionnaire {
            mental_health: 20,
            physical_health: 20,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&q);
        let n = names(&factors);

        assert!(n.contains(&MENTAL_PHYSICAL));
        assert!(!n.contains(&MENTAL_HEALTH));
        assert!(!n.contains(&PHYSICAL_HEALTH));
        assert_eq!(
            text(&find(&factors, MENTAL_PHYSICAL).value),
            "Mental: 20 days, Physical: 20 days"
        );
    }

    #[test]
    fn test_mental_only() {
        let q = HealthQuestionnaire {
            mental_health: 20,
            physical_health: 5,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&q);
        assert_eq!(names(&factors), vec![BMI, MENTAL_HEALTH]);
        assert_eq!(factors[1].score, 30);
    }

    #[test]
    fn test_poor_days_threshold_is_exclusive() {
        let q = HealthQuestionnaire {
            mental_health: 14,
            physical_health: 15,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&q);
        assert_eq!(names(&factors), vec![BMI, PHYSICAL_HEALTH]);
    }

    #[test]
    fn test_end_to_end_example() {
        let q = HealthQuestionnaire {
            bmi: 32.0,
            smoking: Answer::Yes,
            alcohol_drinking: Answer::No,
            physical_activity: Answer::No,
            age_category: AgeCategory::From45To49,
            sex: Sex::Male,
            sleep_time: 5.0,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&q);

        assert_eq!(
            names(&factors),
            vec![
                AGE,
                GENDER_RISK,
                BMI,
                MULTIPLE_LIFESTYLE_RISKS,
                SMOKING,
                MOBILITY,
                SLEEP
            ]
        );

        let bmi = find(&factors, BMI);
        assert_eq!((bmi.level, bmi.score), (RiskLevel::High, 30));
        assert_eq!(text(&bmi.value), "32 (Obese)");

        let age = find(&factors, AGE);
        assert_eq!((age.level, age.score), (RiskLevel::Medium, 60));

        let gender = find(&factors, GENDER_RISK);
        assert_eq!(text(&gender.value), "Male over 45");
        assert_eq!(gender.score, 60);

        let lifestyle = find(&factors, MULTIPLE_LIFESTYLE_RISKS);
        assert_eq!(text(&lifestyle.value), "Smoking, Physical Inactivity");
        assert_eq!((lifestyle.level, lifestyle.score), (RiskLevel::High, 30));

        let smoking = find(&factors, SMOKING);
        assert_eq!((smoking.level, smoking.score), (RiskLevel::High, 20));

        let mobility = find(&factors, MOBILITY);
        assert_eq!((mobility.level, mobility.score), (RiskLevel::High, 30));

        let sleep = find(&factors, SLEEP);
        assert_eq!((sleep.level, sleep.score), (RiskLevel::Medium, 60));
        assert_eq!(text(&sleep.value), "5 hours (Insufficient)");
    }

    #[test]
    fn test_age_and_gender_brackets() {
        let male_40 = HealthQuestionnaire {
            age_category: AgeCategory::From40To44,
            ..Default::default()
        };
        assert_eq!(names(&analyze_risk_factors(&male_40)), vec![BMI]);

        let male_45 = HealthQuestionnaire {
            age_category: AgeCategory::From45To49,
            ..male_40
        };
        assert_eq!(
            names(&analyze_risk_factors(&male_45)),
            vec![AGE, GENDER_RISK, BMI]
        );

        let female_50 = HealthQuestionnaire {
            sex: Sex::Female,
            age_category: AgeCategory::From50To54,
            ..Default::default()
        };
        assert_eq!(names(&analyze_risk_factors(&female_50)), vec![AGE, BMI]);

        let female_55 = HealthQuestionnaire {
            age_category: AgeCategory::From55To59,
            ..female_50
        };
        let factors = analyze_risk_factors(&female_55);
        assert_eq!(text(&find(&factors, GENDER_RISK).value), "Female over 55");

        let senior = HealthQuestionnaire {
            age_category: AgeCategory::From80,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&senior);
        let age = find(&factors, AGE);
        assert_eq!((age.level, age.score), (RiskLevel::High, 30));
        assert_eq!(text(&age.value), "80+");
    }

    #[test]
    fn test_single_lifestyle_risk_is_not_a_cluster() {
        let q = HealthQuestionnaire {
            alcohol_drinking: Answer::Yes,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&q);
        assert_eq!(names(&factors), vec![BMI, ALCOHOL]);
    }

    #[test]
    fn test_general_health_and_asthma() {
        let fair = HealthQuestionnaire {
            gen_health: GeneralHealth::Fair,
            asthma: Answer::Yes,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&fair);
        assert_eq!(names(&factors), vec![BMI, OVERALL_HEALTH, RESPIRATORY]);
        assert_eq!(factors[1].score, 60);

        let poor = HealthQuestionnaire {
            gen_health: GeneralHealth::Poor,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&poor);
        let f = find(&factors, OVERALL_HEALTH);
        assert_eq!((f.level, f.score), (RiskLevel::High, 30));
    }

    #[test]
    fn test_walking_difficulty_alone() {
        let q = HealthQuestionnaire {
            diff_walking: Answer::Yes,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&q);
        assert_eq!(text(&find(&factors, MOBILITY).value), "Walking Difficulty");
    }

    #[test]
    fn test_excessive_sleep() {
        let q = HealthQuestionnaire {
            sleep_time: 10.5,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&q);
        assert_eq!(text(&find(&factors, SLEEP).value), "10.5 hours (Excessive)");

        let nine = HealthQuestionnaire {
            sleep_time: 9.0,
            ..Default::default()
        };
        assert_eq!(names(&analyze_risk_factors(&nine)), vec![BMI]);
    }

    #[test]
    fn test_sleep_lower_boundary_is_exclusive() {
        let six = HealthQuestionnaire {
            sleep_time: 6.0,
            ..Default::default()
        };
        assert_eq!(names(&analyze_risk_factors(&six)), vec![BMI]);

        let short = HealthQuestionnaire {
            sleep_time: 5.9,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&short);
        assert_eq!(text(&find(&factors, SLEEP).value), "5.9 hours (Insufficient)");
    }

    #[test]
    fn test_full_lifestyle_cluster_order() {
        let q = HealthQuestionnaire {
            smoking: Answer::Yes,
            alcohol_drinking: Answer::Yes,
            physical_activity: Answer::No,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&q);
        let cluster = find(&factors, MULTIPLE_LIFESTYLE_RISKS);

        assert_eq!(text(&cluster.value), "Smoking, Alcohol, Physical Inactivity");
        assert_eq!(cluster.level, RiskLevel::High);
        assert_eq!(cluster.score, 30);
    }

    #[test]
    fn test_out_of_range_inputs_are_evaluated() {
        let q = HealthQuestionnaire {
            bmi: -3.0,
            physical_health: 99,
            mental_health: -5,
            sleep_time: f64::NAN,
            ..Default::default()
        };
        let factors = analyze_risk_factors(&q);

        assert_eq!(names(&factors), vec![BMI, PHYSICAL_HEALTH]);
        assert_eq!(find(&factors, BMI).score, 40);
    }
}
