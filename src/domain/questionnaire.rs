//! Health questionnaire types.
//!
//! Field names and labels follow the CDC BRFSS heart-disease survey the
//! questionnaire is modelled on, so JSON documents use the survey's wording
//! (`"Yes"`, `"Very Good"`, `"45-49"`, `"80+"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A yes/no survey answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Answer {
    Yes,
    #[default]
    No,
}

impl Answer {
    #[must_use]
    pub fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }

    #[must_use]
    pub fn is_no(self) -> bool {
        matches!(self, Self::No)
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Biological sex as recorded by the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

/// One of the 13 fixed age brackets used in place of a raw age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum AgeCategory {
    #[default]
    #[serde(rename = "18-24")]
    From18To24,
    #[serde(rename = "25-29")]
    From25To29,
    #[serde(rename = "30-34")]
    From30To34,
    #[serde(rename = "35-39")]
    From35To39,
    #[serde(rename = "40-44")]
    From40To44,
    #[serde(rename = "45-49")]
    From45To49,
    #[serde(rename = "50-54")]
    From50To54,
    #[serde(rename = "55-59")]
    From55To59,
    #[serde(rename = "60-64")]
    From60To64,
    #[serde(rename = "65-69")]
    From65To69,
    #[serde(rename = "70-74")]
    From70To74,
    #[serde(rename = "75-79")]
    From75To79,
    #[serde(rename = "80+")]
    From80,
}

impl AgeCategory {
    pub const ALL: [Self; 13] = [
        Self::From18To24,
        Self::From25To29,
        Self::From30To34,
        Self::From35To39,
        Self::From40To44,
        Self::From45To49,
        Self::From50To54,
        Self::From55To59,
        Self::From60To64,
        Self::From65To69,
        Self::From70To74,
        Self::From75To79,
        Self::From80,
    ];

    /// Survey label, e.g. `"45-49"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::From18To24 => "18-24",
            Self::From25To29 => "25-29",
            Self::From30To34 => "30-34",
            Self::From35To39 => "35-39",
            Self::From40To44 => "40-44",
            Self::From45To49 => "45-49",
            Self::From50To54 => "50-54",
            Self::From55To59 => "55-59",
            Self::From60To64 => "60-64",
            Self::From65To69 => "65-69",
            Self::From70To74 => "70-74",
            Self::From75To79 => "75-79",
            Self::From80 => "80+",
        }
    }

    /// Upper bound of the bracket in years; `None` for the open `80+` bracket.
    #[must_use]
    pub fn upper_bound(self) -> Option<u32> {
        match self {
            Self::From18To24 => Some(24),
            Self::From80 => None,
            other => Some(other.lower_bound() + 4),
        }
    }

    /// Whether the bracket includes any age strictly above `age`.
    #[must_use]
    pub fn reaches_past(self, age: u32) -> bool {
        self.upper_bound().map_or(true, |upper| upper > age)
    }

    /// Lower bound of the bracket in years (80 for `80+`).
    #[must_use]
    pub fn lower_bound(self) -> u32 {
        match self {
            Self::From18To24 => 18,
            Self::From25To29 => 25,
            Self::From30To34 => 30,
            Self::From35To39 => 35,
            Self::From40To44 => 40,
            Self::From45To49 => 45,
            Self::From50To54 => 50,
            Self::From55To59 => 55,
            Self::From60To64 => 60,
            Self::From65To69 => 65,
            Self::From70To74 => 70,
            Self::From75To79 => 75,
            Self::From80 => 80,
        }
    }
}

/// Race/ethnicity categories offered by the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Race {
    #[default]
    White,
    Black,
    Asian,
    Hispanic,
    #[serde(rename = "American Indian/Alaskan Native")]
    AmericanIndianAlaskanNative,
    Other,
}

impl Race {
    pub const ALL: [Self; 6] = [
        Self::White,
        Self::Black,
        Self::Asian,
        Self::Hispanic,
        Self::AmericanIndianAlaskanNative,
        Self::Other,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
            Self::Asian => "Asian",
            Self::Hispanic => "Hispanic",
            Self::AmericanIndianAlaskanNative => "American Indian/Alaskan Native",
            Self::Other => "Other",
        }
    }
}

/// Self-rated general health, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum GeneralHealth {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    #[default]
    Good,
    Fair,
    Poor,
}

impl GeneralHealth {
    pub const ALL: [Self; 5] = [
        Self::Excellent,
        Self::VeryGood,
        Self::Good,
        Self::Fair,
        Self::Poor,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

macro_rules! label_display_and_parse {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| format!("Unknown {}: {}", $what, s))
            }
        }
    };
}

label_display_and_parse!(AgeCategory, "age category");
label_display_and_parse!(Race, "race");
label_display_and_parse!(GeneralHealth, "general health rating");

impl Sex {
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

label_display_and_parse!(Sex, "sex");

impl Answer {
    pub const ALL: [Self; 2] = [Self::Yes, Self::No];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

label_display_and_parse!(Answer, "answer");

/// A completed heart-health questionnaire.
///
/// Categorical fields are closed enums, so only the numeric ranges need
/// checking; see [`HealthQuestionnaire::validate`]. The analyzer accepts
/// unvalidated records and evaluates out-of-range numbers as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthQuestionnaire {
    pub heart_disease: Answer,

    /// Body Mass Index, kg/m²
    pub bmi: f64,

    pub smoking: Answer,
    pub alcohol_drinking: Answer,
    pub stroke: Answer,

    /// Days of poor physical health in the past 30
    pub physical_health: i32,

    /// Days of poor mental health in the past 30
    pub mental_health: i32,

    pub diff_walking: Answer,
    pub sex: Sex,
    pub age_category: AgeCategory,
    pub race: Race,
    pub diabetic: Answer,
    pub physical_activity: Answer,
    pub gen_health: GeneralHealth,

    /// Average hours of sleep per night
    pub sleep_time: f64,

    pub asthma: Answer,
    pub kidney_disease: Answer,
    pub skin_cancer: Answer,
}

impl Default for HealthQuestionnaire {
    fn default() -> Self {
        Self {
            heart_disease: Answer::No,
            bmi: 25.0,
            smoking: Answer::No,
            alcohol_drinking: Answer::No,
            stroke: Answer::No,
            physical_health: 0,
            mental_health: 0,
            diff_walking: Answer::No,
            sex: Sex::Male,
            age_category: AgeCategory::From18To24,
            race: Race::White,
            diabetic: Answer::No,
            physical_activity: Answer::Yes,
            gen_health: GeneralHealth::Good,
            sleep_time: 7.0,
            asthma: Answer::No,
            kidney_disease: Answer::No,
            skin_cancer: Answer::No,
        }
    }
}

/// Accepted BMI range at the form boundary.
pub const BMI_RANGE: (f64, f64) = (10.0, 60.0);
/// Accepted poor-health day counts.
pub const DAYS_RANGE: (i32, i32) = (0, 30);
/// Accepted nightly sleep hours.
pub const SLEEP_RANGE: (f64, f64) = (0.0, 24.0);

impl HealthQuestionnaire {
    /// Check numeric fields against their documented ranges.
    ///
    /// # Errors
    /// Returns every violation found, one message per field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(BMI_RANGE.0..=BMI_RANGE.1).contains(&self.bmi) {
            errors.push(format!(
                "BMI {} out of range [{}, {}]",
                self.bmi, BMI_RANGE.0, BMI_RANGE.1
            ));
        }
        if !(DAYS_RANGE.0..=DAYS_RANGE.1).contains(&self.physical_health) {
            errors.push(format!(
                "Physical health days {} out of range [{}, {}]",
                self.physical_health, DAYS_RANGE.0, DAYS_RANGE.1
            ));
        }
        if !(DAYS_RANGE.0..=DAYS_RANGE.1).contains(&self.mental_health) {
            errors.push(format!(
                "Mental health days {} out of range [{}, {}]",
                self.mental_health, DAYS_RANGE.0, DAYS_RANGE.1
            ));
        }
        if !(SLEEP_RANGE.0..=SLEEP_RANGE.1).contains(&self.sleep_time) {
            errors.push(format!(
                "Sleep time {} out of range [{}, {}]",
                self.sleep_time, SLEEP_RANGE.0, SLEEP_RANGE.1
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
