//! Risk factor types produced by the analyzer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a single risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No action needed beyond maintenance
    Low,
    /// Worth monitoring or discussing
    Medium,
    /// Should be addressed with a provider
    High,
}

impl RiskLevel {
    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - keep up current habits",
            Self::Medium => "Medium risk - monitoring recommended",
            Self::High => "High risk - discuss with a healthcare provider",
        }
    }

    /// Parse the lowercase wire form (`low`, `medium`, `high`).
    #[must_use]
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "moderate" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Direction a factor is moving in over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskTrend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

impl fmt::Display for RiskTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increasing => write!(f, "increasing"),
            Self::Decreasing => write!(f, "decreasing"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// The observed reading behind a factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactorValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for FactorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for FactorValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FactorValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A named health attribute judged low/medium/high with advice attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub level: RiskLevel,
    pub value: FactorValue,
    pub trend: RiskTrend,

    /// 0-100, lower is worse
    pub score: u8,

    pub recommendation: String,

    #[serde(default)]
    pub details: Vec<String>,
}
