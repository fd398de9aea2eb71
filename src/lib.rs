//! # Cardiowise
//!
//! Cardiovascular risk questionnaire analysis.
//!
//! A submitted lifestyle and medical-history questionnaire is turned into a
//! list of named risk factors by fixed rules, reduced to a 0-100 health
//! score, and stored as an assessment that a doctor can later review.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: questionnaire, risk factor rules, health score, assessments
//! - `ports`: storage and headline predictor traits
//! - `adapters`: SQLite storage, random predictor, log sanitizing
//! - `application`: assessment and dashboard services
//! - `tui`: terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::Config;
pub use domain::{
    analyze_risk_factors, Assessment, DoctorReview, HealthQuestionnaire, HealthScore, ReviewStatus,
    RiskFactor, RiskLevel,
};

/// Result type for Cardiowise operations
pub type Result<T> = std::result::Result<T, CardiowiseError>;

/// Main error type for Cardiowise
#[derive(Debug, thiserror::Error)]
pub enum CardiowiseError {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
