//! Application layer: Use cases and services.
//!
//! Orchestrates the domain rules with the storage and predictor ports.

mod assessment;
mod dashboard;

pub use assessment::{
    load_questionnaire, trend_between, AssessmentService, PatientSummary, RiskPreview,
};
pub use dashboard::{
    admin_overview, doctor_overview, AdminOverview, DashboardService, DoctorOverview,
    RiskDistribution,
};
