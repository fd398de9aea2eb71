//! Ports layer: Trait definitions for external operations.
//!
//! These traits define the boundaries between the application and the
//! outside world (storage, headline predictor).

mod predictor;
mod storage;

pub use predictor::RiskPredictor;
pub use storage::{AssessmentPage, Storage};
