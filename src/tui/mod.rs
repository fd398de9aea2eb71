//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens:
//! - Dashboard with review and risk-tier counters
//! - Four-step health questionnaire
//! - Assessment report
//! - Paginated history

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::ClinicTheme;
