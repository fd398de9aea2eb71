//! Dashboard view: Main overview screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::application::{AdminOverview, DoctorOverview};
use crate::domain::{Assessment, RiskLevel};
use crate::tui::styles::ClinicTheme;

use super::{render_header, short_id};

/// Dashboard state for rendering.
#[derive(Default)]
pub struct DashboardState {
    pub doctor: DoctorOverview,
    pub admin: AdminOverview,
    pub recent: Vec<Assessment>,
    pub error: Option<String>,
}

/// Render the main dashboard view.
pub fn render_dashboard(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    render_header(f, chunks[0], "Cardiowise", "Cardiovascular Risk Assessment");

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_overview(f, columns[0], state);
    render_recent(f, columns[1], state);
}

fn counter(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label}: "), ClinicTheme::text_secondary()),
        Span::styled(value, ClinicTheme::text()),
    ])
}

fn render_overview(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Counters
            Constraint::Length(5), // Distribution
            Constraint::Min(0),    // Quick actions
        ])
        .margin(1)
        .split(area);

    let d = &state.doctor;
    let a = &state.admin;
    let mut counters = vec![
        counter("Assessments", d.total_assessments.to_string()),
        counter("Today", d.assessments_today.to_string()),
        counter("Pending review", d.pending_reviews.to_string()),
        counter("Patients", a.distinct_patients.to_string()),
        counter(
            "Avg. score",
            a.average_health_score.map_or_else(|| "-".to_string(), |s| format!("{s:.1}")),
        ),
    ];
    if let Some(err) = &state.error {
        counters.push(Line::from(Span::styled(format!("  {err}"), ClinicTheme::danger())));
    }

    let block = Block::default()
        .title(Span::styled(" Overview ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border());
    f.render_widget(Paragraph::new(counters).block(block), chunks[0]);

    render_distribution(f, chunks[1], d);

    let actions = vec![
        Line::from(vec![
            Span::styled("[N] ", ClinicTheme::key_hint()),
            Span::styled("New Assessment", ClinicTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[H] ", ClinicTheme::key_hint()),
            Span::styled("History", ClinicTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[R] ", ClinicTheme::key_hint()),
            Span::styled("Refresh", ClinicTheme::key_desc()),
        ]),
        Line::from(vec![
            Span::styled("[Q] ", ClinicTheme::key_hint()),
            Span::styled("Quit", ClinicTheme::key_desc()),
        ]),
    ];
    let block = Block::default()
        .title(Span::styled(" Quick Actions ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border());
    f.render_widget(Paragraph::new(actions).block(block), chunks[2]);
}

fn render_distribution(f: &mut Frame, area: Rect, d: &DoctorOverview) {
    let block = Block::default()
        .title(Span::styled(" Score Tiers ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 3])
        .split(inner);

    let dist = &d.risk_distribution;
    for (row, (level, count)) in rows.iter().zip([
        (RiskLevel::High, dist.high),
        (RiskLevel::Medium, dist.medium),
        (RiskLevel::Low, dist.low),
    ]) {
        let pct = dist.percent(count);
        let gauge = Gauge::default()
            .gauge_style(ClinicTheme::risk_level(level))
            .ratio((pct / 100.0).clamp(0.0, 1.0))
            .label(format!("{level} {count} ({pct:.0}%)"));
        f.render_widget(gauge, *row);
    }
}

fn render_recent(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(Span::styled(" Recent Assessments ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border());

    if state.recent.is_empty() {
        let empty_msg = Paragraph::new(Line::from(Span::styled(
            "No assessments yet. Press [N] to start.",
            ClinicTheme::text_muted(),
        )))
        .block(block);
        f.render_widget(empty_msg, area);
        return;
    }

    let lines: Vec<Line> = state
        .recent
        .iter()
        .map(|a| {
            let score = a.health_score.overall;
            Line::from(vec![
                Span::styled(
                    format!("{} ", a.created_at.format("%m-%d %H:%M")),
                    ClinicTheme::text_muted(),
                ),
                Span::styled(format!("{:<12} ", a.patient_id), ClinicTheme::text()),
                Span::styled(format!("{} ", short_id(&a.id)), ClinicTheme::text_muted()),
                Span::styled(format!("score {score:>3}"), ClinicTheme::health_score(score)),
                Span::styled(format!("  {}", a.status), ClinicTheme::text_secondary()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
