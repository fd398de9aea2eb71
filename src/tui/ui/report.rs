//! Assessment report view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Assessment, RiskFactor, RiskLevel};
use crate::tui::styles::ClinicTheme;

use super::{key_hints, render_footer, render_header, short_id};

/// Report state: the assessment on display and the factor list scroll.
pub struct ReportState {
    pub assessment: Assessment,
    pub scroll: u16,
    /// Screen to return to on Esc
    pub from_history: bool,
}

impl ReportState {
    #[must_use]
    pub fn new(assessment: Assessment, from_history: bool) -> Self {
        Self {
            assessment,
            scroll: 0,
            from_history,
        }
    }

    pub fn scroll_down(&mut self) {
        let max = u16::try_from(body_lines(&self.assessment).len()).unwrap_or(u16::MAX);
        self.scroll = (self.scroll + 1).min(max.saturating_sub(1));
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

pub fn render_report(f: &mut Frame, area: Rect, state: &ReportState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(9), // Summary
            Constraint::Min(0),    // Factors
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let a = &state.assessment;
    let subtitle = format!(
        "Patient {} · {} · {}",
        a.patient_id,
        short_id(&a.id),
        a.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    render_header(f, chunks[0], "Assessment Report", &subtitle);

    let summary = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);
    render_headline(f, summary[0], a);
    render_score(f, summary[1], a);

    render_factors(f, chunks[2], state);

    let close = if state.from_history { "Back to History" } else { "Dashboard" };
    render_footer(
        f,
        chunks[3],
        key_hints(&[("↑↓", "Scroll"), ("N", "New Assessment"), ("Esc", close)]),
    );
}

fn render_headline(f: &mut Frame, area: Rect, a: &Assessment) {
    let band = a.prediction.band();
    let style = ClinicTheme::risk_level(band);

    let block = Block::default()
        .title(Span::styled(" Headline Risk ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let label = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{}%  {band}", a.prediction.score),
            style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(band.description(), ClinicTheme::text_secondary())),
    ])
    .alignment(Alignment::Center);
    f.render_widget(label, rows[0]);

    let gauge = Gauge::default()
        .gauge_style(style)
        .percent(u16::from(a.prediction.score))
        .label("");
    f.render_widget(gauge, rows[1]);

    let notice = Paragraph::new(Line::from(Span::styled(
        "Placeholder figure, independent of the factor analysis below.",
        ClinicTheme::text_muted(),
    )))
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center);
    f.render_widget(notice, rows[2]);
}

fn score_line(label: &str, score: u8) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<10}"), ClinicTheme::text_secondary()),
        Span::styled(format!("{score:>3}"), ClinicTheme::health_score(score)),
    ])
}

fn render_score(f: &mut Frame, area: Rect, a: &Assessment) {
    let s = &a.health_score;
    let tier = s.tier();

    let lines = vec![
        Line::from(vec![
            Span::styled("  Overall   ", ClinicTheme::text_secondary()),
            Span::styled(
                format!("{:>3}", s.overall),
                ClinicTheme::health_score(s.overall).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  ({tier} risk)"), ClinicTheme::risk_level(tier)),
        ]),
        score_line("Lifestyle", s.breakdown.lifestyle),
        score_line("Medical", s.breakdown.medical),
        score_line("Biometric", s.breakdown.biometric),
        Line::from(""),
        Line::from(vec![
            Span::styled("  High ", ClinicTheme::text_secondary()),
            Span::styled(s.high_risk_count.to_string(), ClinicTheme::danger()),
            Span::styled("  Medium ", ClinicTheme::text_secondary()),
            Span::styled(s.medium_risk_count.to_string(), ClinicTheme::warning()),
            Span::styled("  Low ", ClinicTheme::text_secondary()),
            Span::styled(s.low_risk_count.to_string(), ClinicTheme::success()),
            Span::styled(format!("   Status: {}", a.status), ClinicTheme::info()),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(" Health Score ", ClinicTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn level_marker(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "▲",
        RiskLevel::Medium => "■",
        RiskLevel::Low => "●",
    }
}

/// Flattened factor list: a heading line, the recommendation, then details.
fn factor_lines(factors: &[RiskFactor]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for factor in factors {
        let style = ClinicTheme::risk_level(factor.level);
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", level_marker(factor.level)), style),
            Span::styled(factor.name.clone(), style.add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", factor.value), ClinicTheme::text()),
            Span::styled(format!("  score {}", factor.score), ClinicTheme::text_muted()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", factor.recommendation),
            ClinicTheme::text_secondary(),
        )));
        for detail in &factor.details {
            lines.push(Line::from(Span::styled(
                format!("    • {detail}"),
                ClinicTheme::text_muted(),
            )));
        }
    }
    lines
}

/// Scrollable body: the factor list followed by the doctor review, if any.
fn body_lines(a: &Assessment) -> Vec<Line<'static>> {
    let mut lines = factor_lines(&a.risk_factors);
    if let Some(review) = &a.review {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Doctor review: ", ClinicTheme::subtitle()),
            Span::styled(
                format!("{} ({}, {} risk)", review.doctor_name, review.status, review.risk_level),
                ClinicTheme::text(),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", review.notes),
            ClinicTheme::text_secondary(),
        )));
        for rec in &review.recommendations {
            lines.push(Line::from(Span::styled(format!("    • {rec}"), ClinicTheme::text_muted())));
        }
        if let Some(date) = review.follow_up_date {
            lines.push(Line::from(Span::styled(
                format!("  Follow-up: {date}"),
                ClinicTheme::info(),
            )));
        }
    }
    lines
}

fn render_factors(f: &mut Frame, area: Rect, state: &ReportState) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Risk Factors ({}) ", state.assessment.risk_factors.len()),
            ClinicTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border());

    let p = Paragraph::new(body_lines(&state.assessment))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        analyze_risk_factors, DoctorReview, HeadlinePrediction, HealthQuestionnaire, HealthScore,
    };

    fn assessment() -> Assessment {
        let q = HealthQuestionnaire {
            bmi: 32.0,
            ..HealthQuestionnaire::default()
        };
        let factors = analyze_risk_factors(&q);
        let score = HealthScore::from_factors(&factors);
        Assessment::new("p-1", q, HeadlinePrediction::new(40), factors, score)
    }

    fn scroll_to_end(state: &mut ReportState) -> u16 {
        for _ in 0..100 {
            state.scroll_down();
        }
        state.scroll
    }

    #[test]
    fn test_scroll_stops_at_last_factor_line() {
        let a = assessment();
        let factor_count = factor_lines(&a.risk_factors).len() as u16;
        let mut state = ReportState::new(a, false);
        assert_eq!(scroll_to_end(&mut state), factor_count - 1);

        state.scroll_up();
        assert_eq!(state.scroll, factor_count - 2);
    }

    #[test]
    fn test_scroll_reaches_review_lines() {
        let mut a = assessment();
        let factor_count = factor_lines(&a.risk_factors).len() as u16;
        let mut review = DoctorReview::new("doc-1", "Dr. Okafor", "Weight plan", RiskLevel::Medium);
        review.recommendations = vec!["Dietitian referral".to_string()];
        review.follow_up_date = chrono::NaiveDate::from_ymd_opt(2026, 12, 1);
        a.apply_review(review);

        let total = body_lines(&a).len() as u16;
        assert_eq!(total, factor_count + 5);

        let mut state = ReportState::new(a, true);
        assert_eq!(scroll_to_end(&mut state), total - 1);
    }
}
