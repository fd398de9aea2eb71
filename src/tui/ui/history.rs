//! Paginated assessment history.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::domain::Assessment;
use crate::ports::AssessmentPage;
use crate::tui::styles::ClinicTheme;

use super::{key_hints, render_footer, render_header, short_id};

#[derive(Default)]
pub struct HistoryState {
    pub page: Option<AssessmentPage>,
    pub selected: usize,
    pub error: Option<String>,
}

impl HistoryState {
    #[must_use]
    pub fn selected_assessment(&self) -> Option<&Assessment> {
        self.page.as_ref().and_then(|p| p.items.get(self.selected))
    }

    pub fn select_next(&mut self) {
        let len = self.page.as_ref().map_or(0, |p| p.items.len());
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Replace the loaded page, keeping the selection in bounds.
    pub fn set_page(&mut self, page: AssessmentPage) {
        self.selected = self.selected.min(page.items.len().saturating_sub(1));
        self.page = Some(page);
        self.error = None;
    }
}

pub fn render_history(f: &mut Frame, area: Rect, state: &HistoryState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let position = state.page.as_ref().map_or_else(String::new, |p| {
        let (page, pages) = p.position();
        format!("Page {page} of {pages} · {} total", p.total_count)
    });
    render_header(f, chunks[0], "Assessment History", &position);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(ClinicTheme::border());

    if let Some(err) = &state.error {
        let p = Paragraph::new(Line::from(Span::styled(err.clone(), ClinicTheme::danger()))).block(block);
        f.render_widget(p, chunks[1]);
    } else {
        match &state.page {
            Some(page) if !page.items.is_empty() => render_table(f, chunks[1], page, state.selected, block),
            _ => {
                let p = Paragraph::new(Line::from(Span::styled(
                    "No assessments recorded yet.",
                    ClinicTheme::text_muted(),
                )))
                .block(block);
                f.render_widget(p, chunks[1]);
            }
        }
    }

    render_footer(
        f,
        chunks[2],
        key_hints(&[
            ("↑↓", "Select"),
            ("←→", "Page"),
            ("Enter", "Open Report"),
            ("Esc", "Dashboard"),
        ]),
    );
}

fn render_table(f: &mut Frame, area: Rect, page: &AssessmentPage, selected: usize, block: Block) {
    let header = Row::new(["Date", "Patient", "ID", "Score", "Headline", "Factors", "Status"])
        .style(ClinicTheme::subtitle());

    let rows: Vec<Row> = page
        .items
        .iter()
        .map(|a| {
            let score = a.health_score.overall;
            let band = a.prediction.band();
            Row::new(vec![
                Cell::from(a.created_at.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(a.patient_id.clone()),
                Cell::from(short_id(&a.id).to_string()),
                Cell::from(score.to_string()).style(ClinicTheme::health_score(score)),
                Cell::from(format!("{}%", a.prediction.score)).style(ClinicTheme::risk_level(band)),
                Cell::from(a.risk_factors.len().to_string()),
                Cell::from(a.status.to_string()),
            ])
            .style(ClinicTheme::text())
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(17),
            Constraint::Min(12),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Length(15),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(ClinicTheme::selected())
    .highlight_symbol("▶ ");

    let mut table_state = TableState::default().with_selected(Some(selected));
    f.render_stateful_widget(table, area, &mut table_state);
}
