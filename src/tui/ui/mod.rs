//! UI module: View components for the TUI.

pub mod dashboard;
pub mod history;
pub mod questionnaire;
pub mod report;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::ClinicTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "DISCLAIMER: This assessment is informational and does not replace evaluation by a healthcare professional.",
            ClinicTheme::text_muted(),
        )),
        Line::from(Span::styled(
            "The headline percentage is a placeholder and is not derived from your answers.",
            ClinicTheme::text_muted(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(ClinicTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// One-line screen header: bold title and a muted subtitle.
pub(crate) fn render_header(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", ClinicTheme::text()),
        Span::styled(title.to_string(), ClinicTheme::title()),
        Span::styled(" │ ", ClinicTheme::text_muted()),
        Span::styled(subtitle.to_string(), ClinicTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(ClinicTheme::border()),
    );

    f.render_widget(header, area);
}

/// `[Key] Description` pairs on one line.
pub(crate) fn key_hints(pairs: &[(&str, &str)]) -> Line<'static> {
    let spans: Vec<Span<'static>> = pairs
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!("[{key}] "), ClinicTheme::key_hint()),
                Span::styled(format!("{desc} "), ClinicTheme::key_desc()),
            ]
        })
        .collect();
    Line::from(spans)
}

/// Footer bar with a top border.
pub(crate) fn render_footer(f: &mut Frame, area: Rect, line: Line<'_>) {
    let footer = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(ClinicTheme::border()),
    );
    f.render_widget(footer, area);
}

/// First 8 characters of an id, for compact tables.
pub(crate) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
