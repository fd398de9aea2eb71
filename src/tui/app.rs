//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::random::RandomPredictor;
use crate::adapters::sqlite::SqliteStorage;
use crate::application::{AssessmentService, DashboardService};
use crate::Config;

use super::ui::{
    dashboard::{render_dashboard, DashboardState},
    history::{render_history, HistoryState},
    questionnaire::{render_questionnaire, QuestionnaireFormState},
    render_disclaimer,
    report::{render_report, ReportState},
};

const RECENT_ON_DASHBOARD: usize = 8;

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Questionnaire,
    Report,
    History,
}

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,

    assessments: AssessmentService<RandomPredictor, SqliteStorage>,
    dashboard: DashboardService<SqliteStorage>,

    /// Rows per history page
    history_limit: usize,

    dashboard_state: DashboardState,
    form_state: QuestionnaireFormState,
    report_state: Option<ReportState>,
    history_state: HistoryState,
}

impl App {
    /// Open the configured database and build the services.
    ///
    /// # Errors
    /// Returns error if the database cannot be opened.
    pub fn new(config: &Config) -> Result<Self> {
        let storage = Arc::new(SqliteStorage::new(&config.db_path)?);
        let predictor = Arc::new(match config.prediction_seed {
            Some(seed) => RandomPredictor::seeded(seed),
            None => RandomPredictor::new(),
        });

        let assessments = AssessmentService::new(predictor, Arc::clone(&storage));
        let dashboard = DashboardService::new(storage);

        Ok(Self::with_dependencies(assessments, dashboard, config.history_limit))
    }

    /// Create application with injected services.
    #[must_use]
    pub fn with_dependencies(
        assessments: AssessmentService<RandomPredictor, SqliteStorage>,
        dashboard: DashboardService<SqliteStorage>,
        history_limit: usize,
    ) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            assessments,
            dashboard,
            history_limit: history_limit.max(1),
            dashboard_state: DashboardState::default(),
            form_state: QuestionnaireFormState::default(),
            report_state: None,
            history_state: HistoryState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.refresh_dashboard();

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                let content_area = chunks[0];
                match self.screen {
                    Screen::Dashboard => render_dashboard(f, content_area, &self.dashboard_state),
                    Screen::Questionnaire => {
                        render_questionnaire(f, content_area, &self.form_state);
                    }
                    Screen::Report => {
                        if let Some(report) = &self.report_state {
                            render_report(f, content_area, report);
                        }
                    }
                    Screen::History => render_history(f, content_area, &self.history_state),
                }

                render_disclaimer(f, chunks[1]);
            })?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Questionnaire => self.handle_questionnaire_key(key),
            Screen::Report => self.handle_report_key(key),
            Screen::History => self.handle_history_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('n' | 'N') => self.start_assessment(),
            KeyCode::Char('h' | 'H') => {
                self.load_history(0);
                self.screen = Screen::History;
            }
            KeyCode::Char('r' | 'R') => self.refresh_dashboard(),
            KeyCode::Char('q' | 'Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_questionnaire_key(&mut self, key: KeyCode) {
        let form = &mut self.form_state;
        match key {
            KeyCode::Esc => {
                form.clear_sensitive();
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up => form.prev_field(),
            KeyCode::Down => form.next_field(),
            KeyCode::Left => form.cycle_choice(false),
            KeyCode::Right => form.cycle_choice(true),
            KeyCode::Tab => form.next_step(),
            KeyCode::BackTab => form.prev_step(),
            KeyCode::Char('s' | 'S') if !form.is_editing_text() => form.load_sample_data(),
            KeyCode::Char(c) => form.input_char(c),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Delete => form.clear_field(),
            KeyCode::Enter => {
                if form.is_last_step() {
                    self.submit_questionnaire();
                } else {
                    form.next_step();
                }
            }
            _ => {}
        }
    }

    fn handle_report_key(&mut self, key: KeyCode) {
        let Some(report) = self.report_state.as_mut() else {
            self.screen = Screen::Dashboard;
            return;
        };
        match key {
            KeyCode::Up => report.scroll_up(),
            KeyCode::Down => report.scroll_down(),
            KeyCode::Char('n' | 'N') => self.start_assessment(),
            KeyCode::Esc | KeyCode::Enter => {
                if report.from_history {
                    self.screen = Screen::History;
                } else {
                    self.refresh_dashboard();
                    self.screen = Screen::Dashboard;
                }
            }
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.refresh_dashboard();
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up => self.history_state.select_prev(),
            KeyCode::Down => self.history_state.select_next(),
            KeyCode::Left => {
                if let Some(offset) = self.history_state.page.as_ref().and_then(|p| p.prev_offset()) {
                    self.history_state.selected = 0;
                    self.load_history(offset);
                }
            }
            KeyCode::Right => {
                if let Some(offset) = self.history_state.page.as_ref().and_then(|p| p.next_offset()) {
                    self.history_state.selected = 0;
                    self.load_history(offset);
                }
            }
            KeyCode::Enter => {
                if let Some(assessment) = self.history_state.selected_assessment() {
                    self.report_state = Some(ReportState::new(assessment.clone(), true));
                    self.screen = Screen::Report;
                }
            }
            KeyCode::Char('r' | 'R') => {
                let offset = self.history_state.page.as_ref().map_or(0, |p| p.offset);
                self.load_history(offset);
            }
            _ => {}
        }
    }

    fn start_assessment(&mut self) {
        self.form_state = QuestionnaireFormState::default();
        self.screen = Screen::Questionnaire;
    }

    fn submit_questionnaire(&mut self) {
        let (patient_id, questionnaire) = match self.form_state.to_questionnaire() {
            Ok(parsed) => parsed,
            Err(e) => {
                self.form_state.error_message = Some(e);
                return;
            }
        };

        match self.assessments.assess(&patient_id, questionnaire) {
            Ok(assessment) => {
                self.form_state.clear_sensitive();
                self.report_state = Some(ReportState::new(assessment, false));
                self.screen = Screen::Report;
            }
            Err(e) => {
                self.form_state.error_message = Some(e.to_string());
            }
        }
    }

    fn refresh_dashboard(&mut self) {
        let today = Utc::now().date_naive();
        let loaded = self.dashboard.doctor_overview(today).and_then(|doctor| {
            let admin = self.dashboard.admin_overview()?;
            let recent = self.assessments.recent(RECENT_ON_DASHBOARD)?;
            Ok((doctor, admin, recent))
        });

        match loaded {
            Ok((doctor, admin, recent)) => {
                self.dashboard_state = DashboardState {
                    doctor,
                    admin,
                    recent,
                    error: None,
                };
            }
            Err(e) => {
                tracing::error!("Failed to refresh dashboard: {e}");
                self.dashboard_state.error = Some(e.to_string());
            }
        }
    }

    fn load_history(&mut self, offset: usize) {
        match self.assessments.page(offset, self.history_limit) {
            Ok(page) => self.history_state.set_page(page),
            Err(e) => {
                tracing::error!("Failed to load history: {e}");
                self.history_state.error = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let storage = Arc::new(SqliteStorage::in_memory().expect("Should open in-memory db"));
        let predictor = Arc::new(RandomPredictor::seeded(7));
        App::with_dependencies(
            AssessmentService::new(predictor, Arc::clone(&storage)),
            DashboardService::new(storage),
            2,
        )
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn submit_sample(app: &mut App) {
        press(app, KeyCode::Char('n'));
        // Patient id is focused first; move off it so 's' loads the sample
        press(app, KeyCode::Down);
        press(app, KeyCode::Char('s'));
        for _ in 0..4 {
            press(app, KeyCode::Enter);
        }
    }

    #[test]
    fn test_ctrl_q_quits_from_any_screen() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.screen, Screen::Questionnaire);

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_plain_q_types_into_patient_id() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('q'));

        assert!(!app.should_quit);
        assert_eq!(app.form_state.current().display(), "q");
    }

    #[test]
    fn test_submit_sample_shows_report_and_persists() {
        let mut app = app();
        submit_sample(&mut app);

        assert_eq!(app.screen, Screen::Report);
        let report = app.report_state.as_ref().expect("Should have a report");
        assert_eq!(report.assessment.patient_id, "sample-patient");
        assert!(!report.from_history);
        assert_eq!(app.assessments.count().expect("Should count"), 1);

        // Form buffers are wiped after submission
        assert_eq!(app.form_state.step, 0);
        assert_eq!(app.form_state.steps[0][0].display(), "");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.dashboard_state.doctor.total_assessments, 1);
        assert_eq!(app.dashboard_state.recent.len(), 1);
    }

    #[test]
    fn test_submit_without_patient_id_shows_error() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        for _ in 0..4 {
            press(&mut app, KeyCode::Enter);
        }

        assert_eq!(app.screen, Screen::Questionnaire);
        assert!(app.form_state.error_message.is_some());
        assert_eq!(app.assessments.count().expect("Should count"), 0);
    }

    #[test]
    fn test_history_pages_and_opens_report() {
        let mut app = app();
        for _ in 0..3 {
            submit_sample(&mut app);
            press(&mut app, KeyCode::Esc);
        }

        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.screen, Screen::History);
        let page = app.history_state.page.as_ref().expect("Should have a page");
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.position(), (1, 2));

        press(&mut app, KeyCode::Right);
        let page = app.history_state.page.as_ref().expect("Should have a page");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.position(), (2, 2));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Report);
        assert!(app.report_state.as_ref().expect("Should have a report").from_history);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::History);
    }
}
