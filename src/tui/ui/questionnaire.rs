//! Four-step questionnaire form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{AgeCategory, Answer, GeneralHealth, HealthQuestionnaire, Race, Sex};
use crate::tui::styles::ClinicTheme;

use super::{key_hints, render_footer, render_header};

/// Longest accepted numeric entry.
const NUMBER_MAX_LEN: usize = 8;

pub const STEP_TITLES: [&str; 4] = [
    "Personal Information",
    "Lifestyle Factors",
    "Health Status",
    "Medical History",
];

/// Questionnaire field a form row edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    PatientId,
    Sex,
    AgeCategory,
    Race,
    Bmi,
    SleepTime,
    Smoking,
    AlcoholDrinking,
    PhysicalActivity,
    DiffWalking,
    GenHealth,
    PhysicalHealth,
    MentalHealth,
    HeartDisease,
    Stroke,
    Diabetic,
    Asthma,
    KidneyDisease,
    SkinCancer,
}

/// Fixed option set for a choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choices {
    YesNo,
    Sex,
    Age,
    Race,
    GenHealth,
}

impl Choices {
    #[must_use]
    pub fn len(self) -> usize {
        match self {
            Self::YesNo => Answer::ALL.len(),
            Self::Sex => Sex::ALL.len(),
            Self::Age => AgeCategory::ALL.len(),
            Self::Race => Race::ALL.len(),
            Self::GenHealth => GeneralHealth::ALL.len(),
        }
    }

    #[must_use]
    pub fn label(self, index: usize) -> &'static str {
        let i = index % self.len();
        match self {
            Self::YesNo => Answer::ALL[i].label(),
            Self::Sex => Sex::ALL[i].label(),
            Self::Age => AgeCategory::ALL[i].label(),
            Self::Race => Race::ALL[i].label(),
            Self::GenHealth => GeneralHealth::ALL[i].label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text { value: String },
    Number { value: String, hint: &'static str },
    Choice { choices: Choices, index: usize },
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub id: FieldId,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FormField {
    fn text(id: FieldId, label: &'static str) -> Self {
        Self {
            id,
            label,
            kind: FieldKind::Text {
                value: String::new(),
            },
        }
    }

    fn number(id: FieldId, label: &'static str, hint: &'static str) -> Self {
        Self {
            id,
            label,
            kind: FieldKind::Number {
                value: String::new(),
                hint,
            },
        }
    }

    fn choice(id: FieldId, label: &'static str, choices: Choices) -> Self {
        Self {
            id,
            label,
            kind: FieldKind::Choice { choices, index: 0 },
        }
    }

    /// Current value as shown on screen.
    #[must_use]
    pub fn display(&self) -> &str {
        match &self.kind {
            FieldKind::Text { value } | FieldKind::Number { value, .. } => value,
            FieldKind::Choice { choices, index } => choices.label(*index),
        }
    }
}

fn position<T: PartialEq>(all: &[T], value: &T) -> usize {
    all.iter().position(|v| v == value).unwrap_or(0)
}

/// Questionnaire form state.
pub struct QuestionnaireFormState {
    /// Fields per step
    pub steps: [Vec<FormField>; 4],
    pub step: usize,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for QuestionnaireFormState {
    fn default() -> Self {
        let mut state = Self {
            steps: [
                vec![
                    FormField::text(FieldId::PatientId, "Patient ID"),
                    FormField::choice(FieldId::Sex, "Sex", Choices::Sex),
                    FormField::choice(FieldId::AgeCategory, "Age Category", Choices::Age),
                    FormField::choice(FieldId::Race, "Race", Choices::Race),
                    FormField::number(FieldId::Bmi, "BMI", "kg/m² (10-60)"),
                    FormField::number(FieldId::SleepTime, "Sleep Time (hours)", "hours (0-24)"),
                ],
                vec![
                    FormField::choice(FieldId::Smoking, "Smoking", Choices::YesNo),
                    FormField::choice(FieldId::AlcoholDrinking, "Alcohol Drinking", Choices::YesNo),
                    FormField::choice(FieldId::PhysicalActivity, "Physical Activity", Choices::YesNo),
                    FormField::choice(FieldId::DiffWalking, "Difficulty Walking", Choices::YesNo),
                ],
                vec![
                    FormField::choice(FieldId::GenHealth, "General Health", Choices::GenHealth),
                    FormField::number(FieldId::PhysicalHealth, "Physical Health", "poor days in last 30"),
                    FormField::number(FieldId::MentalHealth, "Mental Health", "poor days in last 30"),
                ],
                vec![
                    FormField::choice(FieldId::HeartDisease, "Heart Disease", Choices::YesNo),
                    FormField::choice(FieldId::Stroke, "Previous Stroke", Choices::YesNo),
                    FormField::choice(FieldId::Diabetic, "Diabetic", Choices::YesNo),
                    FormField::choice(FieldId::Asthma, "Asthma", Choices::YesNo),
                    FormField::choice(FieldId::KidneyDisease, "Kidney Disease", Choices::YesNo),
                    FormField::choice(FieldId::SkinCancer, "Skin Cancer", Choices::YesNo),
                ],
            ],
            step: 0,
            selected_field: 0,
            error_message: None,
        };
        state.fill_from(&HealthQuestionnaire::default());
        state
    }
}

impl QuestionnaireFormState {
    fn fields(&self) -> &[FormField] {
        &self.steps[self.step]
    }

    /// Currently focused field.
    #[must_use]
    pub fn current(&self) -> &FormField {
        &self.steps[self.step][self.selected_field]
    }

    fn current_mut(&mut self) -> &mut FormField {
        &mut self.steps[self.step][self.selected_field]
    }

    fn all_fields(&self) -> impl Iterator<Item = &FormField> {
        self.steps.iter().flatten()
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.step + 1 == self.steps.len()
    }

    /// Whether typed characters go into the focused field.
    #[must_use]
    pub fn is_editing_text(&self) -> bool {
        matches!(self.current().kind, FieldKind::Text { .. })
    }

    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields().len();
    }

    pub fn prev_field(&mut self) {
        let len = self.fields().len();
        self.selected_field = (self.selected_field + len - 1) % len;
    }

    pub fn next_step(&mut self) {
        if !self.is_last_step() {
            self.step += 1;
            self.selected_field = 0;
        }
    }

    pub fn prev_step(&mut self) {
        if self.step > 0 {
            self.step -= 1;
            self.selected_field = 0;
        }
    }

    /// Cycle a choice field forward (`true`) or backward.
    pub fn cycle_choice(&mut self, forward: bool) {
        if let FieldKind::Choice { choices, index } = &mut self.current_mut().kind {
            let len = choices.len();
            *index = if forward {
                (*index + 1) % len
            } else {
                (*index + len - 1) % len
            };
        }
    }

    pub fn input_char(&mut self, c: char) {
        let accepted = match &mut self.current_mut().kind {
            FieldKind::Text { value } if !c.is_control() && value.len() < 64 => {
                value.push(c);
                true
            }
            FieldKind::Number { value, .. }
                if (c.is_ascii_digit() || c == '.' || c == '-') && value.len() < NUMBER_MAX_LEN =>
            {
                value.push(c);
                true
            }
            _ => false,
        };
        if accepted {
            self.error_message = None;
        }
    }

    pub fn delete_char(&mut self) {
        if let FieldKind::Text { value } | FieldKind::Number { value, .. } =
            &mut self.current_mut().kind
        {
            value.pop();
        }
    }

    pub fn clear_field(&mut self) {
        if let FieldKind::Text { value } | FieldKind::Number { value, .. } =
            &mut self.current_mut().kind
        {
            value.zeroize();
        }
    }

    /// Set every field from a questionnaire. The patient id is left alone.
    pub fn fill_from(&mut self, q: &HealthQuestionnaire) {
        for field in self.steps.iter_mut().flatten() {
            match &mut field.kind {
                FieldKind::Text { .. } => {}
                FieldKind::Number { value, .. } => {
                    *value = match field.id {
                        FieldId::Bmi => q.bmi.to_string(),
                        FieldId::SleepTime => q.sleep_time.to_string(),
                        FieldId::PhysicalHealth => q.physical_health.to_string(),
                        FieldId::MentalHealth => q.mental_health.to_string(),
                        _ => String::new(),
                    };
                }
                FieldKind::Choice { index, .. } => {
                    *index = match field.id {
                        FieldId::Sex => position(&Sex::ALL, &q.sex),
                        FieldId::AgeCategory => position(&AgeCategory::ALL, &q.age_category),
                        FieldId::Race => position(&Race::ALL, &q.race),
                        FieldId::GenHealth => position(&GeneralHealth::ALL, &q.gen_health),
                        id => position(&Answer::ALL, &yes_no(q, id)),
                    };
                }
            }
        }
    }

    /// Read the form into a patient id and questionnaire.
    ///
    /// Only parsing happens here; range checks are left to validation.
    ///
    /// # Errors
    /// Returns a message naming the first field that does not parse.
    pub fn to_questionnaire(&self) -> Result<(String, HealthQuestionnaire), String> {
        let mut q = HealthQuestionnaire::default();
        let mut patient_id = String::new();

        for field in self.all_fields() {
            match &field.kind {
                FieldKind::Text { value } => patient_id = value.trim().to_string(),
                FieldKind::Number { value, .. } => {
                    let invalid = || format!("{}: Invalid number", field.label);
                    match field.id {
                        FieldId::Bmi => q.bmi = value.trim().parse().map_err(|_| invalid())?,
                        FieldId::SleepTime => {
                            q.sleep_time = value.trim().parse().map_err(|_| invalid())?;
                        }
                        FieldId::PhysicalHealth => {
                            q.physical_health = value.trim().parse().map_err(|_| invalid())?;
                        }
                        FieldId::MentalHealth => {
                            q.mental_health = value.trim().parse().map_err(|_| invalid())?;
                        }
                        _ => {}
                    }
                }
                FieldKind::Choice { index, .. } => match field.id {
                    FieldId::Sex => q.sex = Sex::ALL[*index],
                    FieldId::AgeCategory => q.age_category = AgeCategory::ALL[*index],
                    FieldId::Race => q.race = Race::ALL[*index],
                    FieldId::GenHealth => q.gen_health = GeneralHealth::ALL[*index],
                    id => set_yes_no(&mut q, id, Answer::ALL[*index]),
                },
            }
        }

        if patient_id.is_empty() {
            return Err("Patient ID: required".to_string());
        }
        Ok((patient_id, q))
    }

    /// Sample answers for a middle-aged smoker with poor sleep.
    pub fn load_sample_data(&mut self) {
        let sample = HealthQuestionnaire {
            bmi: 31.4,
            smoking: Answer::Yes,
            alcohol_drinking: Answer::Yes,
            physical_activity: Answer::No,
            sex: Sex::Male,
            age_category: AgeCategory::From55To59,
            race: Race::White,
            gen_health: GeneralHealth::Fair,
            sleep_time: 5.5,
            physical_health: 4,
            mental_health: 16,
            diabetic: Answer::Yes,
            ..Default::default()
        };
        self.fill_from(&sample);
        if let Some(FormField {
            kind: FieldKind::Text { value },
            ..
        }) = self.steps[0].first_mut()
        {
            if value.is_empty() {
                value.push_str("sample-patient");
            }
        }
        self.error_message = None;
    }

    /// Wipe typed buffers and return to a blank form.
    pub fn clear_sensitive(&mut self) {
        for field in self.steps.iter_mut().flatten() {
            if let FieldKind::Text { value } | FieldKind::Number { value, .. } = &mut field.kind {
                value.zeroize();
            }
        }
        *self = Self::default();
    }
}

fn yes_no(q: &HealthQuestionnaire, id: FieldId) -> Answer {
    match id {
        FieldId::Smoking => q.smoking,
        FieldId::AlcoholDrinking => q.alcohol_drinking,
        FieldId::PhysicalActivity => q.physical_activity,
        FieldId::DiffWalking => q.diff_walking,
        FieldId::HeartDisease => q.heart_disease,
        FieldId::Stroke => q.stroke,
        FieldId::Diabetic => q.diabetic,
        FieldId::Asthma => q.asthma,
        FieldId::KidneyDisease => q.kidney_disease,
        FieldId::SkinCancer => q.skin_cancer,
        _ => Answer::No,
    }
}

fn set_yes_no(q: &mut HealthQuestionnaire, id: FieldId, answer: Answer) {
    let slot = match id {
        FieldId::Smoking => &mut q.smoking,
        FieldId::AlcoholDrinking => &mut q.alcohol_drinking,
        FieldId::PhysicalActivity => &mut q.physical_activity,
        FieldId::DiffWalking => &mut q.diff_walking,
        FieldId::HeartDisease => &mut q.heart_disease,
        FieldId::Stroke => &mut q.stroke,
        FieldId::Diabetic => &mut q.diabetic,
        FieldId::Asthma => &mut q.asthma,
        FieldId::KidneyDisease => &mut q.kidney_disease,
        FieldId::SkinCancer => &mut q.skin_cancer,
        _ => return,
    };
    *slot = answer;
}

/// Render the questionnaire form.
pub fn render_questionnaire(f: &mut Frame, area: Rect, state: &QuestionnaireFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Step tabs
            Constraint::Min(0),    // Fields
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_header(f, chunks[0], "New Assessment", "Cardiovascular Risk Questionnaire");
    render_steps(f, chunks[1], state);
    render_fields(f, chunks[2], state);
    render_form_footer(f, chunks[3], state);
}

fn render_steps(f: &mut Frame, area: Rect, state: &QuestionnaireFormState) {
    let titles: Vec<Line> = STEP_TITLES
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{}. {t}", i + 1)))
        .collect();

    let tabs = Tabs::new(titles)
        .select(state.step)
        .style(ClinicTheme::text_muted())
        .highlight_style(ClinicTheme::focused())
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(ClinicTheme::border()),
        );
    f.render_widget(tabs, area);
}

fn render_fields(f: &mut Frame, area: Rect, state: &QuestionnaireFormState) {
    let fields = state.fields();
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(2)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = i == state.selected_field;
        let (border_style, title_style) = if is_selected {
            (ClinicTheme::border_focused(), ClinicTheme::focused())
        } else {
            (ClinicTheme::border(), ClinicTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let mut spans = vec![Span::raw(" ")];
        match &field.kind {
            FieldKind::Choice { .. } => {
                let arrows = if is_selected { ClinicTheme::key_hint() } else { ClinicTheme::text_muted() };
                spans.push(Span::styled("◀ ", arrows));
                spans.push(Span::styled(field.display().to_string(), ClinicTheme::text()));
                spans.push(Span::styled(" ▶", arrows));
            }
            FieldKind::Number { value, hint } if value.is_empty() => {
                spans.push(Span::styled(*hint, ClinicTheme::text_muted()));
            }
            FieldKind::Text { value } if value.is_empty() => {
                spans.push(Span::styled("required", ClinicTheme::text_muted()));
            }
            _ => spans.push(Span::styled(field.display().to_string(), ClinicTheme::text())),
        }
        if is_selected && !matches!(field.kind, FieldKind::Choice { .. }) {
            spans.push(Span::styled("▌", ClinicTheme::cursor()));
        }

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &QuestionnaireFormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", ClinicTheme::danger()),
            Span::styled(err.clone(), ClinicTheme::danger()),
        ])
    } else {
        let enter = if state.is_last_step() { "Submit" } else { "Next Step" };
        key_hints(&[
            ("↑↓", "Field"),
            ("←→", "Choose"),
            ("Tab", "Step"),
            ("Enter", enter),
            ("S", "Sample"),
            ("Esc", "Cancel"),
        ])
    };

    render_footer(f, area, content);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(state: &mut QuestionnaireFormState, id: FieldId) {
        for (s, fields) in state.steps.iter().enumerate() {
            if let Some(i) = fields.iter().position(|f| f.id == id) {
                state.step = s;
                state.selected_field = i;
                return;
            }
        }
        panic!("no field {id:?}");
    }

    #[test]
    fn test_defaults_match_blank_questionnaire() {
        let mut state = QuestionnaireFormState::default();
        assert!(state.to_questionnaire().is_err());

        state.input_char('p');
        state.input_char('1');
        let (patient, q) = state.to_questionnaire().expect("Should parse");
        assert_eq!(patient, "p1");
        assert_eq!(q, HealthQuestionnaire::default());
    }

    #[test]
    fn test_every_field_appears_once() {
        let state = QuestionnaireFormState::default();
        let count = state.all_fields().count();
        assert_eq!(count, 19);
        assert_eq!(state.steps.len(), STEP_TITLES.len());
    }

    #[test]
    fn test_choice_cycling_wraps() {
        let mut state = QuestionnaireFormState::default();
        select(&mut state, FieldId::AgeCategory);
        assert_eq!(state.current().display(), "18-24");

        state.cycle_choice(false);
        assert_eq!(state.current().display(), "80+");
        state.cycle_choice(true);
        state.cycle_choice(true);
        assert_eq!(state.current().display(), "25-29");

        select(&mut state, FieldId::Smoking);
        assert_eq!(state.current().display(), "No");
        state.cycle_choice(true);
        assert_eq!(state.current().display(), "Yes");
    }

    #[test]
    fn test_number_fields_reject_letters() {
        let mut state = QuestionnaireFormState::default();
        select(&mut state, FieldId::Bmi);
        state.clear_field();
        for c in "2x7.5".chars() {
            state.input_char(c);
        }
        assert_eq!(state.current().display(), "27.5");

        state.clear_field();
        state.input_char('.');
        state.steps[0][0].kind = FieldKind::Text {
            value: "p".to_string(),
        };
        let err = state.to_questionnaire().expect_err("Should fail");
        assert!(err.starts_with("BMI"));
    }

    #[test]
    fn test_step_navigation() {
        let mut state = QuestionnaireFormState::default();
        state.prev_step();
        assert_eq!(state.step, 0);
        for _ in 0..10 {
            state.next_step();
        }
        assert!(state.is_last_step());
        assert_eq!(state.current().id, FieldId::HeartDisease);

        state.prev_field();
        assert_eq!(state.current().id, FieldId::SkinCancer);
    }

    #[test]
    fn test_sample_data_roundtrips() {
        let mut state = QuestionnaireFormState::default();
        state.load_sample_data();
        let (patient, q) = state.to_questionnaire().expect("Should parse");

        assert_eq!(patient, "sample-patient");
        assert_eq!(q.bmi, 31.4);
        assert_eq!(q.age_category, AgeCategory::From55To59);
        assert_eq!(q.gen_health, GeneralHealth::Fair);
        assert_eq!(q.mental_health, 16);
        assert!(q.diabetic.is_yes());
        assert!(q.physical_activity.is_no());
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_clear_sensitive_resets() {
        let mut state = QuestionnaireFormState::default();
        state.load_sample_data();
        state.next_step();
        state.error_message = Some("x".to_string());

        state.clear_sensitive();
        assert_eq!(state.step, 0);
        assert!(state.error_message.is_none());
        assert_eq!(state.current().display(), "");
        assert_eq!(
            state.to_questionnaire().expect_err("Should need id"),
            "Patient ID: required"
        );
    }

    #[test]
    fn test_number_entry_is_capped() {
        let mut state = QuestionnaireFormState::default();
        select(&mut state, FieldId::Bmi);
        state.clear_field();
        for _ in 0..20 {
            state.input_char('9');
        }
        assert_eq!(state.current().display(), "9".repeat(NUMBER_MAX_LEN));

        state.delete_char();
        state.input_char('1');
        assert_eq!(state.current().display(), format!("{}1", "9".repeat(NUMBER_MAX_LEN - 1)));
    }
}
