use crate::config::{DATA_MODEL_TYPE, DATA_MODEL_VERSION};
use crate::error::LogError;
use crate::model::exercise::Exercise;
use crate::validator;
use crate::LogResult;
use chrono::NaiveDate;

/// A complete, validated training session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrainingSession {
    session_id: String,
    user_id: String,
    user_name: String,
    date: NaiveDate,
    program: String,
    program_author: String,
    program_length_weeks: u32,
    phase: u32,
    week: u32,
    is_deload_week: bool,
    focus: String,
    exercises: Vec<Exercise>,
    duration_minutes: u32,
    data_model_version: String,
    data_model_type: String,
}

impl TrainingSession {
    pub fn builder() -> TrainingSessionBuilder {
        TrainingSessionBuilder::default()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn program_author(&self) -> &str {
        &self.program_author
    }

    pub fn program_length_weeks(&self) -> u32 {
        self.program_length_weeks
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn is_deload_week(&self) -> bool {
        self.is_deload_week
    }

    pub fn focus(&self) -> &str {
        &self.focus
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn data_model_version(&self) -> &str {
        &self.data_model_version
    }

    pub fn data_model_type(&self) -> &str {
        &self.data_model_type
    }

    /// Find an exercise by name, ignoring case and surrounding whitespace
    pub fn exercise_by_name(&self, name: &str) -> Option<&Exercise> {
        let target = name.trim().to_lowercase();
        self.exercises
            .iter()
            .find(|e| e.name().trim().to_lowercase() == target)
    }

    pub fn working_set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.working_sets().len()).sum()
    }
}

/// Deterministic session identifier built from date, focus and user id.
///
/// Each part is lower-cased and reduced to `[a-z0-9-]`; empty parts are
/// skipped. Only when every part is empty is a random UUID returned.
pub fn session_identity(date: &str, focus: &str, user_id: &str) -> String {
    let parts: Vec<String> = [date, focus, user_id]
        .iter()
        .map(|p| clean_identity_part(p))
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        uuid::Uuid::new_v4().to_string()
    } else {
        parts.join("_")
    }
}

fn clean_identity_part(value: &str) -> String {
    let mut cleaned = String::with_capacity(value.len());
    let mut in_gap = false;
    for ch in value.trim().chars() {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() || ch == '-' {
            if in_gap && !cleaned.is_empty() {
                cleaned.push('-');
            }
            in_gap = false;
            cleaned.push(ch);
        } else {
            in_gap = true;
        }
    }
    cleaned.trim_matches('-').to_string()
}

/// Collects session fields; `build` validates them all before a session exists
#[derive(Debug, Clone, Default)]
pub struct TrainingSessionBuilder {
    session_id: Option<String>,
    user_id: Option<String>,
    user_name: Option<String>,
    date: Option<NaiveDate>,
    program: Option<String>,
    program_author: Option<String>,
    program_length_weeks: Option<u32>,
    phase: Option<u32>,
    week: Option<u32>,
    is_deload_week: bool,
    focus: Option<String>,
    exercises: Vec<Exercise>,
    duration_minutes: Option<u32>,
    data_model_version: Option<String>,
    data_model_type: Option<String>,
}

impl TrainingSessionBuilder {
    /// Explicit identifier; derived from date, focus and user id when unset
    pub fn session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    pub fn user(mut self, user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.user_name = Some(user_name.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn program(mut self, name: impl Into<String>, author: impl Into<String>) -> Self {
        self.program = Some(name.into());
        self.program_author = Some(author.into());
        self
    }

    pub fn program_length_weeks(mut self, weeks: u32) -> Self {
        self.program_length_weeks = Some(weeks);
        self
    }

    pub fn phase(mut self, phase: u32) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn week(mut self, week: u32) -> Self {
        self.week = Some(week);
        self
    }

    pub fn deload(mut self, is_deload_week: bool) -> Self {
        self.is_deload_week = is_deload_week;
        self
    }

    pub fn focus(mut self, focus: impl Into<String>) -> Self {
        self.focus = Some(focus.into());
        self
    }

    pub fn exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.exercises = exercises;
        self
    }

    pub fn duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn data_model(mut self, version: impl Into<String>, kind: impl Into<String>) -> Self {
        self.data_model_version = Some(version.into());
        self.data_model_type = Some(kind.into());
        self
    }

    pub fn build(self) -> LogResult<TrainingSession> {
        let date = required("date", self.date)?;
        let focus = validator::require_non_empty("focus", &required("focus", self.focus)?)?;
        let user_id = validator::require_non_empty("user_id", &required("user_id", self.user_id)?)?;
        let user_name =
            validator::require_non_empty("user_name", &required("user_name", self.user_name)?)?;
        let program = validator::require_non_empty("program", &required("program", self.program)?)?;
        let program_author = validator::require_non_empty(
            "program_author",
            &required("program_author", self.program_author)?,
        )?;
        let program_length_weeks = validator::require_positive(
            "program_length_weeks",
            required("program_length_weeks", self.program_length_weeks)?,
        )?;
        let phase = validator::require_positive("phase", required("phase", self.phase)?)?;
        let week =
            validator::require_in_range("week", required("week", self.week)?, 1, program_length_weeks)?;
        let duration_minutes = validator::require_positive(
            "session_duration_minutes",
            required("session_duration_minutes", self.duration_minutes)?,
        )?;

        for (index, exercise) in self.exercises.iter().enumerate() {
            let expected = index + 1;
            if exercise.number() as usize != expected {
                return Err(LogError::validation(
                    "exercises.number",
                    exercise.number(),
                    format!(
                        "exercise numbers must be sequential, expected {} for '{}'",
                        expected,
                        exercise.name()
                    ),
                ));
            }
        }

        let session_id = match self.session_id {
            Some(id) => validator::require_non_empty("_id", &id)?,
            None => session_identity(&date.format("%Y-%m-%d").to_string(), &focus, &user_id),
        };

        let data_model_version = match self.data_model_version {
            Some(version) => validator::require_non_empty("data_model_version", &version)?,
            None => DATA_MODEL_VERSION.to_string(),
        };
        let data_model_type = match self.data_model_type {
            Some(kind) => validator::require_non_empty("data_model_type", &kind)?,
            None => DATA_MODEL_TYPE.to_string(),
        };

        Ok(TrainingSession {
            session_id,
            user_id,
            user_name,
            date,
            program,
            program_author,
            program_length_weeks,
            phase,
            week,
            is_deload_week: self.is_deload_week,
            focus,
            exercises: self.exercises,
            duration_minutes,
            data_model_version,
            data_model_type,
        })
    }
}

fn required<T>(field: &str, value: Option<T>) -> LogResult<T> {
    value.ok_or_else(|| LogError::validation(field, "missing", "is required"))
}
