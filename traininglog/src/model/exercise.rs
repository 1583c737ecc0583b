use crate::model::sets::{Goal, WarmupSet, WorkingSet};
use crate::validator;
use crate::LogResult;

/// One exercise of a session, in the order it was performed
///
/// An exercise without working sets is valid: it records a movement that
/// was introduced in the session but not trained yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Exercise {
    number: u32,
    name: String,
    target_muscles: Vec<String>,
    tempo: Option<String>,
    goal: Option<Goal>,
    warmup_sets: Vec<WarmupSet>,
    working_sets: Vec<WorkingSet>,
    notes: Option<String>,
    warmup_notes: Option<String>,
    form_cues: Vec<String>,
}

impl Exercise {
    pub fn builder(number: u32, name: impl Into<String>) -> ExerciseBuilder {
        ExerciseBuilder {
            number,
            name: name.into(),
            target_muscles: Vec::new(),
            tempo: None,
            goal: None,
            warmup_sets: Vec::new(),
            working_sets: Vec::new(),
            notes: None,
            warmup_notes: None,
            form_cues: Vec::new(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_muscles(&self) -> &[String] {
        &self.target_muscles
    }

    pub fn tempo(&self) -> Option<&str> {
        self.tempo.as_deref()
    }

    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    pub fn warmup_sets(&self) -> &[WarmupSet] {
        &self.warmup_sets
    }

    pub fn working_sets(&self) -> &[WorkingSet] {
        &self.working_sets
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn warmup_notes(&self) -> Option<&str> {
        self.warmup_notes.as_deref()
    }

    pub fn form_cues(&self) -> &[String] {
        &self.form_cues
    }
}

#[derive(Debug, Clone)]
pub struct ExerciseBuilder {
    number: u32,
    name: String,
    target_muscles: Vec<String>,
    tempo: Option<String>,
    goal: Option<Goal>,
    warmup_sets: Vec<WarmupSet>,
    working_sets: Vec<WorkingSet>,
    notes: Option<String>,
    warmup_notes: Option<String>,
    form_cues: Vec<String>,
}

impl ExerciseBuilder {
    pub fn target_muscles(mut self, muscles: Vec<String>) -> Self {
        self.target_muscles = muscles;
        self
    }

    pub fn tempo(mut self, tempo: Option<String>) -> Self {
        self.tempo = tempo;
        self
    }

    pub fn goal(mut self, goal: Option<Goal>) -> Self {
        self.goal = goal;
        self
    }

    pub fn warmup_sets(mut self, sets: Vec<WarmupSet>) -> Self {
        self.warmup_sets = sets;
        self
    }

    pub fn working_sets(mut self, sets: Vec<WorkingSet>) -> Self {
        self.working_sets = sets;
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn warmup_notes(mut self, notes: Option<String>) -> Self {
        self.warmup_notes = notes;
        self
    }

    pub fn form_cues(mut self, cues: Vec<String>) -> Self {
        self.form_cues = cues;
        self
    }

    pub fn build(self) -> LogResult<Exercise> {
        Ok(Exercise {
            number: validator::require_positive("exercises.number", self.number)?,
            name: validator::require_non_empty("exercises.name", &self.name)?,
            target_muscles: non_blank(self.target_muscles),
            tempo: validator::optional_text(self.tempo),
            goal: self.goal,
            warmup_sets: self.warmup_sets,
            working_sets: self.working_sets,
            notes: validator::optional_text(self.notes),
            warmup_notes: validator::optional_text(self.warmup_notes),
            form_cues: non_blank(self.form_cues),
        })
    }
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
