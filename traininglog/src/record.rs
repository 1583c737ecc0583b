//! Intermediate record produced by the extractor
//!
//! Session fields and exercise-level values stay as raw text with the span
//! they were read from. Set lines are already decoded into numbers, but no
//! domain rule has been applied yet: an RPE of 7.3 or a failure technique on
//! an RPE 8 set survives here and is rejected by the deep parser.

use crate::ast::{Located, Span};
use crate::model::RepCount;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

/// Session-level keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionField {
    Date,
    Phase,
    Week,
    Deload,
    Focus,
    Duration,
    Program,
    ProgramAuthor,
    ProgramLengthWeeks,
    UserId,
    UserName,
}

impl SessionField {
    /// Canonical field name, used in error messages
    pub fn key(&self) -> &'static str {
        match self {
            SessionField::Date => "date",
            SessionField::Phase => "phase",
            SessionField::Week => "week",
            SessionField::Deload => "is_deload_week",
            SessionField::Focus => "focus",
            SessionField::Duration => "session_duration_minutes",
            SessionField::Program => "program",
            SessionField::ProgramAuthor => "program_author",
            SessionField::ProgramLengthWeeks => "program_length_weeks",
            SessionField::UserId => "user_id",
            SessionField::UserName => "user_name",
        }
    }
}

impl fmt::Display for SessionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSession {
    pub fields: BTreeMap<SessionField, Located<String>>,
    pub exercises: Vec<RawExercise>,
    /// Span of the begin marker
    pub span: Span,
}

impl RawSession {
    pub fn field(&self, field: SessionField) -> Option<&Located<String>> {
        self.fields.get(&field)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawExercise {
    pub number: u32,
    pub name: String,
    /// Span of the exercise header
    pub span: Span,
    pub goal: Option<Located<String>>,
    /// `Rest:` text, only kept when a goal was already present
    pub goal_rest: Option<Located<String>>,
    pub target_muscles: Option<Located<String>>,
    pub tempo: Option<Located<String>>,
    pub warmup_sets: Vec<RawWarmupSet>,
    pub working_sets: Vec<RawWorkingSet>,
    pub notes: Vec<String>,
    pub warmup_notes: Vec<String>,
    pub form_cues: Vec<String>,
}

impl RawExercise {
    pub fn new(number: u32, name: impl Into<String>, span: Span) -> Self {
        Self {
            number,
            name: name.into(),
            span,
            goal: None,
            goal_rest: None,
            target_muscles: None,
            tempo: None,
            warmup_sets: Vec::new(),
            working_sets: Vec::new(),
            notes: Vec::new(),
            warmup_notes: Vec::new(),
            form_cues: Vec::new(),
        }
    }

    pub fn set_count(&self) -> usize {
        self.warmup_sets.len() + self.working_sets.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawWarmupSet {
    pub number: u32,
    pub weight: Decimal,
    /// `None` when the set was done by feel
    pub reps: Option<u32>,
    pub notes: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawWorkingSet {
    pub number: u32,
    pub weight: Decimal,
    pub rep_count: RepCount,
    pub rpe: Option<Decimal>,
    pub quality: Option<String>,
    pub rest_minutes: Option<u32>,
    pub notes: Option<String>,
    pub technique: Option<RawTechniqueCall>,
    pub span: Span,
}

/// `failure:<kind>(<args>)` as written, before the kind is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTechniqueCall {
    pub kind: String,
    pub args: String,
    pub span: Span,
}
