//! Canonical mapping of a session
//!
//! The mapping is what storage and export collaborators receive. Absent
//! values and empty lists are left out at every level. Loading goes back
//! through the validating constructors, so a mapping that breaks a domain
//! rule is rejected the same way log text would be.

use crate::model::{
    DropSet, DropSetEntry, Exercise, FailureTechnique, Goal, Llp, MyoReps, RepCount, RepQuality,
    RepRange, StaticHold, TrainingSession, WarmupSet, WorkingSet,
};
use crate::validator;
use crate::LogResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SessionDto {
    data_model_version: String,
    data_model_type: String,
    #[serde(rename = "_id")]
    id: String,
    user_id: String,
    user_name: String,
    date: String,
    program: String,
    program_author: String,
    program_length_weeks: i64,
    phase: i64,
    week: i64,
    #[serde(default)]
    is_deload_week: bool,
    focus: String,
    session_duration_minutes: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    exercises: Vec<ExerciseDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ExerciseDto {
    number: i64,
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    target_muscle_groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rep_tempo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_goal: Option<GoalDto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    warmup_sets: Vec<WarmupSetDto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    working_sets: Vec<WorkingSetDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    warmup_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    form_cues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GoalDto {
    #[serde(with = "rust_decimal::serde::float")]
    weight_kg: Decimal,
    sets: i64,
    rep_range: RepRangeDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rest_minutes: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct RepRangeDto {
    min: i64,
    max: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct RepCountDto {
    full: i64,
    #[serde(default)]
    partial: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct WarmupSetDto {
    set: i64,
    #[serde(with = "rust_decimal::serde::float")]
    weight_kg: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rep_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct WorkingSetDto {
    set: i64,
    #[serde(with = "rust_decimal::serde::float")]
    weight_kg: Decimal,
    rep_count: RepCountDto,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    rpe: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rep_quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actual_rest_minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    failure_technique: Option<TechniqueDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
enum TechniqueDto {
    MyoReps {
        mini_sets: Vec<MiniSetDto>,
    },
    #[serde(rename = "LLP")]
    Llp {
        partial_rep_count: i64,
    },
    StaticHold {
        hold_duration_seconds: i64,
    },
    DropSet {
        drop_sets: Vec<DropDto>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct MiniSetDto {
    number: i64,
    rep_count: RepCountDto,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct DropDto {
    number: i64,
    #[serde(with = "rust_decimal::serde::float")]
    weight_kg: Decimal,
    rep_count: RepCountDto,
}

/// Canonical mapping as a JSON value
pub fn to_canonical(session: &TrainingSession) -> LogResult<Value> {
    Ok(serde_json::to_value(SessionDto::from(session))?)
}

/// Canonical mapping as pretty-printed JSON, keys in declaration order
pub fn to_json_string(session: &TrainingSession) -> LogResult<String> {
    Ok(serde_json::to_string_pretty(&SessionDto::from(session))?)
}

/// Canonical mapping as single-line JSON
pub fn to_json_compact(session: &TrainingSession) -> LogResult<String> {
    Ok(serde_json::to_string(&SessionDto::from(session))?)
}

/// Rebuild a validated session from its canonical mapping
pub fn from_canonical(value: Value) -> LogResult<TrainingSession> {
    let dto: SessionDto = serde_json::from_value(value)?;
    dto.into_session()
}

pub fn from_json_str(json: &str) -> LogResult<TrainingSession> {
    let dto: SessionDto = serde_json::from_str(json)?;
    dto.into_session()
}

fn count(value: u32) -> i64 {
    i64::from(value)
}

fn number_of(index: usize) -> i64 {
    i64::try_from(index + 1).unwrap_or(i64::MAX)
}

impl From<RepCount> for RepCountDto {
    fn from(rc: RepCount) -> Self {
        Self {
            full: count(rc.full()),
            partial: count(rc.partial()),
        }
    }
}

impl From<&FailureTechnique> for TechniqueDto {
    fn from(technique: &FailureTechnique) -> Self {
        match technique {
            FailureTechnique::MyoReps(myo) => TechniqueDto::MyoReps {
                mini_sets: myo
                    .mini_sets()
                    .iter()
                    .enumerate()
                    .map(|(i, rc)| MiniSetDto {
                        number: number_of(i),
                        rep_count: (*rc).into(),
                    })
                    .collect(),
            },
            FailureTechnique::Llp(llp) => TechniqueDto::Llp {
                partial_rep_count: count(llp.partial_reps()),
            },
            FailureTechnique::StaticHold(hold) => TechniqueDto::StaticHold {
                hold_duration_seconds: count(hold.seconds()),
            },
            FailureTechnique::DropSet(drop) => TechniqueDto::DropSet {
                drop_sets: drop
                    .drops()
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| DropDto {
                        number: number_of(i),
                        weight_kg: entry.weight(),
                        rep_count: entry.rep_count().into(),
                    })
                    .collect(),
            },
        }
    }
}

impl From<&WorkingSet> for WorkingSetDto {
    fn from(set: &WorkingSet) -> Self {
        Self {
            set: count(set.number()),
            weight_kg: set.weight(),
            rep_count: set.rep_count().into(),
            rpe: set.rpe().map(|r| r.value()),
            rep_quality: set.quality().map(|q| q.as_str().to_string()),
            actual_rest_minutes: set.actual_rest_minutes().map(count),
            notes: set.notes().map(str::to_string),
            failure_technique: set.technique().map(TechniqueDto::from),
        }
    }
}

impl From<&Exercise> for ExerciseDto {
    fn from(exercise: &Exercise) -> Self {
        Self {
            number: count(exercise.number()),
            name: exercise.name().to_string(),
            target_muscle_groups: exercise.target_muscles().to_vec(),
            rep_tempo: exercise.tempo().map(str::to_string),
            current_goal: exercise.goal().map(|goal| GoalDto {
                weight_kg: goal.weight(),
                sets: count(goal.sets()),
                rep_range: RepRangeDto {
                    min: count(goal.rep_range().min()),
                    max: count(goal.rep_range().max()),
                },
                rest_minutes: goal.rest_minutes().map(count),
            }),
            warmup_sets: exercise
                .warmup_sets()
                .iter()
                .map(|w| WarmupSetDto {
                    set: count(w.number()),
                    weight_kg: w.weight(),
                    rep_count: w.reps().map(count),
                    notes: w.notes().map(str::to_string),
                })
                .collect(),
            working_sets: exercise.working_sets().iter().map(WorkingSetDto::from).collect(),
            notes: exercise.notes().map(str::to_string),
            warmup_notes: exercise.warmup_notes().map(str::to_string),
            form_cues: exercise.form_cues().to_vec(),
        }
    }
}

impl From<&TrainingSession> for SessionDto {
    fn from(session: &TrainingSession) -> Self {
        Self {
            data_model_version: session.data_model_version().to_string(),
            data_model_type: session.data_model_type().to_string(),
            id: session.session_id().to_string(),
            user_id: session.user_id().to_string(),
            user_name: session.user_name().to_string(),
            date: session.date().format("%Y-%m-%d").to_string(),
            program: session.program().to_string(),
            program_author: session.program_author().to_string(),
            program_length_weeks: count(session.program_length_weeks()),
            phase: count(session.phase()),
            week: count(session.week()),
            is_deload_week: session.is_deload_week(),
            focus: session.focus().to_string(),
            session_duration_minutes: count(session.duration_minutes()),
            exercises: session.exercises().iter().map(ExerciseDto::from).collect(),
        }
    }
}

impl RepCountDto {
    fn into_rep_count(self) -> LogResult<RepCount> {
        RepCount::from_signed(self.full, self.partial)
    }
}

impl TechniqueDto {
    fn into_technique(self) -> LogResult<FailureTechnique> {
        Ok(match self {
            TechniqueDto::MyoReps { mini_sets } => MyoReps::new(
                mini_sets
                    .into_iter()
                    .map(|m| m.rep_count.into_rep_count())
                    .collect::<LogResult<Vec<_>>>()?,
            )?
            .into(),
            TechniqueDto::Llp { partial_rep_count } => Llp::new(validator::require_count(
                "failure_technique.partial_rep_count",
                partial_rep_count,
            )?)
            .into(),
            TechniqueDto::StaticHold {
                hold_duration_seconds,
            } => StaticHold::new(validator::require_count(
                "failure_technique.hold_duration_seconds",
                hold_duration_seconds,
            )?)?
            .into(),
            TechniqueDto::DropSet { drop_sets } => DropSet::new(
                drop_sets
                    .into_iter()
                    .map(|d| DropSetEntry::new(d.weight_kg, d.rep_count.into_rep_count()?))
                    .collect::<LogResult<Vec<_>>>()?,
            )?
            .into(),
        })
    }
}

impl WorkingSetDto {
    fn into_working_set(self) -> LogResult<WorkingSet> {
        let quality = self
            .rep_quality
            .as_deref()
            .map(RepQuality::from_alias)
            .transpose()?;
        let rest = self
            .actual_rest_minutes
            .map(|m| validator::require_count("working_sets.actual_rest_minutes", m))
            .transpose()?;
        WorkingSet::builder(
            validator::require_count("working_sets.set", self.set)?,
            self.weight_kg,
            self.rep_count.into_rep_count()?,
        )
        .rpe(self.rpe)
        .quality(quality)
        .actual_rest_minutes(rest)
        .notes(self.notes)
        .technique(self.failure_technique.map(|t| t.into_technique()).transpose()?)
        .build()
    }
}

impl ExerciseDto {
    fn into_exercise(self) -> LogResult<Exercise> {
        let goal = match self.current_goal {
            Some(goal) => Some(Goal::new(
                goal.weight_kg,
                validator::require_count("current_goal.sets", goal.sets)?,
                RepRange::new(
                    validator::require_count("rep_range.min", goal.rep_range.min)?,
                    validator::require_count("rep_range.max", goal.rep_range.max)?,
                )?,
                goal.rest_minutes
                    .map(|m| validator::require_count("current_goal.rest_minutes", m))
                    .transpose()?,
            )?),
            None => None,
        };
        let warmup_sets = self
            .warmup_sets
            .into_iter()
            .map(|w| {
                WarmupSet::new(
                    validator::require_count("warmup_sets.set", w.set)?,
                    w.weight_kg,
                    w.rep_count
                        .map(|r| validator::require_count("warmup_sets.rep_count", r))
                        .transpose()?,
                    w.notes,
                )
            })
            .collect::<LogResult<Vec<_>>>()?;
        let working_sets = self
            .working_sets
            .into_iter()
            .map(WorkingSetDto::into_working_set)
            .collect::<LogResult<Vec<_>>>()?;

        Exercise::builder(
            validator::require_count("exercises.number", self.number)?,
            self.name,
        )
        .target_muscles(self.target_muscle_groups)
        .tempo(self.rep_tempo)
        .goal(goal)
        .warmup_sets(warmup_sets)
        .working_sets(working_sets)
        .notes(self.notes)
        .warmup_notes(self.warmup_notes)
        .form_cues(self.form_cues)
        .build()
    }
}

impl SessionDto {
    fn into_session(self) -> LogResult<TrainingSession> {
        let exercises = self
            .exercises
            .into_iter()
            .map(ExerciseDto::into_exercise)
            .collect::<LogResult<Vec<_>>>()?;
        TrainingSession::builder()
            .session_id(self.id)
            .user(self.user_id, self.user_name)
            .date(validator::parse_date("date", &self.date)?)
            .program(self.program, self.program_author)
            .program_length_weeks(validator::require_count(
                "program_length_weeks",
                self.program_length_weeks,
            )?)
            .phase(validator::require_count("phase", self.phase)?)
            .week(validator::require_count("week", self.week)?)
            .deload(self.is_deload_week)
            .focus(self.focus)
            .exercises(exercises)
            .duration_minutes(validator::require_count(
                "session_duration_minutes",
                self.session_duration_minutes,
            )?)
            .data_model(self.data_model_version, self.data_model_type)
            .build()
    }
}
