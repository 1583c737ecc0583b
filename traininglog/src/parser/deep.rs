//! Deep parser: intermediate record to validated domain tree
//!
//! Raw session values are typed here, exercises are built in encounter
//! order and every validation error coming out of a constructor is anchored
//! to the line that produced the value.

use crate::ast::{Located, Span};
use crate::config::SessionDefaults;
use crate::error::{LogError, SourceContext};
use crate::model::{
    Exercise, Goal, RepQuality, RepRange, TrainingSession, WarmupSet, WorkingSet,
};
use crate::parser::techniques::parse_technique;
use crate::patterns::{compiled, Pattern};
use crate::record::{RawExercise, RawSession, RawWarmupSet, RawWorkingSet, SessionField};
use crate::validator;
use crate::LogResult;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::{debug, trace};

static GOAL: Pattern = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([\d.]+)\s*kg\s*x\s*(\d+)\s*sets?\s*x\s*(\d+)\s*-\s*(\d+)\s*reps?\s*$").ok()
});
static MINUTES: Pattern =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(\d+)\s*(?:minutes|minute|mins|min|m)?\s*$").ok());

const DELOAD_YES: &[&str] = &["yes", "y", "true", "1"];
const DELOAD_NO: &[&str] = &["no", "n", "false", "0"];

/// Build a validated session from an extracted record
pub fn build_session(
    raw: &RawSession,
    defaults: &SessionDefaults,
    ctx: &SourceContext,
) -> LogResult<TrainingSession> {
    let session = SessionFields { raw, ctx };

    let program_length_weeks = match raw.field(SessionField::ProgramLengthWeeks) {
        Some(value) => anchored(
            validator::require_positive(
                "program_length_weeks",
                session.whole_number(value, "program length")?,
            ),
            &value.span,
            ctx,
        )?,
        None => defaults.program_length_weeks,
    };

    let date = session.required(SessionField::Date)?;
    let date = anchored(validator::parse_date("date", &date.value), &date.span, ctx)?;

    let phase = session.required(SessionField::Phase)?;
    let phase = anchored(
        validator::require_positive("phase", session.whole_number(phase, "phase")?),
        &phase.span,
        ctx,
    )?;

    let week = session.required(SessionField::Week)?;
    let week = anchored(
        validator::require_in_range(
            "week",
            session.whole_number(week, "week")?,
            1,
            program_length_weeks,
        ),
        &week.span,
        ctx,
    )?;

    let is_deload_week = match raw.field(SessionField::Deload) {
        Some(value) => session.deload(value)?,
        None => false,
    };

    let duration = session.required(SessionField::Duration)?;
    let duration_minutes = anchored(
        validator::require_positive(
            "session_duration_minutes",
            minutes(duration, "session duration", ctx)?,
        ),
        &duration.span,
        ctx,
    )?;

    let focus = session.required(SessionField::Focus)?;
    let focus = anchored(validator::require_non_empty("focus", &focus.value), &focus.span, ctx)?;

    let text_or = |field: SessionField, default: &str| -> LogResult<String> {
        match raw.field(field) {
            Some(value) => anchored(
                validator::require_non_empty(field.key(), &value.value),
                &value.span,
                ctx,
            ),
            None => Ok(default.to_string()),
        }
    };
    let user_id = text_or(SessionField::UserId, &defaults.user_id)?;
    let user_name = text_or(SessionField::UserName, &defaults.user_name)?;
    let program = text_or(SessionField::Program, &defaults.program)?;
    let program_author = text_or(SessionField::ProgramAuthor, &defaults.program_author)?;

    let mut exercises = Vec::with_capacity(raw.exercises.len());
    for (index, raw_exercise) in raw.exercises.iter().enumerate() {
        let expected = index + 1;
        if raw_exercise.number as usize != expected {
            return Err(LogError::validation(
                "exercises.number",
                raw_exercise.number,
                format!(
                    "exercise numbers must be sequential, expected {} for '{}'",
                    expected, raw_exercise.name
                ),
            )
            .anchored(&raw_exercise.span, ctx));
        }
        exercises.push(build_exercise(raw_exercise, ctx)?);
    }

    let session = TrainingSession::builder()
        .user(user_id, user_name)
        .date(date)
        .program(program, program_author)
        .program_length_weeks(program_length_weeks)
        .phase(phase)
        .week(week)
        .deload(is_deload_week)
        .focus(focus)
        .exercises(exercises)
        .duration_minutes(duration_minutes)
        .build()
        .map_err(|e| e.anchored(&raw.span, ctx))?;

    debug!(
        session_id = session.session_id(),
        exercises = session.exercises().len(),
        working_sets = session.working_set_count(),
        "built training session"
    );
    Ok(session)
}

struct SessionFields<'r> {
    raw: &'r RawSession,
    ctx: &'r SourceContext,
}

impl<'r> SessionFields<'r> {
    fn required(&self, field: SessionField) -> LogResult<&'r Located<String>> {
        self.raw.field(field).ok_or_else(|| {
            LogError::validation(field.key(), "missing", "is required")
                .anchored(&self.raw.span, self.ctx)
        })
    }

    fn whole_number(&self, value: &Located<String>, what: &str) -> LogResult<u32> {
        value.value.trim().parse::<u32>().map_err(|_| {
            self.ctx.syntax(
                format!("{} must be a whole number, found '{}'", what, value.value),
                value.span.clone(),
            )
        })
    }

    fn deload(&self, value: &Located<String>) -> LogResult<bool> {
        let normalized = value.value.trim().to_lowercase();
        if DELOAD_YES.contains(&normalized.as_str()) {
            Ok(true)
        } else if DELOAD_NO.contains(&normalized.as_str()) {
            Ok(false)
        } else {
            Err(self.ctx.syntax_with_suggestion(
                format!("deload must be yes or no, found '{}'", value.value),
                value.span.clone(),
                "write Deload: yes or Deload: no",
            ))
        }
    }
}

fn anchored<T>(result: LogResult<T>, span: &Span, ctx: &SourceContext) -> LogResult<T> {
    result.map_err(|e| e.anchored(span, ctx))
}

fn minutes(value: &Located<String>, what: &str, ctx: &SourceContext) -> LogResult<u32> {
    let caps = compiled(&MINUTES, "minutes")?
        .captures(&value.value)
        .ok_or_else(|| {
            ctx.syntax_with_suggestion(
                format!("{} must be a number of minutes, found '{}'", what, value.value),
                value.span.clone(),
                "write it as 75 or 75 min",
            )
        })?;
    let text = caps.get(1).map_or("", |m| m.as_str());
    text.parse::<u32>().map_err(|_| {
        ctx.syntax(
            format!("{} '{}' is out of range", what, text),
            value.span.clone(),
        )
    })
}

fn build_exercise(raw: &RawExercise, ctx: &SourceContext) -> LogResult<Exercise> {
    trace!(number = raw.number, name = %raw.name, "building exercise");

    let goal = match &raw.goal {
        Some(goal) => Some(build_goal(goal, raw.goal_rest.as_ref(), ctx)?),
        None => None,
    };

    let warmup_sets = raw
        .warmup_sets
        .iter()
        .map(|set| build_warmup_set(set, ctx))
        .collect::<LogResult<Vec<_>>>()?;
    let working_sets = raw
        .working_sets
        .iter()
        .map(|set| build_working_set(set, ctx))
        .collect::<LogResult<Vec<_>>>()?;

    let target_muscles = raw
        .target_muscles
        .as_ref()
        .map(|m| m.value.split(',').map(str::to_string).collect())
        .unwrap_or_default();

    Exercise::builder(raw.number, raw.name.clone())
        .target_muscles(target_muscles)
        .tempo(raw.tempo.as_ref().map(|t| t.value.clone()))
        .goal(goal)
        .warmup_sets(warmup_sets)
        .working_sets(working_sets)
        .notes(joined(&raw.notes))
        .warmup_notes(joined(&raw.warmup_notes))
        .form_cues(raw.form_cues.clone())
        .build()
        .map_err(|e| e.anchored(&raw.span, ctx))
}

fn joined(lines: &[String]) -> Option<String> {
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

fn build_goal(
    goal: &Located<String>,
    rest: Option<&Located<String>>,
    ctx: &SourceContext,
) -> LogResult<Goal> {
    let caps = compiled(&GOAL, "goal")?
        .captures(&goal.value)
        .ok_or_else(|| {
            ctx.syntax_with_suggestion(
                format!("malformed goal '{}'", goal.value),
                goal.span.clone(),
                "write it as 60kg x 3 sets x 6-8 reps",
            )
        })?;
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    let number = |i: usize| -> LogResult<u32> {
        group(i).parse::<u32>().map_err(|_| {
            ctx.syntax(
                format!("goal number '{}' is out of range", group(i)),
                goal.span.clone(),
            )
        })
    };

    let weight = Decimal::from_str(group(1)).map_err(|_| {
        ctx.syntax(
            format!("invalid goal weight '{}'", group(1)),
            goal.span.clone(),
        )
    })?;
    let sets = number(2)?;
    let rep_range = anchored(RepRange::new(number(3)?, number(4)?), &goal.span, ctx)?;

    let rest_minutes = match rest {
        Some(rest) => Some(minutes(rest, "rest", ctx)?),
        None => None,
    };

    Goal::new(weight, sets, rep_range, rest_minutes).map_err(|e| {
        let span = match (&e, rest) {
            (LogError::Validation(details), Some(rest))
                if details.field.ends_with("rest_minutes") =>
            {
                &rest.span
            }
            _ => &goal.span,
        };
        e.anchored(span, ctx)
    })
}

fn build_warmup_set(raw: &RawWarmupSet, ctx: &SourceContext) -> LogResult<WarmupSet> {
    WarmupSet::new(raw.number, raw.weight, raw.reps, raw.notes.clone())
        .map_err(|e| e.anchored(&raw.span, ctx))
}

fn build_working_set(raw: &RawWorkingSet, ctx: &SourceContext) -> LogResult<WorkingSet> {
    let quality = raw
        .quality
        .as_deref()
        .map(RepQuality::from_alias)
        .transpose()
        .map_err(|e| e.anchored(&raw.span, ctx))?;

    let technique = match &raw.technique {
        Some(call) => Some(parse_technique(call, ctx).map_err(|e| e.anchored(&call.span, ctx))?),
        None => None,
    };

    WorkingSet::builder(raw.number, raw.weight, raw.rep_count)
        .rpe(raw.rpe)
        .quality(quality)
        .actual_rest_minutes(raw.rest_minutes)
        .notes(raw.notes.clone())
        .technique(technique)
        .build()
        .map_err(|e| e.anchored(&raw.span, ctx))
}
