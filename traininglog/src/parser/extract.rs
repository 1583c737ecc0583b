//! Line classifier and lexical extractor
//!
//! Finds the `BEGIN` / `END` markers, classifies every line between them and
//! folds the lines into a `RawSession`. Two pieces of state travel through
//! the fold: the exercise being accumulated and the open multi-line block.

use crate::ast::{Located, Span};
use crate::error::{LogError, SourceContext};
use crate::parser::sets::{decode_warmup_set, decode_working_set};
use crate::patterns::{compiled, Pattern};
use crate::record::{RawExercise, RawSession, SessionField};
use crate::resource_limits::ResourceLimits;
use crate::LogResult;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

static EXERCISE_HEADER: Pattern =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:exercise|ex)\s*(\d+)\s*:\s*(.*)$").ok());
static SET_LINE: Pattern = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(warmup\s*set|w|set|s)\s*(\d+)\s*:(.*)$").ok()
});
static KEYWORD_LINE: Pattern =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z][A-Za-z _]*?)\s*:(.*)$").ok());

/// Multi-line block that is currently collecting lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    #[default]
    None,
    WarmupNotes,
    ExerciseNotes,
    Cues,
}

/// Exercise-level keywords that take a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseField {
    Goal,
    Rest,
    Muscles,
    Tempo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Session(SessionField),
    Exercise(ExerciseField),
    Opens(Block),
}

/// Keyword spellings after lower-casing and removing spaces and underscores
const KEYWORDS: &[(&str, Keyword)] = &[
    ("date", Keyword::Session(SessionField::Date)),
    ("phase", Keyword::Session(SessionField::Phase)),
    ("week", Keyword::Session(SessionField::Week)),
    ("deload", Keyword::Session(SessionField::Deload)),
    ("deloadweek", Keyword::Session(SessionField::Deload)),
    ("focus", Keyword::Session(SessionField::Focus)),
    ("duration", Keyword::Session(SessionField::Duration)),
    ("sessionduration", Keyword::Session(SessionField::Duration)),
    ("program", Keyword::Session(SessionField::Program)),
    ("author", Keyword::Session(SessionField::ProgramAuthor)),
    ("programauthor", Keyword::Session(SessionField::ProgramAuthor)),
    ("programlength", Keyword::Session(SessionField::ProgramLengthWeeks)),
    ("programlengthweeks", Keyword::Session(SessionField::ProgramLengthWeeks)),
    ("user", Keyword::Session(SessionField::UserId)),
    ("userid", Keyword::Session(SessionField::UserId)),
    ("username", Keyword::Session(SessionField::UserName)),
    ("goal", Keyword::Exercise(ExerciseField::Goal)),
    ("rest", Keyword::Exercise(ExerciseField::Rest)),
    ("muscles", Keyword::Exercise(ExerciseField::Muscles)),
    ("targetmuscles", Keyword::Exercise(ExerciseField::Muscles)),
    ("tempo", Keyword::Exercise(ExerciseField::Tempo)),
    ("warmupnotes", Keyword::Opens(Block::WarmupNotes)),
    ("exercisenotes", Keyword::Opens(Block::ExerciseNotes)),
    ("notes", Keyword::Opens(Block::ExerciseNotes)),
    ("cues", Keyword::Opens(Block::Cues)),
    ("formcues", Keyword::Opens(Block::Cues)),
];

fn keyword(name: &str) -> Option<Keyword> {
    let normalized: String = name
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect();
    KEYWORDS
        .iter()
        .find(|(spelling, _)| *spelling == normalized)
        .map(|(_, kw)| *kw)
}

/// A value written on a line, with its byte offset inside that line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub text: &'a str,
    pub at: usize,
}

/// What a single line of the log is. Every kind except `Blank` and `Text`
/// is a keyword line and closes an open block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Session(SessionField, Field<'a>),
    ExerciseHeader { number: Field<'a>, name: Field<'a> },
    Exercise(ExerciseField, Field<'a>),
    BlockOpen(Block, Field<'a>),
    WarmupSet { number: Field<'a>, body: Field<'a> },
    WorkingSet { number: Field<'a>, body: Field<'a> },
    Text(&'a str),
}

fn field<'a>(line: &'a str, m: Option<regex::Match<'a>>) -> Field<'a> {
    match m {
        Some(m) => Field {
            text: m.as_str(),
            at: m.start(),
        },
        None => Field {
            text: "",
            at: line.len(),
        },
    }
}

/// Classify one line
pub fn classify(line: &str) -> LogResult<LineKind<'_>> {
    if line.trim().is_empty() {
        return Ok(LineKind::Blank);
    }

    if let Some(caps) = compiled(&EXERCISE_HEADER, "exercise header")?.captures(line) {
        return Ok(LineKind::ExerciseHeader {
            number: field(line, caps.get(1)),
            name: field(line, caps.get(2)),
        });
    }

    if let Some(caps) = compiled(&SET_LINE, "set line")?.captures(line) {
        let number = field(line, caps.get(2));
        let body = field(line, caps.get(3));
        let marker = caps.get(1).map_or("", |m| m.as_str()).to_lowercase();
        return Ok(if marker.starts_with('w') {
            LineKind::WarmupSet { number, body }
        } else {
            LineKind::WorkingSet { number, body }
        });
    }

    if let Some(caps) = compiled(&KEYWORD_LINE, "keyword line")?.captures(line) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let value = field(line, caps.get(2));
        match keyword(name) {
            Some(Keyword::Session(key)) => return Ok(LineKind::Session(key, value)),
            Some(Keyword::Exercise(key)) => return Ok(LineKind::Exercise(key, value)),
            Some(Keyword::Opens(block)) => return Ok(LineKind::BlockOpen(block, value)),
            None => {}
        }
    }

    Ok(LineKind::Text(line))
}

/// A line of the input with its absolute number and byte offset
#[derive(Debug, Clone, Copy)]
struct SourceLine<'a> {
    number: usize,
    offset: usize,
    text: &'a str,
}

impl SourceLine<'_> {
    fn span(&self) -> Span {
        Span::for_line(self.number, self.offset, self.text)
    }

    fn span_of(&self, field: &Field<'_>) -> Span {
        self.span().narrow(field.at, field.text.len())
    }
}

fn source_lines(text: &str) -> Vec<SourceLine<'_>> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for (index, raw) in text.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        lines.push(SourceLine {
            number: index + 1,
            offset,
            text: line,
        });
        offset += raw.len() + 1;
    }
    lines
}

fn is_marker(line: &str, word: &str) -> bool {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_suffix(':').unwrap_or(trimmed).trim_end();
    trimmed.eq_ignore_ascii_case(word)
}

/// Extract the intermediate record from raw log text.
///
/// Returns `Ok(None)` when the begin or end marker is missing.
pub fn extract(
    text: &str,
    limits: &ResourceLimits,
    ctx: &SourceContext,
) -> LogResult<Option<RawSession>> {
    if text.len() > limits.max_input_bytes {
        return Err(LogError::ResourceLimitExceeded {
            limit_name: "max_input_bytes".to_string(),
            limit_value: format!("{} bytes", limits.max_input_bytes),
            actual_value: format!("{} bytes", text.len()),
        });
    }

    let lines = source_lines(text);
    let Some(begin) = lines.iter().position(|l| is_marker(l.text, "BEGIN")) else {
        debug!(source = %ctx.source_id, "no BEGIN marker, nothing to extract");
        return Ok(None);
    };
    let Some(end) = lines[begin + 1..]
        .iter()
        .position(|l| is_marker(l.text, "END"))
        .map(|i| begin + 1 + i)
    else {
        debug!(source = %ctx.source_id, "no END marker after BEGIN, nothing to extract");
        return Ok(None);
    };

    let mut extractor = Extractor {
        ctx,
        limits,
        session: RawSession {
            span: lines[begin].span(),
            ..RawSession::default()
        },
        current: None,
    };
    let mut block = Block::None;
    for line in &lines[begin + 1..end] {
        block = extractor.accept(line, block)?;
    }
    Ok(Some(extractor.finish()))
}

struct Extractor<'c> {
    ctx: &'c SourceContext,
    limits: &'c ResourceLimits,
    session: RawSession,
    current: Option<RawExercise>,
}

impl Extractor<'_> {
    /// Fold one line into the record and return the block state for the next line
    fn accept(&mut self, line: &SourceLine<'_>, block: Block) -> LogResult<Block> {
        let kind = classify(line.text)?;
        trace!(line = line.number, kind = ?kind, block = ?block, "classified line");

        match kind {
            LineKind::Blank => Ok(block),
            LineKind::Text(text) => {
                if block == Block::None {
                    debug!(line = line.number, text = text.trim(), "ignoring unrecognized line");
                } else {
                    let exercise = self.open_exercise(line, "text")?;
                    push_block_line(exercise, block, text);
                }
                Ok(block)
            }
            LineKind::Session(key, value) => {
                if let Some(previous) = self.session.fields.get(&key) {
                    debug!(
                        line = line.number,
                        previous_line = previous.line(),
                        field = %key,
                        "session field repeated, keeping the later value"
                    );
                }
                self.session.fields.insert(
                    key,
                    Located::new(value.text.trim().to_string(), line.span_of(&value)),
                );
                Ok(Block::None)
            }
            LineKind::ExerciseHeader { number, name } => {
                let number = self.number(line, &number, "exercise number")?;
                self.close_exercise();
                if self.session.exercises.len() + 1 > self.limits.max_exercises {
                    return Err(LogError::ResourceLimitExceeded {
                        limit_name: "max_exercises".to_string(),
                        limit_value: self.limits.max_exercises.to_string(),
                        actual_value: (self.session.exercises.len() + 1).to_string(),
                    });
                }
                self.current = Some(RawExercise::new(number, name.text.trim(), line.span()));
                Ok(Block::None)
            }
            LineKind::Exercise(key, value) => {
                let span = line.span_of(&value);
                let exercise = self.open_exercise(line, exercise_keyword(key))?;
                let located = Located::new(value.text.trim().to_string(), span);
                match key {
                    ExerciseField::Goal => exercise.goal = Some(located),
                    ExerciseField::Rest => {
                        if exercise.goal.is_some() {
                            exercise.goal_rest = Some(located);
                        } else {
                            debug!(line = line.number, "rest without a goal, ignoring");
                        }
                    }
                    ExerciseField::Muscles => exercise.target_muscles = Some(located),
                    ExerciseField::Tempo => exercise.tempo = Some(located),
                }
                Ok(Block::None)
            }
            LineKind::BlockOpen(opened, inline) => {
                let exercise = self.open_exercise(line, block_keyword(opened))?;
                if !inline.text.trim().is_empty() {
                    push_block_line(exercise, opened, inline.text);
                }
                Ok(opened)
            }
            LineKind::WarmupSet { number, body } => {
                let number = self.number(line, &number, "warmup set number")?;
                let span = line.span_of(&body);
                let (ctx, max_sets) = (self.ctx, self.limits.max_sets_per_exercise);
                let exercise = self.open_exercise(line, "warmup set")?;
                exercise
                    .warmup_sets
                    .push(decode_warmup_set(number, body.text, &span, ctx)?);
                check_set_limit(exercise, max_sets)?;
                Ok(Block::None)
            }
            LineKind::WorkingSet { number, body } => {
                let number = self.number(line, &number, "set number")?;
                let span = line.span_of(&body);
                let (ctx, max_sets) = (self.ctx, self.limits.max_sets_per_exercise);
                let exercise = self.open_exercise(line, "working set")?;
                exercise
                    .working_sets
                    .push(decode_working_set(number, body.text, &span, ctx)?);
                check_set_limit(exercise, max_sets)?;
                Ok(Block::None)
            }
        }
    }

    fn open_exercise(&mut self, line: &SourceLine<'_>, what: &str) -> LogResult<&mut RawExercise> {
        let ctx = self.ctx;
        self.current.as_mut().ok_or_else(|| {
            ctx.lexical(
                format!(
                    "{} on line {} appears before any exercise header",
                    what, line.number
                ),
                line.span(),
            )
        })
    }

    fn number(&self, line: &SourceLine<'_>, field: &Field<'_>, what: &str) -> LogResult<u32> {
        field.text.parse::<u32>().map_err(|_| {
            self.ctx.syntax(
                format!("{} '{}' is out of range", what, field.text),
                line.span_of(field),
            )
        })
    }

    fn close_exercise(&mut self) {
        if let Some(exercise) = self.current.take() {
            trace!(
                number = exercise.number,
                name = %exercise.name,
                sets = exercise.set_count(),
                "closing exercise"
            );
            self.session.exercises.push(exercise);
        }
    }

    fn finish(mut self) -> RawSession {
        self.close_exercise();
        debug!(
            source = %self.ctx.source_id,
            fields = self.session.fields.len(),
            exercises = self.session.exercises.len(),
            "extracted session record"
        );
        self.session
    }
}

fn push_block_line(exercise: &mut RawExercise, block: Block, text: &str) {
    let text = text.trim();
    match block {
        Block::None => {}
        Block::WarmupNotes => exercise.warmup_notes.push(text.to_string()),
        Block::ExerciseNotes => exercise.notes.push(text.to_string()),
        Block::Cues => {
            let cue = text
                .strip_prefix('-')
                .or_else(|| text.strip_prefix('*'))
                .unwrap_or(text)
                .trim();
            if !cue.is_empty() {
                exercise.form_cues.push(cue.to_string());
            }
        }
    }
}

fn check_set_limit(exercise: &RawExercise, max_sets: usize) -> LogResult<()> {
    if exercise.set_count() > max_sets {
        return Err(LogError::ResourceLimitExceeded {
            limit_name: "max_sets_per_exercise".to_string(),
            limit_value: max_sets.to_string(),
            actual_value: exercise.set_count().to_string(),
        });
    }
    Ok(())
}

fn exercise_keyword(key: ExerciseField) -> &'static str {
    match key {
        ExerciseField::Goal => "goal",
        ExerciseField::Rest => "rest",
        ExerciseField::Muscles => "muscles",
        ExerciseField::Tempo => "tempo",
    }
}

fn block_keyword(block: Block) -> &'static str {
    match block {
        Block::None => "block",
        Block::WarmupNotes => "warmup notes",
        Block::ExerciseNotes => "exercise notes",
        Block::Cues => "cues",
    }
}
