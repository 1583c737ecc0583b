use super::fixtures::{ctx, log, BENCH_LOG};
use crate::error::LogError;
use crate::parser::{classify, extract, Block, LineKind};
use crate::record::{RawSession, SessionField};
use crate::resource_limits::ResourceLimits;

fn extract_ok(text: &str) -> RawSession {
    extract(text, &ResourceLimits::default(), &ctx(text))
        .unwrap()
        .expect("markers present")
}

fn extract_err(text: &str) -> LogError {
    extract(text, &ResourceLimits::default(), &ctx(text)).unwrap_err()
}

#[test]
fn test_missing_markers_yield_no_record() {
    let limits = ResourceLimits::default();
    for text in [
        "",
        "Date: 2025-10-18\nEx1: Bench\n",
        "BEGIN:\nDate: 2025-10-18\n",
        "Date: 2025-10-18\nEND\n",
        "END\nBEGIN\n",
    ] {
        let result = extract(text, &limits, &ctx(text)).unwrap();
        assert!(result.is_none(), "expected no record for {:?}", text);
    }
}

#[test]
fn test_markers_are_case_insensitive_whole_lines() {
    let text = "begin\nFocus: Legs\nEx1: Pendlay Row\nS1: 60x8\nEnd:\n";
    let raw = extract_ok(text);
    assert_eq!(raw.exercises.len(), 1);
    assert_eq!(raw.exercises[0].name, "Pendlay Row");
    assert_eq!(raw.exercises[0].working_sets.len(), 1);
}

#[test]
fn test_line_numbers_are_absolute() {
    let raw = extract_ok(BENCH_LOG);
    assert_eq!(raw.span.line, 2);
    assert_eq!(raw.field(SessionField::Date).unwrap().line(), 3);
    assert_eq!(raw.field(SessionField::Duration).unwrap().line(), 8);

    let bench = &raw.exercises[0];
    assert_eq!(bench.span.line, 10);
    assert_eq!(bench.goal.as_ref().unwrap().line(), 11);
    assert_eq!(bench.warmup_sets[0].span.line, 13);
    assert_eq!(bench.working_sets[1].span.line, 15);
}

#[test]
fn test_session_fields_are_raw_and_later_values_win() {
    let text = "BEGIN\nWeek: 2\nSession Duration: 60\nweek: 4\nDeload Week: YES\nEND";
    let raw = extract_ok(text);
    assert_eq!(raw.field(SessionField::Week).unwrap().value, "4");
    assert_eq!(raw.field(SessionField::Week).unwrap().line(), 4);
    assert_eq!(raw.field(SessionField::Duration).unwrap().value, "60");
    assert_eq!(raw.field(SessionField::Deload).unwrap().value, "YES");
}

#[test]
fn test_supplemental_session_keywords() {
    let text = "BEGIN\nProgram: PPL\nProgram Author: Someone\nProgram Length Weeks: 8\nUser: 42\nUser Name: sam\nEND";
    let raw = extract_ok(text);
    assert_eq!(raw.field(SessionField::Program).unwrap().value, "PPL");
    assert_eq!(raw.field(SessionField::ProgramAuthor).unwrap().value, "Someone");
    assert_eq!(raw.field(SessionField::ProgramLengthWeeks).unwrap().value, "8");
    assert_eq!(raw.field(SessionField::UserId).unwrap().value, "42");
    assert_eq!(raw.field(SessionField::UserName).unwrap().value, "sam");
}

#[test]
fn test_exercise_headers_close_previous_exercise() {
    let raw = extract_ok(&log(
        "Ex1: Squat\nS1: 100x5\nExercise 2: Leg Press\nS1: 200x10\nS2: 200x9\nex3: Calf Raise\n",
    ));
    let names: Vec<_> = raw.exercises.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Squat", "Leg Press", "Calf Raise"]);
    let numbers: Vec<_> = raw.exercises.iter().map(|e| e.number).collect();
    assert_eq!(numbers, [1, 2, 3]);
    assert_eq!(raw.exercises[1].working_sets.len(), 2);
    assert!(raw.exercises[2].working_sets.is_empty());
}

#[test]
fn test_rest_merges_only_into_existing_goal() {
    let raw = extract_ok(&log(
        "Ex1: Squat\nRest: 2 min\nEx2: Row\nGoal: 50kg x 3 sets x 8-10 reps\nRest: 2 min\n",
    ));
    assert!(raw.exercises[0].goal.is_none());
    assert!(raw.exercises[0].goal_rest.is_none());
    assert_eq!(raw.exercises[1].goal_rest.as_ref().unwrap().value, "2 min");
}

#[test]
fn test_note_blocks_collect_until_next_keyword() {
    let raw = extract_ok(&log("\
Ex1: Bench Press
WarmupNotes: shoulders
felt tight

ExerciseNotes:
bar speed good
last set grindy
Cues:
- elbows tucked
* leg drive
  chest up
S1: 60x6
this line is outside any block
"));
    let bench = &raw.exercises[0];
    assert_eq!(bench.warmup_notes, ["shoulders", "felt tight"]);
    assert_eq!(bench.notes, ["bar speed good", "last set grindy"]);
    assert_eq!(bench.form_cues, ["elbows tucked", "leg drive", "chest up"]);
    assert_eq!(bench.working_sets.len(), 1);
}

#[test]
fn test_notes_alias_and_inline_cues() {
    let raw = extract_ok(&log("Ex1: Row\nNotes: strict form\nFormCues: - squeeze\n"));
    assert_eq!(raw.exercises[0].notes, ["strict form"]);
    assert_eq!(raw.exercises[0].form_cues, ["squeeze"]);
}

#[test]
fn test_muscles_and_tempo_are_kept_raw() {
    let raw = extract_ok(&log("Ex1: Row\nTarget Muscles: lats, rear delts\nTempo: 2-0-1-1\n"));
    let row = &raw.exercises[0];
    assert_eq!(row.target_muscles.as_ref().unwrap().value, "lats, rear delts");
    assert_eq!(row.tempo.as_ref().unwrap().value, "2-0-1-1");
}

#[test]
fn test_set_before_exercise_is_lexical_error() {
    let text = "BEGIN\nDate: 2025-10-18\nS1: 60x6 RPE8\nEx1: Bench Press\nEND\n";
    let err = extract_err(text);
    assert!(err.is_lexical(), "expected lexical error, got {}", err);
    assert_eq!(err.line(), Some(3));
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn test_exercise_level_lines_before_exercise_are_lexical_errors() {
    for line in [
        "W1: 20x8",
        "Goal: 60kg x 3 sets x 6-8 reps",
        "Rest: 3 min",
        "Tempo: 3-1-1",
        "Muscles: chest",
        "Cues: brace",
        "WarmupNotes: easy",
    ] {
        let text = format!("BEGIN\n{}\nEND\n", line);
        let err = extract_err(&text);
        assert!(err.is_lexical(), "expected lexical error for {:?}", line);
        assert_eq!(err.line(), Some(2));
    }
}

#[test]
fn test_unrecognized_lines_are_ignored() {
    let raw = extract_ok(&log("Great session today!\nEx1: Row\nfelt strong: yes\nS1: 50x10\n"));
    assert_eq!(raw.exercises.len(), 1);
    assert_eq!(raw.exercises[0].working_sets.len(), 1);
    assert!(raw.exercises[0].notes.is_empty());
}

#[test]
fn test_input_size_limit() {
    let limits = ResourceLimits {
        max_input_bytes: 16,
        ..ResourceLimits::default()
    };
    let text = log("Ex1: Row\n");
    let err = extract(&text, &limits, &ctx(&text)).unwrap_err();
    assert!(matches!(
        err,
        LogError::ResourceLimitExceeded { ref limit_name, .. } if limit_name == "max_input_bytes"
    ));
}

#[test]
fn test_exercise_and_set_limits() {
    let limits = ResourceLimits {
        max_exercises: 2,
        max_sets_per_exercise: 2,
        ..ResourceLimits::default()
    };

    let text = log("Ex1: A\nEx2: B\nEx3: C\n");
    let err = extract(&text, &limits, &ctx(&text)).unwrap_err();
    assert!(matches!(
        err,
        LogError::ResourceLimitExceeded { ref limit_name, .. } if limit_name == "max_exercises"
    ));

    let text = log("Ex1: A\nW1: 20x8\nS1: 40x8\nS2: 40x8\n");
    let err = extract(&text, &limits, &ctx(&text)).unwrap_err();
    assert!(matches!(
        err,
        LogError::ResourceLimitExceeded { ref limit_name, .. } if limit_name == "max_sets_per_exercise"
    ));
}

#[test]
fn test_classify_line_kinds() {
    assert_eq!(classify("   ").unwrap(), LineKind::Blank);
    assert!(matches!(
        classify("Ex12: Incline DB Press").unwrap(),
        LineKind::ExerciseHeader { number, name } if number.text == "12" && name.text == "Incline DB Press"
    ));
    assert!(matches!(
        classify("WarmupSet2: 40 x 5").unwrap(),
        LineKind::WarmupSet { number, .. } if number.text == "2"
    ));
    assert!(matches!(
        classify("Set 3: 60x6").unwrap(),
        LineKind::WorkingSet { number, body } if number.text == "3" && body.text.trim() == "60x6"
    ));
    assert!(matches!(
        classify("session duration: 70").unwrap(),
        LineKind::Session(SessionField::Duration, value) if value.text.trim() == "70"
    ));
    assert!(matches!(
        classify("cues:").unwrap(),
        LineKind::BlockOpen(Block::Cues, _)
    ));
    assert!(matches!(classify("Setup was slow").unwrap(), LineKind::Text(_)));
    assert!(matches!(classify("Keep going: always").unwrap(), LineKind::Text(_)));
}
