use super::fixtures::{log, BENCH_LOG};
use crate::model::TrainingSession;
use crate::parse;
use crate::serializers::{
    from_canonical, from_json_str, render, technique_call, to_canonical, to_json_compact,
    to_json_string,
};
use crate::LogError;
use serde_json::{json, Value};

fn session(text: &str) -> TrainingSession {
    parse(text).unwrap().expect("markers present")
}

fn technique_of(text: &str) -> Value {
    let value = to_canonical(&session(text)).unwrap();
    value["exercises"][0]["working_sets"][0]["failure_technique"].clone()
}

const DETAILED_BODY: &str = "\
Ex1: Lat Pulldown
Muscles: lats, biceps
Tempo: 3-0-1
Goal: 62.5kg x 4 sets x 8-10 reps
Rest: 2 min
W1: 30x feel - light
W2: 45x5
S1: 62.5x10 RPE 8.5 good rest 2 min - smooth
S2: 62.5x8+2 RPE 10 learning failure:dropset(40kg x 8, 30 x 6+2) - grip gave out
ExerciseNotes: slow eccentric
WarmupNotes: band pull-aparts
Cues:
- chest up
- elbows down
Ex2: Dips
Goal: 0kg x 3 sets x 10-12 reps
S1: 0x12 RPE 10 failure:static(20s)
S2: 0x9 RPE 10 failure:llp(5)
";

#[test]
fn test_canonical_session_keys() {
    let value = to_canonical(&session(BENCH_LOG)).unwrap();
    assert_eq!(value["data_model_version"], "0.0.1");
    assert_eq!(value["data_model_type"], "TrainingSession");
    assert_eq!(value["_id"], "2025-10-18_upper_1");
    assert_eq!(value["date"], "2025-10-18");
    assert_eq!(value["program_length_weeks"], 12);
    assert_eq!(value["week"], 3);
    assert_eq!(value["is_deload_week"], false);
    assert_eq!(value["session_duration_minutes"], 75);

    let bench = &value["exercises"][0];
    assert_eq!(bench["number"], 1);
    assert_eq!(bench["current_goal"]["weight_kg"].as_f64(), Some(60.0));
    assert_eq!(bench["current_goal"]["rep_range"], json!({"min": 6, "max": 8}));
    assert_eq!(bench["current_goal"]["rest_minutes"], 3);
    assert_eq!(bench["warmup_sets"][0]["rep_count"], 8);
    assert_eq!(bench["working_sets"][0]["rep_count"], json!({"full": 6, "partial": 0}));
    assert_eq!(bench["working_sets"][0]["rpe"].as_f64(), Some(8.0));
    assert_eq!(bench["working_sets"][0]["rep_quality"], "good");
}

#[test]
fn test_absent_values_are_omitted() {
    let value = to_canonical(&session(BENCH_LOG)).unwrap();
    let bench = value["exercises"][0].as_object().unwrap();
    for key in ["target_muscle_groups", "rep_tempo", "notes", "warmup_notes", "form_cues"] {
        assert!(!bench.contains_key(key), "unexpected key {}", key);
    }
    let first_set = bench["working_sets"][0].as_object().unwrap();
    for key in ["notes", "failure_technique", "actual_rest_minutes"] {
        assert!(!first_set.contains_key(key), "unexpected key {}", key);
    }
    let warmup = bench["warmup_sets"][0].as_object().unwrap();
    assert!(!warmup.contains_key("notes"));

    let empty = to_canonical(&session(&log(""))).unwrap();
    assert!(empty.get("exercises").is_none());
}

#[test]
fn test_technique_type_and_details() {
    let myo = technique_of(&log("Ex1: Bench\nS1: 60x6 RPE 10 failure:myo(3,2+1)\n"));
    assert_eq!(myo["type"], "MyoReps");
    assert_eq!(
        myo["details"]["mini_sets"],
        json!([
            {"number": 1, "rep_count": {"full": 3, "partial": 0}},
            {"number": 2, "rep_count": {"full": 2, "partial": 1}}
        ])
    );

    let llp = technique_of(&log("Ex1: Bench\nS1: 60x6 RPE 10 failure:llp(4)\n"));
    assert_eq!(llp, json!({"type": "LLP", "details": {"partial_rep_count": 4}}));

    let hold = technique_of(&log("Ex1: Bench\nS1: 60x6 RPE 10 failure:static(20 sec)\n"));
    assert_eq!(
        hold,
        json!({"type": "StaticHold", "details": {"hold_duration_seconds": 20}})
    );

    let drop = technique_of(&log("Ex1: Bench\nS1: 60x6 RPE 10 failure:dropset(40kg x 8, 30 x 6+2)\n"));
    assert_eq!(drop["type"], "DropSet");
    let drops = drop["details"]["drop_sets"].as_array().unwrap();
    assert_eq!(drops.len(), 2);
    assert_eq!(drops[1]["number"], 2);
    assert_eq!(drops[1]["weight_kg"].as_f64(), Some(30.0));
    assert_eq!(drops[1]["rep_count"], json!({"full": 6, "partial": 2}));
}

#[test]
fn test_canonical_round_trip() {
    let original = session(&log(DETAILED_BODY));
    let restored = from_canonical(to_canonical(&original).unwrap()).unwrap();
    assert_eq!(restored, original);

    let restored = from_json_str(&to_json_string(&original).unwrap()).unwrap();
    assert_eq!(restored, original);

    let compact = to_json_compact(&original).unwrap();
    assert!(!compact.contains('\n'));
    assert_eq!(from_json_str(&compact).unwrap(), original);
}

#[test]
fn test_loading_rejects_broken_rules() {
    let mut value = to_canonical(&session(BENCH_LOG)).unwrap();
    value["exercises"][0]["working_sets"][1]["rpe"] = json!(9.0);
    let err = from_canonical(value).unwrap_err();
    assert_eq!(err.field(), Some("failure_technique"));

    let mut value = to_canonical(&session(BENCH_LOG)).unwrap();
    value["phase"] = json!(-1);
    let err = from_canonical(value).unwrap_err();
    assert_eq!(err.field(), Some("phase"));
    assert!(err.to_string().contains("cannot be negative"));

    let mut value = to_canonical(&session(BENCH_LOG)).unwrap();
    value["week"] = json!(40);
    assert_eq!(from_canonical(value).unwrap_err().field(), Some("week"));

    let mut value = to_canonical(&session(BENCH_LOG)).unwrap();
    value["exercises"][0]["working_sets"][0]["rep_quality"] = json!("okay");
    assert_eq!(from_canonical(value).unwrap_err().field(), Some("rep_quality"));
}

#[test]
fn test_loading_rejects_malformed_documents() {
    assert!(matches!(from_json_str("{"), Err(LogError::Canonical(_))));
    assert!(matches!(
        from_json_str(r#"{"data_model_version": "0.0.1"}"#),
        Err(LogError::Canonical(_))
    ));

    let mut value = to_canonical(&session(BENCH_LOG)).unwrap();
    value["exercises"][0]["working_sets"][1]["failure_technique"] =
        json!({"type": "Superset", "details": {}});
    assert!(matches!(from_canonical(value), Err(LogError::Canonical(_))));
}

#[test]
fn test_loaded_session_keeps_custom_id() {
    let mut value = to_canonical(&session(BENCH_LOG)).unwrap();
    value["_id"] = json!("imported-42");
    let restored = from_canonical(value).unwrap();
    assert_eq!(restored.session_id(), "imported-42");
}

#[test]
fn test_technique_call_text() {
    let original = session(&log(DETAILED_BODY));
    let sets = original.exercises()[0].working_sets();
    assert_eq!(
        technique_call(sets[1].technique().unwrap()),
        "dropset(40kg x 8, 30kg x 6+2)"
    );
    let dips = original.exercises()[1].working_sets();
    assert_eq!(technique_call(dips[0].technique().unwrap()), "static(20 sec)");
    assert_eq!(technique_call(dips[1].technique().unwrap()), "llp(5)");
}

#[test]
fn test_render_uses_one_spelling_per_keyword() {
    let text = render(&session(BENCH_LOG));
    assert!(text.starts_with("BEGIN:\nDate: 2025-10-18\n"));
    assert!(text.contains("Deload: no\n"));
    assert!(text.contains("Duration: 75 min\n"));
    assert!(text.contains("Goal: 60kg x 3 sets x 6-8 reps\nRest: 3 min\n"));
    assert!(text.contains("W1: 20x8\n"));
    assert!(text.contains("S2: 60x6 RPE 10 perfect failure:myo(3, 2+1)\n"));
    assert!(text.ends_with("END\n"));
}

#[test]
fn test_render_round_trip() {
    for text in [BENCH_LOG.to_string(), log(DETAILED_BODY), log("Deload: yes\n")] {
        let original = session(&text);
        let rendered = render(&original);
        let reparsed = session(&rendered);
        assert_eq!(reparsed, original, "rendered text:\n{}", rendered);
    }
}

#[test]
fn test_render_keeps_set_notes_that_mention_techniques() {
    let original = session(&log(
        "Ex1: Bench\nS1: 60 x 6 + 1 RPE 10 failure:llp(4) - try failure:myo(3) next, good RPE 9\n",
    ));
    let rendered = render(&original);
    assert!(rendered.contains(
        "S1: 60x6+1 RPE 10 failure:llp(4) - try failure:myo(3) next, good RPE 9\n"
    ));
    assert!(rendered.ends_with("END\n"));
    assert_eq!(session(&rendered), original);
}
