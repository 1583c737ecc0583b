use traininglog::{parse, serializers, Engine, SessionDefaults};

const LEG_DAY: &str = "\
begin
date: 2025-11-03
phase: 3
week: 9
deload: Y
focus: Lower  Body
duration: 65
ex1: Back Squat
muscles: quads,glutes
goal: 100kg x 3 sets x 5-6 reps
rest: 4
warmup set 1: 20 x 10
warmupset2: 60x5-felt easy
set 1: 100 x 6 rpe:8 Good
set 2: 100x5+1 RPE 9.5 bad
set 3: 100x5 rpe 10 failure:LLP(6)
cues:
* knees out
notes:
depth was consistent
ex2: Leg Curl
s1: 45x12 rpe 10 failure:drop-set(35kg x 8, 25 x 6+2)
end:
";

#[test]
fn test_rendered_text_snapshot() {
    let engine = Engine::new().with_defaults(
        SessionDefaults::new()
            .with_user("7", "Alex")
            .with_program("Strength Block", "Self", 12),
    );
    let session = engine.parse_session(LEG_DAY, "legs.log").unwrap().unwrap();
    insta::assert_snapshot!(serializers::render(&session).trim_end(), @r"
BEGIN:
Date: 2025-11-03
User: 7
User Name: Alex
Program: Strength Block
Program Author: Self
Program Length: 12
Phase: 3
Week: 9
Deload: yes
Focus: Lower  Body
Duration: 65 min

Ex1: Back Squat
Muscles: quads, glutes
Goal: 100kg x 3 sets x 5-6 reps
Rest: 4 min
W1: 20x10
W2: 60x5 - felt easy
S1: 100x6 RPE 8 good
S2: 100x5+1 RPE 9.5 bad
S3: 100x5 RPE 10 failure:llp(6)
ExerciseNotes: depth was consistent
Cues:
- knees out

Ex2: Leg Curl
S1: 45x12 RPE 10 failure:dropset(35kg x 8, 25kg x 6+2)
END
");
}

#[test]
fn test_rendered_text_parses_to_same_session() {
    let original = parse(LEG_DAY).unwrap().unwrap();
    let rendered = serializers::render(&original);
    let reparsed = parse(&rendered).unwrap().unwrap();
    assert_eq!(reparsed, original);
    assert_eq!(reparsed.session_id(), "2025-11-03_lower-body_1");
}

#[test]
fn test_canonical_json_round_trip() {
    let original = parse(LEG_DAY).unwrap().unwrap();
    let json = serializers::to_json_compact(&original).unwrap();
    assert_eq!(serializers::from_json_str(&json).unwrap(), original);

    let value = serializers::to_canonical(&original).unwrap();
    assert_eq!(serializers::from_canonical(value).unwrap(), original);
}
