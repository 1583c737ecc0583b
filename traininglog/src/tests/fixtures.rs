use crate::error::SourceContext;

/// Session header with every required field, ready for exercise lines
pub(crate) const HEADER: &str = "\
Date: 2025-10-18
Phase: 1
Week: 3
Focus: Upper
Duration: 75 min
";

/// Wrap exercise lines into a complete log with markers and header
pub(crate) fn log(body: &str) -> String {
    format!("BEGIN:\n{}{}END\n", HEADER, body)
}

pub(crate) fn ctx(text: &str) -> SourceContext {
    SourceContext::new("test.log", text)
}

pub(crate) const BENCH_LOG: &str = "\
notes written before the block are ignored
BEGIN:
Date: 2025-10-18
Phase: 1
Week: 3
Deload: no
Focus: Upper
Duration: 75 min

Ex1: Bench Press
Goal: 60kg x 3 sets x 6-8 reps
Rest: 3 min
W1: 20x8
S1: 60x6 RPE8 good
S2: 60x6 RPE10 perfect failure:myo(3,2+1)
END
";
