use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use traininglog::serializers::technique_call;
use traininglog::{Exercise, TrainingSession};

/// Result of checking one file
pub enum CheckOutcome {
    Valid(Box<TrainingSession>),
    NoSession,
    Invalid(String),
}

pub struct CheckRow {
    pub file: String,
    pub outcome: CheckOutcome,
}

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_check_summary(&self, rows: &[CheckRow]) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("File").set_alignment(CellAlignment::Left),
            Cell::new("Status").set_alignment(CellAlignment::Left),
            Cell::new("Date"),
            Cell::new("Focus"),
            Cell::new("Exercises").set_alignment(CellAlignment::Right),
            Cell::new("Sets").set_alignment(CellAlignment::Right),
        ]));

        let mut valid = 0;
        for row in rows {
            let cells: Vec<String> = match &row.outcome {
                CheckOutcome::Valid(session) => {
                    valid += 1;
                    vec![
                        row.file.clone(),
                        "ok".to_string(),
                        session.date().to_string(),
                        session.focus().to_string(),
                        session.exercises().len().to_string(),
                        session.working_set_count().to_string(),
                    ]
                }
                CheckOutcome::NoSession => vec![
                    row.file.clone(),
                    "skipped: no BEGIN/END block".to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                ],
                CheckOutcome::Invalid(message) => vec![
                    row.file.clone(),
                    format!("error: {}", message),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                ],
            };
            table.add_row(Row::from(cells));
        }

        format!(
            "{}\n{} of {} file(s) valid\n",
            table,
            valid,
            rows.len()
        )
    }

    pub fn format_session(&self, session: &TrainingSession) -> String {
        let mut output = String::new();
        output.push_str(&self.format_session_header(session));
        output.push('\n');

        for exercise in session.exercises() {
            output.push_str(&self.format_exercise(exercise));
            output.push('\n');
        }

        output
    }

    fn format_session_header(&self, session: &TrainingSession) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Session").set_alignment(CellAlignment::Left),
            Cell::new(session.session_id()).set_alignment(CellAlignment::Left),
        ]));

        let deload = if session.is_deload_week() { "yes" } else { "no" };
        let rows = [
            ("Date", session.date().to_string()),
            ("User", format!("{} ({})", session.user_name(), session.user_id())),
            (
                "Program",
                format!("{} by {}", session.program(), session.program_author()),
            ),
            (
                "Phase / Week",
                format!(
                    "{} / {} of {}",
                    session.phase(),
                    session.week(),
                    session.program_length_weeks()
                ),
            ),
            ("Deload", deload.to_string()),
            ("Focus", session.focus().to_string()),
            ("Duration", format!("{} min", session.duration_minutes())),
        ];
        for (name, value) in rows {
            table.add_row(Row::from(vec![name.to_string(), value]));
        }

        table.to_string()
    }

    fn format_exercise(&self, exercise: &Exercise) -> String {
        let mut title = format!("Ex{}: {}", exercise.number(), exercise.name());
        if let Some(goal) = exercise.goal() {
            title.push_str(&format!(
                "  (goal {}kg x {} sets x {}-{} reps",
                goal.weight(),
                goal.sets(),
                goal.rep_range().min(),
                goal.rep_range().max()
            ));
            if let Some(rest) = goal.rest_minutes() {
                title.push_str(&format!(", rest {} min", rest));
            }
            title.push(')');
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            "Set", "Weight", "Reps", "RPE", "Quality", "Rest", "Technique", "Notes",
        ]));

        for set in exercise.warmup_sets() {
            table.add_row(Row::from(vec![
                format!("W{}", set.number()),
                format!("{}kg", set.weight()),
                set.reps()
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "feel".to_string()),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                set.notes().unwrap_or_default().to_string(),
            ]));
        }
        for set in exercise.working_sets() {
            table.add_row(Row::from(vec![
                format!("S{}", set.number()),
                format!("{}kg", set.weight()),
                set.rep_count().to_string(),
                set.rpe().map(|r| r.to_string()).unwrap_or_default(),
                set.quality().map(|q| q.to_string()).unwrap_or_default(),
                set.actual_rest_minutes()
                    .map(|m| format!("{} min", m))
                    .unwrap_or_default(),
                set.technique().map(technique_call).unwrap_or_default(),
                set.notes().unwrap_or_default().to_string(),
            ]));
        }

        let mut output = format!("{}\n", title);
        if !exercise.target_muscles().is_empty() {
            output.push_str(&format!("Muscles: {}\n", exercise.target_muscles().join(", ")));
        }
        if let Some(tempo) = exercise.tempo() {
            output.push_str(&format!("Tempo: {}\n", tempo));
        }
        output.push_str(&table.to_string());
        output.push('\n');

        for (label, text) in [
            ("Warmup notes", exercise.warmup_notes()),
            ("Notes", exercise.notes()),
        ] {
            if let Some(text) = text {
                output.push_str(&format!("{}: {}\n", label, text));
            }
        }
        for cue in exercise.form_cues() {
            output.push_str(&format!("  - {}\n", cue));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
BEGIN
Date: 2025-10-18
Phase: 1
Week: 3
Focus: Upper
Duration: 75
Ex1: Bench Press
Goal: 60kg x 3 sets x 6-8 reps
Rest: 3 min
W1: 20x feel
S1: 60x6 RPE 8 good
S2: 60x6 RPE 10 failure:llp(4) - strong
Cues:
- tuck elbows
END
";

    fn session() -> TrainingSession {
        traininglog::parse(LOG).unwrap().unwrap()
    }

    #[test]
    fn test_format_session_lists_sets() {
        let output = Formatter::default().format_session(&session());
        assert!(output.contains("2025-10-18_upper_1"));
        assert!(output.contains("Ex1: Bench Press  (goal 60kg x 3 sets x 6-8 reps, rest 3 min)"));
        assert!(output.contains("feel"));
        assert!(output.contains("llp(4)"));
        assert!(output.contains("strong"));
        assert!(output.contains("  - tuck elbows"));
    }

    #[test]
    fn test_format_check_summary_counts_valid_files() {
        let rows = vec![
            CheckRow {
                file: "a.log".to_string(),
                outcome: CheckOutcome::Valid(Box::new(session())),
            },
            CheckRow {
                file: "b.log".to_string(),
                outcome: CheckOutcome::NoSession,
            },
            CheckRow {
                file: "c.log".to_string(),
                outcome: CheckOutcome::Invalid("bad week".to_string()),
            },
        ];
        let output = Formatter::default().format_check_summary(&rows);
        assert!(output.contains("a.log"));
        assert!(output.contains("skipped"));
        assert!(output.contains("error: bad week"));
        assert!(output.ends_with("1 of 3 file(s) valid\n"));
    }
}
