//! Render a session back into log text
//!
//! The output uses one spelling per keyword and ends every set line with its
//! notes, so parsing the rendered text yields the same session.

use crate::model::{Exercise, FailureTechnique, TrainingSession, WarmupSet, WorkingSet};

pub fn render(session: &TrainingSession) -> String {
    let mut out = String::from("BEGIN:\n");
    out.push_str(&format!("Date: {}\n", session.date().format("%Y-%m-%d")));
    out.push_str(&format!("User: {}\n", session.user_id()));
    out.push_str(&format!("User Name: {}\n", session.user_name()));
    out.push_str(&format!("Program: {}\n", session.program()));
    out.push_str(&format!("Program Author: {}\n", session.program_author()));
    out.push_str(&format!("Program Length: {}\n", session.program_length_weeks()));
    out.push_str(&format!("Phase: {}\n", session.phase()));
    out.push_str(&format!("Week: {}\n", session.week()));
    let deload = if session.is_deload_week() { "yes" } else { "no" };
    out.push_str(&format!("Deload: {}\n", deload));
    out.push_str(&format!("Focus: {}\n", session.focus()));
    out.push_str(&format!("Duration: {} min\n", session.duration_minutes()));

    for exercise in session.exercises() {
        out.push('\n');
        out.push_str(&render_exercise(exercise));
    }
    out.push_str("END\n");
    out
}

fn render_exercise(exercise: &Exercise) -> String {
    let mut out = format!("Ex{}: {}\n", exercise.number(), exercise.name());
    if !exercise.target_muscles().is_empty() {
        out.push_str(&format!("Muscles: {}\n", exercise.target_muscles().join(", ")));
    }
    if let Some(tempo) = exercise.tempo() {
        out.push_str(&format!("Tempo: {}\n", tempo));
    }
    if let Some(goal) = exercise.goal() {
        out.push_str(&format!(
            "Goal: {}kg x {} sets x {}-{} reps\n",
            goal.weight(),
            goal.sets(),
            goal.rep_range().min(),
            goal.rep_range().max()
        ));
        if let Some(rest) = goal.rest_minutes() {
            out.push_str(&format!("Rest: {} min\n", rest));
        }
    }
    for set in exercise.warmup_sets() {
        out.push_str(&render_warmup_set(set));
    }
    for set in exercise.working_sets() {
        out.push_str(&render_working_set(set));
    }
    if let Some(notes) = exercise.warmup_notes() {
        out.push_str(&format!("WarmupNotes: {}\n", notes));
    }
    if let Some(notes) = exercise.notes() {
        out.push_str(&format!("ExerciseNotes: {}\n", notes));
    }
    if !exercise.form_cues().is_empty() {
        out.push_str("Cues:\n");
        for cue in exercise.form_cues() {
            out.push_str(&format!("- {}\n", cue));
        }
    }
    out
}

fn render_warmup_set(set: &WarmupSet) -> String {
    let mut out = format!("W{}: {}x", set.number(), set.weight());
    match set.reps() {
        Some(reps) => out.push_str(&reps.to_string()),
        None => out.push_str("feel"),
    }
    if let Some(notes) = set.notes() {
        out.push_str(&format!(" - {}", notes));
    }
    out.push('\n');
    out
}

fn render_working_set(set: &WorkingSet) -> String {
    let mut out = format!("S{}: {}x{}", set.number(), set.weight(), set.rep_count());
    if let Some(rpe) = set.rpe() {
        out.push_str(&format!(" RPE {}", rpe));
    }
    if let Some(quality) = set.quality() {
        out.push_str(&format!(" {}", quality));
    }
    if let Some(rest) = set.actual_rest_minutes() {
        out.push_str(&format!(" rest {} min", rest));
    }
    if let Some(technique) = set.technique() {
        out.push_str(&format!(" failure:{}", technique_call(technique)));
    }
    // Notes go last: the decoder treats everything after the dash as notes
    if let Some(notes) = set.notes() {
        out.push_str(&format!(" - {}", notes));
    }
    out.push('\n');
    out
}

/// `myo(3, 2+1)` style call for a technique
pub fn technique_call(technique: &FailureTechnique) -> String {
    let name = technique.kind().call_name();
    let args = match technique {
        FailureTechnique::MyoReps(myo) => myo
            .mini_sets()
            .iter()
            .map(|rc| rc.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        FailureTechnique::Llp(llp) => llp.partial_reps().to_string(),
        FailureTechnique::StaticHold(hold) => format!("{} sec", hold.seconds()),
        FailureTechnique::DropSet(drop) => drop
            .drops()
            .iter()
            .map(|d| format!("{}kg x {}", d.weight(), d.rep_count()))
            .collect::<Vec<_>>()
            .join(", "),
    };
    format!("{}({})", name, args)
}
