use crate::error::LogError;
use crate::model::technique::FailureTechnique;
use crate::model::values::{RepCount, RepQuality, RepRange, Rpe};
use crate::validator;
use crate::LogResult;
use rust_decimal::Decimal;

/// Planned target for an exercise
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Goal {
    weight: Decimal,
    sets: u32,
    rep_range: RepRange,
    rest_minutes: Option<u32>,
}

impl Goal {
    pub fn new(
        weight: Decimal,
        sets: u32,
        rep_range: RepRange,
        rest_minutes: Option<u32>,
    ) -> LogResult<Self> {
        Ok(Self {
            weight: validator::require_weight("current_goal.weight_kg", weight)?,
            sets: validator::require_positive("current_goal.sets", sets)?,
            rep_range,
            rest_minutes: rest_minutes
                .map(|m| validator::require_rest_minutes("current_goal.rest_minutes", m))
                .transpose()?,
        })
    }

    pub fn weight(&self) -> Decimal {
        self.weight
    }

    pub fn sets(&self) -> u32 {
        self.sets
    }

    pub fn rep_range(&self) -> RepRange {
        self.rep_range
    }

    pub fn rest_minutes(&self) -> Option<u32> {
        self.rest_minutes
    }
}

/// Preparatory set; a missing rep count means "by feel"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WarmupSet {
    number: u32,
    weight: Decimal,
    reps: Option<u32>,
    notes: Option<String>,
}

impl WarmupSet {
    pub fn new(
        number: u32,
        weight: Decimal,
        reps: Option<u32>,
        notes: Option<String>,
    ) -> LogResult<Self> {
        Ok(Self {
            number: validator::require_positive("warmup_sets.set", number)?,
            weight: validator::require_weight("warmup_sets.weight_kg", weight)?,
            reps,
            notes: validator::optional_text(notes),
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn weight(&self) -> Decimal {
        self.weight
    }

    pub fn reps(&self) -> Option<u32> {
        self.reps
    }

    pub fn is_by_feel(&self) -> bool {
        self.reps.is_none()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Set performed at working intensity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkingSet {
    number: u32,
    weight: Decimal,
    rep_count: RepCount,
    rpe: Option<Rpe>,
    quality: Option<RepQuality>,
    actual_rest_minutes: Option<u32>,
    notes: Option<String>,
    technique: Option<FailureTechnique>,
}

impl WorkingSet {
    /// Start describing a working set; `build` validates everything at once
    pub fn builder(number: u32, weight: Decimal, rep_count: RepCount) -> WorkingSetBuilder {
        WorkingSetBuilder {
            number,
            weight,
            rep_count,
            rpe: None,
            quality: None,
            actual_rest_minutes: None,
            notes: None,
            technique: None,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn weight(&self) -> Decimal {
        self.weight
    }

    pub fn rep_count(&self) -> RepCount {
        self.rep_count
    }

    pub fn rpe(&self) -> Option<Rpe> {
        self.rpe
    }

    pub fn quality(&self) -> Option<RepQuality> {
        self.quality
    }

    pub fn actual_rest_minutes(&self) -> Option<u32> {
        self.actual_rest_minutes
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn technique(&self) -> Option<&FailureTechnique> {
        self.technique.as_ref()
    }
}

/// Inputs for a `WorkingSet` that have not been validated yet
#[derive(Debug, Clone)]
pub struct WorkingSetBuilder {
    number: u32,
    weight: Decimal,
    rep_count: RepCount,
    rpe: Option<Decimal>,
    quality: Option<RepQuality>,
    actual_rest_minutes: Option<u32>,
    notes: Option<String>,
    technique: Option<FailureTechnique>,
}

impl WorkingSetBuilder {
    pub fn rpe(mut self, rpe: Option<Decimal>) -> Self {
        self.rpe = rpe;
        self
    }

    pub fn quality(mut self, quality: Option<RepQuality>) -> Self {
        self.quality = quality;
        self
    }

    pub fn actual_rest_minutes(mut self, minutes: Option<u32>) -> Self {
        self.actual_rest_minutes = minutes;
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    pub fn technique(mut self, technique: Option<FailureTechnique>) -> Self {
        self.technique = technique;
        self
    }

    pub fn build(self) -> LogResult<WorkingSet> {
        let number = validator::require_positive("working_sets.set", self.number)?;
        let weight = validator::require_weight("working_sets.weight_kg", self.weight)?;
        let rpe = self.rpe.map(Rpe::new).transpose()?;
        let actual_rest_minutes = self
            .actual_rest_minutes
            .map(|m| validator::require_rest_minutes("working_sets.actual_rest_minutes", m))
            .transpose()?;

        if let Some(technique) = &self.technique {
            if !rpe.is_some_and(|r| r.is_max()) {
                let shown = rpe.map_or_else(|| "none".to_string(), |r| r.to_string());
                return Err(LogError::validation(
                    "failure_technique",
                    technique.kind(),
                    format!(
                        "a failure technique can only be used with RPE 10 sets (RPE is {})",
                        shown
                    ),
                ));
            }
        }

        Ok(WorkingSet {
            number,
            weight,
            rep_count: self.rep_count,
            rpe,
            quality: self.quality,
            actual_rest_minutes,
            notes: validator::optional_text(self.notes),
            technique: self.technique,
        })
    }
}
