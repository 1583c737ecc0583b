//! Failure techniques: ways of extending a set past initial failure
//!
//! `FailureTechnique` is a closed set of four variants. Each variant wraps a
//! struct with private fields so the only way to obtain one is through its
//! validating constructor.

use crate::error::LogError;
use crate::model::values::RepCount;
use crate::validator;
use crate::LogResult;
use rust_decimal::Decimal;
use std::fmt;

/// Name of a technique without its details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechniqueKind {
    MyoReps,
    Llp,
    StaticHold,
    DropSet,
}

/// Every accepted spelling of a technique name, matched case-insensitively
const TECHNIQUE_ALIASES: &[(&str, TechniqueKind)] = &[
    ("myo", TechniqueKind::MyoReps),
    ("myoreps", TechniqueKind::MyoReps),
    ("myo-reps", TechniqueKind::MyoReps),
    ("myo_reps", TechniqueKind::MyoReps),
    ("myo-repcount", TechniqueKind::MyoReps),
    ("myo-rep-count", TechniqueKind::MyoReps),
    ("llp", TechniqueKind::Llp),
    ("low-level-plateau", TechniqueKind::Llp),
    ("static", TechniqueKind::StaticHold),
    ("statichold", TechniqueKind::StaticHold),
    ("static_hold", TechniqueKind::StaticHold),
    ("static-hold", TechniqueKind::StaticHold),
    ("dropset", TechniqueKind::DropSet),
    ("drop_set", TechniqueKind::DropSet),
    ("drop-set", TechniqueKind::DropSet),
];

impl TechniqueKind {
    /// Resolve a technique name through the alias table
    pub fn from_alias(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase();
        TECHNIQUE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, kind)| *kind)
    }

    /// Canonical label used in serialized output
    pub fn label(&self) -> &'static str {
        match self {
            TechniqueKind::MyoReps => "MyoReps",
            TechniqueKind::Llp => "LLP",
            TechniqueKind::StaticHold => "StaticHold",
            TechniqueKind::DropSet => "DropSet",
        }
    }

    /// Name written in log text, e.g. `failure:myo(...)`
    pub fn call_name(&self) -> &'static str {
        match self {
            TechniqueKind::MyoReps => "myo",
            TechniqueKind::Llp => "llp",
            TechniqueKind::StaticHold => "static",
            TechniqueKind::DropSet => "dropset",
        }
    }
}

impl fmt::Display for TechniqueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Myo-reps: short mini-sets after the activation set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MyoReps {
    mini_sets: Vec<RepCount>,
}

impl MyoReps {
    pub fn new(mini_sets: Vec<RepCount>) -> LogResult<Self> {
        if mini_sets.is_empty() {
            return Err(LogError::validation(
                "failure_technique.mini_sets",
                "[]",
                "myo-reps need at least one mini-set",
            ));
        }
        Ok(Self { mini_sets })
    }

    pub fn mini_sets(&self) -> &[RepCount] {
        &self.mini_sets
    }
}

/// Lengthened partials after failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Llp {
    partial_reps: u32,
}

impl Llp {
    pub fn new(partial_reps: u32) -> Self {
        Self { partial_reps }
    }

    pub fn partial_reps(&self) -> u32 {
        self.partial_reps
    }
}

/// Isometric hold at the end of the set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaticHold {
    seconds: u32,
}

impl StaticHold {
    pub fn new(seconds: u32) -> LogResult<Self> {
        let seconds =
            validator::require_positive("failure_technique.hold_duration_seconds", seconds)?;
        Ok(Self { seconds })
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }
}

/// One step of a drop set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropSetEntry {
    weight: Decimal,
    rep_count: RepCount,
}

impl DropSetEntry {
    pub fn new(weight: Decimal, rep_count: RepCount) -> LogResult<Self> {
        Ok(Self {
            weight: validator::require_weight("failure_technique.drop_sets.weight_kg", weight)?,
            rep_count,
        })
    }

    pub fn weight(&self) -> Decimal {
        self.weight
    }

    pub fn rep_count(&self) -> RepCount {
        self.rep_count
    }
}

/// Drop set: weight is reduced and the set continues
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DropSet {
    drops: Vec<DropSetEntry>,
}

impl DropSet {
    pub fn new(drops: Vec<DropSetEntry>) -> LogResult<Self> {
        if drops.is_empty() {
            return Err(LogError::validation(
                "failure_technique.drop_sets",
                "[]",
                "a drop set needs at least one drop",
            ));
        }
        Ok(Self { drops })
    }

    pub fn drops(&self) -> &[DropSetEntry] {
        &self.drops
    }
}

/// A technique used to push a set past failure; legal only at RPE 10
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FailureTechnique {
    MyoReps(MyoReps),
    Llp(Llp),
    StaticHold(StaticHold),
    DropSet(DropSet),
}

impl FailureTechnique {
    pub fn kind(&self) -> TechniqueKind {
        match self {
            FailureTechnique::MyoReps(_) => TechniqueKind::MyoReps,
            FailureTechnique::Llp(_) => TechniqueKind::Llp,
            FailureTechnique::StaticHold(_) => TechniqueKind::StaticHold,
            FailureTechnique::DropSet(_) => TechniqueKind::DropSet,
        }
    }
}

impl From<MyoReps> for FailureTechnique {
    fn from(value: MyoReps) -> Self {
        FailureTechnique::MyoReps(value)
    }
}

impl From<Llp> for FailureTechnique {
    fn from(value: Llp) -> Self {
        FailureTechnique::Llp(value)
    }
}

impl From<StaticHold> for FailureTechnique {
    fn from(value: StaticHold) -> Self {
        FailureTechnique::StaticHold(value)
    }
}

impl From<DropSet> for FailureTechnique {
    fn from(value: DropSet) -> Self {
        FailureTechnique::DropSet(value)
    }
}
