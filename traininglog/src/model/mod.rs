//! Domain model
//!
//! A session owns its exercises, an exercise owns its sets, and a working
//! set owns its failure technique. Nothing points back up the tree. Every
//! type is built through a constructor or builder that validates before the
//! value exists, so holding one means holding valid data.

pub mod exercise;
pub mod session;
pub mod sets;
pub mod technique;
pub mod values;

pub use exercise::{Exercise, ExerciseBuilder};
pub use session::{session_identity, TrainingSession, TrainingSessionBuilder};
pub use sets::{Goal, WarmupSet, WorkingSet, WorkingSetBuilder};
pub use technique::{
    DropSet, DropSetEntry, FailureTechnique, Llp, MyoReps, StaticHold, TechniqueKind,
};
pub use values::{RepCount, RepQuality, RepRange, Rpe};
