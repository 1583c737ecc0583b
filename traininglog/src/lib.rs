//! # Training Log Engine
//!
//! **Plain-text workout logs in, validated training sessions out**
//!
//! Sessions are written in a terse shorthand between `BEGIN` and `END`
//! markers. The engine recovers a complete, strongly typed session or fails
//! with an error that names the offending line.
//!
//! ## Quick Start
//!
//! ```rust
//! use traininglog::{parse, serializers, LogResult};
//!
//! fn main() -> LogResult<()> {
//!     let log = "\
//! BEGIN:
//! Date: 2025-10-18
//! Phase: 1
//! Week: 3
//! Focus: Upper
//! Duration: 75 min
//! Ex1: Bench Press
//! Goal: 60kg x 3 sets x 6-8 reps
//! W1: 20x8
//! S1: 60x6 RPE8 good
//! S2: 60x6 RPE10 perfect failure:myo(3,2+1)
//! END
//! ";
//!     let session = parse(log)?.expect("log has a BEGIN/END block");
//!     assert_eq!(session.exercises()[0].working_sets().len(), 2);
//!
//!     let json = serializers::to_json_string(&session)?;
//!     assert!(json.contains("\"MyoReps\""));
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! ### Extraction
//! Every line is classified (session keyword, exercise header, set line,
//! note block, free text) and folded into a `RawSession`. Set lines are
//! decoded on the way; nothing is validated yet.
//!
//! ### Deep parsing
//! The record is typed and turned into domain values. Every constructor
//! validates its input, so a `TrainingSession` that exists is valid.
//!
//! ### Serialization
//! A session maps to a canonical JSON form with absent values left out, and
//! can be rendered back into log text.

pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub(crate) mod patterns;
pub mod record;
pub mod resource_limits;
pub mod serializers;
pub mod validator;

pub use ast::{Located, Span};
pub use config::{SessionDefaults, DATA_MODEL_TYPE, DATA_MODEL_VERSION};
pub use engine::Engine;
pub use error::{ErrorDetails, LogError, SourceContext, ValidationDetails};
pub use model::*;
pub use record::{RawExercise, RawSession, RawTechniqueCall, RawWarmupSet, RawWorkingSet, SessionField};
pub use resource_limits::ResourceLimits;

/// Result type for training log operations
pub type LogResult<T> = Result<T, LogError>;

/// Parse log text with default settings.
///
/// Returns `Ok(None)` when the text has no `BEGIN` / `END` block.
pub fn parse(text: &str) -> LogResult<Option<TrainingSession>> {
    Engine::new().parse_session(text, "<input>")
}

#[cfg(test)]
mod tests;
