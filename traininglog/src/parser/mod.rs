//! Text to session pipeline
//!
//! `extract` turns raw text into a `RawSession` (line classification, set
//! decoding), `deep` turns that record into a validated `TrainingSession`.

pub mod deep;
pub mod extract;
pub mod sets;
pub mod techniques;

use crate::config::SessionDefaults;
use crate::error::SourceContext;
use crate::model::TrainingSession;
use crate::resource_limits::ResourceLimits;
use crate::LogResult;

pub use deep::build_session;
pub use extract::{classify, extract, Block, LineKind};
pub use techniques::parse_technique;

/// Run both stages over `text`.
///
/// `Ok(None)` means the text has no `BEGIN` / `END` block.
pub fn parse(
    text: &str,
    source_id: &str,
    defaults: &SessionDefaults,
    limits: &ResourceLimits,
) -> LogResult<Option<TrainingSession>> {
    let ctx = SourceContext::new(source_id, text);
    match extract(text, limits, &ctx)? {
        Some(raw) => build_session(&raw, defaults, &ctx).map(Some),
        None => Ok(None),
    }
}
