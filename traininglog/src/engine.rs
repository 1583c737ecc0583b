use crate::config::SessionDefaults;
use crate::error::SourceContext;
use crate::parser;
use crate::record::RawSession;
use crate::resource_limits::ResourceLimits;
use crate::{LogResult, TrainingSession};
use tracing::debug;

/// The training log engine.
///
/// Holds configuration only; every call works on its own input, so one
/// engine can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    defaults: SessionDefaults,
    limits: ResourceLimits,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom resource limits
    pub fn with_limits(limits: ResourceLimits) -> Self {
        Self {
            defaults: SessionDefaults::default(),
            limits,
        }
    }

    /// Replace the values used for session fields the log leaves out
    pub fn with_defaults(mut self, defaults: SessionDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    pub fn defaults(&self) -> &SessionDefaults {
        &self.defaults
    }

    /// Run only the lexical stage and return the intermediate record
    pub fn extract(&self, text: &str, source_id: &str) -> LogResult<Option<RawSession>> {
        let ctx = SourceContext::new(source_id, text);
        parser::extract(text, &self.limits, &ctx)
    }

    /// Parse log text into a validated session.
    ///
    /// `Ok(None)` means the text contains no `BEGIN` / `END` block.
    pub fn parse_session(&self, text: &str, source_id: &str) -> LogResult<Option<TrainingSession>> {
        debug!(source = source_id, bytes = text.len(), "parsing training log");
        parser::parse(text, source_id, &self.defaults, &self.limits)
    }
}
