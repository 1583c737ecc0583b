use crate::ast::Span;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The text being parsed and the name it is reported under
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub source_id: String,
    pub text: Arc<str>,
}

impl SourceContext {
    pub fn new(source_id: impl Into<String>, text: &str) -> Self {
        Self {
            source_id: source_id.into(),
            text: Arc::from(text),
        }
    }

    pub fn lexical(&self, message: impl Into<String>, span: Span) -> LogError {
        LogError::Lexical(Box::new(self.details(message.into(), span, None)))
    }

    pub fn syntax(&self, message: impl Into<String>, span: Span) -> LogError {
        LogError::Syntax(Box::new(self.details(message.into(), span, None)))
    }

    pub fn syntax_with_suggestion(
        &self,
        message: impl Into<String>,
        span: Span,
        suggestion: impl Into<String>,
    ) -> LogError {
        LogError::Syntax(Box::new(self.details(
            message.into(),
            span,
            Some(suggestion.into()),
        )))
    }

    fn details(&self, message: String, span: Span, suggestion: Option<String>) -> ErrorDetails {
        ErrorDetails {
            message,
            span,
            source_id: self.source_id.clone(),
            source_text: Arc::clone(&self.text),
            suggestion,
        }
    }
}

/// Detailed error information with source location
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_id: String,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

impl ErrorDetails {
    /// The offending text the span points at
    pub fn fragment(&self) -> &str {
        self.source_text
            .get(self.span.start..self.span.end)
            .unwrap_or_default()
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        write!(
            f,
            " at {}:{}:{}",
            self.source_id, self.span.line, self.span.col
        )
    }
}

/// A broken domain invariant: which field, what value, and why it was refused
#[derive(Debug, Clone)]
pub struct ValidationDetails {
    pub field: String,
    pub value: String,
    pub reason: String,
    pub span: Option<Span>,
    pub source_id: Option<String>,
    pub source_text: Option<Arc<str>>,
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}' = {}: {}",
            self.field, self.value, self.reason
        )?;
        if let Some(span) = &self.span {
            let source = self.source_id.as_deref().unwrap_or("<input>");
            write!(f, " at {}:{}:{}", source, span.line, span.col)?;
        }
        Ok(())
    }
}

/// Error types for the training log pipeline
#[derive(Debug, Clone, Error)]
pub enum LogError {
    /// A line appeared where the log structure does not allow it
    #[error("Lexical error: {0}")]
    Lexical(Box<ErrorDetails>),

    /// A token or value could not be decoded
    #[error("Syntax error: {0}")]
    Syntax(Box<ErrorDetails>),

    /// A decoded value violates a domain rule
    #[error("Validation error: {0}")]
    Validation(Box<ValidationDetails>),

    #[error("Resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
    },

    /// The canonical mapping could not be decoded
    #[error("Canonical form error: {0}")]
    Canonical(String),

    #[error("Engine error: {0}")]
    Engine(String),
}

impl LogError {
    /// Create a validation error without source location
    pub fn validation(
        field: impl Into<String>,
        value: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation(Box::new(ValidationDetails {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
            span: None,
            source_id: None,
            source_text: None,
        }))
    }

    /// Attach a source location to a validation error that has none yet.
    /// Other kinds already carry their location and are returned unchanged.
    pub fn anchored(self, span: &Span, source: &SourceContext) -> Self {
        match self {
            LogError::Validation(mut details) if details.span.is_none() => {
                details.span = Some(span.clone());
                details.source_id = Some(source.source_id.clone());
                details.source_text = Some(Arc::clone(&source.text));
                LogError::Validation(details)
            }
            other => other,
        }
    }

    /// Line number the error points at, if it has one
    pub fn line(&self) -> Option<usize> {
        match self {
            LogError::Lexical(details) | LogError::Syntax(details) => Some(details.span.line),
            LogError::Validation(details) => details.span.as_ref().map(|s| s.line),
            _ => None,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, LogError::Lexical(_))
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, LogError::Syntax(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, LogError::Validation(_))
    }

    /// Field name of a validation error
    pub fn field(&self) -> Option<&str> {
        match self {
            LogError::Validation(details) => Some(details.field.as_str()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        LogError::Canonical(err.to_string())
    }
}
