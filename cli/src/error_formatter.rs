use ariadne::{Color, Label, Report, ReportKind, Source};
use std::ops::Range;
use traininglog::{ErrorDetails, LogError};

/// Format a LogError with fancy terminal output using Ariadne
pub fn format_error(error: &LogError) -> String {
    match error {
        LogError::Lexical(details) | LogError::Syntax(details) => {
            let error_type = match error {
                LogError::Lexical(_) => "Lexical error",
                _ => "Syntax error",
            };
            located_report(error_type, details).unwrap_or_else(|| error.to_string())
        }
        LogError::Validation(details) => {
            let located = match (&details.span, &details.source_id, &details.source_text) {
                (Some(span), Some(source_id), Some(text)) => draw(
                    &format!(
                        "Validation error: field '{}' = {}: {} ({}:{})",
                        details.field, details.value, details.reason, source_id, span.line
                    ),
                    source_id,
                    text,
                    span.start..span.end,
                    None,
                ),
                _ => None,
            };
            located.unwrap_or_else(|| error.to_string())
        }
        LogError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
        } => format!(
            "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}",
            limit_name, limit_value, actual_value
        ),
        LogError::Canonical(msg) => format!("Canonical form error: {}", msg),
        LogError::Engine(msg) => format!("Engine error: {}", msg),
    }
}

fn located_report(error_type: &str, details: &ErrorDetails) -> Option<String> {
    let message = format!(
        "{}: {} ({}:{})",
        error_type, details.message, details.source_id, details.span.line
    );
    draw(
        &message,
        &details.source_id,
        &details.source_text,
        details.span.start..details.span.end,
        details.suggestion.as_deref(),
    )
}

/// Render a report; `None` when ariadne fails to write it
fn draw(
    message: &str,
    source_id: &String,
    text: &str,
    bytes: Range<usize>,
    suggestion: Option<&str>,
) -> Option<String> {
    // Ariadne counts characters, spans count bytes
    let to_chars = |byte: usize| text.get(..byte).map_or(byte, |s| s.chars().count());
    let chars = to_chars(bytes.start)..to_chars(bytes.end);

    let mut report = Report::build(ReportKind::Error, source_id, chars.start)
        .with_message(message)
        .with_label(
            Label::new((source_id, chars))
                .with_message("")
                .with_color(Color::Red),
        );

    if let Some(suggestion) = suggestion {
        report = report.with_help(suggestion);
    }

    let mut output = Vec::new();
    report
        .finish()
        .write((source_id, Source::from(text)), &mut output)
        .ok()?;
    Some(String::from_utf8_lossy(&output).to_string())
}
