//! Set line decoding
//!
//! A working set body looks like
//! `60 x 6+1 RPE 10 perfect rest 3 min failure:myo(3, 2+1) - felt strong`.
//! Only the leading `weight x reps` pair is required. Every optional
//! fragment is blanked out of the working text once it matched, so later
//! searches never see it again. Blanking keeps byte offsets stable, which
//! lets errors point at the exact column of the offending fragment.

use crate::ast::Span;
use crate::error::SourceContext;
use crate::model::RepCount;
use crate::patterns::{compiled, Pattern};
use crate::record::{RawTechniqueCall, RawWarmupSet, RawWorkingSet};
use crate::LogResult;
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use std::ops::Range;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

static THREE_TOKENS: Pattern = LazyLock::new(|| Regex::new(r"^\s*(\S+)\s+(\S+)\s+(\S+)").ok());
static COMPACT_PAIR: Pattern = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*(?:kg)?\s*[xX×]\s*(\d+)(?:\s*\+\s*(\d+))?").ok()
});
static FAILURE_CALL: Pattern = LazyLock::new(|| {
    Regex::new(r"(?i)failure\s*:\s*([a-z][\w-]*)\s*\(([^)]*)\)").ok()
});
static FAILURE_MARKER: Pattern = LazyLock::new(|| Regex::new(r"(?i)\bfailure\s*:").ok());
static PARTIAL_TAIL: Pattern = LazyLock::new(|| Regex::new(r"^\s*\+\s*(\d+)").ok());
static NOTES: Pattern = LazyLock::new(|| Regex::new(r"(?s)(?:^|\s)-(.*)$").ok());
static REST: Pattern = LazyLock::new(|| {
    Regex::new(r"(?i)\brest\s*:?\s*(\d+)\s*(?:minutes|minute|mins|min|m)?\b").ok()
});
static RPE: Pattern = LazyLock::new(|| Regex::new(r"(?i)\brpe\s*:?\s*(\d+(?:\.\d+)?)").ok());
static QUALITY: Pattern =
    LazyLock::new(|| Regex::new(r"(?i)\b(perfect|good|bad|learning)\b").ok());
static WARMUP_PAIR: Pattern = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*(?:kg)?\s*[xX×]\s*(\d+|(?i:feel)\b)").ok()
});

/// Decode the body of an `S N:` line. `span` covers the body only.
pub fn decode_working_set(
    number: u32,
    body: &str,
    span: &Span,
    ctx: &SourceContext,
) -> LogResult<RawWorkingSet> {
    let (weight, rep_count, consumed) = leading_pair(number, body, span, ctx)?;
    let mut remaining = String::with_capacity(body.len());
    remaining.push_str(&" ".repeat(consumed));
    remaining.push_str(&body[consumed..]);

    // Notes are free text, nothing after the dash is searched
    let notes = match compiled(&NOTES, "notes")?.captures(&remaining) {
        Some(caps) => {
            let text = capture(&caps, 1).trim().to_string();
            let whole = group_range(&caps, 0);
            blank(&mut remaining, whole);
            Some(text).filter(|t| !t.is_empty())
        }
        None => None,
    };

    let technique = match compiled(&FAILURE_CALL, "failure call")?.captures(&remaining) {
        Some(caps) => {
            let whole = group_range(&caps, 0);
            let call = RawTechniqueCall {
                kind: capture(&caps, 1).to_string(),
                args: capture(&caps, 2).to_string(),
                span: span.narrow(whole.start, whole.len()),
            };
            blank(&mut remaining, whole);
            Some(call)
        }
        None => {
            if let Some(marker) = compiled(&FAILURE_MARKER, "failure marker")?.find(&remaining) {
                return Err(ctx.syntax_with_suggestion(
                    format!("set {}: malformed failure technique", number),
                    span.narrow(marker.start(), remaining[marker.start()..].trim_end().len()),
                    "write it as failure:<kind>(<args>), e.g. failure:myo(3, 2+1)",
                ));
            }
            None
        }
    };

    let rest_minutes = match compiled(&REST, "rest")?.captures(&remaining) {
        Some(caps) => {
            let minutes = number_in(&caps, 1, number, span, ctx)?;
            let whole = group_range(&caps, 0);
            blank(&mut remaining, whole);
            Some(minutes)
        }
        None => None,
    };

    let rpe = match compiled(&RPE, "rpe")?.captures(&remaining) {
        Some(caps) => {
            let range = group_range(&caps, 1);
            let value = Decimal::from_str(capture(&caps, 1)).map_err(|_| {
                ctx.syntax(
                    format!("set {}: invalid RPE '{}'", number, capture(&caps, 1)),
                    span.narrow(range.start, range.len()),
                )
            })?;
            let whole = group_range(&caps, 0);
            blank(&mut remaining, whole);
            Some(value)
        }
        None => None,
    };

    let quality = match compiled(&QUALITY, "quality")?.captures(&remaining) {
        Some(caps) => {
            let word = capture(&caps, 1).to_string();
            let whole = group_range(&caps, 0);
            blank(&mut remaining, whole);
            Some(word)
        }
        None => None,
    };

    let leftover = remaining.trim();
    if !leftover.is_empty() {
        debug!(set = number, line = span.line, leftover, "ignoring unrecognized set text");
    }

    Ok(RawWorkingSet {
        number,
        weight,
        rep_count,
        rpe,
        quality,
        rest_minutes,
        notes,
        technique,
        span: span.clone(),
    })
}

/// Decode the body of a `W N:` line: `weight x (reps|feel)[ - notes]`
pub fn decode_warmup_set(
    number: u32,
    body: &str,
    span: &Span,
    ctx: &SourceContext,
) -> LogResult<RawWarmupSet> {
    let caps = compiled(&WARMUP_PAIR, "warmup pair")?
        .captures(body)
        .ok_or_else(|| {
            ctx.syntax_with_suggestion(
                format!(
                    "warmup set {}: expected 'weight x reps' or 'weight x feel', found '{}'",
                    number,
                    body.trim()
                ),
                span.clone(),
                "write it as 20x8 or 20x feel",
            )
        })?;
    let weight = parse_weight(capture(&caps, 1), number, span, ctx)?;
    let reps_text = capture(&caps, 2);
    let reps = if reps_text.eq_ignore_ascii_case("feel") {
        None
    } else {
        Some(number_in(&caps, 2, number, span, ctx)?)
    };

    let tail = &body[group_range(&caps, 0).end..];
    let notes = match tail.find('-') {
        Some(idx) => Some(tail[idx + 1..].trim().to_string()).filter(|t| !t.is_empty()),
        None => {
            if !tail.trim().is_empty() {
                debug!(
                    set = number,
                    line = span.line,
                    leftover = tail.trim(),
                    "ignoring unrecognized warmup text"
                );
            }
            None
        }
    };

    Ok(RawWarmupSet {
        number,
        weight,
        reps,
        notes,
        span: span.clone(),
    })
}

/// Weight and reps at the start of a working set, plus the bytes consumed.
///
/// The strict form is three whitespace separated tokens (`60 x 6+1`, with an
/// optional spaced `+ 1` after them); when
/// that does not fit, a single compact pattern (`60x6+1`, `60kg x 6`) is
/// tried.
fn leading_pair(
    number: u32,
    body: &str,
    span: &Span,
    ctx: &SourceContext,
) -> LogResult<(Decimal, RepCount, usize)> {
    if let Some(caps) = compiled(&THREE_TOKENS, "three tokens")?.captures(body) {
        let (weight, times, reps) = (capture(&caps, 1), capture(&caps, 2), capture(&caps, 3));
        let split_partial = !reps.contains('+');
        if let Some((weight, reps)) = strict_tokens(weight, times, reps) {
            let mut end = group_range(&caps, 0).end;
            // `60 x 6 + 1` writes the partials as separate tokens
            if split_partial {
                let rest = &body[end..];
                if let Some(tail) = compiled(&PARTIAL_TAIL, "partial tail")?.captures(rest) {
                    let tail_span = span.narrow(end, rest.len());
                    let partial = number_in(&tail, 1, number, &tail_span, ctx)?;
                    end += group_range(&tail, 0).end;
                    return Ok((weight, RepCount::new(reps.full(), partial), end));
                }
            }
            return Ok((weight, reps, end));
        }
    }

    let caps = compiled(&COMPACT_PAIR, "compact pair")?
        .captures(body)
        .ok_or_else(|| {
            ctx.syntax_with_suggestion(
                format!(
                    "set {}: expected 'weight x reps' at the start, found '{}'",
                    number,
                    body.trim()
                ),
                span.clone(),
                "write it as 60x6 or 60 x 6+1",
            )
        })?;
    let weight = parse_weight(capture(&caps, 1), number, span, ctx)?;
    let full = number_in(&caps, 2, number, span, ctx)?;
    let partial = match caps.get(3) {
        Some(_) => number_in(&caps, 3, number, span, ctx)?,
        None => 0,
    };
    Ok((weight, RepCount::new(full, partial), group_range(&caps, 0).end))
}

fn strict_tokens(weight: &str, times: &str, reps: &str) -> Option<(Decimal, RepCount)> {
    if !matches!(times, "x" | "X" | "×") {
        return None;
    }
    if weight.is_empty() || !weight.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let weight = Decimal::from_str(weight).ok()?;
    let (full, partial) = match reps.split_once('+') {
        Some((full, partial)) => (full, Some(partial)),
        None => (reps, None),
    };
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !digits(full) || !partial.map_or(true, digits) {
        return None;
    }
    let full = full.parse().ok()?;
    let partial = match partial {
        Some(p) => p.parse().ok()?,
        None => 0,
    };
    Some((weight, RepCount::new(full, partial)))
}

fn parse_weight(text: &str, number: u32, span: &Span, ctx: &SourceContext) -> LogResult<Decimal> {
    Decimal::from_str(text).map_err(|_| {
        ctx.syntax(
            format!("set {}: invalid weight '{}'", number, text),
            span.clone(),
        )
    })
}

fn number_in(
    caps: &Captures<'_>,
    group: usize,
    number: u32,
    span: &Span,
    ctx: &SourceContext,
) -> LogResult<u32> {
    let range = group_range(caps, group);
    let text = capture(caps, group);
    text.parse::<u32>().map_err(|_| {
        ctx.syntax(
            format!("set {}: number '{}' is out of range", number, text),
            span.narrow(range.start, range.len()),
        )
    })
}

fn capture<'t>(caps: &Captures<'t>, group: usize) -> &'t str {
    caps.get(group).map_or("", |m| m.as_str())
}

fn group_range(caps: &Captures<'_>, group: usize) -> Range<usize> {
    caps.get(group).map_or(0..0, |m| m.range())
}

/// Replace a matched fragment with spaces of the same byte length
fn blank(text: &mut String, range: Range<usize>) {
    let filler = " ".repeat(range.len());
    text.replace_range(range, &filler);
}
