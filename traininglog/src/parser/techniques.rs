//! Failure technique calls: `myo(3, 2+1)`, `llp(4)`, `static(20 sec)`,
//! `dropset(40kg x 8, 30 x 6+2)`
//!
//! The kind is resolved through the alias table on `TechniqueKind`; the
//! argument list is parsed with the pest grammar in `technique.pest`.

use crate::error::SourceContext;
use crate::model::{
    DropSet, DropSetEntry, FailureTechnique, Llp, MyoReps, RepCount, StaticHold, TechniqueKind,
};
use crate::record::RawTechniqueCall;
use crate::LogResult;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

#[derive(Parser)]
#[grammar = "src/parser/technique.pest"]
pub struct TechniqueParser;

/// Resolve and decode a raw technique call.
///
/// Unknown kinds and malformed argument lists are syntax errors pointing at
/// the call. Domain rules (non-empty lists, positive hold time) surface as
/// validation errors without a location; the caller anchors them.
pub fn parse_technique(call: &RawTechniqueCall, ctx: &SourceContext) -> LogResult<FailureTechnique> {
    let kind = TechniqueKind::from_alias(&call.kind).ok_or_else(|| {
        ctx.syntax_with_suggestion(
            format!("unknown failure technique '{}'", call.kind),
            call.span.clone(),
            "use one of myo, llp, static or dropset",
        )
    })?;
    trace!(kind = %kind, args = %call.args, "decoding failure technique");

    let technique = match kind {
        TechniqueKind::MyoReps => {
            let args = parse_args(Rule::myo_args, kind, call, ctx)?;
            let mini_sets = args
                .into_inner()
                .filter(|p| p.as_rule() == Rule::rep_count)
                .map(|p| rep_count(p, call, ctx))
                .collect::<LogResult<Vec<_>>>()?;
            MyoReps::new(mini_sets)?.into()
        }
        TechniqueKind::Llp => {
            let args = parse_args(Rule::llp_args, kind, call, ctx)?;
            let partials = first_integer(args, call, ctx)?;
            Llp::new(partials).into()
        }
        TechniqueKind::StaticHold => {
            let args = parse_args(Rule::static_args, kind, call, ctx)?;
            let seconds = first_integer(args, call, ctx)?;
            StaticHold::new(seconds)?.into()
        }
        TechniqueKind::DropSet => {
            let args = parse_args(Rule::dropset_args, kind, call, ctx)?;
            let drops = args
                .into_inner()
                .filter(|p| p.as_rule() == Rule::drop_entry)
                .map(|p| drop_entry(p, call, ctx))
                .collect::<LogResult<Vec<_>>>()?;
            DropSet::new(drops)?.into()
        }
    };
    Ok(technique)
}

fn example(kind: TechniqueKind) -> &'static str {
    match kind {
        TechniqueKind::MyoReps => "myo(3, 2+1)",
        TechniqueKind::Llp => "llp(4)",
        TechniqueKind::StaticHold => "static(20 sec)",
        TechniqueKind::DropSet => "dropset(40kg x 8, 30kg x 6+2)",
    }
}

fn parse_args<'a>(
    rule: Rule,
    kind: TechniqueKind,
    call: &'a RawTechniqueCall,
    ctx: &SourceContext,
) -> LogResult<Pair<'a, Rule>> {
    let mut pairs = TechniqueParser::parse(rule, call.args.trim()).map_err(|e| {
        ctx.syntax_with_suggestion(
            format!(
                "malformed arguments for {} technique '{}': {}",
                kind.label(),
                call.args.trim(),
                e.variant.message()
            ),
            call.span.clone(),
            format!("write it as {}", example(kind)),
        )
    })?;
    pairs.next().ok_or_else(|| {
        ctx.syntax(
            format!("empty arguments for {} technique", kind.label()),
            call.span.clone(),
        )
    })
}

fn integer(pair: Pair<'_, Rule>, call: &RawTechniqueCall, ctx: &SourceContext) -> LogResult<u32> {
    pair.as_str().parse::<u32>().map_err(|_| {
        ctx.syntax(
            format!("number '{}' is out of range", pair.as_str()),
            call.span.clone(),
        )
    })
}

fn first_integer(
    pair: Pair<'_, Rule>,
    call: &RawTechniqueCall,
    ctx: &SourceContext,
) -> LogResult<u32> {
    let inner = pair
        .into_inner()
        .find(|p| p.as_rule() == Rule::integer)
        .ok_or_else(|| ctx.syntax("expected a number", call.span.clone()))?;
    integer(inner, call, ctx)
}

fn rep_count(
    pair: Pair<'_, Rule>,
    call: &RawTechniqueCall,
    ctx: &SourceContext,
) -> LogResult<RepCount> {
    let mut numbers = pair.into_inner().filter(|p| p.as_rule() == Rule::integer);
    let full = match numbers.next() {
        Some(p) => integer(p, call, ctx)?,
        None => return Err(ctx.syntax("expected a rep count", call.span.clone())),
    };
    let partial = match numbers.next() {
        Some(p) => integer(p, call, ctx)?,
        None => 0,
    };
    Ok(RepCount::new(full, partial))
}

fn drop_entry(
    pair: Pair<'_, Rule>,
    call: &RawTechniqueCall,
    ctx: &SourceContext,
) -> LogResult<DropSetEntry> {
    let mut weight = None;
    let mut reps = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::decimal => {
                weight = Some(Decimal::from_str(inner.as_str()).map_err(|_| {
                    ctx.syntax(
                        format!("invalid drop weight '{}'", inner.as_str()),
                        call.span.clone(),
                    )
                })?);
            }
            Rule::rep_count => reps = Some(rep_count(inner, call, ctx)?),
            _ => {}
        }
    }
    match (weight, reps) {
        (Some(weight), Some(reps)) => DropSetEntry::new(weight, reps),
        _ => Err(ctx.syntax("expected 'weight x reps'", call.span.clone())),
    }
}
