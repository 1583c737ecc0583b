use crate::error::LogError;
use crate::validator;
use crate::LogResult;
use rust_decimal::Decimal;
use std::fmt;

/// Full and partial repetitions of a set or mini-set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RepCount {
    full: u32,
    partial: u32,
}

impl RepCount {
    pub fn new(full: u32, partial: u32) -> Self {
        Self { full, partial }
    }

    /// Only full reps, no partials
    pub fn full_only(full: u32) -> Self {
        Self { full, partial: 0 }
    }

    /// Build from signed counts as found in external data
    pub fn from_signed(full: i64, partial: i64) -> LogResult<Self> {
        Ok(Self {
            full: validator::require_count("rep_count.full", full)?,
            partial: validator::require_count("rep_count.partial", partial)?,
        })
    }

    pub fn full(&self) -> u32 {
        self.full
    }

    pub fn partial(&self) -> u32 {
        self.partial
    }

    /// Total repetitions including partial reps
    pub fn total(&self) -> u32 {
        self.full.saturating_add(self.partial)
    }
}

impl fmt::Display for RepCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.partial > 0 {
            write!(f, "{}+{}", self.full, self.partial)
        } else {
            write!(f, "{}", self.full)
        }
    }
}

/// Planned repetition range for an exercise goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepRange {
    min: u32,
    max: u32,
}

impl RepRange {
    pub fn new(min: u32, max: u32) -> LogResult<Self> {
        let min = validator::require_positive("rep_range.min", min)?;
        let max = validator::require_positive("rep_range.max", max)?;
        if min > max {
            return Err(LogError::validation(
                "rep_range",
                format!("{}-{}", min, max),
                "minimum reps cannot be greater than maximum reps",
            ));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, reps: u32) -> bool {
        (self.min..=self.max).contains(&reps)
    }
}

/// Rating of perceived exertion: 1 to 10 in half steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rpe(Decimal);

impl Rpe {
    pub fn new(value: Decimal) -> LogResult<Self> {
        validator::validate_rpe(value).map(|v| Rpe(v.normalize()))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// True for RPE 10, the only effort at which failure techniques are legal
    pub fn is_max(&self) -> bool {
        self.0 == validator::MAX_RPE
    }
}

impl fmt::Display for Rpe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the reps of a working set looked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepQuality {
    Good,
    Bad,
    Perfect,
    Learning,
}

/// Every spelling accepted for a rep quality, matched case-insensitively
const QUALITY_ALIASES: &[(&str, RepQuality)] = &[
    ("good", RepQuality::Good),
    ("bad", RepQuality::Bad),
    ("perfect", RepQuality::Perfect),
    ("learning", RepQuality::Learning),
];

impl RepQuality {
    pub fn from_alias(value: &str) -> LogResult<Self> {
        let normalized = value.trim().to_lowercase();
        QUALITY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, quality)| *quality)
            .ok_or_else(|| {
                LogError::validation(
                    "rep_quality",
                    value,
                    "expected one of: good, bad, perfect, learning",
                )
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepQuality::Good => "good",
            RepQuality::Bad => "bad",
            RepQuality::Perfect => "perfect",
            RepQuality::Learning => "learning",
        }
    }
}

impl fmt::Display for RepQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
