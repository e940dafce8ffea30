//! Shared value types: PIN lengths, scores, strength levels and reason codes.

use std::fmt;

use thiserror::Error;

use crate::database::PatternCategory;

/// Supported PIN lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PinLength {
    Four,
    Six,
}

impl PinLength {
    pub const ALL: [PinLength; 2] = [PinLength::Four, PinLength::Six];

    /// Maps a digit count to a supported length.
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            4 => Some(PinLength::Four),
            6 => Some(PinLength::Six),
            _ => None,
        }
    }

    pub fn as_usize(self) -> usize {
        match self {
            PinLength::Four => 4,
            PinLength::Six => 6,
        }
    }

    /// Checks that `pin` is made of ASCII digits only and has a supported length.
    pub fn parse(pin: &str) -> Result<Self, PinFormatError> {
        if !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(PinFormatError::NonDigit);
        }
        let len = pin.len();
        Self::from_len(len).ok_or(PinFormatError::UnsupportedLength(len))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PinFormatError {
    #[error("PIN must contain only digits")]
    NonDigit,
    #[error("PIN must be 4 or 6 digits long, got {0}")]
    UnsupportedLength(usize),
}

/// Composite score of a validated PIN (0..=100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinScore(i64);

impl PinScore {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn strength(&self) -> PinStrength {
        PinStrength::from_score(self.0)
    }
}

/// Strength classification, ordered from worst to best.
///
/// `InvalidInput` is not a verdict: it marks a PIN that could not be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PinStrength {
    InvalidInput,
    VeryWeak,
    Weak,
    Moderate,
    Strong,
}

impl PinStrength {
    pub const STRONG_THRESHOLD: i64 = 80;
    pub const MODERATE_THRESHOLD: i64 = 55;
    pub const WEAK_THRESHOLD: i64 = 30;

    pub fn from_score(score: i64) -> Self {
        if score >= Self::STRONG_THRESHOLD {
            PinStrength::Strong
        } else if score >= Self::MODERATE_THRESHOLD {
            PinStrength::Moderate
        } else if score >= Self::WEAK_THRESHOLD {
            PinStrength::Weak
        } else {
            PinStrength::VeryWeak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PinStrength::InvalidInput => "INVALID_INPUT",
            PinStrength::VeryWeak => "VERY_WEAK",
            PinStrength::Weak => "WEAK",
            PinStrength::Moderate => "MODERATE",
            PinStrength::Strong => "STRONG",
        }
    }
}

impl fmt::Display for PinStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Named personal dates a PIN may be derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateSource {
    DobSelf,
    DobSpouse,
    Anniversary,
}

impl DateSource {
    pub fn code(&self) -> &'static str {
        match self {
            DateSource::DobSelf => "DEMOGRAPHIC_DOB_SELF",
            DateSource::DobSpouse => "DEMOGRAPHIC_DOB_SPOUSE",
            DateSource::Anniversary => "DEMOGRAPHIC_ANNIVERSARY",
        }
    }
}

/// Optional personal dates, as `YYYY-MM-DD` strings.
///
/// Malformed values are accepted and simply contribute no patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demographics {
    pub dob: Option<String>,
    pub spouse_dob: Option<String>,
    pub anniversary: Option<String>,
}

impl Demographics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dob(mut self, date: impl Into<String>) -> Self {
        self.dob = Some(date.into());
        self
    }

    pub fn with_spouse_dob(mut self, date: impl Into<String>) -> Self {
        self.spouse_dob = Some(date.into());
        self
    }

    pub fn with_anniversary(mut self, date: impl Into<String>) -> Self {
        self.anniversary = Some(date.into());
        self
    }

    /// Provided dates in a fixed source order.
    pub fn dates(&self) -> impl Iterator<Item = (DateSource, &str)> {
        [
            (DateSource::DobSelf, self.dob.as_deref()),
            (DateSource::DobSpouse, self.spouse_dob.as_deref()),
            (DateSource::Anniversary, self.anniversary.as_deref()),
        ]
        .into_iter()
        .filter_map(|(source, date)| date.map(|d| (source, d)))
    }
}

/// One triggered weakness rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    InvalidFormat,
    Pattern(PatternCategory),
    Demographic {
        source: DateSource,
        template: &'static str,
        reversed: bool,
    },
    DemographicFragments {
        source: DateSource,
    },
}

impl ReasonCode {
    /// Points subtracted from the base score when this rule triggers.
    pub fn penalty(&self) -> i64 {
        match self {
            ReasonCode::InvalidFormat => 0,
            ReasonCode::Pattern(category) => match category {
                PatternCategory::CommonPin => 60,
                PatternCategory::Ascending
                | PatternCategory::Descending
                | PatternCategory::Repeated => 50,
                PatternCategory::KeypadHorizontal
                | PatternCategory::KeypadVertical
                | PatternCategory::KeypadDiagonal => 40,
                PatternCategory::KeypadKnight => 30,
            },
            ReasonCode::Demographic { .. } => 50,
            ReasonCode::DemographicFragments { .. } => 30,
        }
    }

    /// Stable identifier, e.g. `DEMOGRAPHIC_DOB_SELF:DAY_MONTH`.
    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasonCode::InvalidFormat => f.write_str("INVALID_FORMAT"),
            ReasonCode::Pattern(category) => f.write_str(category.code()),
            ReasonCode::Demographic {
                source,
                template,
                reversed,
            } => {
                write!(f, "{}:{}", source.code(), template)?;
                if *reversed {
                    f.write_str(":REVERSED")?;
                }
                Ok(())
            }
            ReasonCode::DemographicFragments { source } => {
                write!(f, "{}:FRAGMENTS", source.code())
            }
        }
    }
}

/// Outcome of a PIN validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// `None` when the PIN could not be evaluated.
    pub score: Option<PinScore>,
    pub reasons: Vec<ReasonCode>,
}

impl ValidationResult {
    pub fn invalid_input() -> Self {
        Self {
            score: None,
            reasons: vec![ReasonCode::InvalidFormat],
        }
    }

    pub fn strength(&self) -> PinStrength {
        self.score
            .map(|s| s.strength())
            .unwrap_or(PinStrength::InvalidInput)
    }

    pub fn reason_codes(&self) -> Vec<String> {
        self.reasons.iter().map(ReasonCode::code).collect()
    }

    pub fn has_reason(&self, code: &str) -> bool {
        self.reasons.iter().any(|r| r.code() == code)
    }
}
