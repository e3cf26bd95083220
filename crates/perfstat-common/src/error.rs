//! Failure vocabulary for every statistic in the workspace.
//!
//! - **`StatErrorKind`** : the canonical set of failure kinds
//! - **`StatError`**     : the kind plus an optional human explanation
//!
//! A host layer (spreadsheet add-in, service, CLI) decides how each kind is
//! presented; nothing in here knows about display codes.

use std::{error::Error, fmt};

/// All recognised failure kinds.
///
/// `Display` renders a stable snake_case tag so callers can match on the
/// rendered form in logs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StatErrorKind {
    /// Two series that must be aligned have different lengths.
    LengthMismatch,
    /// Not enough observations for the statistic at all.
    InsufficientData,
    /// Enough observations to exist, too few for the unbiased estimator.
    DegenerateSample,
    /// A scalar argument is outside its domain.
    InvalidParameter,
    /// A denominator evaluated to exactly zero.
    DivisionByZero,
    /// A requested order statistic lies outside the sample.
    OutOfRange,
}

impl fmt::Display for StatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LengthMismatch => "length_mismatch",
            Self::InsufficientData => "insufficient_data",
            Self::DegenerateSample => "degenerate_sample",
            Self::InvalidParameter => "invalid_parameter",
            Self::DivisionByZero => "division_by_zero",
            Self::OutOfRange => "out_of_range",
        })
    }
}

impl StatErrorKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length_mismatch" => Some(Self::LengthMismatch),
            "insufficient_data" => Some(Self::InsufficientData),
            "degenerate_sample" => Some(Self::DegenerateSample),
            "invalid_parameter" => Some(Self::InvalidParameter),
            "division_by_zero" => Some(Self::DivisionByZero),
            "out_of_range" => Some(Self::OutOfRange),
            _ => None,
        }
    }
}

/// The single error struct the statistics API passes around.
///
/// * **kind**    – the mandatory failure kind
/// * **message** – optional human explanation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatError {
    pub kind: StatErrorKind,
    pub message: Option<String>,
}

/* ───────────────────── Constructors & helpers ─────────────────────── */

impl From<StatErrorKind> for StatError {
    fn from(kind: StatErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }
}

impl StatError {
    /// Basic constructor (no message).
    pub fn new(kind: StatErrorKind) -> Self {
        kind.into()
    }

    /// Attach a human-readable explanation.
    pub fn with_message<S: Into<String>>(mut self, msg: S) -> Self {
        self.message = Some(msg.into());
        self
    }

    pub fn length_mismatch(left: usize, right: usize) -> Self {
        Self::new(StatErrorKind::LengthMismatch)
            .with_message(format!("series lengths differ ({left} vs {right})"))
    }

    pub fn insufficient_data(needed: usize, got: usize) -> Self {
        Self::new(StatErrorKind::InsufficientData)
            .with_message(format!("need at least {needed} observations, got {got}"))
    }

    pub fn degenerate_sample(needed: usize, got: usize) -> Self {
        Self::new(StatErrorKind::DegenerateSample)
            .with_message(format!("sample estimator needs more than {needed} observations, got {got}"))
    }

    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        Self::new(StatErrorKind::InvalidParameter).with_message(msg)
    }

    pub fn division_by_zero<S: Into<String>>(what: S) -> Self {
        Self::new(StatErrorKind::DivisionByZero).with_message(what)
    }

    pub fn out_of_range<S: Into<String>>(msg: S) -> Self {
        Self::new(StatErrorKind::OutOfRange).with_message(msg)
    }

    /// True for failures a caller may reasonably read as "ratio undefined"
    /// instead of a bad call.
    pub fn is_undefined_ratio(&self) -> bool {
        matches!(
            self.kind,
            StatErrorKind::DivisionByZero | StatErrorKind::OutOfRange
        )
    }
}

/* ───────────────────────── Display / Error ────────────────────────── */

impl fmt::Display for StatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(ref msg) = self.message {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl Error for StatError {}

impl From<StatError> for String {
    fn from(error: StatError) -> Self {
        format!("{error}")
    }
}

impl PartialEq<str> for StatErrorKind {
    fn eq(&self, other: &str) -> bool {
        format!("{self}") == other
    }
}

impl PartialEq<&str> for StatError {
    fn eq(&self, other: &&str) -> bool {
        self.kind.to_string() == *other
    }
}

impl PartialEq<str> for StatError {
    fn eq(&self, other: &str) -> bool {
        self.kind.to_string() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = StatError::length_mismatch(3, 4);
        assert_eq!(
            err.to_string(),
            "length_mismatch: series lengths differ (3 vs 4)"
        );
        assert_eq!(StatError::new(StatErrorKind::OutOfRange).to_string(), "out_of_range");
    }

    #[test]
    fn kind_parse_roundtrips_display() {
        for kind in [
            StatErrorKind::LengthMismatch,
            StatErrorKind::InsufficientData,
            StatErrorKind::DegenerateSample,
            StatErrorKind::InvalidParameter,
            StatErrorKind::DivisionByZero,
            StatErrorKind::OutOfRange,
        ] {
            assert_eq!(StatErrorKind::parse(&kind.to_string()), Some(kind));
        }
        assert_eq!(StatErrorKind::parse("#DIV/0!"), None);
    }

    #[test]
    fn compares_against_rendered_kind() {
        let err = StatError::division_by_zero("market variance");
        assert!(err == "division_by_zero");
        assert!(err.is_undefined_ratio());
        assert!(!StatError::invalid_parameter("degree").is_undefined_ratio());
    }
}
