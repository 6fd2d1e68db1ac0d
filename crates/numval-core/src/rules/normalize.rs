use crate::domain::PhoneNumber;
use crate::error::CoreError;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

/// E.164: a leading `+`, a nonzero first digit, 2 to 15 digits in total.
/// Digit classes are spelled out so non-ASCII digits never match.
pub const E164_PATTERN: &str = r"^\+[1-9][0-9]{1,14}$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeWarning {
    Duplicate(String),
    UnrecognizedFormat(String),
}

impl fmt::Display for NormalizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeWarning::Duplicate(raw) => {
                write!(f, "duplicate phone number detected: {raw}, skipping")
            }
            NormalizeWarning::UnrecognizedFormat(raw) => {
                write!(f, "non E.164 string detected: {raw}, ignoring")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub numbers: Vec<PhoneNumber>,
    pub warnings: Vec<NormalizeWarning>,
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    pattern: Regex,
}

impl Normalizer {
    pub fn new(pattern: &str) -> Result<Self, CoreError> {
        let compiled = Regex::new(pattern).map_err(|source| CoreError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern: compiled })
    }

    pub fn e164() -> Result<Self, CoreError> {
        Self::new(E164_PATTERN)
    }

    pub fn parse(&self, raw: &str) -> Option<PhoneNumber> {
        if self.pattern.is_match(raw) {
            Some(PhoneNumber::from_matched(raw))
        } else {
            None
        }
    }

    /// Filters `candidates` down to unique, well-formed numbers in
    /// first-seen order. Blank entries are dropped without a warning.
    pub fn normalize<I, S>(&self, candidates: I) -> Normalized
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Normalized::default();
        let mut seen: HashSet<String> = HashSet::new();

        for candidate in candidates {
            let raw = candidate.as_ref();
            match self.parse(raw) {
                Some(number) => {
                    if seen.insert(raw.to_string()) {
                        out.numbers.push(number);
                    } else {
                        out.warnings.push(NormalizeWarning::Duplicate(raw.to_string()));
                    }
                }
                None if raw.is_empty() => {}
                None => {
                    let warning = NormalizeWarning::UnrecognizedFormat(raw.to_string());
                    out.warnings.push(warning);
                }
            }
        }

        out
    }
}
