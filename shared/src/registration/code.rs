//! Employee code formatting
//!
//! An employee code is a 3-letter category prefix followed by a zero-padded
//! sequence of 3 to 6 digits (`PLA005`, `TER1024`).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown in the code field while the sequence is being resolved
pub const CODE_PLACEHOLDER: &str = "Generando...";

/// Largest sequence that still fits in 6 digits
pub const MAX_SEQUENCE: u64 = 999_999;

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}[0-9]{3,6}$").expect("valid employee code regex"));

/// Employee code errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("prefix must be exactly 3 uppercase letters, got {0:?}")]
    InvalidPrefix(String),

    #[error("sequence must be positive")]
    ZeroSequence,

    #[error("sequence {0} does not fit in 6 digits")]
    SequenceOverflow(u64),

    #[error("invalid employee code {0:?}")]
    InvalidFormat(String),
}

/// A well-formed employee code
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeCode(String);

impl EmployeeCode {
    /// Validate an existing code
    pub fn parse(code: &str) -> Result<Self, CodeError> {
        if is_valid_code(code) {
            Ok(Self(code.to_string()))
        } else {
            Err(CodeError::InvalidFormat(code.to_string()))
        }
    }

    pub fn prefix(&self) -> &str {
        &self.0[..3]
    }

    pub fn sequence(&self) -> u64 {
        // digits were checked by the regex
        self.0[3..].parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmployeeCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmployeeCode> for String {
    fn from(code: EmployeeCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for EmployeeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `code` matches `^[A-Z]{3}[0-9]{3,6}$`
pub fn is_valid_code(code: &str) -> bool {
    CODE_RE.is_match(code)
}

/// Build a code from a category prefix and a sequence number.
///
/// The sequence is zero-padded to 3 digits and grows up to 6; anything
/// larger is rejected rather than truncated.
pub fn format_code(prefix: &str, sequence: u64) -> Result<EmployeeCode, CodeError> {
    if prefix.len() != 3 || !prefix.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(CodeError::InvalidPrefix(prefix.to_string()));
    }
    if sequence == 0 {
        return Err(CodeError::ZeroSequence);
    }
    if sequence > MAX_SEQUENCE {
        return Err(CodeError::SequenceOverflow(sequence));
    }
    Ok(EmployeeCode(format!("{prefix}{sequence:03}")))
}

/// Trailing digits of any code-like string (`"PLA012"` -> 12)
pub fn trailing_sequence(code: &str) -> Option<u64> {
    let digits_at = code
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    code[digits_at..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_to_three_digits() {
        assert_eq!(format_code("PLA", 5).unwrap().as_str(), "PLA005");
        assert_eq!(format_code("TER", 42).unwrap().as_str(), "TER042");
        assert_eq!(format_code("ADM", 999).unwrap().as_str(), "ADM999");
    }

    #[test]
    fn test_format_grows_past_three_digits() {
        assert_eq!(format_code("OPE", 1000).unwrap().as_str(), "OPE1000");
        assert_eq!(format_code("SER", MAX_SEQUENCE).unwrap().as_str(), "SER999999");
    }

    #[test]
    fn test_format_rejects_seven_digits() {
        assert_eq!(
            format_code("PLA", 1_000_000),
            Err(CodeError::SequenceOverflow(1_000_000))
        );
        assert!(format_code("PLA", u64::MAX).is_err());
    }

    #[test]
    fn test_format_rejects_bad_prefix_and_zero() {
        assert!(matches!(format_code("pla", 1), Err(CodeError::InvalidPrefix(_))));
        assert!(matches!(format_code("PL", 1), Err(CodeError::InvalidPrefix(_))));
        assert!(matches!(format_code("PLAN", 1), Err(CodeError::InvalidPrefix(_))));
        assert!(matches!(format_code("PÑA", 1), Err(CodeError::InvalidPrefix(_))));
        assert_eq!(format_code("PLA", 0), Err(CodeError::ZeroSequence));
    }

    #[test]
    fn test_formatted_codes_always_match_regex() {
        let samples = (1..=2_000).chain([9_999, 10_000, 99_999, 100_000, 500_000, MAX_SEQUENCE]);
        for s in samples {
            let code = format_code("TER", s).unwrap();
            assert!(is_valid_code(code.as_str()), "{code} should be valid");
            assert_eq!(code.sequence(), s);
            assert_eq!(code.prefix(), "TER");
        }
    }

    #[test]
    fn test_parse() {
        assert!(EmployeeCode::parse("PLA005").is_ok());
        assert!(EmployeeCode::parse("PLA05").is_err());
        assert!(EmployeeCode::parse("PLA0000001").is_err());
        assert!(EmployeeCode::parse(CODE_PLACEHOLDER).is_err());
        assert!(EmployeeCode::parse("pla005").is_err());
    }

    #[test]
    fn test_trailing_sequence() {
        assert_eq!(trailing_sequence("PLA012"), Some(12));
        assert_eq!(trailing_sequence("X-7"), Some(7));
        assert_eq!(trailing_sequence("ADM"), None);
        assert_eq!(trailing_sequence(""), None);
    }
}
