//! Validation error types
//!
//! A rejected payload always carries the complete set of violated rules,
//! each with the field path it was found at. A record either validates whole
//! or is rejected whole; there is no partial acceptance and no bare boolean
//! verdict.

use std::fmt;

use thiserror::Error;

/// Path shown for violations on the payload root itself.
const ROOT_PATH: &str = "$root";

/// The closed set of rule kinds a payload can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Wrong structural shape: bad JSON type, a missing required member, or
    /// an undeclared member in strict mode.
    InvalidType,
    /// Value fails a pattern or format rule.
    InvalidFormat,
    /// Value is not one of a closed set of literals.
    InvalidEnumValue,
    /// Array repeats a value where uniqueness is required.
    DuplicateValue,
    /// Neither of two mutually sufficient optional members is present.
    MissingRequiredCombination,
    /// Discriminator tag matches no known variant.
    UnknownVariant,
}

impl ViolationKind {
    /// Returns the stable string code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::InvalidType => "INVALID_TYPE",
            ViolationKind::InvalidFormat => "INVALID_FORMAT",
            ViolationKind::InvalidEnumValue => "INVALID_ENUM_VALUE",
            ViolationKind::DuplicateValue => "DUPLICATE_VALUE",
            ViolationKind::MissingRequiredCombination => "MISSING_REQUIRED_COMBINATION",
            ViolationKind::UnknownVariant => "UNKNOWN_VARIANT",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One violated rule: where it was found, which rule, and what was expected
/// versus what the payload carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field path from the payload root (`data.created_at`, `routes[2]`).
    /// Violations on the root value itself use `$root`.
    pub path: String,
    /// Which rule was violated.
    pub kind: ViolationKind,
    /// Expected type, format, or literal set.
    pub expected: String,
    /// Actual type or value found.
    pub actual: String,
}

impl Violation {
    /// Creates a violation; an empty path is recorded as the payload root.
    pub fn new(
        path: impl Into<String>,
        kind: ViolationKind,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        let path = path.into();
        Self {
            path: if path.is_empty() {
                ROOT_PATH.to_string()
            } else {
                path
            },
            kind,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Wrong JSON type at `path`.
    pub fn invalid_type(path: &str, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(path, ViolationKind::InvalidType, expected, actual)
    }

    /// Required member absent.
    pub fn missing_field(path: &str) -> Self {
        Self::new(
            path,
            ViolationKind::InvalidType,
            "field to be present",
            "missing",
        )
    }

    /// Member present but not declared by the schema (strict mode).
    pub fn undeclared_field(path: &str) -> Self {
        Self::new(
            path,
            ViolationKind::InvalidType,
            "no undeclared members",
            "member present",
        )
    }

    /// Pattern or format failure, carrying the offending value.
    pub fn invalid_format(
        path: &str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(path, ViolationKind::InvalidFormat, expected, actual)
    }

    /// Value outside a closed literal set.
    pub fn invalid_enum(path: &str, allowed: &[&str], actual: impl Into<String>) -> Self {
        Self::new(
            path,
            ViolationKind::InvalidEnumValue,
            format!("one of {}", allowed.join(", ")),
            actual,
        )
    }

    /// Repeated entries in an array that requires unique values.
    pub fn duplicate_value(path: &str, duplicated: &[&str]) -> Self {
        Self::new(
            path,
            ViolationKind::DuplicateValue,
            "no repeated entries",
            duplicated.join(", "),
        )
    }

    /// Neither of two mutually sufficient members present.
    pub fn missing_combination(path: &str, alternatives: &[&str]) -> Self {
        Self::new(
            path,
            ViolationKind::MissingRequiredCombination,
            format!("at least one of {}", alternatives.join(", ")),
            "neither present",
        )
    }

    /// Unrecognized discriminator tag, listing every accepted literal.
    pub fn unknown_variant(path: &str, received: &str, allowed: &[&str]) -> Self {
        Self::new(
            path,
            ViolationKind::UnknownVariant,
            format!("one of {}", allowed.join(", ")),
            received,
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}' [{}]: expected {}, got {}",
            self.path,
            self.kind.code(),
            self.expected,
            self.actual
        )
    }
}

/// A rejected payload: the aggregated, non-empty set of violated rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Wraps the recorded violations of one rejected payload.
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Every recorded violation, in payload order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The violated field paths, in payload order.
    pub fn paths(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.path.as_str()).collect()
    }

    /// True when some violation cites `path`.
    pub fn cites(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }

    /// True when some violation has the given kind.
    pub fn has(&self, kind: ViolationKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "payload rejected ({} violation", self.violations.len())?;
        if self.violations.len() != 1 {
            write!(f, "s")?;
        }
        write!(f, ")")?;
        for violation in &self.violations {
            write!(f, "; {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Errors from the JSON string entry points.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The input is not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The input is well-formed JSON that violates the schema.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_stable() {
        assert_eq!(ViolationKind::InvalidType.code(), "INVALID_TYPE");
        assert_eq!(ViolationKind::InvalidFormat.code(), "INVALID_FORMAT");
        assert_eq!(ViolationKind::InvalidEnumValue.code(), "INVALID_ENUM_VALUE");
        assert_eq!(ViolationKind::DuplicateValue.code(), "DUPLICATE_VALUE");
        assert_eq!(
            ViolationKind::MissingRequiredCombination.code(),
            "MISSING_REQUIRED_COMBINATION"
        );
        assert_eq!(ViolationKind::UnknownVariant.code(), "UNKNOWN_VARIANT");
    }

    #[test]
    fn test_empty_path_becomes_root() {
        let violation = Violation::invalid_type("", "object", "string");
        assert_eq!(violation.path, "$root");
    }

    #[test]
    fn test_violation_display_carries_detail() {
        let violation = Violation::invalid_format("data.created_at", "an RFC 3339 timestamp", "soon");
        let shown = violation.to_string();
        assert!(shown.contains("data.created_at"));
        assert!(shown.contains("INVALID_FORMAT"));
        assert!(shown.contains("RFC 3339"));
        assert!(shown.contains("soon"));
    }

    #[test]
    fn test_unknown_variant_lists_accepted_literals() {
        let violation = Violation::unknown_variant("type", "unknown.event", &["upvote", "test"]);
        assert_eq!(violation.kind, ViolationKind::UnknownVariant);
        assert!(violation.expected.contains("upvote"));
        assert!(violation.expected.contains("test"));
        assert_eq!(violation.actual, "unknown.event");
    }

    #[test]
    fn test_error_display_counts_violations() {
        let err = ValidationError::new(vec![
            Violation::missing_field("user_id"),
            Violation::missing_field("weight"),
        ]);
        let shown = err.to_string();
        assert!(shown.contains("2 violations"));
        assert!(shown.contains("user_id"));
        assert!(shown.contains("weight"));
    }

    #[test]
    fn test_cites_and_has() {
        let err = ValidationError::new(vec![Violation::duplicate_value(
            "routes",
            &["vote.create"],
        )]);
        assert!(err.cites("routes"));
        assert!(!err.cites("url"));
        assert!(err.has(ViolationKind::DuplicateValue));
        assert!(!err.has(ViolationKind::UnknownVariant));
    }
}
