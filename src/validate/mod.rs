//! Structural validation over raw JSON
//!
//! - `Validate` checks a `serde_json::Value` against a wire shape
//! - `Report` aggregates every violation found in one pass
//! - `ValidateOptions` toggles strict handling of undeclared members
//! - `primitives` holds the format-checked scalar types
//!
//! Validators walk the whole payload before deciding, so a single rejected
//! document reports all of its problems at once, each cited by field path.

mod errors;
pub(crate) mod fields;
pub mod primitives;

pub use errors::{PayloadError, ValidationError, Violation, ViolationKind};

use serde_json::Value;

/// Knobs for a validation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Reject members the shape does not declare instead of dropping them.
    pub deny_undeclared: bool,
}

impl ValidateOptions {
    /// Lenient defaults: undeclared members are dropped silently.
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict mode: any undeclared member is a violation.
    pub fn strict() -> Self {
        Self {
            deny_undeclared: true,
        }
    }
}

/// Collects violations across one validation pass.
#[derive(Debug)]
pub struct Report {
    options: ValidateOptions,
    violations: Vec<Violation>,
}

impl Report {
    pub fn new() -> Self {
        Self::with_options(ValidateOptions::default())
    }

    pub fn with_options(options: ValidateOptions) -> Self {
        Self {
            options,
            violations: Vec::new(),
        }
    }

    /// Records one violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn options(&self) -> ValidateOptions {
        self.options
    }

    /// Closes the pass. `value` only survives when no violation was recorded.
    pub(crate) fn into_result<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        match value {
            Some(checked) if self.violations.is_empty() => Ok(checked),
            _ => Err(ValidationError::new(self.violations)),
        }
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks raw JSON against a declared wire shape.
pub trait Validate: Sized {
    /// Walks `value` at `path`, recording violations into `report`.
    ///
    /// Returns `Some` only when this node produced a usable value; the
    /// report, not the return, decides whether the whole payload passes.
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self>;

    /// Validates with lenient defaults.
    fn validate(value: &Value) -> Result<Self, ValidationError> {
        Self::validate_with(value, ValidateOptions::default())
    }

    /// Validates with explicit options.
    fn validate_with(value: &Value, options: ValidateOptions) -> Result<Self, ValidationError> {
        let mut report = Report::with_options(options);
        let checked = Self::check(value, "", &mut report);
        report.into_result(checked).map_err(|err| {
            tracing::debug!(
                payload = std::any::type_name::<Self>(),
                violations = err.violations().len(),
                "payload rejected"
            );
            err
        })
    }
}

/// A closed set of wire string literals.
pub trait WireEnum: Sized {
    /// Accepted literals, in declaration order.
    const ALLOWED: &'static [&'static str];

    /// Parses one wire literal.
    fn from_wire(text: &str) -> Option<Self>;

    /// Returns the wire literal this value serializes as.
    fn as_wire(&self) -> &'static str;
}

impl<T: Validate> Validate for Vec<T> {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let items = fields::array(value, path, report)?;
        let mut out = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            match T::check(item, &fields::index(path, i), report) {
                Some(checked) => out.push(checked),
                None => ok = false,
            }
        }
        ok.then_some(out)
    }
}

impl Validate for String {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        fields::string(value, path, report).map(str::to_owned)
    }
}

impl Validate for i64 {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        fields::integer(value, path, report)
    }
}

/// Parses a JSON document and validates it in one step.
pub fn parse_json<T: Validate>(input: &str) -> Result<T, PayloadError> {
    let value: Value = serde_json::from_str(input)?;
    Ok(T::validate(&value)?)
}
