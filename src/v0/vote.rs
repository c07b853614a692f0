//! Vote-check query and response

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::primitives::Identifier;
use crate::validate::{fields, Report, Validate, Violation};

/// Whether the queried user voted in the current voting window.
///
/// The wire value is exactly the integer `0` or `1`. The API contract makes
/// this an exclusive two-literal choice rather than a boolean, and the
/// distinction is kept here for exact wire compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Voted {
    No,
    Yes,
}

impl Voted {
    /// The wire integer, `0` or `1`.
    pub fn as_i64(&self) -> i64 {
        match self {
            Voted::No => 0,
            Voted::Yes => 1,
        }
    }

    /// Convenience coercion for consumers who only branch on it.
    pub fn as_bool(&self) -> bool {
        matches!(self, Voted::Yes)
    }
}

impl TryFrom<i64> for Voted {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Voted::No),
            1 => Ok(Voted::Yes),
            other => Err(format!("voted must be exactly 0 or 1, got {}", other)),
        }
    }
}

impl From<Voted> for i64 {
    fn from(voted: Voted) -> i64 {
        voted.as_i64()
    }
}

impl Validate for Voted {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let n = fields::integer(value, path, report)?;
        match Voted::try_from(n) {
            Ok(voted) => Some(voted),
            Err(_) => {
                report.push(Violation::invalid_enum(path, &["0", "1"], n.to_string()));
                None
            }
        }
    }
}

/// Vote-check query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckQuery {
    #[serde(rename = "userId")]
    pub user_id: Identifier,
}

const CHECK_QUERY_FIELDS: &[&str] = &["userId"];

impl Validate for CheckQuery {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, CHECK_QUERY_FIELDS, report);

        let user_id = fields::required_field::<Identifier>(obj, path, "userId", report);

        Some(Self { user_id: user_id? })
    }
}

/// Vote-check response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub voted: Voted,
}

const CHECK_RESPONSE_FIELDS: &[&str] = &["voted"];

impl Validate for CheckResponse {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, CHECK_RESPONSE_FIELDS, report);

        let voted = fields::required_field::<Voted>(obj, path, "voted", report);

        Some(Self { voted: voted? })
    }
}
