//! Problem-details error body

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validate::{fields, Report, Validate, Violation};

/// Error body in the `application/problem+json` convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// URI reference identifying the problem class.
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    /// HTTP status the error was served with.
    pub status: u16,
    pub detail: String,
}

const PROBLEM_FIELDS: &[&str] = &["type", "title", "status", "detail"];

impl Validate for Problem {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let obj = fields::object(value, path, report)?;
        fields::check_undeclared(obj, path, PROBLEM_FIELDS, report);

        let kind = fields::required_string(obj, path, "type", report);
        let title = fields::required_string(obj, path, "title", report);
        let status = match fields::required_integer(obj, path, "status", report) {
            Some(n) if (100..=599).contains(&n) => Some(n as u16),
            Some(n) => {
                report.push(Violation::invalid_format(
                    &fields::join(path, "status"),
                    "an HTTP status code",
                    n.to_string(),
                ));
                None
            }
            None => None,
        };
        let detail = fields::required_string(obj, path, "detail", report);

        Some(Self {
            kind: kind?,
            title: title?,
            status: status?,
            detail: detail?,
        })
    }
}
