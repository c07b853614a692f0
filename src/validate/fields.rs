//! Field readers for record validators
//!
//! Each reader checks one member of a raw JSON value, records a violation on
//! mismatch, and returns `Option` so a record check can visit every field
//! before deciding. Paths compose the same way errors report them:
//! `user.social.github`, `shards[2]`.

use serde_json::{Map, Value};

use super::errors::Violation;
use super::{Report, Validate, WireEnum};

/// Joins a member name onto a path prefix.
pub(crate) fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Joins an element index onto a path prefix.
pub(crate) fn index(prefix: &str, i: usize) -> String {
    format!("{}[{}]", prefix, i)
}

/// Returns the JSON type name used in violation detail.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Expects `value` to be an object.
pub(crate) fn object<'a>(
    value: &'a Value,
    path: &str,
    report: &mut Report,
) -> Option<&'a Map<String, Value>> {
    match value.as_object() {
        Some(obj) => Some(obj),
        None => {
            report.push(Violation::invalid_type(path, "object", json_type_name(value)));
            None
        }
    }
}

/// Expects `value` to be an array.
pub(crate) fn array<'a>(
    value: &'a Value,
    path: &str,
    report: &mut Report,
) -> Option<&'a Vec<Value>> {
    match value.as_array() {
        Some(arr) => Some(arr),
        None => {
            report.push(Violation::invalid_type(path, "array", json_type_name(value)));
            None
        }
    }
}

/// Expects a string value.
pub(crate) fn string<'a>(value: &'a Value, path: &str, report: &mut Report) -> Option<&'a str> {
    match value.as_str() {
        Some(text) => Some(text),
        None => {
            report.push(Violation::invalid_type(path, "string", json_type_name(value)));
            None
        }
    }
}

/// Expects an integer value; floats are rejected, never truncated.
pub(crate) fn integer(value: &Value, path: &str, report: &mut Report) -> Option<i64> {
    match value.as_i64() {
        Some(n) => Some(n),
        None => {
            report.push(Violation::invalid_type(path, "integer", json_type_name(value)));
            None
        }
    }
}

/// Expects any number.
pub(crate) fn number(value: &Value, path: &str, report: &mut Report) -> Option<f64> {
    match value.as_f64() {
        Some(n) => Some(n),
        None => {
            report.push(Violation::invalid_type(path, "number", json_type_name(value)));
            None
        }
    }
}

/// Expects a boolean value.
pub(crate) fn boolean(value: &Value, path: &str, report: &mut Report) -> Option<bool> {
    match value.as_bool() {
        Some(flag) => Some(flag),
        None => {
            report.push(Violation::invalid_type(path, "boolean", json_type_name(value)));
            None
        }
    }
}

/// Looks up a required member; absence records a missing-field violation.
pub(crate) fn required<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    key: &str,
    report: &mut Report,
) -> Option<&'a Value> {
    match obj.get(key) {
        Some(value) => Some(value),
        None => {
            report.push(Violation::missing_field(&join(path, key)));
            None
        }
    }
}

/// Looks up an optional member; an explicit `null` reads as absent.
pub(crate) fn optional<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|value| !value.is_null())
}

/// Reads a required member through a nested validator.
pub(crate) fn required_field<T: Validate>(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    report: &mut Report,
) -> Option<T> {
    let value = required(obj, path, key, report)?;
    T::check(value, &join(path, key), report)
}

/// Reads an optional member through a nested validator.
pub(crate) fn optional_field<T: Validate>(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    report: &mut Report,
) -> Option<Option<T>> {
    match optional(obj, key) {
        Some(value) => T::check(value, &join(path, key), report).map(Some),
        None => Some(None),
    }
}

/// Reads a required string member.
pub(crate) fn required_string(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    report: &mut Report,
) -> Option<String> {
    let value = required(obj, path, key, report)?;
    string(value, &join(path, key), report).map(str::to_owned)
}

/// Reads an optional string member.
pub(crate) fn optional_string(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    report: &mut Report,
) -> Option<Option<String>> {
    match optional(obj, key) {
        Some(value) => string(value, &join(path, key), report)
            .map(str::to_owned)
            .map(Some),
        None => Some(None),
    }
}

/// Reads a required integer member.
pub(crate) fn required_integer(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    report: &mut Report,
) -> Option<i64> {
    let value = required(obj, path, key, report)?;
    integer(value, &join(path, key), report)
}

/// Reads an optional integer member.
pub(crate) fn optional_integer(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    report: &mut Report,
) -> Option<Option<i64>> {
    match optional(obj, key) {
        Some(value) => integer(value, &join(path, key), report).map(Some),
        None => Some(None),
    }
}

/// Reads a required number member.
pub(crate) fn required_number(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    report: &mut Report,
) -> Option<f64> {
    let value = required(obj, path, key, report)?;
    number(value, &join(path, key), report)
}

/// Reads a required boolean member.
pub(crate) fn required_boolean(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    report: &mut Report,
) -> Option<bool> {
    let value = required(obj, path, key, report)?;
    boolean(value, &join(path, key), report)
}

/// Reads a string carrying a closed wire literal.
pub(crate) fn wire_enum<T: WireEnum>(value: &Value, path: &str, report: &mut Report) -> Option<T> {
    let text = string(value, path, report)?;
    match T::from_wire(text) {
        Some(literal) => Some(literal),
        None => {
            report.push(Violation::invalid_enum(path, T::ALLOWED, text));
            None
        }
    }
}

/// Strict-mode scan: records a violation for every member the schema does
/// not declare. A no-op under the lenient default, where undeclared members
/// are dropped during normalization.
pub(crate) fn check_undeclared(
    obj: &Map<String, Value>,
    path: &str,
    declared: &[&str],
    report: &mut Report,
) {
    if !report.options().deny_undeclared {
        return;
    }
    for key in obj.keys() {
        if !declared.contains(&key.as_str()) {
            report.push(Violation::undeclared_field(&join(path, key)));
        }
    }
}
