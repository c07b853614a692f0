//! Format-checked scalar types
//!
//! - `Identifier`: 17 to 21 decimal digits, kept as a string
//! - `Date`: `YYYY-MM-DD` calendar date
//! - `Timestamp`: RFC 3339 date-time, normalized to UTC
//! - `WebhookSecret`: `whs_`-prefixed credential with redacted `Debug`
//!
//! Each type validates on construction, so holding one is proof the wire
//! form was well-formed. Serde goes through the same checks via
//! `try_from`/`into` string conversions.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::errors::Violation;
use super::{fields, Report, Validate};

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{17,21}$").expect("identifier pattern is valid"));

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

static SECRET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{}[A-Za-z0-9]+$", SECRET_PREFIX)).expect("secret pattern is valid")
});

/// Prefix every webhook signing secret carries on the wire.
pub const SECRET_PREFIX: &str = "whs_";

/// A scalar failed its wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("identifier must be 17 to 21 decimal digits")]
    Identifier,
    #[error("date must be a valid YYYY-MM-DD calendar date")]
    Date,
    #[error("timestamp must be an RFC 3339 date-time")]
    Timestamp,
    #[error("webhook secret must be whs_ followed by alphanumerics")]
    Secret,
}

impl FormatError {
    /// Noun phrase describing the expected format, for violation detail.
    pub fn expected(&self) -> &'static str {
        match self {
            FormatError::Identifier => "a 17-21 digit identifier",
            FormatError::Date => "a YYYY-MM-DD date",
            FormatError::Timestamp => "an RFC 3339 timestamp",
            FormatError::Secret => "a whs_-prefixed secret",
        }
    }
}

/// Platform snowflake identifier, carried as a digit string.
///
/// The wire form is a string because the numeric value can exceed the
/// precision JSON consumers keep for numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    pub fn new(raw: impl Into<String>) -> Result<Self, FormatError> {
        let raw = raw.into();
        if IDENTIFIER_RE.is_match(&raw) {
            Ok(Self(raw))
        } else {
            Err(FormatError::Identifier)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = FormatError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> String {
        id.0
    }
}

impl Validate for Identifier {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let text = fields::string(value, path, report)?;
        match text.parse() {
            Ok(id) => Some(id),
            Err(err) => {
                report.push(Violation::invalid_format(path, err.expected(), text));
                None
            }
        }
    }
}

/// Calendar date in `YYYY-MM-DD` form.
///
/// The textual shape is checked before parsing, so unpadded forms such as
/// `2024-1-2` are rejected even though chrono would accept them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(raw: &str) -> Result<Self, FormatError> {
        if !DATE_RE.is_match(raw) {
            return Err(FormatError::Date);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| FormatError::Date)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Date {
    type Error = FormatError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(&raw)
    }
}

impl From<Date> for String {
    fn from(date: Date) -> String {
        date.to_string()
    }
}

impl Validate for Date {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let text = fields::string(value, path, report)?;
        match text.parse() {
            Ok(date) => Some(date),
            Err(err) => {
                report.push(Violation::invalid_format(path, err.expected(), text));
                None
            }
        }
    }
}

/// RFC 3339 instant, held in UTC regardless of the wire offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(raw: &str) -> Result<Self, FormatError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|instant| Self(instant.with_timezone(&Utc)))
            .map_err(|_| FormatError::Timestamp)
    }

    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FromStr for Timestamp {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = FormatError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(&raw)
    }
}

impl From<Timestamp> for String {
    fn from(instant: Timestamp) -> String {
        instant.to_string()
    }
}

impl Validate for Timestamp {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let text = fields::string(value, path, report)?;
        match text.parse() {
            Ok(instant) => Some(instant),
            Err(err) => {
                report.push(Violation::invalid_format(path, err.expected(), text));
                None
            }
        }
    }
}

/// Webhook signing secret. `Debug` never prints the raw value.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebhookSecret(String);

impl WebhookSecret {
    pub fn new(raw: impl Into<String>) -> Result<Self, FormatError> {
        let raw = raw.into();
        if SECRET_RE.is_match(&raw) {
            Ok(Self(raw))
        } else {
            Err(FormatError::Secret)
        }
    }

    /// Returns the raw secret. Callers own keeping it out of logs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WebhookSecret").field(&"whs_***").finish()
    }
}

impl FromStr for WebhookSecret {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for WebhookSecret {
    type Error = FormatError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<WebhookSecret> for String {
    fn from(secret: WebhookSecret) -> String {
        secret.0
    }
}

impl Validate for WebhookSecret {
    fn check(value: &Value, path: &str, report: &mut Report) -> Option<Self> {
        let text = fields::string(value, path, report)?;
        match text.parse() {
            Ok(secret) => Some(secret),
            Err(err) => {
                report.push(Violation::invalid_format(path, err.expected(), text));
                None
            }
        }
    }
}
